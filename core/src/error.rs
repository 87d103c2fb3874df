//! Errors reported by the prefix index.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The empty string is never stored; the root already stands for the
    /// empty prefix.
    #[error("cannot insert an empty word")]
    EmptyWord,
}
