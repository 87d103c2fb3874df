//! listcomplete crate root
//!
//! Harvests a word vocabulary from real-estate listing exports (CSV files and
//! workbooks) into a `listcomplete_core::PrefixIndex` and completes prefixes
//! against it.
//!
//! Public API exported here:
//! - `Tokenizer` and `normalize_query` from `tokenize`
//! - `SourceSpec`, `SourceKind`, `SourceFormat` from `source`
//! - `VocabularyBuilder` and its reports from `builder`
//! - `Autocomplete` from `autocomplete`
//! - `VocabConfig` from `config`

pub mod autocomplete;
pub mod builder;
pub mod config;
pub mod error;
pub mod reader;
pub mod source;
pub mod tokenize;

pub use listcomplete_core::{Config, IndexError, PrefixIndex, SortOrder, WordMatch};

pub use autocomplete::Autocomplete;
pub use builder::{BuildReport, SourceFailure, SourceReport, VocabularyBuilder};
pub use config::VocabConfig;
pub use error::IngestError;
pub use source::{reference_sources, ColumnSelection, Layout, SourceFormat, SourceKind, SourceSpec};
pub use tokenize::{normalize_query, Tokenizer};
