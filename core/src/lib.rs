//! listcomplete-core
//!
//! In-memory prefix index used to complete words from a harvested
//! vocabulary. The index knows nothing about where words come from; callers
//! normalize and insert them, then query by prefix.
//!
//! Public API:
//! - `PrefixIndex` - trie with per-word frequency counts
//! - `WordMatch` - a completed word and its frequency
//! - `PrefixIter` - lazy prefix enumeration
//! - `SortOrder` - lexicographic or frequency ordering of results
//! - `IndexError` - rejected insertions
//! - `Config` - query settings (ordering, result cap)
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::IndexError;

pub mod order;
pub use order::SortOrder;

pub mod trie;
pub use trie::{PrefixIndex, PrefixIter, WordMatch};

/// Generic query configuration.
///
/// Source-specific options (which files to read, how to tokenize them) live
/// in the front-end crate's config, which flattens this one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Ordering of returned completions.
    pub order: SortOrder,

    /// Maximum number of completions per query. `None` returns every match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<usize>,

    /// Print frequencies next to completed words.
    pub show_frequency: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            order: SortOrder::Lexicographic,
            max_results: None,
            show_frequency: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Query the index with this configuration's ordering and cap.
    pub fn query(&self, index: &PrefixIndex, prefix: &str) -> Vec<WordMatch> {
        index.suggest(prefix, self.order, self.max_results)
    }
}
