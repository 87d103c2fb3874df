//! Front-end configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All query options from `listcomplete_core::Config` (flattened via serde)
//! - The list of data sources to harvest
//! - Tokenizer and build options
//!
//! # Example
//!
//! ```rust
//! use listcomplete::VocabConfig;
//!
//! let config = VocabConfig::from_toml_str(r#"
//!     order = "frequency"
//!     max_results = 10
//!
//!     [[sources]]
//!     kind = "remax"
//!     path = "data/remax_listings.csv"
//! "#).unwrap();
//! assert_eq!(config.sources.len(), 1);
//! assert_eq!(config.base().max_results, Some(10));
//! ```
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::source::{reference_sources, SourceSpec};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VocabConfig {
    /// Query options (ordering, result cap, frequency display)
    #[serde(flatten)]
    pub base: listcomplete_core::Config,

    /// Fold compatibility characters (NFKC) before tokenizing
    pub fold_unicode: bool,

    /// Read sources on separate threads
    pub parallel: bool,

    /// Sources harvested into the vocabulary, in order
    pub sources: Vec<SourceSpec>,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            base: listcomplete_core::Config::default(),
            fold_unicode: false,
            parallel: false,
            sources: reference_sources(Path::new("data")),
        }
    }
}

impl VocabConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: VocabConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &listcomplete_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config
    pub fn base_mut(&mut self) -> &mut listcomplete_core::Config {
        &mut self.base
    }
}
