//! Completion front end: a built vocabulary plus the query settings applied
//! to user-typed prefixes.
use listcomplete_core::{Config, PrefixIndex, WordMatch};

use crate::builder::{BuildReport, VocabularyBuilder};
use crate::config::VocabConfig;
use crate::tokenize::{normalize_query, Tokenizer};

/// Completes user input against a harvested vocabulary.
///
/// ```
/// use listcomplete::{Autocomplete, Config, PrefixIndex};
///
/// let mut index = PrefixIndex::new();
/// index.insert("maple").unwrap();
/// index.insert("mango").unwrap();
///
/// let ac = Autocomplete::from_index(index, Config::default());
/// let words: Vec<String> = ac.suggestions("MAP").into_iter().map(|m| m.word).collect();
/// assert_eq!(words, vec!["maple"]);
/// ```
#[derive(Debug)]
pub struct Autocomplete {
    index: PrefixIndex,
    config: Config,
}

impl Autocomplete {
    /// Harvest every configured source and wrap the resulting index.
    pub fn from_config(config: &VocabConfig) -> (Self, BuildReport) {
        let builder = VocabularyBuilder::new(Tokenizer::new(config.fold_unicode));
        let (index, report) = builder.build(&config.sources, config.parallel);
        (Self::from_index(index, config.base().clone()), report)
    }

    pub fn from_index(index: PrefixIndex, config: Config) -> Self {
        Self { index, config }
    }

    /// Completions for a raw prefix. The prefix is trimmed and lower-cased
    /// to match the normalized vocabulary.
    pub fn suggestions(&self, prefix: &str) -> Vec<WordMatch> {
        self.config.query(&self.index, &normalize_query(prefix))
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use listcomplete_core::SortOrder;

    fn sample() -> PrefixIndex {
        let mut index = PrefixIndex::new();
        for w in ["road", "road", "road", "roadway", "rock"] {
            index.insert(w).unwrap();
        }
        index
    }

    #[test]
    fn suggestions_normalize_prefix() {
        let ac = Autocomplete::from_index(sample(), Config::default());
        assert_eq!(
            ac.suggestions(" ROAD "),
            vec![WordMatch::new("road", 3), WordMatch::new("roadway", 1)]
        );
        assert!(ac.suggestions("x").is_empty());
    }

    #[test]
    fn suggestions_follow_config() {
        let mut ac = Autocomplete::from_index(sample(), Config::default());
        ac.config_mut().order = SortOrder::Frequency;
        ac.config_mut().max_results = Some(1);
        assert_eq!(ac.suggestions("ro"), vec![WordMatch::new("road", 3)]);
    }

    #[test]
    fn empty_prefix_lists_everything() {
        let ac = Autocomplete::from_index(sample(), Config::default());
        assert_eq!(ac.suggestions("").len(), 3);
    }
}
