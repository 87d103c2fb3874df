//! Result ordering for completion queries.
use serde::{Deserialize, Serialize};

/// How completions are ordered.
///
/// `Lexicographic` is the traversal order of the trie itself (ascending
/// `char` values, a word before its extensions). `Frequency` puts the most
/// often inserted words first and falls back to lexicographic order on ties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Lexicographic,
    Frequency,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lexicographic" | "lex" | "alpha" => Ok(SortOrder::Lexicographic),
            "frequency" | "freq" => Ok(SortOrder::Frequency),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("frequency".parse::<SortOrder>(), Ok(SortOrder::Frequency));
        assert_eq!("FREQ".parse::<SortOrder>(), Ok(SortOrder::Frequency));
        assert_eq!("alpha".parse::<SortOrder>(), Ok(SortOrder::Lexicographic));
        assert_eq!(
            "newest".parse::<SortOrder>(),
            Err("unknown sort order: newest".to_string())
        );
    }
}
