//! Word extraction from free-text fields.
//!
//! Text is split on runs of non-word characters, tokens that are not purely
//! ASCII letters are dropped, and the survivors are lower-cased. Street
//! numbers, postal codes and prices therefore never reach the index.
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("separator pattern is valid"));

static ALPHA_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]+$").expect("word pattern is valid"));

/// Splits cell text into normalized vocabulary words.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    /// Apply NFKC before splitting so compatibility forms (full-width
    /// letters, ligatures) fold to plain ASCII.
    pub fold_unicode: bool,
}

impl Tokenizer {
    pub fn new(fold_unicode: bool) -> Self {
        Self { fold_unicode }
    }

    /// Normalized words of `text`, in order of appearance.
    ///
    /// ```
    /// use listcomplete::Tokenizer;
    ///
    /// let words = Tokenizer::default().tokens("123 Maple St., Unit 4B");
    /// assert_eq!(words, vec!["maple", "st", "unit"]);
    /// ```
    pub fn tokens(&self, text: &str) -> Vec<String> {
        if self.fold_unicode {
            let folded: String = text.nfkc().collect();
            split_words(&folded)
        } else {
            split_words(text)
        }
    }
}

fn split_words(text: &str) -> Vec<String> {
    SEPARATOR
        .split(text)
        .filter(|tok| ALPHA_WORD.is_match(tok))
        .map(|tok| tok.to_ascii_lowercase())
        .collect()
}

/// Normalize a user-typed prefix the same way indexed words were normalized.
pub fn normalize_query(prefix: &str) -> String {
    prefix.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_lowercases() {
        let t = Tokenizer::default();
        assert_eq!(
            t.tokens("Detached HOUSE, near Riverside-Park"),
            vec!["detached", "house", "near", "riverside", "park"]
        );
    }

    #[test]
    fn drops_mixed_and_numeric_tokens() {
        let t = Tokenizer::default();
        assert_eq!(t.tokens("2br 1200 sqft $450,000 N9A"), vec!["sqft"]);
        assert!(t.tokens("   ,,, ").is_empty());
        assert!(t.tokens("").is_empty());
    }

    #[test]
    fn underscore_joins_tokens() {
        // `_` is a word character, so this token mixes in a non-letter.
        assert!(Tokenizer::default().tokens("open_house").is_empty());
    }

    #[test]
    fn non_ascii_letters_split_words() {
        let t = Tokenizer::default();
        assert_eq!(t.tokens("Café Rouge"), vec!["caf", "rouge"]);
        assert!(t.tokens("ＭＡＰＬＥ").is_empty());
    }

    #[test]
    fn unicode_folding_recovers_fullwidth() {
        let t = Tokenizer::new(true);
        assert_eq!(t.tokens("ＭＡＰＬＥ ｔｒｅｅ"), vec!["maple", "tree"]);
    }

    #[test]
    fn query_normalization() {
        assert_eq!(normalize_query("  MaP \n"), "map");
        assert_eq!(normalize_query(""), "");
    }
}
