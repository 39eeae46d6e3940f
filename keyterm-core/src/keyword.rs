//! The keyword a request aggregates around

use crate::error::{Error, Result};
use std::fmt;

/// A validated, non-empty keyword
///
/// Matching is a literal, case-sensitive substring test. Lengths are counted
/// in Unicode scalar values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    text: String,
}

impl Keyword {
    /// Validate and wrap a keyword
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.is_empty() {
            return Err(Error::InvalidRequest("keyword must not be empty".into()));
        }
        Ok(Self { text })
    }

    /// The keyword text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether a sentence contains the keyword
    pub fn is_hit(&self, sentence: &str) -> bool {
        sentence.contains(self.text.as_str())
    }

    /// Whether a token is a qualifying compound term
    ///
    /// The token must contain the keyword and be strictly longer than it.
    pub fn qualifies(&self, token: &str) -> bool {
        // Containing the keyword plus extra bytes means extra whole characters.
        token.len() > self.text.len() && token.contains(self.text.as_str())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Keyword {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_keyword_rejected() {
        let err = Keyword::new("").unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_whitespace_keyword_is_literal() {
        let keyword = Keyword::new(" ").unwrap();
        assert!(keyword.is_hit("a b"));
        assert!(!keyword.is_hit("ab"));
    }

    #[test]
    fn test_char_len_counts_scalars() {
        assert_eq!(Keyword::new("北京").unwrap().char_len(), 2);
        assert_eq!(Keyword::new("abc").unwrap().char_len(), 3);
    }

    #[test]
    fn test_hit_is_case_sensitive() {
        let keyword = Keyword::new("Rust").unwrap();
        assert!(keyword.is_hit("I like Rust a lot"));
        assert!(!keyword.is_hit("i like rust a lot"));
    }

    #[test]
    fn test_qualifies() {
        let keyword = Keyword::new("北京").unwrap();
        assert!(keyword.qualifies("北京市"));
        assert!(keyword.qualifies("老北京"));
        assert!(!keyword.qualifies("北京"));
        assert!(!keyword.qualifies("北"));
        assert!(!keyword.qualifies("天安门"));
    }

    #[test]
    fn test_qualifies_uses_char_length() {
        // "é" is two bytes; "éa" is three bytes but two characters.
        let keyword = Keyword::new("éa").unwrap();
        assert!(!keyword.qualifies("éa"));
        assert!(keyword.qualifies("éab"));
    }
}
