//! Injectable segmentation capability
//!
//! The aggregator only needs `segment(text) -> tokens`; how a segmenter
//! chooses word boundaries is its own business. Tokens are borrowed
//! substrings of the segmented text.

use crate::error::Result;

/// Splits a sentence into an exhaustive, order-preserving token sequence
pub trait Tokenizer: Send + Sync {
    /// Segment `text` into tokens
    fn segment<'a>(&self, text: &'a str) -> Result<Vec<&'a str>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Adapts a plain function or closure into a [`Tokenizer`]
pub struct FnTokenizer<F> {
    segment_fn: F,
}

impl<F> FnTokenizer<F>
where
    F: for<'a> Fn(&'a str) -> Vec<&'a str> + Send + Sync,
{
    /// Wrap `segment_fn`
    pub fn new(segment_fn: F) -> Self {
        Self { segment_fn }
    }
}

impl<F> Tokenizer for FnTokenizer<F>
where
    F: for<'a> Fn(&'a str) -> Vec<&'a str> + Send + Sync,
{
    fn segment<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        Ok((self.segment_fn)(text))
    }

    fn name(&self) -> &'static str {
        "fn"
    }
}

#[cfg(feature = "jieba")]
pub use self::jieba::JiebaTokenizer;

#[cfg(feature = "jieba")]
mod jieba {
    use super::Tokenizer;
    use crate::error::Result;
    use jieba_rs::Jieba;

    /// Search-engine mode segmentation backed by `jieba-rs`
    ///
    /// Search mode emits long compounds together with their shorter
    /// dictionary sub-words, so both "北京大学" and "北京" may appear.
    pub struct JiebaTokenizer {
        jieba: Jieba,
        hmm: bool,
    }

    impl JiebaTokenizer {
        /// Load the bundled dictionary with HMM discovery of unknown words
        pub fn new() -> Self {
            Self {
                jieba: Jieba::new(),
                hmm: true,
            }
        }

        /// Toggle HMM-based discovery of out-of-dictionary words
        pub fn hmm(mut self, enabled: bool) -> Self {
            self.hmm = enabled;
            self
        }
    }

    impl Default for JiebaTokenizer {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Tokenizer for JiebaTokenizer {
        fn segment<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
            Ok(self.jieba.cut_for_search(text, self.hmm))
        }

        fn name(&self) -> &'static str {
            "jieba"
        }
    }

}
