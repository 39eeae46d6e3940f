//! Selection of sentences that contain the keyword

use crate::keyword::Keyword;

/// Keep sentences containing `keyword`, preserving order
///
/// Hits are owned so that the request's stream can outlive the decoded text.
pub fn filter<'t, I>(sentences: I, keyword: &Keyword) -> Vec<String>
where
    I: IntoIterator<Item = &'t str>,
{
    sentences
        .into_iter()
        .filter(|sentence| keyword.is_hit(sentence))
        .map(str::to_owned)
        .collect()
}
