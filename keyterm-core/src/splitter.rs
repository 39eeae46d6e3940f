//! Sentence splitting on a fixed multi-delimiter rule

use regex::Regex;
use std::sync::OnceLock;

/// Sentence delimiters: full- and half-width terminators, comma, semicolon, newline
pub const DELIMITER_CLASS: &str = r"[。！？\n,.!?；;]+";

static DELIMITERS: OnceLock<Regex> = OnceLock::new();

fn delimiters() -> &'static Regex {
    DELIMITERS.get_or_init(|| Regex::new(DELIMITER_CLASS).expect("delimiter class is a valid regex"))
}

/// Whether `c` belongs to the delimiter set
pub fn is_delimiter(c: char) -> bool {
    matches!(
        c,
        '。' | '！' | '？' | '\n' | ',' | '.' | '!' | '?' | '；' | ';'
    )
}

/// Split text into trimmed, non-empty sentences in original order
pub fn split(text: &str) -> impl Iterator<Item = &str> + '_ {
    delimiters()
        .split(text)
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
}
