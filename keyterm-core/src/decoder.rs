//! Best-effort text decoding for byte buffers of unknown encoding
//!
//! Decoding never fails. The cascade is:
//!
//! 1. A byte-order mark, or failing that a statistical guess from
//!    [`chardetng`], proposes an encoding which is tried strictly.
//! 2. An ordered chain of candidate encodings is tried strictly, first
//!    success wins.
//! 3. The fallback encoding (GB18030 unless configured) decodes the input
//!    with replacement, so every byte sequence yields some text and only
//!    the malformed sequences are lost.

use crate::error::{Error, Result};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, BIG5, GB18030, GBK, UTF_8};
use std::borrow::Cow;

/// Label accepted for UTF-8 with an optional leading signature
pub const UTF8_SIG_LABEL: &str = "utf-8-sig";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One entry of the candidate chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Candidate {
    /// UTF-8, with a leading byte-order mark stripped when present
    Utf8Sig,
    /// Any encoding known to `encoding_rs`
    Encoding(&'static Encoding),
}

impl Candidate {
    /// Resolve a WHATWG label (plus `utf-8-sig`) to a candidate
    pub fn from_label(label: &str) -> Result<Self> {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case(UTF8_SIG_LABEL) || trimmed.eq_ignore_ascii_case("utf_8_sig")
        {
            return Ok(Candidate::Utf8Sig);
        }
        Encoding::for_label(trimmed.as_bytes())
            .map(Candidate::Encoding)
            .ok_or_else(|| Error::Configuration(format!("unknown encoding label: {label}")))
    }

    /// Display name of the candidate
    pub fn name(&self) -> &'static str {
        match self {
            Candidate::Utf8Sig => UTF8_SIG_LABEL,
            Candidate::Encoding(encoding) => encoding.name(),
        }
    }

    /// The underlying `encoding_rs` encoding
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            Candidate::Utf8Sig => UTF_8,
            Candidate::Encoding(encoding) => *encoding,
        }
    }

    /// Decode without replacement; `None` on any malformed sequence
    fn decode_strict<'a>(&self, raw: &'a [u8]) -> Option<Cow<'a, str>> {
        match self {
            Candidate::Utf8Sig => {
                let body = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
                UTF_8.decode_without_bom_handling_and_without_replacement(body)
            }
            Candidate::Encoding(encoding) => {
                encoding.decode_without_bom_handling_and_without_replacement(raw)
            }
        }
    }
}

/// Decoder settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Run BOM sniffing and statistical detection before the candidate chain
    pub detect: bool,
    candidates: Vec<Candidate>,
    fallback: &'static Encoding,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            detect: true,
            candidates: vec![
                Candidate::Utf8Sig,
                Candidate::Encoding(UTF_8),
                Candidate::Encoding(GB18030),
                Candidate::Encoding(GBK),
                Candidate::Encoding(BIG5),
            ],
            fallback: GB18030,
        }
    }
}

impl DecoderConfig {
    /// Build a configuration from an ordered list of encoding labels
    pub fn with_candidates<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates = labels
            .into_iter()
            .map(|label| Candidate::from_label(label.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        if candidates.is_empty() {
            return Err(Error::Configuration(
                "decoder candidate list must not be empty".into(),
            ));
        }

        Ok(Self {
            candidates,
            ..Self::default()
        })
    }

    /// Set the encoding used for lossy decoding by label
    pub fn with_fallback(mut self, label: &str) -> Result<Self> {
        self.fallback = Candidate::from_label(label)?.encoding();
        Ok(self)
    }

    /// Enable or disable the detection step
    pub fn detect(mut self, detect: bool) -> Self {
        self.detect = detect;
        self
    }

    /// Ordered candidate chain
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Encoding used for the lossy fallback
    pub fn fallback(&self) -> &'static Encoding {
        self.fallback
    }
}

/// Which step of the cascade produced the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
    /// BOM sniffing or statistical detection
    Detected,
    /// A candidate from the configured chain
    Candidate,
    /// Lossy decoding with replacement characters
    Fallback,
}

/// Result of decoding a byte buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Decoded text
    pub text: String,
    /// Name of the encoding that produced `text`
    pub encoding: &'static str,
    /// Cascade step that succeeded
    pub stage: DecodeStage,
}

impl Decoded {
    /// Whether unmappable input was replaced
    pub fn is_lossy(&self) -> bool {
        self.stage == DecodeStage::Fallback
    }
}

/// Charset-recovering decoder
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with the default East-Asian candidate chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder with a custom configuration
    pub fn with_config(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode `raw` into text, never failing
    pub fn decode(&self, raw: &[u8]) -> Decoded {
        if self.config.detect {
            let (encoding, bom_len) = propose(raw);
            match encoding.decode_without_bom_handling_and_without_replacement(&raw[bom_len..]) {
                Some(text) => {
                    log::debug!("detected encoding {} accepted", encoding.name());
                    return Decoded {
                        text: text.into_owned(),
                        encoding: encoding.name(),
                        stage: DecodeStage::Detected,
                    };
                }
                None => log::debug!("detected encoding {} rejected", encoding.name()),
            }
        }

        for candidate in &self.config.candidates {
            match candidate.decode_strict(raw) {
                Some(text) => {
                    log::debug!("candidate {} accepted", candidate.name());
                    return Decoded {
                        text: text.into_owned(),
                        encoding: candidate.name(),
                        stage: DecodeStage::Candidate,
                    };
                }
                None => log::debug!("candidate {} rejected", candidate.name()),
            }
        }

        let fallback = self.config.fallback();
        let (text, had_errors) = fallback.decode_without_bom_handling(raw);
        log::warn!(
            "no candidate decoded the input cleanly; fell back to lossy {} (replacements: {})",
            fallback.name(),
            had_errors
        );
        Decoded {
            text: text.into_owned(),
            encoding: fallback.name(),
            stage: DecodeStage::Fallback,
        }
    }
}

/// Decode with the default configuration, returning only the text
pub fn decode(raw: &[u8]) -> String {
    Decoder::new().decode(raw).text
}

/// Propose an encoding and the length of any byte-order mark to skip
fn propose(raw: &[u8]) -> (&'static Encoding, usize) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(raw) {
        return (encoding, bom_len);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(raw, true);
    (detector.guess(None, true), 0)
}
