//! Input sources for a request
//!
//! Reading is a one-shot blocking operation performed before any
//! decoding. I/O failures surface as [`Error::Access`], never as decode
//! problems.

use crate::decoder::{DecodeStage, Decoded, Decoder};
use crate::error::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Where a request's text comes from
pub enum Input {
    /// File path to read and decode
    File(PathBuf),
    /// Raw bytes of unknown encoding
    Bytes(Vec<u8>),
    /// Already-decoded text
    Text(String),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Text(text) => f
                .debug_tuple("Text")
                .field(&format!("<{} chars>", text.chars().count()))
                .finish(),
        }
    }
}

impl Input {
    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from decoded text
    pub fn from_text<S: Into<String>>(text: S) -> Self {
        Input::Text(text.into())
    }

    /// Read (if needed) and decode the input
    pub fn decode(self, decoder: &Decoder) -> Result<Decoded> {
        match self {
            Input::File(path) => {
                let raw = fs::read(&path).map_err(|source| Error::Access { path, source })?;
                Ok(decoder.decode(&raw))
            }
            Input::Bytes(raw) => Ok(decoder.decode(&raw)),
            Input::Text(text) => Ok(Decoded {
                text,
                encoding: "UTF-8",
                stage: DecodeStage::Candidate,
            }),
        }
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}
