//! Event output formatting

use anyhow::Result;
use keyterm_core::ProgressEvent;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Trait for output formatters
///
/// Each event is written and flushed before the next batch runs, so a
/// downstream reader sees progress as it happens.
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single event
    fn format_event(&mut self, event: &ProgressEvent) -> Result<()>;

    /// Finalize output
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod sse;
pub mod text;

pub use json::JsonLinesFormatter;
pub use sse::SseFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON event object per line
    #[default]
    Jsonl,
    /// Server-sent events frames (`data: {json}` + blank line)
    Sse,
    /// Human-readable progress and ranking
    Text,
}

impl OutputFormat {
    /// Build a formatter writing to `writer`
    pub fn formatter<W>(self, writer: W) -> Box<dyn OutputFormatter>
    where
        W: Write + Send + Sync + 'static,
    {
        match self {
            OutputFormat::Jsonl => Box::new(JsonLinesFormatter::new(writer)),
            OutputFormat::Sse => Box::new(SseFormatter::new(writer)),
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        }
    }
}
