//! Server-sent events output formatter

use super::OutputFormatter;
use anyhow::Result;
use keyterm_core::ProgressEvent;
use std::io::Write;

/// SSE formatter - frames every event as `data: {json}` followed by a blank line
pub struct SseFormatter<W: Write> {
    writer: W,
}

impl<W: Write> SseFormatter<W> {
    /// Create a new SSE formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for SseFormatter<W> {
    fn format_event(&mut self, event: &ProgressEvent) -> Result<()> {
        write!(self.writer, "data: ")?;
        serde_json::to_writer(&mut self.writer, event)?;
        write!(self.writer, "\n\n")?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
