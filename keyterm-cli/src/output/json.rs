//! JSON Lines output formatter

use super::OutputFormatter;
use anyhow::Result;
use keyterm_core::ProgressEvent;
use std::io::Write;

/// JSON Lines formatter - outputs one event object per line
pub struct JsonLinesFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesFormatter<W> {
    /// Create a new JSON Lines formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonLinesFormatter<W> {
    fn format_event(&mut self, event: &ProgressEvent) -> Result<()> {
        serde_json::to_writer(&mut self.writer, event)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
