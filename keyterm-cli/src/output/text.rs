//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use keyterm_core::{ProgressEvent, ProgressReport};
use std::io::Write;

/// How many terms a progress line previews
const PREVIEW_TERMS: usize = 3;

/// Plain text formatter - a summary line per progress event and a ranked
/// table for the final result
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_preview(&mut self, report: &ProgressReport) -> Result<()> {
        let preview: Vec<String> = report
            .ranked_terms
            .iter()
            .take(PREVIEW_TERMS)
            .map(|term| format!("{} ({})", term.term, term.count))
            .collect();
        writeln!(
            self.writer,
            "progress {}/{}: {}",
            report.processed,
            report.total,
            preview.join(", ")
        )?;
        Ok(())
    }

    fn write_table(&mut self, report: &ProgressReport) -> Result<()> {
        writeln!(self.writer, "done {}/{}", report.processed, report.total)?;
        for (rank, term) in report.ranked_terms.iter().enumerate() {
            writeln!(self.writer, "{:>4}. {}\t{}", rank + 1, term.term, term.count)?;
        }
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_event(&mut self, event: &ProgressEvent) -> Result<()> {
        match event {
            ProgressEvent::Progress(report) => self.write_preview(report)?,
            ProgressEvent::Done(report) => self.write_table(report)?,
            ProgressEvent::Error { message } => writeln!(self.writer, "error: {message}")?,
        }
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyterm_core::RankedTerm;

    #[test]
    fn test_progress_and_done_layout() {
        let ranked_terms = vec![
            RankedTerm::new("北京大学", 3),
            RankedTerm::new("北京市", 2),
            RankedTerm::new("北京天安门", 1),
            RankedTerm::new("北京欢迎", 1),
        ];
        let mut buffer = Vec::new();
        {
            let mut formatter = TextFormatter::new(&mut buffer);
            formatter
                .format_event(&ProgressEvent::Progress(ProgressReport {
                    processed: 2,
                    total: 4,
                    ranked_terms: ranked_terms.clone(),
                }))
                .unwrap();
            formatter
                .format_event(&ProgressEvent::Done(ProgressReport {
                    processed: 4,
                    total: 4,
                    ranked_terms,
                }))
                .unwrap();
        }

        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines[0],
            "progress 2/4: 北京大学 (3), 北京市 (2), 北京天安门 (1)"
        );
        assert_eq!(lines[1], "done 4/4");
        assert_eq!(lines[2], "   1. 北京大学\t3");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_error_line() {
        let mut buffer = Vec::new();
        TextFormatter::new(&mut buffer)
            .format_event(&ProgressEvent::Error {
                message: "boom".into(),
            })
            .unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "error: boom\n");
    }
}
