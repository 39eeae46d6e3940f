//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use keyterm_core::ProgressEvent;
use std::time::Duration;

/// Progress bar over a request's hits, drawn on stderr
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
        }
    }

    /// Advance the bar to the counters carried by `event`
    pub fn update(&mut self, event: &ProgressEvent) {
        if self.quiet {
            return;
        }
        let Some(report) = event.report() else {
            return;
        };

        let pb = self
            .progress_bar
            .get_or_insert_with(|| Self::create_bar(report.total as u64));
        pb.set_position(report.processed as u64);
        if let Some(top) = report.ranked_terms.first() {
            pb.set_message(format!("top: {} ({})", top.term, top.count));
        }
    }

    fn create_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} sentences {msg}")
        {
            pb.set_style(style.progress_chars("##-"));
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Whether a bar has been drawn
    pub fn is_active(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("Complete");
        }
    }

    /// Stop the bar in place after a failure
    pub fn abandon(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.abandon_with_message("Aborted");
        }
    }
}
