//! Aggregate command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::output::{OutputFormat, OutputFormatter};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use keyterm_core::{Config, ProgressEvent, Processor, Request};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

/// Arguments for the aggregate command
#[derive(Debug, Args)]
pub struct AggregateArgs {
    /// Input text file (any common Chinese or Unicode encoding)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Keyword the counted terms must contain
    #[arg(short, long, value_name = "KEYWORD")]
    pub keyword: String,

    /// Ranked terms per event [default: 20]
    #[arg(short = 'n', long, value_name = "N")]
    pub top_n: Option<usize>,

    /// Sentences tokenized between progress events [default: 200]
    #[arg(long, value_name = "N")]
    pub batch_size: Option<usize>,

    /// Output format [default: jsonl]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "KEYTERM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl AggregateArgs {
    /// Execute the aggregate command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting aggregation");
        log::debug!("Arguments: {:?}", self);

        let cli_config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };
        let config = self.core_config(&cli_config)?;
        let format = self.format.unwrap_or(cli_config.output.format);

        // Without -n the processor ranks the configured default.
        let mut request = Request::new(&self.input, &self.keyword);
        if let Some(top_n) = self.top_n {
            request = request.with_top_n(top_n);
        }
        let processor = Processor::with_jieba(config);
        let stream = processor.stream(&request).map_err(CliError::from)?;

        let mut formatter = self.create_formatter(format)?;
        let mut progress = ProgressReporter::new(self.quiet);
        let mut failure = None;

        for event in stream {
            progress.update(&event);
            if let ProgressEvent::Error { message } = &event {
                failure = Some(message.clone());
            }
            // A closed output ends the request; dropping the stream skips the remaining batches.
            if let Err(e) = formatter.format_event(&event) {
                progress.abandon();
                log::warn!("output closed, abandoning remaining batches");
                return Err(e.context("Failed to write event"));
            }
        }
        formatter.finish()?;

        match failure {
            Some(message) => {
                progress.abandon();
                Err(CliError::StreamFailed(message).into())
            }
            None => {
                progress.finish();
                Ok(())
            }
        }
    }

    /// Merge command-line overrides into the file configuration
    fn core_config(&self, cli_config: &CliConfig) -> Result<Config> {
        let mut merged = cli_config.clone();
        if let Some(batch_size) = self.batch_size {
            merged.pipeline.batch_size = batch_size;
        }
        Ok(merged.to_core().map_err(CliError::from)?)
    }

    fn create_formatter(&self, format: OutputFormat) -> Result<Box<dyn OutputFormatter>> {
        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                Ok(format.formatter(BufWriter::new(file)))
            }
            None => Ok(format.formatter(io::stdout())),
        }
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // Ignore a second initialization when several commands run in one process.
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }

        Ok(())
    }
}
