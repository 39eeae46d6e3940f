//! CLI command implementations

use crate::output::OutputFormat;
use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use keyterm_core::DecoderConfig;

pub mod aggregate;
pub mod generate_config;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Rank the terms that contain a keyword, streaming progress per batch
    Aggregate(aggregate::AggregateArgs),

    /// Generate a configuration template
    GenerateConfig(generate_config::GenerateConfigArgs),

    /// Validate a configuration file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,

    /// List the default decoder candidate chain
    Encodings,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Aggregate(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

impl ListCommands {
    /// Print the requested listing to stdout
    pub fn execute(&self) {
        for line in self.lines() {
            println!("{line}");
        }
    }

    fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Formats => {
                let mut lines = vec!["Available output formats:".to_string()];
                for format in OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        let help = value.get_help().map(ToString::to_string).unwrap_or_default();
                        lines.push(format!("  {:<8}{}", value.get_name(), help));
                    }
                }
                lines
            }
            ListCommands::Encodings => {
                let decoder = DecoderConfig::default();
                let mut lines = vec!["Default decoder candidates, tried in order:".to_string()];
                for (i, candidate) in decoder.candidates().iter().enumerate() {
                    lines.push(format!("  {}. {}", i + 1, candidate.name()));
                }
                lines.push(format!(
                    "Lossy fallback: {}",
                    decoder.fallback().name()
                ));
                lines.push("Any WHATWG encoding label is accepted in [decoder] candidates and fallback.".into());
                lines
            }
        }
    }
}
