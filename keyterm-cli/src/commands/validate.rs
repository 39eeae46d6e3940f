//! Validate command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use anyhow::Result;
use clap::Args;
use keyterm_core::Config;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the configuration file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub config: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating configuration: {}", self.config.display());

        match self.load() {
            Ok((config, cli_config)) => {
                let candidates: Vec<&str> = config
                    .decoder()
                    .candidates()
                    .iter()
                    .map(|candidate| candidate.name())
                    .collect();
                println!("✓ Configuration is valid!");
                println!("  Batch size: {}", config.batch_size());
                println!("  Top N: {}", config.default_top_n());
                println!("  Detection: {}", config.decoder().detect);
                println!("  Candidates: {}", candidates.join(", "));
                println!("  Fallback: {}", config.decoder().fallback().name());
                println!("  Output format: {:?}", cli_config.output.format);
                Ok(())
            }
            Err(e) => {
                println!("✗ Configuration is invalid!");
                println!("  Error: {e:#}");
                Err(anyhow::anyhow!("Validation failed: {e:#}"))
            }
        }
    }

    fn load(&self) -> Result<(Config, CliConfig)> {
        let cli_config = CliConfig::from_file(&self.config)?;
        let config = cli_config.to_core().map_err(CliError::from)?;
        Ok((config, cli_config))
    }
}
