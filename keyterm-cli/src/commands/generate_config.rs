//! Generate config command implementation

use crate::config::CliConfig;
use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

const HEADER: &str = "\
# keyterm configuration
#
# [pipeline]  batch_size: sentences tokenized between progress events (> 0)
#             top_n: ranked terms per event
# [decoder]   detect: try BOM sniffing and statistical detection first
#             candidates: encoding labels tried strictly, in order
#             fallback: encoding that decodes undecodable input with replacement
# [output]    format: jsonl, sse or text
";

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        let template = self.generate_template()?;

        fs::write(&self.output, template)
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the configuration file");
        println!("2. Validate your configuration:");
        println!("   keyterm validate -c {}", self.output.display());
        println!("3. Use it for aggregation:");
        println!(
            "   keyterm aggregate -i input.txt -k 北京 -c {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> Result<String> {
        Ok(format!("{HEADER}\n{}", CliConfig::default().to_toml()?))
    }
}
