//! Configuration module

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use keyterm_core::config::defaults;
use keyterm_core::{Config, DecoderConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Batching and ranking configuration
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// Charset recovery configuration
    #[serde(default)]
    pub decoder: DecoderSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Pipeline-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Hits tokenized between progress events
    pub batch_size: usize,

    /// Ranked terms per event
    pub top_n: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            batch_size: defaults::BATCH_SIZE,
            top_n: defaults::TOP_N,
        }
    }
}

/// Decoder-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DecoderSection {
    /// Try BOM sniffing and statistical detection first
    pub detect: bool,

    /// Ordered encoding labels tried strictly after detection
    pub candidates: Vec<String>,

    /// Encoding label used to decode with replacement when every candidate fails
    pub fallback: String,
}

impl Default for DecoderSection {
    fn default() -> Self {
        let decoder = DecoderConfig::default();
        Self {
            detect: decoder.detect,
            candidates: decoder
                .candidates()
                .iter()
                .map(|candidate| candidate.name().to_ascii_lowercase())
                .collect(),
            fallback: decoder.fallback().name().to_ascii_lowercase(),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Build the core configuration, validating every field
    pub fn to_core(&self) -> keyterm_core::Result<Config> {
        Config::builder()
            .batch_size(self.pipeline.batch_size)
            .default_top_n(self.pipeline.top_n)
            .candidates(self.decoder.candidates.iter().map(String::as_str))
            .fallback(self.decoder.fallback.as_str())
            .detect(self.decoder.detect)
            .build()
    }
}
