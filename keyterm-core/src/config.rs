//! Pipeline configuration

use crate::decoder::DecoderConfig;
use crate::error::{Error, Result};

/// Default configuration constants
pub mod defaults {
    /// Hits tokenized between two progress snapshots
    pub const BATCH_SIZE: usize = 200;

    /// Ranked terms reported per snapshot
    pub const TOP_N: usize = 20;
}

/// Processing configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) batch_size: usize,
    pub(crate) default_top_n: usize,
    pub(crate) decoder: DecoderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            batch_size: defaults::BATCH_SIZE,
            default_top_n: defaults::TOP_N,
            decoder: DecoderConfig::default(),
        }
    }
}

impl Config {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Hits per batch
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Ranked terms reported when a request does not say otherwise
    pub fn default_top_n(&self) -> usize {
        self.default_top_n
    }

    /// Decoder settings
    pub fn decoder(&self) -> &DecoderConfig {
        &self.decoder
    }

    /// Validate the configuration
    pub(crate) fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(Error::Configuration(
                "batch_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for configuration
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    batch_size: Option<usize>,
    default_top_n: Option<usize>,
    candidates: Option<Vec<String>>,
    fallback: Option<String>,
    detect: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of hits per batch
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Set the default number of ranked terms
    pub fn default_top_n(mut self, n: usize) -> Self {
        self.default_top_n = Some(n);
        self
    }

    /// Set the ordered decoder candidate chain by label
    pub fn candidates<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidates = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    /// Set the encoding used for lossy decoding by label
    pub fn fallback(mut self, label: impl Into<String>) -> Self {
        self.fallback = Some(label.into());
        self
    }

    /// Enable or disable statistical charset detection
    pub fn detect(mut self, detect: bool) -> Self {
        self.detect = Some(detect);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if let Some(size) = self.batch_size {
            config.batch_size = size;
        }

        if let Some(n) = self.default_top_n {
            config.default_top_n = n;
        }

        if let Some(labels) = self.candidates {
            config.decoder = DecoderConfig::with_candidates(labels)?;
        }

        if let Some(label) = self.fallback {
            config.decoder = config.decoder.with_fallback(&label)?;
        }

        if let Some(detect) = self.detect {
            config.decoder = config.decoder.detect(detect);
        }

        config.validate()?;
        Ok(config)
    }
}
