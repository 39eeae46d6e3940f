//! keyterm CLI library
//!
//! This library provides the command-line interface for streaming
//! keyword term aggregation.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
