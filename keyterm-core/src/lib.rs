//! Streaming aggregation of keyword-containing compound terms
//!
//! Given a text file of unknown or mixed encoding and a keyword, this crate
//! finds the sentences containing the keyword, segments them, and counts
//! the tokens that contain the keyword and are longer than it. Results are
//! produced progressively: one ranked snapshot per batch of sentences,
//! terminated by exactly one `done` or `error` event.
//!
//! # Pipeline
//!
//! - [`decoder`]: charset detection with a candidate chain and a lossy
//!   fallback; never fails
//! - [`splitter`]: sentence splitting on a fixed delimiter class
//! - [`hits`]: literal keyword filter
//! - [`aggregator`]: batched tokenization into a request-scoped
//!   [`FrequencyTable`]
//! - [`emitter`]: snapshot-to-[`ProgressEvent`] state machine
//! - [`processor`]: wires the stages together per request
//!
//! # Example
//!
//! ```rust
//! use keyterm_core::{Config, EventKind, FnTokenizer, Input, Processor};
//! use std::sync::Arc;
//!
//! // Any segmenter can be injected; this one splits on spaces.
//! let tokenizer = Arc::new(FnTokenizer::new(|text: &str| text.split(' ').collect()));
//! let config = Config::builder().batch_size(1).build().unwrap();
//! let processor = Processor::with_config(config, tokenizer);
//!
//! let events: Vec<_> = processor
//!     .stream_input(Input::from_text("rusty rustacean. rust"), "rust", 5)
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(events.len(), 2);
//! assert_eq!(events[1].kind(), EventKind::Done);
//! ```

pub mod aggregator;
pub mod config;
pub mod decoder;
pub mod emitter;
pub mod error;
pub mod frequency;
pub mod hits;
pub mod input;
pub mod keyword;
pub mod processor;
pub mod splitter;
pub mod tokenizer;

pub use aggregator::{AggregationSettings, Aggregator, Snapshot};
pub use config::{Config, ConfigBuilder};
pub use decoder::{decode, Candidate, DecodeStage, Decoded, Decoder, DecoderConfig};
pub use emitter::{EventKind, ProgressEmitter, ProgressEvent, ProgressReport};
pub use error::{Error, Result};
pub use frequency::{FrequencyTable, RankedTerm};
pub use input::Input;
pub use keyword::Keyword;
pub use processor::{EventStream, Processor, Request};
pub use tokenizer::{FnTokenizer, Tokenizer};

#[cfg(feature = "jieba")]
pub use tokenizer::JiebaTokenizer;
