//! Request entry point
//!
//! A [`Processor`] is cheap to share and holds no per-request state. Each
//! call to [`Processor::stream`] creates an [`EventStream`] that owns the
//! request's hits and frequency table; both are dropped with the stream.

use crate::aggregator::{AggregationSettings, Aggregator};
use crate::config::Config;
use crate::decoder::Decoder;
use crate::emitter::{ProgressEmitter, ProgressEvent};
use crate::error::Result;
use crate::hits;
use crate::input::Input;
use crate::keyword::Keyword;
use crate::splitter;
use crate::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

/// An aggregation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// File to read
    pub file_path: PathBuf,
    /// Literal keyword to aggregate around
    pub keyword: String,
    /// Ranked terms per event; the processor's `default_top_n` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
}

impl Request {
    /// Create a request that ranks the configured default number of terms
    pub fn new(file_path: impl Into<PathBuf>, keyword: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            keyword: keyword.into(),
            top_n: None,
        }
    }

    /// Set the number of ranked terms
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = Some(top_n);
        self
    }

    /// Reject requests that cannot be served
    pub fn validate(&self) -> Result<()> {
        Keyword::new(self.keyword.as_str()).map(|_| ())
    }
}

/// Runs the decode → split → filter → aggregate → emit pipeline
#[derive(Clone)]
pub struct Processor {
    config: Config,
    decoder: Decoder,
    tokenizer: Arc<dyn Tokenizer>,
}

impl Processor {
    /// Create a processor with the default configuration
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self::with_config(Config::default(), tokenizer)
    }

    /// Create a processor with a custom configuration
    pub fn with_config(config: Config, tokenizer: Arc<dyn Tokenizer>) -> Self {
        let decoder = Decoder::with_config(config.decoder().clone());
        Self {
            config,
            decoder,
            tokenizer,
        }
    }

    /// Create a processor backed by jieba search-mode segmentation
    #[cfg(feature = "jieba")]
    pub fn with_jieba(config: Config) -> Self {
        Self::with_config(config, Arc::new(crate::tokenizer::JiebaTokenizer::new()))
    }

    /// The active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Open an event stream for a file request
    ///
    /// Invalid requests are rejected here, before the stream opens. File
    /// access errors are reported inside the stream as its only event.
    pub fn stream(&self, request: &Request) -> Result<EventStream> {
        self.stream_input(
            Input::from_file(request.file_path.clone()),
            &request.keyword,
            request.top_n.unwrap_or(self.config.default_top_n()),
        )
    }

    /// Open an event stream over any input source
    pub fn stream_input(&self, input: Input, keyword: &str, top_n: usize) -> Result<EventStream> {
        let keyword = Keyword::new(keyword)?;
        if keyword.as_str().chars().any(splitter::is_delimiter) {
            // Splitting removes every delimiter, so no sentence can contain this keyword.
            log::warn!(
                "keyword {:?} contains a sentence delimiter and cannot match",
                keyword.as_str()
            );
        }
        log::info!(
            "opening stream for {:?}, keyword {:?}, top_n {}, tokenizer {}",
            input,
            keyword.as_str(),
            top_n,
            self.tokenizer.name()
        );
        Ok(EventStream {
            state: StreamState::Pending(Pending {
                input,
                keyword,
                top_n,
                decoder: self.decoder.clone(),
                tokenizer: Arc::clone(&self.tokenizer),
                batch_size: self.config.batch_size,
            }),
        })
    }

    /// Run a request to completion and collect every event
    pub fn collect(&self, request: &Request) -> Result<Vec<ProgressEvent>> {
        Ok(self.stream(request)?.collect())
    }
}

struct Pending {
    input: Input,
    keyword: Keyword,
    top_n: usize,
    decoder: Decoder,
    tokenizer: Arc<dyn Tokenizer>,
    batch_size: usize,
}

impl Pending {
    /// Read, decode, split and filter; the batching stage is returned unstarted
    fn prepare(self) -> Result<ProgressEmitter<Aggregator>> {
        let decoded = self.input.decode(&self.decoder)?;
        log::info!(
            "decoded {} chars as {}{}",
            decoded.text.chars().count(),
            decoded.encoding,
            if decoded.is_lossy() { " (lossy)" } else { "" }
        );

        let hits = hits::filter(splitter::split(&decoded.text), &self.keyword);
        log::info!("{} sentences contain {:?}", hits.len(), self.keyword.as_str());

        let total = hits.len();
        let aggregator = Aggregator::new(
            hits,
            self.keyword,
            self.tokenizer,
            AggregationSettings {
                batch_size: self.batch_size,
                top_n: self.top_n,
            },
        );
        Ok(ProgressEmitter::new(total, aggregator))
    }
}

enum StreamState {
    Pending(Pending),
    Streaming(ProgressEmitter<Aggregator>),
    Finished,
}

/// The ordered events of one request
///
/// Nothing runs until the first `next()`: the file is read and decoded
/// then, and every later call processes at most one batch. Dropping the
/// stream abandons the remaining batches.
pub struct EventStream {
    state: StreamState,
}

impl EventStream {
    /// Whether the terminal event has been yielded
    pub fn is_finished(&self) -> bool {
        matches!(self.state, StreamState::Finished)
    }
}

impl Iterator for EventStream {
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        let event = match std::mem::replace(&mut self.state, StreamState::Finished) {
            StreamState::Finished => return None,
            StreamState::Pending(pending) => match pending.prepare() {
                Ok(mut emitter) => {
                    let event = emitter.next();
                    self.state = StreamState::Streaming(emitter);
                    event
                }
                Err(e) => {
                    log::error!("request failed before streaming: {e}");
                    Some(ProgressEvent::from_error(&e))
                }
            },
            StreamState::Streaming(mut emitter) => {
                let event = emitter.next();
                self.state = StreamState::Streaming(emitter);
                event
            }
        };

        match &event {
            Some(event) if event.is_terminal() => {
                match event.report() {
                    Some(report) => log::info!(
                        "stream {}: {}/{} hits, {} ranked terms",
                        event.kind().as_str(),
                        report.processed,
                        report.total,
                        report.ranked_terms.len()
                    ),
                    None => log::info!("stream {}", event.kind().as_str()),
                }
                self.state = StreamState::Finished;
            }
            None => self.state = StreamState::Finished,
            Some(_) => {}
        }
        event
    }
}

impl std::iter::FusedIterator for EventStream {}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state {
            StreamState::Pending(_) => "pending",
            StreamState::Streaming(_) => "streaming",
            StreamState::Finished => "finished",
        };
        f.debug_struct("EventStream").field("state", &state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::EventKind;
    use crate::tokenizer::FnTokenizer;

    fn processor(batch_size: usize) -> Processor {
        let config = Config::builder().batch_size(batch_size).build().unwrap();
        Processor::with_config(
            config,
            Arc::new(FnTokenizer::new(|text: &str| text.split(' ').collect())),
        )
    }

    #[test]
    fn test_request_defaults_top_n() {
        let request: Request =
            serde_json::from_str(r#"{"file_path":"a.txt","keyword":"北京"}"#).unwrap();
        assert_eq!(request.top_n, None);
        assert_eq!(request, Request::new("a.txt", "北京"));

        let request: Request =
            serde_json::from_str(r#"{"file_path":"a.txt","keyword":"北京","top_n":3}"#).unwrap();
        assert_eq!(request, Request::new("a.txt", "北京").with_top_n(3));
    }

    #[test]
    fn test_configured_default_top_n_applies_to_requests() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let file_path = temp_dir.path().join("corpus.txt");
        std::fs::write(&file_path, "ab abc abd abe. abc abd").unwrap();

        let config = Config::builder().default_top_n(1).build().unwrap();
        let processor = Processor::with_config(
            config,
            Arc::new(FnTokenizer::new(|text: &str| text.split(' ').collect())),
        );

        let events = processor.collect(&Request::new(&file_path, "ab")).unwrap();
        let report = events.last().unwrap().report().unwrap();
        assert_eq!(report.processed, 2);
        assert_eq!(report.ranked_terms.len(), 1);

        let events = processor
            .collect(&Request::new(&file_path, "ab").with_top_n(3))
            .unwrap();
        assert_eq!(events.last().unwrap().report().unwrap().ranked_terms.len(), 3);
    }

    #[test]
    fn test_keyword_with_delimiter_never_matches() {
        let events: Vec<_> = processor(1)
            .stream_input(Input::from_text("ab. abc"), "ab.", 5)
            .unwrap()
            .collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Done);
        assert_eq!(events[0].report().unwrap().total, 0);
    }

    #[test]
    fn test_empty_keyword_rejected_before_stream() {
        let request = Request::new("a.txt", "");
        assert!(request.validate().is_err());

        let err = processor(1).stream(&request).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_stream_is_lazy_and_fused() {
        let mut stream = processor(1)
            .stream_input(Input::from_text("ab abc. ab abd"), "ab", 5)
            .unwrap();
        assert!(!stream.is_finished());
        assert_eq!(format!("{stream:?}"), r#"EventStream { state: "pending" }"#);

        assert_eq!(stream.next().unwrap().kind(), EventKind::Progress);
        assert!(!stream.is_finished());
        assert_eq!(stream.next().unwrap().kind(), EventKind::Done);
        assert!(stream.is_finished());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_missing_file_is_single_error_event() {
        let events = processor(1)
            .collect(&Request::new("/nonexistent/corpus.txt", "北京"))
            .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), EventKind::Error);
    }
}
