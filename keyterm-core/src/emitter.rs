//! Progress events and the snapshot-to-event state machine
//!
//! ```text
//! START ──(0 hits)──────────────> DONE
//!   │
//!   └──> BATCHING* ──(final)────> DONE
//!             │
//!             └──(failure)──────> ERROR
//! ```
//!
//! Every terminal state ends the stream: exactly one `done` or one `error`
//! event is emitted, always last.

use crate::aggregator::Snapshot;
use crate::error::{Error, Result};
use crate::frequency::RankedTerm;
use serde::{Deserialize, Serialize};

/// Counters and ranking carried by `progress` and `done` events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Hits processed so far
    pub processed: usize,
    /// Total hits
    pub total: usize,
    /// Ranked `[term, count]` pairs
    #[serde(rename = "keywords")]
    pub ranked_terms: Vec<RankedTerm>,
}

/// One unit of streamed output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressEvent {
    /// Partial result after a batch
    Progress(ProgressReport),
    /// Final result; always the last event of a successful stream
    Done(ProgressReport),
    /// Fatal failure; always the last event of a failed stream
    Error {
        /// Human-readable cause
        message: String,
    },
}

/// Event discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// `progress`
    Progress,
    /// `done`
    Done,
    /// `error`
    Error,
}

impl EventKind {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Progress => "progress",
            EventKind::Done => "done",
            EventKind::Error => "error",
        }
    }
}

impl ProgressEvent {
    /// The single event of a request without hits
    pub fn empty() -> Self {
        ProgressEvent::Done(ProgressReport {
            processed: 0,
            total: 0,
            ranked_terms: Vec::new(),
        })
    }

    /// Map a snapshot; the final snapshot becomes `done`
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let is_final = snapshot.is_final();
        let report = ProgressReport {
            processed: snapshot.processed,
            total: snapshot.total,
            ranked_terms: snapshot.ranked_terms,
        };
        if is_final {
            ProgressEvent::Done(report)
        } else {
            ProgressEvent::Progress(report)
        }
    }

    /// Error event carrying `error`'s message
    pub fn from_error(error: &Error) -> Self {
        ProgressEvent::Error {
            message: error.to_string(),
        }
    }

    /// Event discriminant
    pub fn kind(&self) -> EventKind {
        match self {
            ProgressEvent::Progress(_) => EventKind::Progress,
            ProgressEvent::Done(_) => EventKind::Done,
            ProgressEvent::Error { .. } => EventKind::Error,
        }
    }

    /// Whether the stream ends after this event
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ProgressEvent::Progress(_))
    }

    /// Counters and ranking, if this is not an error
    pub fn report(&self) -> Option<&ProgressReport> {
        match self {
            ProgressEvent::Progress(report) | ProgressEvent::Done(report) => Some(report),
            ProgressEvent::Error { .. } => None,
        }
    }

    /// Serialize to a single-line JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<Error> for ProgressEvent {
    fn from(error: Error) -> Self {
        ProgressEvent::from_error(&error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EmitterState {
    Start,
    Batching,
    Finished,
}

/// Wraps a snapshot sequence into a terminated event sequence
pub struct ProgressEmitter<I> {
    total: usize,
    snapshots: I,
    state: EmitterState,
}

impl<I> ProgressEmitter<I>
where
    I: Iterator<Item = Result<Snapshot>>,
{
    /// Create an emitter over `snapshots` for a request with `total` hits
    pub fn new(total: usize, snapshots: I) -> Self {
        Self {
            total,
            snapshots,
            state: EmitterState::Start,
        }
    }

    /// Whether a terminal event has been emitted
    pub fn is_finished(&self) -> bool {
        self.state == EmitterState::Finished
    }

    fn finish(&mut self, event: ProgressEvent) -> Option<ProgressEvent> {
        self.state = EmitterState::Finished;
        Some(event)
    }
}

impl<I> Iterator for ProgressEmitter<I>
where
    I: Iterator<Item = Result<Snapshot>>,
{
    type Item = ProgressEvent;

    fn next(&mut self) -> Option<ProgressEvent> {
        match self.state {
            EmitterState::Finished => None,
            EmitterState::Start if self.total == 0 => self.finish(ProgressEvent::empty()),
            EmitterState::Start | EmitterState::Batching => {
                self.state = EmitterState::Batching;
                match self.snapshots.next() {
                    Some(Ok(snapshot)) => {
                        let event = ProgressEvent::from_snapshot(snapshot);
                        if event.is_terminal() {
                            self.state = EmitterState::Finished;
                        }
                        Some(event)
                    }
                    Some(Err(e)) => {
                        log::error!("aggregation failed: {e}");
                        self.finish(ProgressEvent::from_error(&e))
                    }
                    None => {
                        // The snapshot source ended without covering every hit.
                        let e = Error::Tokenization(format!(
                            "snapshot sequence ended before all {} hits were processed",
                            self.total
                        ));
                        self.finish(ProgressEvent::from_error(&e))
                    }
                }
            }
        }
    }
}

impl<I> std::iter::FusedIterator for ProgressEmitter<I> where I: Iterator<Item = Result<Snapshot>> {}
