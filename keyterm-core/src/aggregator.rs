//! Batched tokenization and counting
//!
//! [`Aggregator`] is a lazy, finite, non-restartable iterator of
//! [`Snapshot`]s. Each call to `next` tokenizes one batch of hits, folds
//! the qualifying terms into the request's [`FrequencyTable`], and returns
//! the ranked state. Dropping the iterator between batches stops all
//! further work.

use crate::error::Result;
use crate::frequency::{FrequencyTable, RankedTerm};
use crate::keyword::Keyword;
use crate::tokenizer::Tokenizer;
use std::sync::Arc;

/// Ranked state after one batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Hits processed so far
    pub processed: usize,
    /// Total hits in the request
    pub total: usize,
    /// Top terms by descending count
    pub ranked_terms: Vec<RankedTerm>,
}

impl Snapshot {
    /// Whether this snapshot covers every hit
    pub fn is_final(&self) -> bool {
        self.processed == self.total
    }
}

/// Batch and ranking parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationSettings {
    /// Hits per batch (must be positive)
    pub batch_size: usize,
    /// Terms per snapshot
    pub top_n: usize,
}

/// Iterator of snapshots over a request's hits
pub struct Aggregator {
    hits: Vec<String>,
    keyword: Keyword,
    tokenizer: Arc<dyn Tokenizer>,
    settings: AggregationSettings,
    cursor: usize,
    table: FrequencyTable,
    failed: bool,
}

impl Aggregator {
    /// Create an aggregator; `settings.batch_size` is clamped to at least 1
    pub fn new(
        hits: Vec<String>,
        keyword: Keyword,
        tokenizer: Arc<dyn Tokenizer>,
        settings: AggregationSettings,
    ) -> Self {
        let settings = AggregationSettings {
            batch_size: settings.batch_size.max(1),
            ..settings
        };
        Self {
            hits,
            keyword,
            tokenizer,
            settings,
            cursor: 0,
            table: FrequencyTable::new(),
            failed: false,
        }
    }

    /// Total number of hits
    pub fn total(&self) -> usize {
        self.hits.len()
    }

    /// Hits processed so far
    pub fn processed(&self) -> usize {
        self.cursor
    }

    /// Number of snapshots this aggregator produces in total
    pub fn batch_count(&self) -> usize {
        self.hits.len().div_ceil(self.settings.batch_size)
    }

    /// Counts accumulated so far
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }
}

impl Iterator for Aggregator {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.cursor >= self.hits.len() {
            return None;
        }

        let total = self.hits.len();
        let start = self.cursor;
        let end = (start + self.settings.batch_size).min(total);

        for hit in &self.hits[start..end] {
            let tokens = match self.tokenizer.segment(hit) {
                Ok(tokens) => tokens,
                Err(e) => {
                    self.failed = true;
                    self.table.clear();
                    return Some(Err(e));
                }
            };
            for token in tokens {
                if self.keyword.qualifies(token) {
                    self.table.record(token);
                }
            }
        }

        self.cursor = end;
        log::debug!(
            "batch {}/{} done (hits {}..{} of {}), {} distinct terms, {} occurrences",
            end.div_ceil(self.settings.batch_size),
            self.batch_count(),
            start,
            end,
            total,
            self.table.len(),
            self.table.total()
        );

        Some(Ok(Snapshot {
            processed: end,
            total,
            ranked_terms: self.table.top(self.settings.top_n),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = (self.hits.len() - self.cursor).div_ceil(self.settings.batch_size);
        // A tokenizer failure can cut the sequence short.
        (remaining.min(1), Some(remaining))
    }
}

impl std::iter::FusedIterator for Aggregator {}
