//! Request-scoped frequency table for qualifying terms

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A term and its count at the time a snapshot was taken
///
/// Serialized as a `[term, count]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "(String, u64)", from = "(String, u64)")]
pub struct RankedTerm {
    /// The qualifying term
    pub term: String,
    /// Occurrences so far
    pub count: u64,
}

impl RankedTerm {
    /// Create a ranked entry
    pub fn new(term: impl Into<String>, count: u64) -> Self {
        Self {
            term: term.into(),
            count,
        }
    }
}

impl From<RankedTerm> for (String, u64) {
    fn from(ranked: RankedTerm) -> Self {
        (ranked.term, ranked.count)
    }
}

impl From<(String, u64)> for RankedTerm {
    fn from((term, count): (String, u64)) -> Self {
        Self { term, count }
    }
}

#[derive(Debug, Clone, Copy)]
struct TermEntry {
    count: u64,
    /// Position at which the term first qualified; breaks count ties
    first_seen: u64,
}

/// Counts of qualifying terms for one request
///
/// Counts only ever grow. Ranking is by descending count, with ties broken
/// by first-qualification order, which makes it a total order.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    entries: HashMap<String, TermEntry>,
    next_seen: u64,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `term`
    pub fn record(&mut self, term: &str) {
        if let Some(entry) = self.entries.get_mut(term) {
            entry.count += 1;
            return;
        }
        self.entries.insert(
            term.to_owned(),
            TermEntry {
                count: 1,
                first_seen: self.next_seen,
            },
        );
        self.next_seen += 1;
    }

    /// Current count of `term` (0 if never recorded)
    pub fn count(&self, term: &str) -> u64 {
        self.entries.get(term).map_or(0, |entry| entry.count)
    }

    /// Number of distinct terms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no term has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.entries.values().map(|entry| entry.count).sum()
    }

    /// Drop all counts
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_seen = 0;
    }

    /// The `n` highest-ranked terms
    pub fn top(&self, n: usize) -> Vec<RankedTerm> {
        if n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<(&String, &TermEntry)> = self.entries.iter().collect();
        let by_rank = |a: &(&String, &TermEntry), b: &(&String, &TermEntry)| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        };

        if n < ranked.len() {
            ranked.select_nth_unstable_by(n - 1, by_rank);
            ranked.truncate(n);
        }
        ranked.sort_unstable_by(by_rank);

        ranked
            .into_iter()
            .map(|(term, entry)| RankedTerm::new(term.as_str(), entry.count))
            .collect()
    }
}
