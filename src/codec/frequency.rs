//! Symbol frequency analysis
//!
//! Counts how often each character occurs in the input text. The table is
//! ordered by symbol so that everything built from it downstream is
//! deterministic.

use std::collections::BTreeMap;

/// Occurrence counts for every distinct symbol of a text.
///
/// Only symbols that actually occur are stored, so every count is positive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<char, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: char) -> Option<u64> {
        self.counts.get(&symbol).copied()
    }

    /// Number of distinct symbols
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of symbols counted
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate `(symbol, count)` pairs in ascending symbol order
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.counts.iter().map(|(&symbol, &count)| (symbol, count))
    }

    fn record(&mut self, symbol: char) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }
}

/// Build the frequency table for `text`.
///
/// Whitespace and punctuation count like any other symbol. An empty text
/// yields an empty table.
pub fn analyze(text: &str) -> FrequencyTable {
    text.chars().fold(FrequencyTable::new(), |mut table, symbol| {
        table.record(symbol);
        table
    })
}
