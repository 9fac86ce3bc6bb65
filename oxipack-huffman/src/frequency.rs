//! Symbol frequency counting.

use oxipack_core::BitBuffer;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Occurrence count per symbol value, in ascending symbol order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: BTreeMap<u64, u64>,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the `symbol_bits`-wide chunks of `data`.
    ///
    /// A final chunk shorter than `symbol_bits` is counted as the value of
    /// the bits it has.
    pub fn from_bits(data: &BitBuffer, symbol_bits: u32) -> Self {
        let mut table = Self::new();
        for symbol in data.chunks(symbol_bits) {
            table.add(symbol);
        }
        table
    }

    /// Count one occurrence of `symbol`.
    pub fn add(&mut self, symbol: u64) {
        *self.counts.entry(symbol).or_insert(0) += 1;
    }

    /// Occurrences of `symbol`.
    pub fn get(&self, symbol: u64) -> u64 {
        self.counts.get(&symbol).copied().unwrap_or(0)
    }

    /// Number of distinct symbols.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check whether no symbol has been counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// `(symbol, count)` pairs in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, u64, u64> {
        self.counts.iter()
    }
}

impl FromIterator<u64> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = u64>>(iter: I) -> Self {
        let mut table = Self::new();
        for symbol in iter {
            table.add(symbol);
        }
        table
    }
}
