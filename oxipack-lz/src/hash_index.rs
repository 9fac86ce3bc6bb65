//! k-gram hash index for LZ match search.
//!
//! Every k-gram seen so far maps to the start positions it was registered at,
//! in insertion order. Positions are registered again on each step whose
//! trailing window still covers them, so a list may hold duplicates.

use std::collections::{HashMap, VecDeque};

/// Index from k-gram to candidate start positions.
#[derive(Debug, Default)]
pub struct HashIndex {
    /// k-gram -> start positions in insertion order.
    table: HashMap<Box<[u32]>, VecDeque<usize>>,
    /// Total registrations (duplicates included).
    registrations: usize,
}

impl HashIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `position` to the list for `key`.
    pub fn register(&mut self, key: &[u32], position: usize) {
        match self.table.get_mut(key) {
            Some(positions) => positions.push_back(position),
            None => {
                self.table.insert(key.into(), VecDeque::from([position]));
            }
        }
        self.registrations += 1;
    }

    /// Candidates for `key` that lie in `[current - window, current)`.
    ///
    /// Leading entries that are already behind the window are dropped from
    /// the list; they can never qualify for a later (larger) `current`.
    /// The returned order is insertion order.
    pub fn candidates(
        &mut self,
        key: &[u32],
        current: usize,
        window: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        let lower = current.saturating_sub(window);
        let positions = self.table.get_mut(key);
        let positions = match positions {
            Some(positions) => {
                while positions.front().is_some_and(|&j| j < lower) {
                    positions.pop_front();
                }
                Some(&*positions)
            }
            None => None,
        };
        positions
            .into_iter()
            .flatten()
            .copied()
            .filter(move |&j| j >= lower && j < current)
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.table.len()
    }

    /// Total registrations made, duplicates included.
    pub fn registrations(&self) -> usize {
        self.registrations
    }
}
