//! Greedy hash-accelerated match search.

use crate::config::LzConfig;
use crate::hash_index::HashIndex;
use crate::token::LzToken;
use log::trace;
use oxipack_core::Result;

/// Greedy longest-match tokenizer.
#[derive(Debug, Clone, Copy)]
pub struct LzMatcher {
    config: LzConfig,
}

impl LzMatcher {
    /// Create a matcher, validating the configuration.
    pub fn new(config: LzConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Matcher configuration.
    pub fn config(&self) -> &LzConfig {
        &self.config
    }

    /// Split `symbols` into tokens.
    ///
    /// At each position the longest run among the in-window candidates that
    /// share the current k-gram is chosen. Among equal lengths the earliest
    /// registered candidate wins. The last symbol of the input is never part
    /// of a copied run, so the final token always carries it as its literal.
    pub fn tokenize(&self, symbols: &[u32]) -> Vec<LzToken> {
        let n = symbols.len();
        let k = self.config.minimum_match_length;
        let window = self.config.search_length;
        let mut index = HashIndex::new();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < n {
            let mut best_offset = 0;
            let mut best_length = 0;

            if i + k <= n {
                for j in index.candidates(&symbols[i..i + k], i, window) {
                    let length = self.run_length(symbols, j, i);
                    if length > best_length {
                        best_length = length;
                        best_offset = i - j;
                    }
                }
            }

            for start in i.saturating_sub(k - 1)..=i {
                if start + k <= n {
                    index.register(&symbols[start..start + k], start);
                }
            }

            let literal = symbols[i + best_length];
            tokens.push(LzToken::new(best_offset, best_length, literal));
            i += best_length + 1;
        }

        trace!(
            "tokenized {} symbols into {} tokens ({} keys, {} registrations)",
            n,
            tokens.len(),
            index.key_count(),
            index.registrations()
        );
        tokens
    }

    /// Equal symbols starting at `source` and `current`, capped at the match
    /// length and stopping before the final symbol.
    #[inline]
    fn run_length(&self, symbols: &[u32], source: usize, current: usize) -> usize {
        let last = symbols.len() - 1;
        let mut length = 0;
        while length < self.config.match_length
            && current + length < last
            && symbols[source + length] == symbols[current + length]
        {
            length += 1;
        }
        length
    }
}
