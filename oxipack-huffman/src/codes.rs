//! Codeword assignment.

use crate::tree::{HuffmanNode, HuffmanTree};
use oxipack_core::BitBuffer;
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Codeword per symbol. Prefix-free by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u64, BitBuffer>,
}

impl CodeTable {
    /// Codeword for `symbol`.
    pub fn get(&self, symbol: u64) -> Option<&BitBuffer> {
        self.codes.get(&symbol)
    }

    /// Number of symbols.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Check whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// `(symbol, codeword)` pairs in ascending symbol order.
    pub fn iter(&self) -> btree_map::Iter<'_, u64, BitBuffer> {
        self.codes.iter()
    }
}

/// Assign codewords from tree paths: `0` for left, `1` for right.
///
/// A lone-leaf root gets the codeword `0`.
pub fn generate_codes(tree: &HuffmanTree) -> CodeTable {
    let mut codes = BTreeMap::new();
    let mut stack = vec![(tree.root(), BitBuffer::new())];

    while let Some((node, path)) = stack.pop() {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                let code = if path.is_empty() {
                    BitBuffer::from_uint(0, 1)
                } else {
                    path
                };
                codes.insert(*symbol, code);
            }
            HuffmanNode::Internal { left, right, .. } => {
                let mut right_path = path.clone();
                right_path.push(true);
                let mut left_path = path;
                left_path.push(false);
                stack.push((right.as_ref(), right_path));
                stack.push((left.as_ref(), left_path));
            }
        }
    }

    CodeTable { codes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;

    fn codes_for(data: &[u8]) -> CodeTable {
        let table = FrequencyTable::from_bits(&BitBuffer::from_bytes(data), 8);
        generate_codes(&HuffmanTree::build(&table).unwrap())
    }

    fn code(table: &CodeTable, symbol: u8) -> String {
        table.get(symbol as u64).unwrap().to_string()
    }

    #[test]
    fn test_hello_codes() {
        let table = codes_for(b"hello");
        assert_eq!(table.len(), 4);
        assert_eq!(code(&table, b'e'), "00");
        assert_eq!(code(&table, b'h'), "01");
        assert_eq!(code(&table, b'o'), "10");
        assert_eq!(code(&table, b'l'), "11");
    }

    #[test]
    fn test_single_symbol_code() {
        let table = codes_for(b"zzz");
        assert_eq!(code(&table, b'z'), "0");
    }

    #[test]
    fn test_prefix_free() {
        let table = codes_for(b"a quick brown fox jumps over the lazy dog");
        let codes: Vec<String> = table.iter().map(|(_, c)| c.to_string()).collect();
        for (i, a) in codes.iter().enumerate() {
            for (j, b) in codes.iter().enumerate() {
                if i != j {
                    assert!(!b.starts_with(a.as_str()), "{} prefixes {}", a, b);
                }
            }
        }
    }

    #[test]
    fn test_frequent_symbols_are_shorter() {
        let table = codes_for(b"aaaaaaaaaaaaaaaabbbbccd");
        assert!(table.get(b'a' as u64).unwrap().len() < table.get(b'd' as u64).unwrap().len());
    }
}
