//! Huffman tree construction and serialization.
//!
//! # Construction
//!
//! Every heap entry carries a sequence number: leaves are numbered in
//! ascending symbol order and each merged node takes the next number when it
//! is created. The two entries with the smallest `(frequency, sequence)` are
//! popped, the first becoming the left child. The tree shape is therefore a
//! function of the frequency table alone.
//!
//! # Serialized Form
//!
//! Preorder, one tag bit per node:
//!
//! ```text
//! leaf:     1 | symbol (symbol_bits)
//! internal: 0 | left subtree | right subtree
//! ```
//!
//! A tree with `n` leaves serializes to `n * (1 + symbol_bits) + (n - 1)` bits.

use crate::frequency::FrequencyTable;
use oxipack_core::{BitBuffer, BitCursor, OxiPackError, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::mem;

/// A node of a Huffman tree. Internal nodes own their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffmanNode {
    /// A symbol.
    Leaf {
        /// Symbol value.
        symbol: u64,
        /// Occurrences (0 for trees read from a stream).
        frequency: u64,
    },
    /// Two subtrees.
    Internal {
        /// Sum of the children's frequencies.
        frequency: u64,
        /// Subtree reached with a `0` bit.
        left: Box<HuffmanNode>,
        /// Subtree reached with a `1` bit.
        right: Box<HuffmanNode>,
    },
}

impl HuffmanNode {
    const EMPTY: Self = Self::Leaf {
        symbol: 0,
        frequency: 0,
    };

    /// Node frequency.
    pub fn frequency(&self) -> u64 {
        match self {
            Self::Leaf { frequency, .. } | Self::Internal { frequency, .. } => *frequency,
        }
    }

    /// Check whether this is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    fn merge(left: HuffmanNode, right: HuffmanNode) -> Self {
        Self::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

impl Drop for HuffmanNode {
    // Iterative: trees read from a stream may be arbitrarily deep.
    fn drop(&mut self) {
        let mut stack = Vec::new();
        take_children(self, &mut stack);
        while let Some(mut node) = stack.pop() {
            take_children(&mut node, &mut stack);
        }
    }
}

/// Move the children of an internal node onto `stack`, leaving empty leaves.
fn take_children(node: &mut HuffmanNode, stack: &mut Vec<HuffmanNode>) {
    if let HuffmanNode::Internal { left, right, .. } = node {
        stack.push(mem::replace(left.as_mut(), HuffmanNode::EMPTY));
        stack.push(mem::replace(right.as_mut(), HuffmanNode::EMPTY));
    }
}

/// Min-heap entry ordered by `(frequency, sequence)`.
struct HeapEntry {
    frequency: u64,
    sequence: usize,
    node: HuffmanNode,
}

impl HeapEntry {
    fn key(&self) -> (u64, usize) {
        (self.frequency, self.sequence)
    }
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other.key().cmp(&self.key())
    }
}

/// A Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffmanNode,
}

impl HuffmanTree {
    /// Build the tree for `table`. Returns `None` for an empty table.
    ///
    /// A single-symbol table yields a lone leaf as the root.
    pub fn build(table: &FrequencyTable) -> Option<Self> {
        let mut heap: BinaryHeap<HeapEntry> = table
            .iter()
            .enumerate()
            .map(|(sequence, (&symbol, &frequency))| HeapEntry {
                frequency,
                sequence,
                node: HuffmanNode::Leaf { symbol, frequency },
            })
            .collect();
        let mut next_sequence = heap.len();

        while heap.len() > 1 {
            let (Some(left), Some(right)) = (heap.pop(), heap.pop()) else {
                break;
            };
            let node = HuffmanNode::merge(left.node, right.node);
            heap.push(HeapEntry {
                frequency: node.frequency(),
                sequence: next_sequence,
                node,
            });
            next_sequence += 1;
        }

        heap.pop().map(|entry| Self { root: entry.node })
    }

    /// Wrap an existing root node.
    pub fn from_root(root: HuffmanNode) -> Self {
        Self { root }
    }

    /// Root node.
    pub fn root(&self) -> &HuffmanNode {
        &self.root
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![&self.root];
        while let Some(node) = stack.pop() {
            match node {
                HuffmanNode::Leaf { .. } => count += 1,
                HuffmanNode::Internal { left, right, .. } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        count
    }

    /// Length of the serialized tree in bits.
    pub fn serialized_len(&self, symbol_bits: u32) -> usize {
        let leaves = self.leaf_count();
        leaves * (1 + symbol_bits as usize) + (leaves - 1)
    }
}

/// Append the preorder form of `tree` to `out`.
pub fn serialize_tree(tree: &HuffmanTree, symbol_bits: u32, out: &mut BitBuffer) {
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        match node {
            HuffmanNode::Leaf { symbol, .. } => {
                out.push(true);
                out.push_bits(*symbol, symbol_bits);
            }
            HuffmanNode::Internal { left, right, .. } => {
                out.push(false);
                stack.push(right);
                stack.push(left);
            }
        }
    }
}

/// Read one preorder tree from `cursor`.
///
/// Returns the tree and the number of bits consumed. Leaves carry frequency 0.
pub fn deserialize_tree(
    cursor: &mut BitCursor<'_>,
    symbol_bits: u32,
) -> Result<(HuffmanTree, usize)> {
    let start = cursor.position();
    // Internal nodes still waiting for children; `Some` once the left one is done.
    let mut pending: Vec<Option<HuffmanNode>> = Vec::new();

    loop {
        let mut node = if cursor.read_bit()? {
            HuffmanNode::Leaf {
                symbol: cursor.read_bits(symbol_bits)?,
                frequency: 0,
            }
        } else {
            pending.push(None);
            continue;
        };

        loop {
            match pending.pop() {
                None => {
                    let consumed = cursor.position() - start;
                    return Ok((HuffmanTree::from_root(node), consumed));
                }
                Some(None) => {
                    pending.push(Some(node));
                    break;
                }
                Some(Some(left)) => node = HuffmanNode::merge(left, node),
            }
        }
    }
}

/// Decode one symbol by walking from the root.
///
/// A lone-leaf root consumes exactly one `0` bit per symbol.
pub fn read_symbol(tree: &HuffmanTree, cursor: &mut BitCursor<'_>) -> Result<u64> {
    let mut node = tree.root();
    if let HuffmanNode::Leaf { symbol, .. } = node {
        let position = cursor.position();
        if cursor.read_bit()? {
            return Err(OxiPackError::malformed(
                position as u64,
                "code bit 1 under a single-symbol tree",
            ));
        }
        return Ok(*symbol);
    }

    loop {
        match node {
            HuffmanNode::Leaf { symbol, .. } => return Ok(*symbol),
            HuffmanNode::Internal { left, right, .. } => {
                node = if cursor.read_bit()? { right } else { left };
            }
        }
    }
}
