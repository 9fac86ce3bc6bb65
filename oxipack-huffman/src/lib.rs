//! # OxiPack-Huffman: Static Huffman Coding
//!
//! Two-pass Huffman coding over fixed-width symbols. The first pass counts
//! symbols and builds a tree; the second writes one codeword per symbol after
//! a self-describing header that carries the serialized tree.
//!
//! ## Features
//!
//! - **Any symbol width**: 1 to 63 bits per symbol (8 by default)
//! - **Deterministic trees**: equal frequencies are broken by a fixed sequence
//!   rule, so identical input always yields identical output
//! - **Strict decoding**: malformed frames fail instead of producing output
//!
//! ## Frame Format
//!
//! ```text
//! symbol_bits (6) | tree_size (16) | tree | original_length (17) | codes
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipack_core::BitCodec;
//! use oxipack_huffman::HuffmanCodec;
//!
//! let codec = HuffmanCodec::default();
//! let encoded = codec.encode_bytes(b"hello").unwrap();
//! assert_eq!(codec.decode_bytes(&encoded).unwrap(), b"hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codes;
mod decode;
mod encode;
mod frame;
mod frequency;
mod tree;

pub use codes::{CodeTable, generate_codes};
pub use decode::decode;
pub use encode::encode;
pub use frame::{
    FrameHeader, LENGTH_FIELD, MAX_ORIGINAL_LENGTH, MAX_SYMBOL_BITS, MAX_TREE_SIZE,
    SYMBOL_BITS_FIELD, TREE_SIZE_FIELD,
};
pub use frequency::FrequencyTable;
pub use tree::{HuffmanNode, HuffmanTree, deserialize_tree, read_symbol, serialize_tree};

use oxipack_core::{BitBuffer, BitCodec, Method, Result};

/// Default symbol width.
pub const DEFAULT_SYMBOL_BITS: u32 = 8;

/// Static Huffman codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HuffmanCodec {
    symbol_bits: u32,
}

impl HuffmanCodec {
    /// Byte symbols.
    pub const BYTES: Self = Self {
        symbol_bits: DEFAULT_SYMBOL_BITS,
    };

    /// Create a codec for `symbol_bits`-wide symbols (1-63).
    pub fn new(symbol_bits: u32) -> Result<Self> {
        encode::check_symbol_bits(symbol_bits)?;
        Ok(Self { symbol_bits })
    }

    /// Symbol width in bits.
    pub fn symbol_bits(&self) -> u32 {
        self.symbol_bits
    }
}

impl Default for HuffmanCodec {
    fn default() -> Self {
        Self::BYTES
    }
}

impl BitCodec for HuffmanCodec {
    fn encode(&self, input: &BitBuffer) -> Result<BitBuffer> {
        encode(input, self.symbol_bits)
    }

    fn decode(&self, input: &BitBuffer) -> Result<BitBuffer> {
        decode(input)
    }

    fn method(&self) -> Method {
        Method::Huffman
    }
}

/// Read the fixed header of a non-empty frame.
pub fn read_header(data: &BitBuffer) -> Result<Option<FrameHeader>> {
    if data.is_empty() {
        return Ok(None);
    }
    let (header, _) = FrameHeader::read(&mut data.cursor())?;
    Ok(Some(header))
}
