//! # OxiPack-LZ: Hash-Indexed LZ Matching
//!
//! Greedy longest-match LZ over fixed-width symbols, with a k-gram hash index
//! to find candidate matches and a universal number code for the token stream.
//!
//! ## Algorithm
//!
//! At each position `i` the `K` symbols starting there form a key. Every
//! position registered under that key within the last `W` symbols is a
//! candidate; the longest run (at most `L` symbols) wins, earliest candidate
//! first on ties. The emitted token is `(offset, length, literal)` and the
//! position advances by `length + 1`.
//!
//! - **Byte mode** ([`LzConfig::BYTES`]): 8-bit symbols
//! - **Bit mode** ([`LzConfig::BITS`]): 1-bit symbols
//!
//! The final symbol of the input is always emitted as a literal.
//!
//! ## Example
//!
//! ```rust
//! use oxipack_lz::{LzConfig, compress, decompress};
//!
//! let original = b"abcabcabcabc";
//! let compressed = compress(original, LzConfig::BYTES).unwrap();
//! let decompressed = decompress(&compressed, LzConfig::BYTES).unwrap();
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codec;
mod config;
mod decoder;
mod hash_index;
mod matcher;
mod token;

pub use codec::LzCodec;
pub use config::{LzConfig, MAX_LITERAL_BITS};
pub use decoder::{DEFAULT_MAX_OUTPUT, reconstruct};
pub use hash_index::HashIndex;
pub use matcher::LzMatcher;
pub use token::{LzToken, deserialize_tokens, serialize_tokens};

use oxipack_core::{BitBuffer, BitCodec, Result};

/// Compress bytes into an LZ token stream.
pub fn compress(data: &[u8], config: LzConfig) -> Result<BitBuffer> {
    LzCodec::new(config)?.encode_bytes(data)
}

/// Decompress an LZ token stream back into bytes.
///
/// Only `literal_bits` and `small_number_bits` of `config` affect decoding.
pub fn decompress(data: &BitBuffer, config: LzConfig) -> Result<Vec<u8>> {
    LzCodec::new(config)?.decode_bytes(data)
}

/// Tokenize a byte slice.
///
/// # Example
///
/// ```rust
/// use oxipack_lz::{LzConfig, LzToken, tokenize_bytes};
///
/// let tokens = tokenize_bytes(b"AAAAA", LzConfig::new(3, 3, 1)).unwrap();
/// assert_eq!(tokens, vec![LzToken::literal(b'A' as u32), LzToken::new(1, 3, b'A' as u32)]);
/// ```
pub fn tokenize_bytes(data: &[u8], config: LzConfig) -> Result<Vec<LzToken>> {
    LzCodec::new(config)?.tokenize(&BitBuffer::from_bytes(data))
}
