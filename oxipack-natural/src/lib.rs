//! # OxiPack-Natural: Universal Number Codes
//!
//! This crate encodes non-negative integers into self-delimiting,
//! variable-length bit codes. Because every code carries its own length, any
//! number of codes can be concatenated into one [`BitBuffer`] and read back in
//! order without separators or a count field.
//!
//! ## Code Layout
//!
//! - **Small** (`n < 2^S`, default `S = 5`): flag bit `1`, then `n` in `S` bits
//! - **Large**: `loglogn` zero bits, then `logn` (bit length of `n`) in
//!   `loglogn` bits, then `n` in `logn` bits
//!
//! ## Example
//!
//! ```rust
//! use oxipack_core::BitBuffer;
//! use oxipack_natural::NumberCodec;
//!
//! let codec = NumberCodec::DEFAULT;
//! let mut bits = BitBuffer::new();
//! codec.encode(&mut bits, 3);
//! codec.encode(&mut bits, 1000);
//!
//! let mut cursor = bits.cursor();
//! assert_eq!(codec.decode(&mut cursor).unwrap(), 3);
//! assert_eq!(codec.decode(&mut cursor).unwrap(), 1000);
//! assert!(cursor.is_exhausted());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod codec;

pub use codec::{DEFAULT_SMALL_BITS, MAX_SMALL_BITS, NumberCodec, bit_length};

use oxipack_core::{BitBuffer, Result};

/// Encode a sequence of numbers into one buffer.
///
/// # Example
///
/// ```rust
/// use oxipack_natural::{NumberCodec, decode_all, encode_all};
///
/// let codec = NumberCodec::DEFAULT;
/// let bits = encode_all(&codec, &[0, 31, 32, 1 << 40]);
/// assert_eq!(decode_all(&codec, &bits).unwrap(), vec![0, 31, 32, 1 << 40]);
/// ```
pub fn encode_all(codec: &NumberCodec, numbers: &[u64]) -> BitBuffer {
    let capacity = numbers.iter().map(|&n| codec.encoded_len(n)).sum();
    let mut out = BitBuffer::with_capacity(capacity);
    for &n in numbers {
        codec.encode(&mut out, n);
    }
    out
}

/// Decode codes until the buffer is exhausted.
///
/// A trailing partial code is an error.
pub fn decode_all(codec: &NumberCodec, bits: &BitBuffer) -> Result<Vec<u64>> {
    let mut cursor = bits.cursor();
    let mut numbers = Vec::new();
    while !cursor.is_exhausted() {
        numbers.push(codec.decode(&mut cursor)?);
    }
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_all_empty() {
        let codec = NumberCodec::DEFAULT;
        let bits = encode_all(&codec, &[]);
        assert!(bits.is_empty());
        assert!(decode_all(&codec, &bits).unwrap().is_empty());
    }

    #[test]
    fn test_decode_all_trailing_garbage() {
        let codec = NumberCodec::DEFAULT;
        let mut bits = encode_all(&codec, &[5, 6]);
        bits.push(true);
        assert!(decode_all(&codec, &bits).is_err());
    }
}
