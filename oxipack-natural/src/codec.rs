//! Universal code for non-negative integers.
//!
//! Small numbers (`n < 2^S`) are written as a `1` flag bit followed by `n` in
//! exactly `S` bits. Larger numbers use a three-level prefix:
//!
//! ```text
//! 0 0 .. 0      | logn            | n
//! loglogn zeros | loglogn bits    | logn bits
//! ```
//!
//! where `logn` is the bit length of `n` and `loglogn` is the bit length of
//! `logn`. Both `logn` and `n` are written in their minimal big-endian form,
//! so their leading bit is always `1`; that bit terminates the zero run and
//! tells the decoder how wide the `logn` field is.

use oxipack_core::{BitBuffer, BitCursor, OxiPackError, Result};

/// Default width of the small-number field.
pub const DEFAULT_SMALL_BITS: u8 = 5;

/// Largest supported small-number field width.
pub const MAX_SMALL_BITS: u8 = 32;

/// Largest `loglogn` a 64-bit value can produce (bit length of 64).
const MAX_LOGLOG: usize = 7;

/// Bit length of `n`: the smallest `k` with `n < 2^k`.
#[inline]
pub fn bit_length(n: u64) -> u32 {
    u64::BITS - n.leading_zeros()
}

/// Encoder/decoder for self-delimiting natural number codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberCodec {
    /// Width of the small-number field (`S`).
    small_bits: u8,
}

impl NumberCodec {
    /// Codec with the default small-number width of 5 bits.
    pub const DEFAULT: Self = Self {
        small_bits: DEFAULT_SMALL_BITS,
    };

    /// Create a codec with a custom small-number width (0-32 bits).
    pub fn new(small_bits: u8) -> Result<Self> {
        if small_bits > MAX_SMALL_BITS {
            return Err(OxiPackError::invalid_parameter(
                "small_bits",
                format!("{} exceeds maximum {}", small_bits, MAX_SMALL_BITS),
            ));
        }
        Ok(Self { small_bits })
    }

    /// Width of the small-number field.
    pub fn small_bits(&self) -> u8 {
        self.small_bits
    }

    /// Smallest value that takes the large-number path.
    pub fn small_limit(&self) -> u64 {
        1u64 << self.small_bits
    }

    /// Check whether `n` is written with the small-number form.
    #[inline]
    pub fn is_small(&self, n: u64) -> bool {
        n < self.small_limit()
    }

    /// Length in bits of the code for `n`.
    pub fn encoded_len(&self, n: u64) -> usize {
        if self.is_small(n) {
            return 1 + self.small_bits as usize;
        }
        let logn = bit_length(n);
        let loglogn = bit_length(logn as u64);
        2 * loglogn as usize + logn as usize
    }

    /// Append the code for `n` to `out`.
    pub fn encode(&self, out: &mut BitBuffer, n: u64) {
        if self.is_small(n) {
            out.push(true);
            out.push_bits(n, self.small_bits as u32);
            return;
        }

        let logn = bit_length(n);
        let loglogn = bit_length(logn as u64);
        out.push_zeros(loglogn as usize);
        out.push_bits(logn as u64, loglogn);
        out.push_bits(n, logn);
    }

    /// Append the code for a signed value, rejecting negatives.
    pub fn encode_signed(&self, out: &mut BitBuffer, n: i64) -> Result<()> {
        let n = u64::try_from(n)
            .map_err(|_| OxiPackError::invalid_input(format!("Unexpected negative: {}", n)))?;
        self.encode(out, n);
        Ok(())
    }

    /// Read one code from `cursor`.
    ///
    /// The cursor ends up just past the consumed code.
    pub fn decode(&self, cursor: &mut BitCursor<'_>) -> Result<u64> {
        let start = cursor.position() as u64;
        let flag = cursor
            .peek_bit()
            .ok_or_else(|| OxiPackError::unexpected_eof(start, 1))?;

        if flag {
            let width = 1 + self.small_bits as usize;
            if cursor.remaining() < width {
                return Err(OxiPackError::unexpected_eof(
                    start,
                    (width - cursor.remaining()) as u64,
                ));
            }
            cursor.skip(1)?;
            return cursor.read_bits(self.small_bits as u32);
        }

        let loglogn = cursor
            .first_set_offset()
            .ok_or_else(|| OxiPackError::unexpected_eof(start, cursor.remaining() as u64 + 1))?;
        if loglogn > MAX_LOGLOG {
            return Err(OxiPackError::malformed(
                start,
                format!("length prefix of {} zeros exceeds 64-bit range", loglogn),
            ));
        }

        cursor.skip(loglogn)?;
        let logn = cursor.read_bits(loglogn as u32)?;
        if logn > u64::BITS as u64 {
            return Err(OxiPackError::malformed(
                start,
                format!("value width {} exceeds 64 bits", logn),
            ));
        }
        cursor.read_bits(logn as u32)
    }
}

impl Default for NumberCodec {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_string(codec: &NumberCodec, n: u64) -> String {
        let mut out = BitBuffer::new();
        codec.encode(&mut out, n);
        out.to_string()
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(8), 4);
        assert_eq!(bit_length(1000), 10);
        assert_eq!(bit_length(u64::MAX), 64);
    }

    #[test]
    fn test_zero_is_small() {
        let codec = NumberCodec::DEFAULT;
        assert_eq!(encode_to_string(&codec, 0), "100000");

        let mut out = BitBuffer::new();
        codec.encode(&mut out, 0);
        let mut cursor = out.cursor();
        assert_eq!(codec.decode(&mut cursor).unwrap(), 0);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_small_boundary() {
        let codec = NumberCodec::DEFAULT;
        assert_eq!(encode_to_string(&codec, 31), "111111");
        // 32: logn = 6, loglogn = 3
        assert_eq!(encode_to_string(&codec, 32), "000110100000");
    }

    #[test]
    fn test_large_layout() {
        let codec = NumberCodec::DEFAULT;
        // 1000: logn = 10 (1010), loglogn = 4
        assert_eq!(encode_to_string(&codec, 1000), "000010101111101000");
        assert_eq!(codec.encoded_len(1000), 18);
    }

    #[test]
    fn test_power_of_two_width() {
        // Exact bit length: 2^10 needs 11 bits, not ceil(log2) = 10.
        let codec = NumberCodec::DEFAULT;
        let mut out = BitBuffer::new();
        codec.encode(&mut out, 1024);
        assert_eq!(out.len(), codec.encoded_len(1024));
        assert_eq!(codec.decode(&mut out.cursor()).unwrap(), 1024);
    }

    #[test]
    fn test_zero_width_small_field() {
        let codec = NumberCodec::new(0).unwrap();
        assert_eq!(encode_to_string(&codec, 0), "1");
        assert_eq!(encode_to_string(&codec, 1), "011");

        let mut out = BitBuffer::new();
        for n in [0u64, 1, 2, 3, 0] {
            codec.encode(&mut out, n);
        }
        let mut cursor = out.cursor();
        for n in [0u64, 1, 2, 3, 0] {
            assert_eq!(codec.decode(&mut cursor).unwrap(), n);
        }
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn test_invalid_small_bits() {
        assert!(NumberCodec::new(33).is_err());
        assert!(NumberCodec::new(32).is_ok());
    }

    #[test]
    fn test_negative_rejected() {
        let codec = NumberCodec::DEFAULT;
        let mut out = BitBuffer::new();
        let err = codec.encode_signed(&mut out, -1).unwrap_err();
        assert!(matches!(err, OxiPackError::InvalidInput { .. }));
        assert!(out.is_empty());

        codec.encode_signed(&mut out, 7).unwrap();
        assert_eq!(out.to_string(), "100111");
    }

    #[test]
    fn test_truncated_small() {
        let codec = NumberCodec::DEFAULT;
        let bits: BitBuffer = "1010".parse().unwrap();
        let err = codec.decode(&mut bits.cursor()).unwrap_err();
        assert!(matches!(err, OxiPackError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_truncated_large() {
        let codec = NumberCodec::DEFAULT;
        let mut out = BitBuffer::new();
        codec.encode(&mut out, 1000);
        let truncated = out.slice(0..out.len() - 1).unwrap();
        assert!(matches!(
            codec.decode(&mut truncated.cursor()),
            Err(OxiPackError::UnexpectedEof { .. })
        ));

        let zeros: BitBuffer = "0000".parse().unwrap();
        assert!(codec.decode(&mut zeros.cursor()).is_err());

        let empty = BitBuffer::new();
        assert!(codec.decode(&mut empty.cursor()).is_err());
    }

    #[test]
    fn test_oversized_prefix() {
        let codec = NumberCodec::DEFAULT;
        let bits: BitBuffer = "00000000 1 0000000 1".parse().unwrap();
        assert!(matches!(
            codec.decode(&mut bits.cursor()),
            Err(OxiPackError::MalformedStream { .. })
        ));
    }
}
