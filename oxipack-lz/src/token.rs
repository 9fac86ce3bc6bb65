//! LZ tokens and their bit-stream form.
//!
//! Each token is written as
//!
//! ```text
//! NumberCodec(offset) | NumberCodec(length) | literal (literal_bits)
//! ```
//!
//! with no separators and no token count. The stream ends when the buffer does.

use oxipack_core::{BitBuffer, OxiPackError, Result};
use oxipack_natural::NumberCodec;
use std::fmt;

/// One back-reference plus the symbol that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LzToken {
    /// Distance back from the current output position (0 = no copy).
    pub offset: usize,
    /// Symbols copied from `offset` (0 = no copy).
    pub length: usize,
    /// Symbol emitted after the copy.
    pub literal: u32,
}

impl LzToken {
    /// Create a token.
    pub fn new(offset: usize, length: usize, literal: u32) -> Self {
        Self {
            offset,
            length,
            literal,
        }
    }

    /// A token with no back-reference.
    pub fn literal(literal: u32) -> Self {
        Self::new(0, 0, literal)
    }

    /// Check whether this token copies anything.
    pub fn is_match(&self) -> bool {
        self.length > 0
    }

    /// Number of symbols this token produces.
    pub fn span(&self) -> usize {
        self.length + 1
    }
}

impl fmt::Display for LzToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.offset, self.length, self.literal)
    }
}

/// Append the bit form of `tokens` to `out`.
///
/// Literals wider than `literal_bits` are a capacity error.
pub fn serialize_tokens(
    tokens: &[LzToken],
    codec: &NumberCodec,
    literal_bits: u8,
    out: &mut BitBuffer,
) -> Result<()> {
    let limit = 1u64 << literal_bits;
    for token in tokens {
        if token.literal as u64 >= limit {
            return Err(OxiPackError::capacity_exceeded(
                "literal",
                token.literal as u64,
                limit - 1,
            ));
        }
        codec.encode(out, token.offset as u64);
        codec.encode(out, token.length as u64);
        out.push_bits(token.literal as u64, literal_bits as u32);
    }
    Ok(())
}

/// Read tokens until `input` is exhausted.
///
/// A token cut short anywhere is an `UnexpectedEof`.
pub fn deserialize_tokens(
    input: &BitBuffer,
    codec: &NumberCodec,
    literal_bits: u8,
) -> Result<Vec<LzToken>> {
    let mut cursor = input.cursor();
    let mut tokens = Vec::new();

    while !cursor.is_exhausted() {
        let offset = to_usize("offset", codec.decode(&mut cursor)?)?;
        let length = to_usize("length", codec.decode(&mut cursor)?)?;
        let literal = cursor.read_bits(literal_bits as u32)? as u32;
        tokens.push(LzToken::new(offset, length, literal));
    }

    Ok(tokens)
}

fn to_usize(field: &'static str, value: u64) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| OxiPackError::capacity_exceeded(field, value, usize::MAX as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_accessors() {
        let token = LzToken::new(2, 3, 65);
        assert!(token.is_match());
        assert_eq!(token.span(), 4);
        assert_eq!(token.to_string(), "(2, 3, 65)");
        assert!(!LzToken::literal(1).is_match());
    }

    #[test]
    fn test_bit_layout() {
        let codec = NumberCodec::DEFAULT;
        let mut out = BitBuffer::new();
        serialize_tokens(&[LzToken::new(2, 1, 0)], &codec, 1, &mut out).unwrap();
        // offset 2 | length 1 | literal 0
        assert_eq!(out.to_string(), "1000101000010");
    }

    #[test]
    fn test_stream_roundtrip() {
        let codec = NumberCodec::DEFAULT;
        let tokens = vec![
            LzToken::literal(b'A' as u32),
            LzToken::new(1, 3, b'A' as u32),
            LzToken::new(4000, 255, b'z' as u32),
        ];
        let mut out = BitBuffer::new();
        serialize_tokens(&tokens, &codec, 8, &mut out).unwrap();
        assert_eq!(deserialize_tokens(&out, &codec, 8).unwrap(), tokens);
    }

    #[test]
    fn test_empty_stream() {
        let codec = NumberCodec::DEFAULT;
        let tokens = deserialize_tokens(&BitBuffer::new(), &codec, 8).unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_literal_too_wide() {
        let codec = NumberCodec::DEFAULT;
        let mut out = BitBuffer::new();
        let err = serialize_tokens(&[LzToken::literal(2)], &codec, 1, &mut out).unwrap_err();
        assert!(matches!(err, OxiPackError::CapacityExceeded { .. }));
    }

    #[test]
    fn test_truncated_literal() {
        let codec = NumberCodec::DEFAULT;
        let mut out = BitBuffer::new();
        serialize_tokens(&[LzToken::literal(200)], &codec, 8, &mut out).unwrap();
        let truncated = out.slice(0..out.len() - 3).unwrap();
        assert!(matches!(
            deserialize_tokens(&truncated, &codec, 8),
            Err(OxiPackError::UnexpectedEof { .. })
        ));
    }
}
