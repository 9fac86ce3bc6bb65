//! Core traits for bit-level codecs.
//!
//! Every backend in OxiPack is a standalone, swappable codec that maps a flat
//! bit sequence to another flat bit sequence. The harness layer only ever
//! talks to backends through [`BitCodec`].

use crate::bitbuffer::BitBuffer;
use crate::container::Method;
use crate::error::{OxiPackError, Result};

/// A whole-buffer bit codec.
///
/// Implementations must guarantee `decode(encode(x)) == x` for every input
/// they accept, and must produce identical output for identical input.
pub trait BitCodec {
    /// Encode `input` into a self-contained bit stream.
    fn encode(&self, input: &BitBuffer) -> Result<BitBuffer>;

    /// Decode a bit stream produced by [`BitCodec::encode`].
    fn decode(&self, input: &BitBuffer) -> Result<BitBuffer>;

    /// The method identifier recorded in container frames.
    fn method(&self) -> Method;

    /// Encode a byte slice (convenience method).
    fn encode_bytes(&self, input: &[u8]) -> Result<BitBuffer> {
        self.encode(&BitBuffer::from_bytes(input))
    }

    /// Decode to a byte vector (convenience method).
    ///
    /// Fails if the decoded bit length is not a whole number of bytes.
    fn decode_bytes(&self, input: &BitBuffer) -> Result<Vec<u8>> {
        let decoded = self.decode(input)?;
        if !decoded.is_byte_aligned() {
            return Err(OxiPackError::invalid_input(format!(
                "decoded {} bits, not a whole number of bytes",
                decoded.len()
            )));
        }
        Ok(decoded.into_bytes())
    }

    /// Encode `input`, decode the result, and check it matches.
    ///
    /// Returns the encoded stream on success.
    fn roundtrip_check(&self, input: &BitBuffer) -> Result<BitBuffer> {
        let encoded = self.encode(input)?;
        let decoded = self.decode(&encoded)?;
        if decoded != *input {
            return Err(OxiPackError::malformed(
                0,
                format!(
                    "{} round trip mismatch: {} bits in, {} bits out",
                    self.method(),
                    input.len(),
                    decoded.len()
                ),
            ));
        }
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Identity codec used to exercise the provided methods.
    struct Identity;

    impl BitCodec for Identity {
        fn encode(&self, input: &BitBuffer) -> Result<BitBuffer> {
            Ok(input.clone())
        }

        fn decode(&self, input: &BitBuffer) -> Result<BitBuffer> {
            Ok(input.clone())
        }

        fn method(&self) -> Method {
            Method::Unknown(0)
        }
    }

    /// Codec that drops the last bit on decode.
    struct Lossy;

    impl BitCodec for Lossy {
        fn encode(&self, input: &BitBuffer) -> Result<BitBuffer> {
            Ok(input.clone())
        }

        fn decode(&self, input: &BitBuffer) -> Result<BitBuffer> {
            Ok(input.slice(0..input.len().saturating_sub(1)).unwrap_or_default())
        }

        fn method(&self) -> Method {
            Method::Unknown(1)
        }
    }

    #[test]
    fn test_byte_helpers() {
        let encoded = Identity.encode_bytes(b"abc").unwrap();
        assert_eq!(encoded.len(), 24);
        assert_eq!(Identity.decode_bytes(&encoded).unwrap(), b"abc");

        let odd: BitBuffer = "101".parse().unwrap();
        assert!(Identity.decode_bytes(&odd).is_err());
    }

    #[test]
    fn test_roundtrip_check() {
        let input = BitBuffer::from_bytes(b"xy");
        assert_eq!(Identity.roundtrip_check(&input).unwrap(), input);
        assert!(Lossy.roundtrip_check(&input).is_err());
    }
}
