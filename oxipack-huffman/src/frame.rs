//! Huffman frame layout.
//!
//! ```text
//! +-------------+-----------+------------------+-----------------+----------+
//! | symbol_bits | tree_size | tree             | original_length | codes    |
//! | 6 bits      | 16 bits   | tree_size bits   | 17 bits (bytes) | ...      |
//! +-------------+-----------+------------------+-----------------+----------+
//! ```

use oxipack_core::{BitBuffer, BitCursor, OxiPackError, Result};

/// Width of the symbol size field.
pub const SYMBOL_BITS_FIELD: u32 = 6;

/// Width of the serialized tree size field.
pub const TREE_SIZE_FIELD: u32 = 16;

/// Width of the original length field.
pub const LENGTH_FIELD: u32 = 17;

/// Largest symbol width the header can describe.
pub const MAX_SYMBOL_BITS: u32 = (1 << SYMBOL_BITS_FIELD) - 1;

/// Largest serialized tree in bits.
pub const MAX_TREE_SIZE: usize = (1 << TREE_SIZE_FIELD) - 1;

/// Largest original input in bytes.
pub const MAX_ORIGINAL_LENGTH: usize = (1 << LENGTH_FIELD) - 1;

/// Fixed header fields of a Huffman frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Symbol width in bits.
    pub symbol_bits: u32,
    /// Serialized tree length in bits.
    pub tree_size: usize,
    /// Original input length in bytes.
    pub original_length: usize,
}

impl FrameHeader {
    /// Create a header, checking every field against its width.
    pub fn new(symbol_bits: u32, tree_size: usize, original_length: usize) -> Result<Self> {
        if symbol_bits > MAX_SYMBOL_BITS {
            return Err(OxiPackError::capacity_exceeded(
                "symbol_bits",
                symbol_bits as u64,
                MAX_SYMBOL_BITS as u64,
            ));
        }
        if tree_size > MAX_TREE_SIZE {
            return Err(OxiPackError::capacity_exceeded(
                "tree_size",
                tree_size as u64,
                MAX_TREE_SIZE as u64,
            ));
        }
        if original_length > MAX_ORIGINAL_LENGTH {
            return Err(OxiPackError::capacity_exceeded(
                "original_length",
                original_length as u64,
                MAX_ORIGINAL_LENGTH as u64,
            ));
        }
        Ok(Self {
            symbol_bits,
            tree_size,
            original_length,
        })
    }

    /// Number of bits the decoder must produce.
    pub fn original_bits(&self) -> usize {
        self.original_length * 8
    }

    /// Header bits excluding the tree.
    pub const fn fixed_bits() -> usize {
        (SYMBOL_BITS_FIELD + TREE_SIZE_FIELD + LENGTH_FIELD) as usize
    }

    /// Append the header with `tree` in place.
    ///
    /// `tree` must be `tree_size` bits long.
    pub fn write(&self, tree: &BitBuffer, out: &mut BitBuffer) {
        debug_assert_eq!(tree.len(), self.tree_size);
        out.push_bits(self.symbol_bits as u64, SYMBOL_BITS_FIELD);
        out.push_bits(self.tree_size as u64, TREE_SIZE_FIELD);
        out.extend_from(tree);
        out.push_bits(self.original_length as u64, LENGTH_FIELD);
    }

    /// Read the header, returning it with the raw tree bits.
    pub fn read(cursor: &mut BitCursor<'_>) -> Result<(Self, BitBuffer)> {
        let symbol_bits = cursor.read_bits(SYMBOL_BITS_FIELD)? as u32;
        let tree_size = cursor.read_bits(TREE_SIZE_FIELD)? as usize;
        let tree = cursor.read_buffer(tree_size)?;
        let original_length = cursor.read_bits(LENGTH_FIELD)? as usize;
        Ok((
            Self {
                symbol_bits,
                tree_size,
                original_length,
            },
            tree,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_limits() {
        assert_eq!(MAX_SYMBOL_BITS, 63);
        assert_eq!(MAX_TREE_SIZE, 65535);
        assert_eq!(MAX_ORIGINAL_LENGTH, 131071);
        assert_eq!(FrameHeader::fixed_bits(), 39);
    }

    #[test]
    fn test_capacity_errors() {
        assert!(FrameHeader::new(64, 0, 0).is_err());
        assert!(FrameHeader::new(8, 65536, 0).is_err());
        let err = FrameHeader::new(8, 9, 131072).unwrap_err();
        assert!(matches!(err, OxiPackError::CapacityExceeded { .. }));
        assert!(FrameHeader::new(63, 65535, 131071).is_ok());
    }

    #[test]
    fn test_write_read() {
        let tree: BitBuffer = "101100001".parse().unwrap();
        let header = FrameHeader::new(8, tree.len(), 3).unwrap();
        let mut out = BitBuffer::new();
        header.write(&tree, &mut out);
        out.push_bits(0b0, 3);
        assert_eq!(out.len(), FrameHeader::fixed_bits() + 9 + 3);

        let mut cursor = out.cursor();
        let (decoded, decoded_tree) = FrameHeader::read(&mut cursor).unwrap();
        assert_eq!(decoded, header);
        assert_eq!(decoded_tree, tree);
        assert_eq!(decoded.original_bits(), 24);
        assert_eq!(cursor.remaining(), 3);
    }

    #[test]
    fn test_truncated_header() {
        let bits: BitBuffer = "001000 0000000000".parse().unwrap();
        assert!(matches!(
            FrameHeader::read(&mut bits.cursor()),
            Err(OxiPackError::UnexpectedEof { .. })
        ));
    }
}
