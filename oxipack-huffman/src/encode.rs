//! Huffman frame encoding.

use crate::codes::generate_codes;
use crate::frame::{FrameHeader, MAX_ORIGINAL_LENGTH, MAX_SYMBOL_BITS};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, serialize_tree};
use log::debug;
use oxipack_core::{BitBuffer, OxiPackError, Result};

/// Check a symbol width against the header field.
pub(crate) fn check_symbol_bits(symbol_bits: u32) -> Result<()> {
    if symbol_bits == 0 {
        return Err(OxiPackError::invalid_parameter(
            "symbol_bits",
            "must be at least 1",
        ));
    }
    if symbol_bits > MAX_SYMBOL_BITS {
        return Err(OxiPackError::capacity_exceeded(
            "symbol_bits",
            symbol_bits as u64,
            MAX_SYMBOL_BITS as u64,
        ));
    }
    Ok(())
}

/// Encode `data` as a Huffman frame over `symbol_bits`-wide symbols.
///
/// Empty input encodes to an empty buffer. The input must be a whole number
/// of bytes no longer than the 17-bit length field allows.
pub fn encode(data: &BitBuffer, symbol_bits: u32) -> Result<BitBuffer> {
    check_symbol_bits(symbol_bits)?;
    if data.is_empty() {
        return Ok(BitBuffer::new());
    }
    if !data.is_byte_aligned() {
        return Err(OxiPackError::invalid_input(format!(
            "{} bits is not a whole number of bytes",
            data.len()
        )));
    }
    let original_length = data.len() / 8;
    if original_length > MAX_ORIGINAL_LENGTH {
        return Err(OxiPackError::capacity_exceeded(
            "original_length",
            original_length as u64,
            MAX_ORIGINAL_LENGTH as u64,
        ));
    }

    let table = FrequencyTable::from_bits(data, symbol_bits);
    let Some(tree) = HuffmanTree::build(&table) else {
        return Ok(BitBuffer::new());
    };
    let header = FrameHeader::new(symbol_bits, tree.serialized_len(symbol_bits), original_length)?;
    let codes = generate_codes(&tree);

    let mut tree_bits = BitBuffer::with_capacity(header.tree_size);
    serialize_tree(&tree, symbol_bits, &mut tree_bits);

    let mut out = BitBuffer::with_capacity(FrameHeader::fixed_bits() + header.tree_size + data.len());
    header.write(&tree_bits, &mut out);
    for symbol in data.chunks(symbol_bits) {
        let code = codes.get(symbol).ok_or_else(|| {
            OxiPackError::invalid_input(format!("symbol {} missing from code table", symbol))
        })?;
        out.extend_from(code);
    }

    debug!(
        "Huffman encode: {} bytes, {} symbols of {} bits, tree {} bits -> {} bits",
        original_length,
        table.total(),
        symbol_bits,
        header.tree_size,
        out.len()
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(encode(&BitBuffer::new(), 8).unwrap().is_empty());
    }

    #[test]
    fn test_hello_frame() {
        let out = encode(&BitBuffer::from_bytes(b"hello"), 8).unwrap();
        // 39 header bits + 4 leaves * 9 + 3 internal + 10 code bits
        assert_eq!(out.len(), 39 + 39 + 10);
        let mut cursor = out.cursor();
        assert_eq!(cursor.read_bits(6).unwrap(), 8);
        assert_eq!(cursor.read_bits(16).unwrap(), 39);
    }

    #[test]
    fn test_single_symbol_one_bit_each() {
        let out = encode(&BitBuffer::from_bytes(b"aaaaaa"), 8).unwrap();
        assert_eq!(out.len(), 39 + 9 + 6);
    }

    #[test]
    fn test_invalid_symbol_bits() {
        let data = BitBuffer::from_bytes(b"x");
        assert!(matches!(
            encode(&data, 0),
            Err(OxiPackError::InvalidParameter { .. })
        ));
        assert!(matches!(
            encode(&data, 64),
            Err(OxiPackError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_unaligned_rejected() {
        let data: BitBuffer = "10110".parse().unwrap();
        assert!(matches!(
            encode(&data, 8),
            Err(OxiPackError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_length_capacity() {
        let data = BitBuffer::from_bytes(&vec![0u8; MAX_ORIGINAL_LENGTH + 1]);
        assert!(matches!(
            encode(&data, 8),
            Err(OxiPackError::CapacityExceeded { .. })
        ));
    }

    #[test]
    fn test_tree_capacity() {
        // 8192 distinct 16-bit symbols: the tree alone exceeds 2^16 bits.
        let data: Vec<u8> = (0u16..8192).flat_map(|v| v.to_be_bytes()).collect();
        let err = encode(&BitBuffer::from_bytes(&data), 16).unwrap_err();
        assert!(matches!(
            err,
            OxiPackError::CapacityExceeded {
                field: "tree_size",
                ..
            }
        ));
    }
}
