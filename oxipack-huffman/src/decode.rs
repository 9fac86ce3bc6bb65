//! Huffman frame decoding.

use crate::frame::FrameHeader;
use crate::tree::{deserialize_tree, read_symbol};
use log::debug;
use oxipack_core::{BitBuffer, OxiPackError, Result};

/// Position of the serialized tree within a frame.
const TREE_OFFSET: u64 = 22;

/// Decode a Huffman frame.
///
/// Decoding stops once the declared number of bytes has been produced; any
/// bits left after that are ignored. The final symbol is truncated to the
/// bits still missing, mirroring the short chunk the encoder counted.
///
/// When the tree is a single leaf, every codeword must be the `0` bit. A `1`
/// bit fails with `MalformedStream` rather than being read as the lone
/// symbol, so streams from encoders that emit `1` for a single-symbol
/// alphabet are rejected.
pub fn decode(data: &BitBuffer) -> Result<BitBuffer> {
    if data.is_empty() {
        return Ok(BitBuffer::new());
    }

    let mut cursor = data.cursor();
    let (header, tree_bits) = FrameHeader::read(&mut cursor)?;
    let symbol_bits = header.symbol_bits;
    if symbol_bits == 0 {
        return Err(OxiPackError::malformed(0, "symbol width of 0 bits"));
    }

    if header.tree_size == 0 {
        if header.original_length != 0 {
            return Err(OxiPackError::malformed(
                TREE_OFFSET,
                format!("empty tree for {} bytes of output", header.original_length),
            ));
        }
        return Ok(BitBuffer::new());
    }

    let (tree, consumed) = deserialize_tree(&mut tree_bits.cursor(), symbol_bits)?;
    if consumed != header.tree_size {
        return Err(OxiPackError::malformed(
            TREE_OFFSET,
            format!(
                "tree uses {} bits, header declares {}",
                consumed, header.tree_size
            ),
        ));
    }

    let total = header.original_bits();
    let mut out = BitBuffer::with_capacity(total);
    while out.len() < total {
        let position = cursor.position();
        let symbol = read_symbol(&tree, &mut cursor)?;
        let width = (symbol_bits as usize).min(total - out.len()) as u32;
        if width < symbol_bits && symbol >> width != 0 {
            return Err(OxiPackError::malformed(
                position as u64,
                format!("final symbol {} does not fit in {} bits", symbol, width),
            ));
        }
        out.push_bits(symbol, width);
    }

    debug!(
        "Huffman decode: {} bits -> {} bytes ({} pad bits ignored)",
        data.len(),
        header.original_length,
        cursor.remaining()
    );
    Ok(out)
}
