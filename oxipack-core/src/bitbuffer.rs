//! Bit buffers and read cursors.
//!
//! Every wire format in OxiPack is defined in terms of a flat sequence of bits.
//! [`BitBuffer`] stores such a sequence packed MSB-first (the first bit of the
//! sequence is the most significant bit of the first byte), and [`BitCursor`]
//! reads it front to back without mutating it.
//!
//! # Bit Ordering
//!
//! Multi-bit values are written and read most-significant-bit first, so
//! `push_bits(0b101, 3)` appends the bits `1`, `0`, `1` in that order.
//!
//! # Example
//!
//! ```
//! use oxipack_core::bitbuffer::BitBuffer;
//!
//! let mut bits = BitBuffer::new();
//! bits.push_bits(0b101, 3);
//! bits.push_bits(0b1100, 4);
//! assert_eq!(bits.to_string(), "1011100");
//!
//! let mut cursor = bits.cursor();
//! assert_eq!(cursor.read_bits(3).unwrap(), 0b101);
//! assert_eq!(cursor.read_bits(4).unwrap(), 0b1100);
//! assert!(cursor.is_exhausted());
//! ```

use crate::error::{OxiPackError, Result};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Maximum number of bits that fit in a single integer read or write.
pub const MAX_INT_BITS: u32 = 64;

/// A growable, packed, MSB-first sequence of bits.
///
/// Unused bits of the final byte are always zero, so two buffers compare
/// equal exactly when they hold the same bit sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BitBuffer {
    /// Packed storage.
    bytes: Vec<u8>,
    /// Number of valid bits.
    len: usize,
}

impl BitBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bits.div_ceil(8)),
            len: 0,
        }
    }

    /// Create a buffer holding every bit of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            len: bytes.len() * 8,
        }
    }

    /// Create a buffer from packed storage and an explicit bit length.
    ///
    /// Bytes beyond `len` are dropped and pad bits in the last byte are cleared.
    pub fn from_raw_parts(mut bytes: Vec<u8>, len: usize) -> Result<Self> {
        if len > bytes.len() * 8 {
            return Err(OxiPackError::invalid_input(format!(
                "bit length {} exceeds storage of {} bytes",
                len,
                bytes.len()
            )));
        }
        bytes.truncate(len.div_ceil(8));
        let tail = len % 8;
        if let Some(last) = bytes.last_mut().filter(|_| tail != 0) {
            *last &= 0xFFu8 << (8 - tail);
        }
        Ok(Self { bytes, len })
    }

    /// Create a buffer holding `value` as exactly `width` bits.
    pub fn from_uint(value: u64, width: u32) -> Self {
        let mut buffer = Self::with_capacity(width as usize);
        buffer.push_bits(value, width);
        buffer
    }

    /// Number of bits in the buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check whether the buffer holds no bits.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether the bit length is a whole number of bytes.
    pub fn is_byte_aligned(&self) -> bool {
        self.len % 8 == 0
    }

    /// Append one bit.
    #[inline]
    pub fn push(&mut self, bit: bool) {
        let offset = self.len % 8;
        if offset == 0 {
            self.bytes.push(0);
        }
        if bit {
            let last = self.bytes.len() - 1;
            self.bytes[last] |= 0x80 >> offset;
        }
        self.len += 1;
    }

    /// Append the low `count` bits of `value`, most significant first.
    ///
    /// Bits of `value` above `count` are ignored.
    pub fn push_bits(&mut self, value: u64, count: u32) {
        debug_assert!(count <= MAX_INT_BITS, "Cannot write more than 64 bits at once");
        for shift in (0..count).rev() {
            self.push((value >> shift) & 1 == 1);
        }
    }

    /// Append `count` zero bits.
    pub fn push_zeros(&mut self, count: usize) {
        let new_len = self.len + count;
        self.bytes.resize(new_len.div_ceil(8), 0);
        self.len = new_len;
    }

    /// Append every bit of `other`.
    pub fn extend_from(&mut self, other: &BitBuffer) {
        if self.is_byte_aligned() {
            self.bytes.extend_from_slice(&other.bytes);
            self.len += other.len;
            return;
        }
        for bit in other.iter() {
            self.push(bit);
        }
    }

    /// Get the bit at `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Copy the bits in `range` into a new buffer.
    pub fn slice(&self, range: Range<usize>) -> Option<Self> {
        if range.start > range.end || range.end > self.len {
            return None;
        }
        let mut out = Self::with_capacity(range.len());
        for index in range {
            out.push(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0);
        }
        Some(out)
    }

    /// Interpret the whole buffer as an unsigned integer (MSB first).
    ///
    /// Returns `None` if the buffer holds more than 64 bits.
    pub fn to_uint(&self) -> Option<u64> {
        if self.len > MAX_INT_BITS as usize {
            return None;
        }
        Some(self.iter().fold(0u64, |acc, bit| (acc << 1) | bit as u64))
    }

    /// Packed bytes; the last byte is zero-padded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer and return its packed bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Iterate over the bits in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |index| self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Split the buffer into consecutive `width`-bit unsigned symbols.
    ///
    /// A final chunk shorter than `width` yields the value of its available
    /// bits without padding.
    pub fn chunks(&self, width: u32) -> Chunks<'_> {
        debug_assert!(
            (1..=MAX_INT_BITS).contains(&width),
            "Chunk width must be 1-64 bits"
        );
        Chunks {
            cursor: self.cursor(),
            width,
        }
    }

    /// Create a read cursor positioned at the first bit.
    pub fn cursor(&self) -> BitCursor<'_> {
        BitCursor::new(self)
    }
}

impl fmt::Display for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitBuffer {
    type Err = OxiPackError;

    /// Parse a string of `'0'` and `'1'` characters; whitespace is ignored.
    fn from_str(s: &str) -> Result<Self> {
        let mut buffer = Self::with_capacity(s.len());
        for c in s.chars() {
            match c {
                '0' => buffer.push(false),
                '1' => buffer.push(true),
                c if c.is_whitespace() => {}
                other => {
                    return Err(OxiPackError::invalid_input(format!(
                        "invalid bit character {:?}",
                        other
                    )));
                }
            }
        }
        Ok(buffer)
    }
}

impl FromIterator<bool> for BitBuffer {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl Extend<bool> for BitBuffer {
    fn extend<I: IntoIterator<Item = bool>>(&mut self, iter: I) {
        for bit in iter {
            self.push(bit);
        }
    }
}

impl From<&[u8]> for BitBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for BitBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        let len = bytes.len() * 8;
        Self { bytes, len }
    }
}

/// Iterator over fixed-width symbols of a [`BitBuffer`].
#[derive(Debug)]
pub struct Chunks<'a> {
    cursor: BitCursor<'a>,
    width: u32,
}

impl Iterator for Chunks<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let remaining = self.cursor.remaining();
        if remaining == 0 {
            return None;
        }
        let width = (self.width as usize).min(remaining) as u32;
        self.cursor.read_bits(width).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.cursor.remaining().div_ceil(self.width as usize);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Chunks<'_> {}

/// A forward-only read cursor over a [`BitBuffer`].
///
/// Reading never mutates the buffer; the cursor position is the number of
/// bits consumed so far.
#[derive(Debug, Clone)]
pub struct BitCursor<'a> {
    /// Buffer being read.
    buffer: &'a BitBuffer,
    /// Index of the next bit to read.
    position: usize,
}

impl<'a> BitCursor<'a> {
    /// Create a cursor at the start of `buffer`.
    pub fn new(buffer: &'a BitBuffer) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Number of bits consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bits left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Check whether every bit has been consumed.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Fail with `UnexpectedEof` unless `count` bits remain.
    #[inline]
    fn require(&self, count: usize) -> Result<()> {
        let remaining = self.remaining();
        if remaining < count {
            return Err(OxiPackError::unexpected_eof(
                self.position as u64,
                (count - remaining) as u64,
            ));
        }
        Ok(())
    }

    /// Look at the next bit without consuming it.
    #[inline]
    pub fn peek_bit(&self) -> Option<bool> {
        self.buffer.get(self.position)
    }

    /// Read one bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        let bit = self
            .buffer
            .get(self.position)
            .ok_or_else(|| OxiPackError::unexpected_eof(self.position as u64, 1))?;
        self.position += 1;
        Ok(bit)
    }

    /// Read `count` bits (at most 64) as an unsigned integer, MSB first.
    pub fn read_bits(&mut self, count: u32) -> Result<u64> {
        if count > MAX_INT_BITS {
            return Err(OxiPackError::invalid_parameter(
                "count",
                format!("cannot read {} bits into a 64-bit integer", count),
            ));
        }
        self.require(count as usize)?;

        let bytes = self.buffer.as_bytes();
        let mut value = 0u64;
        for index in self.position..self.position + count as usize {
            let bit = bytes[index / 8] & (0x80 >> (index % 8)) != 0;
            value = (value << 1) | bit as u64;
        }
        self.position += count as usize;
        Ok(value)
    }

    /// Read `count` bits into a new buffer.
    pub fn read_buffer(&mut self, count: usize) -> Result<BitBuffer> {
        self.require(count)?;
        let out = self
            .buffer
            .slice(self.position..self.position + count)
            .ok_or_else(|| OxiPackError::unexpected_eof(self.position as u64, count as u64))?;
        self.position += count;
        Ok(out)
    }

    /// Skip `count` bits.
    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.require(count)?;
        self.position += count;
        Ok(())
    }

    /// Distance from the cursor to the next set bit, without consuming anything.
    ///
    /// Returns `None` if no set bit remains.
    pub fn first_set_offset(&self) -> Option<usize> {
        let bytes = self.buffer.as_bytes();
        let len = self.buffer.len();
        let mut index = self.position;

        while index < len {
            // Whole zero bytes are skipped at once.
            if index % 8 == 0 && bytes[index / 8] == 0 {
                index += 8;
                continue;
            }
            if bytes[index / 8] & (0x80 >> (index % 8)) != 0 {
                return Some(index - self.position);
            }
            index += 1;
        }
        None
    }
}
