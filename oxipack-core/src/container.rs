//! Single-stream container frame.
//!
//! Codec output is a bit sequence whose length is generally not a multiple of
//! eight, and some streams (the LZ token stream) end only when their input is
//! exhausted. To persist such a stream in a byte-oriented file, the exact
//! payload bit length is stored in a small fixed header:
//!
//! ```text
//! +--------+---------+--------+---------+---------+------------------+---------+
//! | "OXPK" | version | method | param_a | param_b | payload_bits u64 | payload |
//! | 4 B    | 1 B     | 1 B    | 1 B     | 1 B     | 8 B big-endian   | ...     |
//! +--------+---------+--------+---------+---------+------------------+---------+
//! ```
//!
//! This is one stream per file, not a multi-entry archive.

use crate::bitbuffer::BitBuffer;
use crate::error::{OxiPackError, Result};
use std::fmt;
use std::io::{Read, Write};

/// Container magic bytes.
pub const MAGIC: [u8; 4] = *b"OXPK";

/// Current container version.
pub const VERSION: u8 = 1;

/// Size of the fixed container header in bytes.
pub const HEADER_SIZE: usize = 16;

/// Codec used to produce a container payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Hashed LZ token stream.
    Lz,
    /// Static Huffman frame.
    Huffman,
    /// Unknown/unsupported method.
    Unknown(u8),
}

impl Method {
    /// Wire identifier of this method.
    pub fn id(&self) -> u8 {
        match self {
            Self::Lz => 1,
            Self::Huffman => 2,
            Self::Unknown(id) => *id,
        }
    }

    /// Look up a method by its wire identifier.
    pub fn from_id(id: u8) -> Self {
        match id {
            1 => Self::Lz,
            2 => Self::Huffman,
            other => Self::Unknown(other),
        }
    }

    /// Get the method name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lz => "LZ",
            Self::Huffman => "Huffman",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(id) => write!(f, "Unknown({})", id),
            _ => write!(f, "{}", self.name()),
        }
    }
}

/// Fixed container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerHeader {
    /// Codec that produced the payload.
    pub method: Method,
    /// Codec-specific parameters needed to decode the payload.
    pub params: [u8; 2],
    /// Exact payload length in bits.
    pub payload_bits: u64,
}

impl ContainerHeader {
    /// Payload length in bytes (last byte zero-padded).
    pub fn payload_bytes(&self) -> u64 {
        self.payload_bits.div_ceil(8)
    }

    /// Total size of a container with this header, in bytes.
    pub fn total_size(&self) -> u64 {
        HEADER_SIZE as u64 + self.payload_bytes()
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        out[0..4].copy_from_slice(&MAGIC);
        out[4] = VERSION;
        out[5] = self.method.id();
        out[6] = self.params[0];
        out[7] = self.params[1];
        out[8..16].copy_from_slice(&self.payload_bits.to_be_bytes());
        out
    }

    /// Parse and validate a header.
    pub fn from_bytes(bytes: &[u8; HEADER_SIZE]) -> Result<Self> {
        if bytes[0..4] != MAGIC {
            return Err(OxiPackError::invalid_magic(MAGIC.to_vec(), bytes[0..4].to_vec()));
        }
        if bytes[4] != VERSION {
            return Err(OxiPackError::unsupported_method(format!(
                "container version {}",
                bytes[4]
            )));
        }
        let method = Method::from_id(bytes[5]);
        if let Method::Unknown(id) = method {
            return Err(OxiPackError::unsupported_method(format!("method id {}", id)));
        }
        let mut length = [0u8; 8];
        length.copy_from_slice(&bytes[8..16]);
        Ok(Self {
            method,
            params: [bytes[6], bytes[7]],
            payload_bits: u64::from_be_bytes(length),
        })
    }
}

/// A header plus its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Frame header.
    pub header: ContainerHeader,
    /// Codec output.
    pub payload: BitBuffer,
}

impl Container {
    /// Wrap a codec payload.
    pub fn new(method: Method, params: [u8; 2], payload: BitBuffer) -> Self {
        Self {
            header: ContainerHeader {
                method,
                params,
                payload_bits: payload.len() as u64,
            },
            payload,
        }
    }

    /// Write header and payload.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.header.to_bytes())?;
        writer.write_all(self.payload.as_bytes())?;
        Ok(())
    }

    /// Serialize to a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header.total_size() as usize);
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(self.payload.as_bytes());
        out
    }

    /// Read only the header.
    pub fn read_header<R: Read>(reader: &mut R) -> Result<ContainerHeader> {
        let mut header = [0u8; HEADER_SIZE];
        reader.read_exact(&mut header)?;
        ContainerHeader::from_bytes(&header)
    }

    /// Read header and payload.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let header = Self::read_header(reader)?;
        let payload_len = usize::try_from(header.payload_bytes()).map_err(|_| {
            OxiPackError::capacity_exceeded("payload_bits", header.payload_bits, usize::MAX as u64)
        })?;
        let mut bytes = Vec::new();
        reader.take(header.payload_bytes()).read_to_end(&mut bytes)?;
        if bytes.len() != payload_len {
            return Err(OxiPackError::unexpected_eof(
                (HEADER_SIZE + bytes.len()) as u64 * 8,
                ((payload_len - bytes.len()) as u64).saturating_mul(8),
            ));
        }
        let payload = BitBuffer::from_raw_parts(bytes, header.payload_bits as usize)?;
        Ok(Self { header, payload })
    }
}
