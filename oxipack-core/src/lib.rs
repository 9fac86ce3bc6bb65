//! # OxiPack Core
//!
//! Core components for the OxiPack compression toolkit.
//!
//! This crate provides the fundamental building blocks shared by every codec:
//!
//! - [`bitbuffer`]: Packed MSB-first bit buffers and read cursors
//! - [`traits`]: The [`BitCodec`] contract implemented by each backend
//! - [`container`]: Single-stream file frame for persisting codec output
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Harness                                             │
//! │     CLI, batch verification, run reports                │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Hashed LZ + number codes, static Huffman            │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: Bits (this crate)                                   │
//! │     BitBuffer/BitCursor, container frame                │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipack_core::BitBuffer;
//!
//! let bits = BitBuffer::from_bytes(b"A");
//! assert_eq!(bits.to_string(), "01000001");
//!
//! let mut cursor = bits.cursor();
//! assert_eq!(cursor.read_bits(4).unwrap(), 0b0100);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitbuffer;
pub mod container;
pub mod error;
pub mod traits;

// Re-exports for convenience
pub use bitbuffer::{BitBuffer, BitCursor};
pub use container::{Container, ContainerHeader, Method};
pub use error::{ErrorKind, OxiPackError, Result};
pub use traits::BitCodec;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitbuffer::{BitBuffer, BitCursor};
    pub use crate::container::Method;
    pub use crate::error::{OxiPackError, Result};
    pub use crate::traits::BitCodec;
}
