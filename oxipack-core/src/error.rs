//! Error types for OxiPack operations.
//!
//! A single error enum is shared by every codec in the workspace. Each variant
//! maps onto one of three failure kinds that callers care about: invalid
//! input, exceeded header capacity, and malformed streams. I/O and container
//! errors only appear at the file-frame layer.

use std::io;
use thiserror::Error;

/// The main error type for OxiPack operations.
#[derive(Debug, Error)]
pub enum OxiPackError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Input rejected before any encoding took place.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// Description of the problem.
        message: String,
    },

    /// A codec parameter is outside its supported range.
    #[error("Invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the accepted range.
        message: String,
    },

    /// A value does not fit into its fixed-width header field.
    #[error("Capacity exceeded: {field} = {value} does not fit (max {max})")]
    CapacityExceeded {
        /// Header field that overflowed.
        field: &'static str,
        /// Value that was to be stored.
        value: u64,
        /// Largest value the field can hold.
        max: u64,
    },

    /// The stream ended before a field could be read completely.
    #[error("Unexpected end of stream at bit {position}: need {needed} more bits")]
    UnexpectedEof {
        /// Bit position where the read started.
        position: u64,
        /// Number of bits missing.
        needed: u64,
    },

    /// The stream is structurally invalid.
    #[error("Malformed stream at bit {position}: {message}")]
    MalformedStream {
        /// Bit position where the problem was detected.
        position: u64,
        /// Description of the problem.
        message: String,
    },

    /// Invalid magic number in a container header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Unsupported codec method or container version.
    #[error("Unsupported method: {method}")]
    UnsupportedMethod {
        /// The method identifier.
        method: String,
    },
}

/// Coarse classification of an [`OxiPackError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid input or parameters.
    InvalidInput,
    /// A header field overflowed.
    Capacity,
    /// The stream could not be decoded.
    Malformed,
    /// I/O failure.
    Io,
}

/// Result type alias for OxiPack operations.
pub type Result<T> = std::result::Result<T, OxiPackError>;

impl OxiPackError {
    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create an invalid parameter error.
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Create a capacity exceeded error.
    pub fn capacity_exceeded(field: &'static str, value: u64, max: u64) -> Self {
        Self::CapacityExceeded { field, value, max }
    }

    /// Create an unexpected end-of-stream error.
    pub fn unexpected_eof(position: u64, needed: u64) -> Self {
        Self::UnexpectedEof { position, needed }
    }

    /// Create a malformed stream error.
    pub fn malformed(position: u64, message: impl Into<String>) -> Self {
        Self::MalformedStream {
            position,
            message: message.into(),
        }
    }

    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unsupported method error.
    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) => ErrorKind::Io,
            Self::InvalidInput { .. } | Self::InvalidParameter { .. } => ErrorKind::InvalidInput,
            Self::CapacityExceeded { .. } => ErrorKind::Capacity,
            Self::UnexpectedEof { .. }
            | Self::MalformedStream { .. }
            | Self::InvalidMagic { .. }
            | Self::UnsupportedMethod { .. } => ErrorKind::Malformed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiPackError::capacity_exceeded("tree_size", 70000, 65535);
        assert!(err.to_string().contains("tree_size"));
        assert!(err.to_string().contains("65535"));

        let err = OxiPackError::unexpected_eof(12, 5);
        assert!(err.to_string().contains("bit 12"));

        let err = OxiPackError::invalid_magic(b"OXPK".to_vec(), b"PK\x03\x04".to_vec());
        assert!(err.to_string().contains("Invalid magic"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            OxiPackError::invalid_input("negative").kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            OxiPackError::invalid_parameter("match_length", "must be >= 1").kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            OxiPackError::capacity_exceeded("length", 1, 0).kind(),
            ErrorKind::Capacity
        );
        assert_eq!(
            OxiPackError::malformed(0, "bad").kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            OxiPackError::unexpected_eof(0, 1).kind(),
            ErrorKind::Malformed
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: OxiPackError = io_err.into();
        assert!(matches!(err, OxiPackError::Io(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
