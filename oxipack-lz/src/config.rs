//! LZ matcher configuration.

use oxipack_core::{OxiPackError, Result};
use oxipack_natural::{MAX_SMALL_BITS, NumberCodec};

/// Largest supported literal (symbol) width in bits.
pub const MAX_LITERAL_BITS: u8 = 32;

/// LZ matcher parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzConfig {
    /// Backward window in symbols (`W`).
    pub search_length: usize,
    /// Maximum symbols copied by one token (`L`).
    pub match_length: usize,
    /// k-gram size used as the hash key (`K`).
    pub minimum_match_length: usize,
    /// Width of one symbol and of the literal field in bits.
    pub literal_bits: u8,
    /// Small-number width of the offset/length number codes.
    pub small_number_bits: u8,
}

impl LzConfig {
    /// Byte-granular matching.
    ///
    /// - 4096-byte window
    /// - Matches up to 255 bytes
    /// - 3-byte hash keys
    /// - 8-bit literals
    pub const BYTES: Self = Self {
        search_length: 4096,
        match_length: 255,
        minimum_match_length: 3,
        literal_bits: 8,
        small_number_bits: 5,
    };

    /// Bit-granular matching.
    ///
    /// - 64-bit window
    /// - Matches up to 64 bits
    /// - 8-bit hash keys
    /// - 1-bit literals
    pub const BITS: Self = Self {
        search_length: 64,
        match_length: 64,
        minimum_match_length: 8,
        literal_bits: 1,
        small_number_bits: 5,
    };

    /// Create a byte-granular configuration with custom window parameters.
    pub fn new(search_length: usize, match_length: usize, minimum_match_length: usize) -> Self {
        Self {
            search_length,
            match_length,
            minimum_match_length,
            ..Self::BYTES
        }
    }

    /// Set the symbol width.
    pub fn with_literal_bits(mut self, literal_bits: u8) -> Self {
        self.literal_bits = literal_bits;
        self
    }

    /// Set the small-number width of the number codes.
    pub fn with_small_number_bits(mut self, small_number_bits: u8) -> Self {
        self.small_number_bits = small_number_bits;
        self
    }

    /// Check every parameter against its supported range.
    pub fn validate(&self) -> Result<()> {
        if self.match_length == 0 {
            return Err(OxiPackError::invalid_parameter(
                "match_length",
                "must be at least 1",
            ));
        }
        if self.minimum_match_length == 0 {
            return Err(OxiPackError::invalid_parameter(
                "minimum_match_length",
                "must be at least 1",
            ));
        }
        if self.literal_bits == 0 || self.literal_bits > MAX_LITERAL_BITS {
            return Err(OxiPackError::invalid_parameter(
                "literal_bits",
                format!("{} is outside 1-{}", self.literal_bits, MAX_LITERAL_BITS),
            ));
        }
        if self.small_number_bits > MAX_SMALL_BITS {
            return Err(OxiPackError::invalid_parameter(
                "small_number_bits",
                format!("{} exceeds maximum {}", self.small_number_bits, MAX_SMALL_BITS),
            ));
        }
        Ok(())
    }

    /// Number codec for offsets and lengths.
    pub fn number_codec(&self) -> Result<NumberCodec> {
        NumberCodec::new(self.small_number_bits)
    }
}

impl Default for LzConfig {
    fn default() -> Self {
        Self::BYTES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(LzConfig::BYTES.validate().is_ok());
        assert!(LzConfig::BITS.validate().is_ok());
        assert_eq!(LzConfig::default(), LzConfig::BYTES);
        assert_eq!(LzConfig::BITS.literal_bits, 1);
    }

    #[test]
    fn test_new_keeps_byte_literals() {
        let config = LzConfig::new(3, 3, 1);
        assert_eq!(config.search_length, 3);
        assert_eq!(config.literal_bits, 8);
        assert_eq!(config.with_literal_bits(1).literal_bits, 1);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(LzConfig::new(16, 0, 1).validate().is_err());
        assert!(LzConfig::new(16, 4, 0).validate().is_err());
        assert!(LzConfig::BYTES.with_literal_bits(0).validate().is_err());
        assert!(LzConfig::BYTES.with_literal_bits(33).validate().is_err());
        assert!(LzConfig::BYTES.with_small_number_bits(40).validate().is_err());
        // A zero-length window is legal: it simply never matches.
        assert!(LzConfig::new(0, 4, 1).validate().is_ok());
    }
}
