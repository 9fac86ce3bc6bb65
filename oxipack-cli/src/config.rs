//! Run configuration.
//!
//! Codec parameters come from an optional JSON file and are then overridden
//! by command-line flags:
//!
//! ```json
//! {
//!   "lz": { "search_length": 4096, "match_length": 255, "minimum_match_length": 3,
//!           "literal_bits": 8, "small_number_bits": 5 },
//!   "huffman": { "symbol_bits": 8 }
//! }
//! ```
//!
//! Missing sections and fields keep their defaults.

use clap::{Args, ValueEnum};
use oxipack_huffman::{DEFAULT_SYMBOL_BITS, HuffmanCodec};
use oxipack_lz::{LzCodec, LzConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// LZ section of a run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LzSettings {
    pub search_length: usize,
    pub match_length: usize,
    pub minimum_match_length: usize,
    pub literal_bits: u8,
    pub small_number_bits: u8,
}

impl From<LzConfig> for LzSettings {
    fn from(config: LzConfig) -> Self {
        Self {
            search_length: config.search_length,
            match_length: config.match_length,
            minimum_match_length: config.minimum_match_length,
            literal_bits: config.literal_bits,
            small_number_bits: config.small_number_bits,
        }
    }
}

impl From<LzSettings> for LzConfig {
    fn from(settings: LzSettings) -> Self {
        LzConfig::new(
            settings.search_length,
            settings.match_length,
            settings.minimum_match_length,
        )
        .with_literal_bits(settings.literal_bits)
        .with_small_number_bits(settings.small_number_bits)
    }
}

impl Default for LzSettings {
    fn default() -> Self {
        LzConfig::BYTES.into()
    }
}

/// Huffman section of a run configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HuffmanSettings {
    pub symbol_bits: u32,
}

impl Default for HuffmanSettings {
    fn default() -> Self {
        Self {
            symbol_bits: DEFAULT_SYMBOL_BITS,
        }
    }
}

/// Parameters for every codec, passed explicitly into each command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub lz: LzSettings,
    pub huffman: HuffmanSettings,
}

impl RunConfig {
    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)?;
        let config = serde_json::from_str(&text)
            .map_err(|e| format!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Build the configuration for a command: file (if any), then flags.
    pub fn resolve(args: &CodecArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply(args);
        Ok(config)
    }

    /// Override fields with the flags that were given.
    pub fn apply(&mut self, args: &CodecArgs) {
        if let Some(preset) = args.lz_preset {
            self.lz = preset.config().into();
        }
        let lz = &mut self.lz;
        if let Some(v) = args.search_length {
            lz.search_length = v;
        }
        if let Some(v) = args.match_length {
            lz.match_length = v;
        }
        if let Some(v) = args.min_match {
            lz.minimum_match_length = v;
        }
        if let Some(v) = args.literal_bits {
            lz.literal_bits = v;
        }
        if let Some(v) = args.small_bits {
            lz.small_number_bits = v;
        }
        if let Some(v) = args.symbol_bits {
            self.huffman.symbol_bits = v;
        }
    }

    /// Validated LZ codec.
    pub fn lz_codec(&self) -> oxipack_core::Result<LzCodec> {
        LzCodec::new(self.lz.into())
    }

    /// Validated Huffman codec.
    pub fn huffman_codec(&self) -> oxipack_core::Result<HuffmanCodec> {
        HuffmanCodec::new(self.huffman.symbol_bits)
    }
}

/// LZ presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LzPreset {
    /// Byte symbols, 4 KiB window
    Bytes,
    /// Bit symbols, 64-bit window
    Bits,
}

impl LzPreset {
    fn config(self) -> LzConfig {
        match self {
            Self::Bytes => LzConfig::BYTES,
            Self::Bits => LzConfig::BITS,
        }
    }
}

/// Codec parameter flags shared by commands that encode.
#[derive(Debug, Clone, Default, Args)]
pub struct CodecArgs {
    /// JSON run configuration file
    #[arg(short, long)]
    pub config: Option<std::path::PathBuf>,

    /// LZ preset applied before the individual LZ flags
    #[arg(long, value_enum)]
    pub lz_preset: Option<LzPreset>,

    /// LZ backward window in symbols
    #[arg(long)]
    pub search_length: Option<usize>,

    /// LZ maximum match length in symbols
    #[arg(long)]
    pub match_length: Option<usize>,

    /// LZ k-gram size used for hashing
    #[arg(long)]
    pub min_match: Option<usize>,

    /// LZ symbol width in bits
    #[arg(long)]
    pub literal_bits: Option<u8>,

    /// Small-number width of the LZ offset/length codes
    #[arg(long)]
    pub small_bits: Option<u8>,

    /// Huffman symbol width in bits
    #[arg(long)]
    pub symbol_bits: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(LzConfig::from(config.lz), LzConfig::BYTES);
        assert_eq!(config.huffman.symbol_bits, 8);
    }

    #[test]
    fn test_partial_json() {
        let config: RunConfig =
            serde_json::from_str(r#"{ "lz": { "search_length": 16 } }"#).unwrap();
        assert_eq!(config.lz.search_length, 16);
        assert_eq!(config.lz.match_length, 255);
        assert_eq!(config.huffman.symbol_bits, 8);
    }

    #[test]
    fn test_flags_override_file() {
        let mut config: RunConfig =
            serde_json::from_str(r#"{ "huffman": { "symbol_bits": 4 } }"#).unwrap();
        let args = CodecArgs {
            lz_preset: Some(LzPreset::Bits),
            match_length: Some(32),
            symbol_bits: Some(12),
            ..Default::default()
        };
        config.apply(&args);
        assert_eq!(config.lz.literal_bits, 1);
        assert_eq!(config.lz.search_length, 64);
        assert_eq!(config.lz.match_length, 32);
        assert_eq!(config.huffman.symbol_bits, 12);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = RunConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        let parsed: RunConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_codec_rejected() {
        let mut config = RunConfig::default();
        config.lz.match_length = 0;
        config.huffman.symbol_bits = 0;
        assert!(config.lz_codec().is_err());
        assert!(config.huffman_codec().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("oxipack-missing-config.json");
        assert!(RunConfig::load(&path).is_err());
    }
}
