//! Command implementations for OxiPack CLI.

pub mod compress;
pub mod decompress;
pub mod info;
pub mod tokens;
pub mod verify;

pub use compress::cmd_compress;
pub use decompress::cmd_decompress;
pub use info::cmd_info;
pub use tokens::cmd_tokens;
pub use verify::cmd_verify;

use crate::config::RunConfig;
use clap::ValueEnum;
use oxipack_core::{BitCodec, ContainerHeader, Method, OxiPackError, Result};
use oxipack_huffman::HuffmanCodec;
use oxipack_lz::{LzCodec, LzConfig};

/// Codec selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    /// Hashed LZ token stream
    Lz,
    /// Static Huffman frame
    Huffman,
}

/// A configured codec plus the container parameters that describe it.
pub struct SelectedCodec {
    pub codec: Box<dyn BitCodec + Send + Sync>,
    pub params: [u8; 2],
}

impl SelectedCodec {
    /// Build the codec for `method` from a run configuration.
    pub fn from_config(method: MethodArg, config: &RunConfig) -> Result<Self> {
        Ok(match method {
            MethodArg::Lz => {
                let codec = config.lz_codec()?;
                Self {
                    params: codec.params(),
                    codec: Box::new(codec),
                }
            }
            MethodArg::Huffman => Self {
                codec: Box::new(config.huffman_codec()?),
                params: [0, 0],
            },
        })
    }

    /// Build the decoder described by a container header.
    pub fn from_header(header: &ContainerHeader) -> Result<Self> {
        match header.method {
            Method::Lz => {
                let [literal_bits, small_bits] = header.params;
                let config = LzConfig::BYTES
                    .with_literal_bits(literal_bits)
                    .with_small_number_bits(small_bits);
                Ok(Self {
                    codec: Box::new(LzCodec::new(config)?),
                    params: header.params,
                })
            }
            Method::Huffman => Ok(Self {
                codec: Box::new(HuffmanCodec::default()),
                params: header.params,
            }),
            Method::Unknown(id) => Err(OxiPackError::unsupported_method(format!(
                "method id {}",
                id
            ))),
        }
    }

    /// Human-readable parameter summary.
    pub fn describe(&self, config: &RunConfig) -> String {
        match self.codec.method() {
            Method::Lz => format!(
                "W={} L={} K={} literal={}b S={}",
                config.lz.search_length,
                config.lz.match_length,
                config.lz.minimum_match_length,
                config.lz.literal_bits,
                config.lz.small_number_bits
            ),
            Method::Huffman => format!("symbol={}b", config.huffman.symbol_bits),
            Method::Unknown(_) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxipack_core::Container;

    #[test]
    fn test_lz_params_roundtrip_through_header() {
        let mut config = RunConfig::default();
        config.lz.literal_bits = 1;
        config.lz.small_number_bits = 3;
        let selected = SelectedCodec::from_config(MethodArg::Lz, &config).unwrap();
        assert_eq!(selected.params, [1, 3]);

        let payload = selected.codec.encode_bytes(b"0101010101").unwrap();
        let container = Container::new(Method::Lz, selected.params, payload.clone());
        let decoder = SelectedCodec::from_header(&container.header).unwrap();
        assert_eq!(
            decoder.codec.decode_bytes(&payload).unwrap(),
            b"0101010101"
        );
    }

    #[test]
    fn test_huffman_selection() {
        let selected = SelectedCodec::from_config(MethodArg::Huffman, &RunConfig::default()).unwrap();
        assert_eq!(selected.codec.method(), Method::Huffman);
        assert_eq!(selected.params, [0, 0]);
        assert_eq!(
            selected.describe(&RunConfig::default()),
            "symbol=8b"
        );
    }
}
