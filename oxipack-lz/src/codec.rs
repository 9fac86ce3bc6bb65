//! [`BitCodec`] front end for the LZ matcher.

use crate::config::LzConfig;
use crate::decoder::{DEFAULT_MAX_OUTPUT, reconstruct};
use crate::matcher::LzMatcher;
use crate::token::{LzToken, deserialize_tokens, serialize_tokens};
use log::debug;
use oxipack_core::{BitBuffer, BitCodec, Method, OxiPackError, Result};
use oxipack_natural::NumberCodec;

/// Hashed LZ codec over fixed-width symbols.
#[derive(Debug, Clone, Copy)]
pub struct LzCodec {
    config: LzConfig,
    numbers: NumberCodec,
    max_output: usize,
}

impl LzCodec {
    /// Create a codec, validating the configuration.
    pub fn new(config: LzConfig) -> Result<Self> {
        config.validate()?;
        let numbers = config.number_codec()?;
        Ok(Self {
            config,
            numbers,
            max_output: DEFAULT_MAX_OUTPUT,
        })
    }

    /// Set the largest number of symbols `decode` will produce.
    pub fn with_max_output(mut self, max_output: usize) -> Self {
        self.max_output = max_output;
        self
    }

    /// Largest number of symbols `decode` will produce.
    pub fn max_output(&self) -> usize {
        self.max_output
    }

    /// Codec configuration.
    pub fn config(&self) -> &LzConfig {
        &self.config
    }

    /// Container parameters: literal width and small-number width.
    pub fn params(&self) -> [u8; 2] {
        [self.config.literal_bits, self.config.small_number_bits]
    }

    /// Split `input` into symbols of `literal_bits` bits.
    pub fn symbols(&self, input: &BitBuffer) -> Result<Vec<u32>> {
        let width = self.config.literal_bits as usize;
        if input.len() % width != 0 {
            return Err(OxiPackError::invalid_input(format!(
                "{} bits is not a multiple of the {}-bit symbol width",
                input.len(),
                width
            )));
        }
        Ok(input.chunks(width as u32).map(|symbol| symbol as u32).collect())
    }

    /// Tokenize `input` without serializing.
    pub fn tokenize(&self, input: &BitBuffer) -> Result<Vec<LzToken>> {
        let symbols = self.symbols(input)?;
        Ok(LzMatcher::new(self.config)?.tokenize(&symbols))
    }

    /// Serialize a token list.
    pub fn encode_tokens(&self, tokens: &[LzToken]) -> Result<BitBuffer> {
        let mut out = BitBuffer::new();
        serialize_tokens(tokens, &self.numbers, self.config.literal_bits, &mut out)?;
        Ok(out)
    }

    /// Parse a token stream.
    pub fn decode_tokens(&self, input: &BitBuffer) -> Result<Vec<LzToken>> {
        deserialize_tokens(input, &self.numbers, self.config.literal_bits)
    }
}

impl Default for LzCodec {
    fn default() -> Self {
        Self {
            config: LzConfig::BYTES,
            numbers: NumberCodec::DEFAULT,
            max_output: DEFAULT_MAX_OUTPUT,
        }
    }
}

impl BitCodec for LzCodec {
    fn encode(&self, input: &BitBuffer) -> Result<BitBuffer> {
        let tokens = self.tokenize(input)?;
        let out = self.encode_tokens(&tokens)?;
        debug!(
            "LZ encode: {} symbols -> {} tokens, {} bits -> {} bits",
            input.len() / self.config.literal_bits as usize,
            tokens.len(),
            input.len(),
            out.len()
        );
        Ok(out)
    }

    fn decode(&self, input: &BitBuffer) -> Result<BitBuffer> {
        let tokens = self.decode_tokens(input)?;
        let symbols = reconstruct(&tokens, self.max_output)?;

        let width = self.config.literal_bits as u32;
        let mut out = BitBuffer::with_capacity(symbols.len() * width as usize);
        for symbol in &symbols {
            out.push_bits(*symbol as u64, width);
        }
        debug!(
            "LZ decode: {} bits -> {} tokens -> {} symbols",
            input.len(),
            tokens.len(),
            symbols.len()
        );
        Ok(out)
    }

    fn method(&self) -> Method {
        Method::Lz
    }
}
