//! Tokens command implementation.

use crate::config::{CodecArgs, RunConfig};
use oxipack_core::BitBuffer;
use oxipack_lz::LzToken;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON form of one LZ token.
#[derive(Debug, Serialize, Deserialize)]
struct TokenJson {
    offset: usize,
    length: usize,
    literal: u32,
}

impl From<&LzToken> for TokenJson {
    fn from(token: &LzToken) -> Self {
        Self {
            offset: token.offset,
            length: token.length,
            literal: token.literal,
        }
    }
}

/// JSON output for a token dump.
#[derive(Debug, Serialize, Deserialize)]
struct TokenDumpJson {
    file: String,
    symbols: usize,
    tokens: Vec<TokenJson>,
}

pub fn cmd_tokens(
    input: &Path,
    json: bool,
    args: &CodecArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig::resolve(args)?;
    let codec = config.lz_codec()?;
    let data = BitBuffer::from_bytes(&fs::read(input)?);
    let tokens = codec.tokenize(&data)?;
    let symbols: usize = tokens.iter().map(LzToken::span).sum();

    if json {
        let dump = TokenDumpJson {
            file: input.display().to_string(),
            symbols,
            tokens: tokens.iter().map(TokenJson::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
        return Ok(());
    }

    println!("{:>8} {:>8} {:>8}", "Offset", "Length", "Literal");
    println!("{}", "-".repeat(26));
    for token in &tokens {
        println!("{:>8} {:>8} {:>8}", token.offset, token.length, token.literal);
    }
    println!("{}", "-".repeat(26));
    let matches = tokens.iter().filter(|t| t.is_match()).count();
    println!(
        "{} tokens ({} matches) covering {} symbols",
        tokens.len(),
        matches,
        symbols
    );
    Ok(())
}
