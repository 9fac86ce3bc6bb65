//! Decompress command implementation.

use super::SelectedCodec;
use log::info;
use oxipack_core::Container;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

pub fn cmd_decompress(input: &Path, output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(File::open(input)?);
    let container = Container::read_from(&mut reader)?;
    let selected = SelectedCodec::from_header(&container.header)?;

    info!(
        "decompressing {} ({}, {} payload bits)",
        input.display(),
        container.header.method,
        container.header.payload_bits
    );
    let data = selected.codec.decode_bytes(&container.payload)?;
    fs::write(output, &data)?;

    println!(
        "{} -> {}: {} bytes",
        input.display(),
        output.display(),
        data.len()
    );
    Ok(())
}
