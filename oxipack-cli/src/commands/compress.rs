//! Compress command implementation.

use super::{MethodArg, SelectedCodec};
use crate::config::{CodecArgs, RunConfig};
use crate::utils::space_savings;
use log::info;
use oxipack_core::Container;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn cmd_compress(
    input: &Path,
    output: &Path,
    method: MethodArg,
    args: &CodecArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig::resolve(args)?;
    let selected = SelectedCodec::from_config(method, &config)?;
    let data = fs::read(input)?;

    info!(
        "compressing {} with {} ({})",
        input.display(),
        selected.codec.method(),
        selected.describe(&config)
    );
    let payload = selected.codec.encode_bytes(&data)?;
    let container = Container::new(selected.codec.method(), selected.params, payload);

    let mut writer = BufWriter::new(File::create(output)?);
    container.write_to(&mut writer)?;
    writer.flush()?;

    let compressed = container.header.total_size();
    println!(
        "{} -> {}: {} -> {} bytes ({:.1}% saved, {} payload bits)",
        input.display(),
        output.display(),
        data.len(),
        compressed,
        space_savings(data.len() as u64, compressed),
        container.header.payload_bits
    );
    Ok(())
}
