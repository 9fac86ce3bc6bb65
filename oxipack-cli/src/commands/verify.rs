//! Verify command implementation.
//!
//! Each file is encoded, decoded, and compared with the original. Both steps
//! are timed. Results can be appended to a JSON Lines report.
//!
//! Reports are JSON Lines, not CSV. Each line is one [`VerifyRecord`] with the
//! same fields a CSV row would carry, so `jq -r '[.file, .ratio] | @csv'`
//! turns a report into CSV.

use super::{MethodArg, SelectedCodec};
use crate::config::{CodecArgs, RunConfig};
use crate::utils::{compression_ratio, create_progress_bar, space_savings};
use indicatif::ProgressBar;
use log::{info, warn};
use oxipack_core::BitCodec;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of one round trip, one JSON Lines record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyRecord {
    pub file: String,
    pub method: String,
    pub params: String,
    pub original_bytes: u64,
    pub compressed_bits: u64,
    pub compressed_bytes: u64,
    pub ratio: f64,
    pub encode_ms: f64,
    pub decode_ms: f64,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Options for the verify command.
pub struct VerifyOptions<'a> {
    pub method: MethodArg,
    pub codec: &'a CodecArgs,
    pub report: Option<&'a Path>,
    pub progress: bool,
    pub verbose: bool,
}

pub fn cmd_verify(
    files: &[PathBuf],
    options: &VerifyOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig::resolve(options.codec)?;
    let selected = SelectedCodec::from_config(options.method, &config)?;
    let params = selected.describe(&config);
    let pb = create_progress_bar(files.len() as u64, options.progress);

    #[cfg(feature = "parallel")]
    let records: Vec<VerifyRecord> = files
        .par_iter()
        .map(|path| verify_with_progress(selected.codec.as_ref(), &params, path, &pb))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let records: Vec<VerifyRecord> = files
        .iter()
        .map(|path| verify_with_progress(selected.codec.as_ref(), &params, path, &pb))
        .collect();

    pb.finish_and_clear();

    print_records(&records, options.verbose);
    if let Some(report) = options.report {
        append_report(report, &records)?;
        info!("appended {} records to {}", records.len(), report.display());
    }

    let failed = records.iter().filter(|r| !r.ok).count();
    if failed > 0 {
        return Err(format!("{} of {} files failed verification", failed, records.len()).into());
    }
    Ok(())
}

fn verify_with_progress(
    codec: &(dyn BitCodec + Send + Sync),
    params: &str,
    path: &Path,
    pb: &ProgressBar,
) -> VerifyRecord {
    pb.set_message(path.display().to_string());
    let record = verify_file(codec, params, path);
    if !record.ok {
        warn!(
            "{}: {}",
            record.file,
            record.error.as_deref().unwrap_or("round trip mismatch")
        );
    }
    pb.inc(1);
    record
}

/// Round-trip one file.
pub fn verify_file(codec: &(dyn BitCodec + Send + Sync), params: &str, path: &Path) -> VerifyRecord {
    let mut record = VerifyRecord {
        file: path.display().to_string(),
        method: codec.method().name().to_string(),
        params: params.to_string(),
        original_bytes: 0,
        compressed_bits: 0,
        compressed_bytes: 0,
        ratio: 0.0,
        encode_ms: 0.0,
        decode_ms: 0.0,
        ok: false,
        error: None,
    };

    let data = match fs::read(path) {
        Ok(data) => data,
        Err(e) => {
            record.error = Some(e.to_string());
            return record;
        }
    };
    record.original_bytes = data.len() as u64;

    let start = Instant::now();
    let encoded = match codec.encode_bytes(&data) {
        Ok(encoded) => encoded,
        Err(e) => {
            record.error = Some(e.to_string());
            return record;
        }
    };
    record.encode_ms = start.elapsed().as_secs_f64() * 1000.0;
    record.compressed_bits = encoded.len() as u64;
    record.compressed_bytes = encoded.len().div_ceil(8) as u64;
    record.ratio = compression_ratio(record.original_bytes, record.compressed_bytes);

    let start = Instant::now();
    let decoded = codec.decode_bytes(&encoded);
    record.decode_ms = start.elapsed().as_secs_f64() * 1000.0;

    match decoded {
        Ok(decoded) if decoded == data => record.ok = true,
        Ok(decoded) => {
            record.error = Some(format!(
                "decoded {} bytes differ from {} original bytes",
                decoded.len(),
                data.len()
            ));
        }
        Err(e) => record.error = Some(e.to_string()),
    }
    record
}

fn print_records(records: &[VerifyRecord], verbose: bool) {
    println!(
        "{:>10} {:>10} {:>7} {:>10} {:>10}  {:<6} File",
        "Size", "Packed", "Saved", "Enc ms", "Dec ms", "Status"
    );
    println!("{}", "-".repeat(72));

    for record in records {
        let status = if record.ok { "OK" } else { "FAILED" };
        println!(
            "{:>10} {:>10} {:>6.1}% {:>10.3} {:>10.3}  {:<6} {}",
            record.original_bytes,
            record.compressed_bytes,
            space_savings(record.original_bytes, record.compressed_bytes),
            record.encode_ms,
            record.decode_ms,
            status,
            record.file
        );
        if let Some(error) = record.error.as_ref().filter(|_| verbose) {
            println!("           {}", error);
        }
    }

    println!("{}", "-".repeat(72));
    let total: u64 = records.iter().map(|r| r.original_bytes).sum();
    let packed: u64 = records.iter().map(|r| r.compressed_bytes).sum();
    let ok = records.iter().filter(|r| r.ok).count();
    println!(
        "{:>10} {:>10} {:>6.1}%  {}/{} files OK",
        total,
        packed,
        space_savings(total, packed),
        ok,
        records.len()
    );
}

/// Append one JSON object per record to `path` (JSON Lines, not CSV).
pub fn append_report(path: &Path, records: &[VerifyRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut writer = BufWriter::new(file);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
