//! OxiPack CLI - bit-level codec harness
//!
//! Compresses single files with the hashed LZ or static Huffman codec, and
//! round-trips sample sets to check and time both backends.

mod commands;
mod config;
mod utils;

use clap::{Parser, Subcommand};
use commands::verify::VerifyOptions;
use commands::{MethodArg, cmd_compress, cmd_decompress, cmd_info, cmd_tokens, cmd_verify};
use config::CodecArgs;
use std::path::PathBuf;
use utils::{init_logging, log_level};

#[derive(Parser)]
#[command(name = "oxipack")]
#[command(author, version, about = "OxiPack - Pure Rust bit-level codecs")]
#[command(long_about = "
OxiPack compresses single files with a hashed LZ matcher or a static Huffman
coder and verifies lossless round trips.

Examples:
  oxipack compress notes.txt notes.oxp --method huffman
  oxipack compress data.bin data.oxp --method lz --lz-preset bits
  oxipack decompress notes.oxp notes.txt
  oxipack verify samples/* --method lz --report runs.jsonl --progress
  oxipack info notes.oxp
  oxipack tokens notes.txt --search-length 64 --min-match 2 --json
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Silence all log output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file into a container
    #[command(alias = "c")]
    Compress {
        /// Input file
        input: PathBuf,

        /// Output container
        output: PathBuf,

        /// Codec to use
        #[arg(short, long, value_enum, default_value = "lz")]
        method: MethodArg,

        #[command(flatten)]
        codec: CodecArgs,
    },

    /// Decompress a container
    #[command(alias = "d")]
    Decompress {
        /// Input container
        input: PathBuf,

        /// Output file
        output: PathBuf,
    },

    /// Round-trip files and report sizes and timings
    #[command(alias = "t")]
    Verify {
        /// Files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Codec to use
        #[arg(short, long, value_enum, default_value = "lz")]
        method: MethodArg,

        #[command(flatten)]
        codec: CodecArgs,

        /// Append one JSON object per file to this report
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Show container header information
    #[command(alias = "i")]
    Info {
        /// Container to inspect
        file: PathBuf,
    },

    /// Dump the LZ tokens of a file
    Tokens {
        /// Input file
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,

        #[command(flatten)]
        codec: CodecArgs,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(log_level(cli.verbose, cli.quiet)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            method,
            codec,
        } => cmd_compress(&input, &output, method, &codec),
        Commands::Decompress { input, output } => cmd_decompress(&input, &output),
        Commands::Verify {
            files,
            method,
            codec,
            report,
            progress,
        } => cmd_verify(
            &files,
            &VerifyOptions {
                method,
                codec: &codec,
                report: report.as_deref(),
                progress,
                verbose: cli.verbose > 0,
            },
        ),
        Commands::Info { file } => cmd_info(&file),
        Commands::Tokens { input, json, codec } => cmd_tokens(&input, json, &codec),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
