//! Info command implementation.

use oxipack_core::{Container, Method};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn cmd_info(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(File::open(file)?);
    let container = Container::read_from(&mut reader)?;
    let header = &container.header;
    let metadata = std::fs::metadata(file)?;

    println!("Container Information");
    println!("=====================");
    println!("File: {}", file.display());
    println!("Size: {} bytes", metadata.len());
    println!("Method: {}", header.method);
    println!("Payload: {} bits ({} bytes)", header.payload_bits, header.payload_bytes());

    match header.method {
        Method::Lz => {
            println!();
            println!("LZ Parameters:");
            println!("  Literal width: {} bits", header.params[0]);
            println!("  Small-number width: {} bits", header.params[1]);
        }
        Method::Huffman => {
            println!();
            println!("Huffman Frame:");
            match oxipack_huffman::read_header(&container.payload)? {
                Some(frame) => {
                    println!("  Symbol width: {} bits", frame.symbol_bits);
                    println!("  Tree size: {} bits", frame.tree_size);
                    println!("  Original length: {} bytes", frame.original_length);
                    let code_bits = (header.payload_bits as usize)
                        .saturating_sub(oxipack_huffman::FrameHeader::fixed_bits() + frame.tree_size);
                    println!("  Code bits: {}", code_bits);
                }
                None => println!("  Empty input"),
            }
        }
        Method::Unknown(_) => {}
    }

    Ok(())
}
