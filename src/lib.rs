//! # huffc
//!
//! A lossless text compressor built on Huffman coding.
//!
//! Compression counts how often each character occurs, merges the rarest
//! symbols into a binary tree, reads a prefix-free code for every symbol off
//! that tree and packs the codes into a byte-aligned bitstream. Decompression
//! walks the bitstream with the same code table and recovers the text exactly.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffc::{compress_text, decompress_bytes};
//!
//! let (codec, compressed) = compress_text("abracadabra").unwrap();
//! let restored = decompress_bytes(&compressed, &codec).unwrap();
//! assert_eq!(restored, "abracadabra");
//! ```
//!
//! ## Payload format
//!
//! ```text
//! byte 0       padding count P (0..=8), absent when the payload is empty
//! bytes 1..N   code bits packed MSB-first, the last P bits are padding
//! ```
//!
//! The payload does not embed the code table. Keep the [`HuffmanCodec`]
//! returned by compression to decompress it again.
//!
//! ## Working with Files
//!
//! ```rust,no_run
//! use huffc::{pipeline, store, HuffConfig};
//! use std::fs::File;
//! use std::io::{BufReader, BufWriter};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let input = Path::new("Sample.txt");
//! let mut reader = BufReader::new(File::open(input)?);
//! let mut writer = BufWriter::new(File::create(store::compressed_path(input))?);
//!
//! let (codec, stats) = pipeline::compress(&mut reader, &mut writer, &HuffConfig::default())?;
//! println!("Compression ratio: {:.2}x", stats.ratio);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod store;

pub use codec::{BitString, CodeTable, EncodedPayload, FrequencyTable, HuffmanCodec, TreeNode};
pub use config::{HuffConfig, StatsFormat};
pub use error::{HuffError, Result};
pub use pipeline::{compress, decompress, CompressionStats, DecompressionStats};

/// Compress `text` in memory.
///
/// Returns the codec built for the text together with the payload bytes.
/// An empty text compresses to an empty payload.
pub fn compress_text(text: &str) -> Result<(HuffmanCodec, Vec<u8>)> {
    let codec = HuffmanCodec::from_text(text)?;
    let payload = codec.encode(text)?;
    Ok((codec, payload.into_bytes()))
}

/// Decompress a payload produced by [`compress_text`] with its codec.
pub fn decompress_bytes(payload: &[u8], codec: &HuffmanCodec) -> Result<String> {
    codec.decode(payload)
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const AUTHORS: &str = env!("CARGO_PKG_AUTHORS");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get library version information
pub fn version_info() -> VersionInfo {
    VersionInfo {
        version: VERSION,
        authors: AUTHORS,
        description: DESCRIPTION,
    }
}

#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub version: &'static str,
    pub authors: &'static str,
    pub description: &'static str,
}
