use crate::codec::{analyze, HuffmanCodec};
use crate::config::HuffConfig;
use crate::error::HuffError;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use serde::Serialize;
use std::io::{Read, Write};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize)]
pub struct CompressionStats {
	pub original_size: u64,
	pub compressed_size: u64,
	pub ratio: f64,
	pub symbols: u64,
	pub distinct_symbols: usize,
	pub code_bits: u64,
	pub padding_bits: u8,
	pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DecompressionStats {
	pub compressed_size: u64,
	pub decompressed_size: u64,
	pub symbols: u64,
	pub elapsed_ms: u64,
}

fn stage_spinner(config: &HuffConfig) -> ProgressBar {
	if !config.show_progress {
		return ProgressBar::hidden();
	}
	let pb = ProgressBar::new_spinner();
	if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}") {
		pb.set_style(style);
	}
	pb.enable_steady_tick(Duration::from_millis(100));
	pb
}

/// Read the whole text from `reader`, Huffman-encode it and write the payload
/// to `writer`.
///
/// Returns the codec that has to be used to decompress the payload again.
pub fn compress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	config: &HuffConfig,
) -> Result<(HuffmanCodec, CompressionStats), HuffError> {
	let start = Instant::now();
	let pb = stage_spinner(config);

	pb.set_message("Reading input");
	let mut text = String::new();
	reader.read_to_string(&mut text)?;
	let original_size = text.len() as u64;

	if config.trim_trailing_whitespace {
		let trimmed_len = text.trim_end().len();
		if trimmed_len != text.len() {
			warn!("Trimming {} bytes of trailing whitespace", text.len() - trimmed_len);
			text.truncate(trimmed_len);
		}
	}

	pb.set_message("Counting symbols");
	let freq = analyze(&text);

	pb.set_message("Building code table");
	let codec = HuffmanCodec::from_frequencies(&freq)?;

	pb.set_message("Encoding");
	let payload = codec.encode(&text)?;
	writer.write_all(payload.as_bytes())?;
	writer.flush()?;

	pb.finish_with_message("Compression finished");

	let compressed_size = payload.len() as u64;
	let ratio = if compressed_size > 0 { original_size as f64 / compressed_size as f64 } else { 0.0 };
	let stats = CompressionStats {
		original_size,
		compressed_size,
		ratio,
		symbols: freq.total(),
		distinct_symbols: freq.len(),
		code_bits: payload.code_bit_len() as u64,
		padding_bits: payload.padding(),
		elapsed_ms: start.elapsed().as_millis() as u64,
	};
	info!(
		"Compressed {} bytes to {} bytes ({} distinct symbols)",
		stats.original_size, stats.compressed_size, stats.distinct_symbols
	);
	Ok((codec, stats))
}

/// Read a payload from `reader`, decode it with `codec` and write the text to
/// `writer`.
pub fn decompress<R: Read, W: Write>(
	reader: &mut R,
	writer: &mut W,
	codec: &HuffmanCodec,
) -> Result<DecompressionStats, HuffError> {
	let start = Instant::now();

	let mut payload = Vec::new();
	reader.read_to_end(&mut payload)?;

	let text = codec.decode(&payload)?;
	writer.write_all(text.as_bytes())?;
	writer.flush()?;

	let stats = DecompressionStats {
		compressed_size: payload.len() as u64,
		decompressed_size: text.len() as u64,
		symbols: text.chars().count() as u64,
		elapsed_ms: start.elapsed().as_millis() as u64,
	};
	info!("Decompressed {} bytes to {} bytes", stats.compressed_size, stats.decompressed_size);
	Ok(stats)
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn test_round_trip() {
		let original = "she sells sea shells by the sea shore";
		let mut compressed = Vec::new();
		let (codec, stats) = compress(&mut Cursor::new(original), &mut compressed, &HuffConfig::default()).unwrap();

		assert_eq!(stats.original_size, original.len() as u64);
		assert_eq!(stats.compressed_size, compressed.len() as u64);
		assert_eq!(stats.symbols, original.len() as u64);
		assert_eq!((stats.code_bits + stats.padding_bits as u64) % 8, 0);
		assert!(stats.ratio > 1.0);

		let mut restored = Vec::new();
		let dstats = decompress(&mut Cursor::new(compressed), &mut restored, &codec).unwrap();
		assert_eq!(String::from_utf8(restored).unwrap(), original);
		assert_eq!(dstats.decompressed_size, original.len() as u64);
	}

	#[test]
	fn test_empty_input() {
		let mut compressed = Vec::new();
		let (codec, stats) = compress(&mut Cursor::new(""), &mut compressed, &HuffConfig::default()).unwrap();
		assert!(compressed.is_empty());
		assert_eq!(stats.ratio, 0.0);

		let mut restored = Vec::new();
		decompress(&mut Cursor::new(compressed), &mut restored, &codec).unwrap();
		assert!(restored.is_empty());
	}

	#[test]
	fn test_trim_trailing_whitespace() {
		let config = HuffConfig::default().with_trim(true);
		let mut compressed = Vec::new();
		let (codec, stats) = compress(&mut Cursor::new("hello world \n\n"), &mut compressed, &config).unwrap();
		assert_eq!(stats.symbols, "hello world".len() as u64);

		let mut restored = Vec::new();
		decompress(&mut Cursor::new(compressed), &mut restored, &codec).unwrap();
		assert_eq!(restored, b"hello world");
	}

	#[test]
	fn test_invalid_utf8_input() {
		let mut compressed = Vec::new();
		let result = compress(&mut Cursor::new(vec![0xFFu8, 0xFE]), &mut compressed, &HuffConfig::default());
		assert!(matches!(result, Err(HuffError::Io(_))));
	}

	#[test]
	fn test_corrupt_payload_is_not_truncated() {
		let (codec, _) = compress(&mut Cursor::new("abc"), &mut Vec::new(), &HuffConfig::default()).unwrap();
		let mut restored = Vec::new();
		let result = decompress(&mut Cursor::new(vec![9u8, 0x00]), &mut restored, &codec);
		assert!(matches!(result, Err(HuffError::CorruptPayload(_))));
		assert!(restored.is_empty());
	}
}
