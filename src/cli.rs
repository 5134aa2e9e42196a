use crate::codec::HuffmanCodec;
use crate::config::{HuffConfig, StatsFormat};
use crate::error::HuffError;
use crate::pipeline::{self, CompressionStats, DecompressionStats};
use crate::store;
use clap::{Parser, Subcommand};
use log::info;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(author, version, about, long_about = "Lossless Huffman text compressor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compresses a text file
    Compress {
        /// Input text file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Output file name (default: input with a .bin extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: RunOptions,
    },
    /// Compresses a text file, decompresses the result and checks both match
    Roundtrip {
        /// Input text file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        options: RunOptions,
    },
}

#[derive(clap::Args)]
struct RunOptions {
    /// Strip trailing whitespace before compressing
    #[arg(long)]
    trim: bool,

    /// Show a progress spinner
    #[arg(short, long)]
    progress: bool,

    /// Statistics output format [text, json]
    #[arg(long, default_value = "text")]
    stats: StatsFormat,
}

impl RunOptions {
    fn config(&self) -> HuffConfig {
        HuffConfig::default()
            .with_trim(self.trim)
            .with_progress(self.progress)
            .with_stats_format(self.stats)
    }
}

pub fn run() -> Result<(), HuffError> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Compress { input, output, options } => {
            let config = options.config();
            let output = output.clone().unwrap_or_else(|| store::compressed_path(input));
            println!("Compressing {} to {}...", input.display(), output.display());

            let (_, stats) = compress_file(input, &output, &config)?;
            print_compression(&stats, config.stats_format)?;
        }
        Commands::Roundtrip { input, options } => {
            let config = options.config();
            let compressed = store::compressed_path(input);
            let decompressed = store::decompressed_path(input);
            println!(
                "Round trip {} -> {} -> {}...",
                input.display(),
                compressed.display(),
                decompressed.display()
            );

            let (stats, dstats) = roundtrip_file(input, &config)?;
            print_compression(&stats, config.stats_format)?;
            print_decompression(&dstats, config.stats_format)?;
        }
    }

    Ok(())
}

/// Compress `input` into `output`. Refuses to run when both name the same
/// file.
pub fn compress_file(
    input: &Path,
    output: &Path,
    config: &HuffConfig,
) -> Result<(HuffmanCodec, CompressionStats), HuffError> {
    store::ensure_distinct(input, output)?;
    let mut in_file = BufReader::new(File::open(input)?);
    let mut out_file = BufWriter::new(File::create(output)?);
    pipeline::compress(&mut in_file, &mut out_file, config)
}

/// Compress `input` next to itself, decompress the result with the same code
/// table and compare against the (possibly trimmed) source text.
pub fn roundtrip_file(
    input: &Path,
    config: &HuffConfig,
) -> Result<(CompressionStats, DecompressionStats), HuffError> {
    let compressed = store::compressed_path(input);
    let decompressed = store::decompressed_path(input);
    store::ensure_distinct(input, &compressed)?;
    store::ensure_distinct(input, &decompressed)?;

    let text = store::read_text(input)?;
    let mut payload = Vec::new();
    let (codec, stats) = pipeline::compress(&mut text.as_bytes(), &mut payload, config)?;
    store::write_bytes(&compressed, &payload)?;

    let payload = store::read_bytes(&compressed)?;
    let mut restored = Vec::new();
    let dstats = pipeline::decompress(&mut payload.as_slice(), &mut restored, &codec)?;
    store::write_bytes(&decompressed, &restored)?;

    let expected = if config.trim_trailing_whitespace { text.trim_end() } else { text.as_str() };
    if restored != expected.as_bytes() {
        return Err(HuffError::CorruptPayload(format!(
            "{} does not match the source text",
            decompressed.display()
        )));
    }
    info!("Round trip of {} verified", input.display());
    Ok((stats, dstats))
}

/// Render compression stats as a human-readable report or pretty JSON
pub fn format_compression(stats: &CompressionStats, format: StatsFormat) -> Result<String, HuffError> {
    let report = match format {
        StatsFormat::Json => serde_json::to_string_pretty(stats)?,
        StatsFormat::Text => [
            "Compression successful!".to_string(),
            format!("  Original Size:    {} bytes", stats.original_size),
            format!("  Compressed Size:  {} bytes", stats.compressed_size),
            format!("  Ratio:            {:.2}x", stats.ratio),
            format!("  Symbols:          {} ({} distinct)", stats.symbols, stats.distinct_symbols),
            format!("  Code Bits:        {} (+{} padding)", stats.code_bits, stats.padding_bits),
            format!("  Elapsed Time:     {} ms", stats.elapsed_ms),
        ]
        .join("\n"),
    };
    Ok(report)
}

fn print_compression(stats: &CompressionStats, format: StatsFormat) -> Result<(), HuffError> {
    println!("{}", format_compression(stats, format)?);
    Ok(())
}

fn print_decompression(stats: &DecompressionStats, format: StatsFormat) -> Result<(), HuffError> {
    match format {
        StatsFormat::Json => println!("{}", serde_json::to_string_pretty(stats)?),
        StatsFormat::Text => {
            println!("Decompression successful!");
            println!("  Restored Size: {} bytes", stats.decompressed_size);
            println!("  Elapsed Time:  {} ms", stats.elapsed_ms);
        }
    }
    Ok(())
}
