//! File-backed input and output for the compressor
//!
//! Output files live next to the input: `notes.txt` compresses to `notes.bin`
//! and decompresses to `notes_decompressed.txt`.

use crate::error::{HuffError, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

pub const COMPRESSED_EXTENSION: &str = "bin";
pub const DECOMPRESSED_SUFFIX: &str = "_decompressed.txt";

/// Path of the compressed file for `input`
pub fn compressed_path(input: &Path) -> PathBuf {
    input.with_extension(COMPRESSED_EXTENSION)
}

/// Path of the decompressed copy of `input`
pub fn decompressed_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}", stem, DECOMPRESSED_SUFFIX))
}

/// Best-effort absolute form of `path`. Paths that do not exist yet are
/// resolved through their parent directory.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(resolved) = fs::canonicalize(path) {
        return resolved;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() { Path::new(".") } else { parent };
            fs::canonicalize(parent)
                .map(|dir| dir.join(name))
                .unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

/// Refuse to write `output` when it is the same file as `input`. Must be
/// checked before the output is created, since creating it truncates.
pub fn ensure_distinct(input: &Path, output: &Path) -> Result<()> {
    if resolve(input) == resolve(output) {
        return Err(HuffError::ConfigError(format!(
            "output {} would overwrite the input",
            output.display()
        )));
    }
    Ok(())
}

pub fn read_text(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    debug!("read {} bytes of text from {}", text.len(), path.display());
    Ok(text)
}

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)?;
    debug!("read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_paths() {
        let input = Path::new("/data/notes/Sample.txt");
        assert_eq!(compressed_path(input), PathBuf::from("/data/notes/Sample.bin"));
        assert_eq!(
            decompressed_path(input),
            PathBuf::from("/data/notes/Sample_decompressed.txt")
        );
    }

    #[test]
    fn test_paths_without_extension() {
        let input = Path::new("README");
        assert_eq!(compressed_path(input), PathBuf::from("README.bin"));
        assert_eq!(decompressed_path(input), PathBuf::from("README_decompressed.txt"));
    }

    #[test]
    fn test_read_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("note.txt");
        write_bytes(&path, b"hello").unwrap();
        assert_eq!(read_text(&path).unwrap(), "hello");
        assert_eq!(read_bytes(&path).unwrap(), b"hello");
    }

    #[test]
    fn test_ensure_distinct() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("data.bin");
        write_bytes(&input, b"hello huffman").unwrap();

        assert!(matches!(
            ensure_distinct(&input, &compressed_path(&input)),
            Err(HuffError::ConfigError(_))
        ));
        let dotted = dir.path().join(".").join("data.bin");
        assert!(ensure_distinct(&input, &dotted).is_err());
        assert!(ensure_distinct(&input, &dir.path().join("other.bin")).is_ok());
        assert!(ensure_distinct(&input, &decompressed_path(&input)).is_ok());
        assert_eq!(read_bytes(&input).unwrap(), b"hello huffman");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(read_text(&dir.path().join("missing.txt")).is_err());
    }
}
