//! JSON input loading.
//!
//! Documents come from a file on disk (optionally gzip-compressed) or from
//! standard input, and are parsed into a [`JsonTree`].

use crate::document::parser::{parse_json, ParseOptions};
use crate::document::tree::JsonTree;
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Default upper bound for input size: 100 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Limits applied while loading a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub parse: ParseOptions,
    /// Largest accepted input in bytes, measured after decompression
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            parse: ParseOptions::default(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

/// Loads and parses a JSON file from the filesystem.
///
/// Files ending in `.gz` are decompressed first.
///
/// # Examples
///
/// ```no_run
/// use jsonextractor::file::loader::{load_json_file, LoadOptions};
///
/// let tree = load_json_file("catalog.json", &LoadOptions::default()).unwrap();
/// println!("{} nodes", tree.node_count());
/// ```
///
/// # Errors
///
/// Fails when the file does not exist or cannot be read, exceeds
/// `max_file_size`, or does not contain valid JSON.
pub fn load_json_file<P: AsRef<Path>>(path: P, options: &LoadOptions) -> Result<JsonTree> {
    let content = read_file_text(path, options.max_file_size)?;
    parse_json(&content, &options.parse).context("Failed to parse JSON")
}

/// Reads standard input to EOF and parses it.
///
/// Gzip input is recognised by its magic bytes (`0x1f 0x8b`).
pub fn load_json_from_stdin(options: &LoadOptions) -> Result<JsonTree> {
    let content = read_stdin_text(options.max_file_size)?;
    parse_json(&content, &options.parse).context("Failed to parse JSON from stdin")
}

/// Reads a file's text without parsing it, decompressing `.gz` files.
pub fn read_file_text<P: AsRef<Path>>(path: P, max_size: u64) -> Result<String> {
    let path = path.as_ref();
    if !path.exists() {
        bail!("File not found: {}", path.display());
    }

    let is_gzipped = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        let file = fs::File::open(path).context("Failed to open gzipped file")?;
        decompress(file, max_size)
            .context("Failed to decompress gzipped file - file may be corrupted")?
    } else {
        let size = fs::metadata(path).context("Failed to read file")?.len();
        check_size(size, max_size)?;
        fs::read_to_string(path).context("Failed to read file")?
    };

    log::debug!("Loaded {} bytes from {}", content.len(), path.display());
    Ok(content)
}

/// Reads standard input to EOF without parsing it.
pub fn read_stdin_text(max_size: u64) -> Result<String> {
    let mut buffer = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;
    decode_bytes(buffer, max_size)
}

/// Turns raw input bytes into text, decompressing gzip data.
pub fn decode_bytes(bytes: Vec<u8>, max_size: u64) -> Result<String> {
    if bytes.starts_with(&[0x1f, 0x8b]) {
        return decompress(bytes.as_slice(), max_size).context("Failed to decompress gzipped input");
    }
    check_size(bytes.len() as u64, max_size)?;
    String::from_utf8(bytes).context("Invalid UTF-8 in input")
}

fn decompress<R: Read>(reader: R, max_size: u64) -> Result<String> {
    use flate2::read::GzDecoder;

    // Read one byte past the limit so oversize input is detected without
    // inflating all of it.
    let mut decoder = GzDecoder::new(reader).take(max_size.saturating_add(1));
    let mut content = String::new();
    decoder.read_to_string(&mut content)?;
    check_size(content.len() as u64, max_size)?;
    Ok(content)
}

fn check_size(size: u64, max_size: u64) -> Result<()> {
    if size > max_size {
        bail!(
            "Input size {} bytes exceeds the maximum of {} bytes",
            size,
            max_size
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_decode_plain_bytes() {
        let text = decode_bytes(br#"{"a":1}"#.to_vec(), 1024).unwrap();
        assert_eq!(text, r#"{"a":1}"#);
    }

    #[test]
    fn test_decode_gzip_bytes() {
        let text = decode_bytes(gzip(br#"[1,2,3]"#), 1024).unwrap();
        assert_eq!(text, "[1,2,3]");
    }

    #[test]
    fn test_decode_rejects_oversize() {
        let err = decode_bytes(vec![b' '; 20], 10).unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));

        let err = decode_bytes(gzip(&[b' '; 20]), 10).unwrap_err();
        assert!(format!("{:#}", err).contains("exceeds the maximum"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_json_file("/nonexistent/data.json", &LoadOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "File not found: /nonexistent/data.json");
    }

    #[test]
    fn test_load_gzipped_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json.gz");
        fs::write(&path, gzip(br#"{"name": "test"}"#)).unwrap();

        let tree = load_json_file(&path, &LoadOptions::default()).unwrap();
        assert_eq!(tree.root().get("name").and_then(|v| v.as_str()), Some("test"));
    }

    #[test]
    fn test_load_corrupted_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json.gz");
        fs::write(&path, b"not gzip data").unwrap();

        assert!(load_json_file(&path, &LoadOptions::default()).is_err());
    }
}
