//! Output writing.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes `text` to `path` atomically.
///
/// The data goes to a sibling temporary file which is then renamed over the
/// target, so the target is never left partially written. A target ending in
/// `.gz` is gzip-compressed.
pub fn write_output<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    let compress = path.to_string_lossy().ends_with(".gz");
    write_file_atomic(path, text.as_bytes(), compress)
        .with_context(|| format!("Failed to write output to {}", path.display()))?;
    log::info!("Wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}

fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;

    let temp_path = path.with_extension("tmp");

    if compress {
        let file = fs::File::create(&temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(&temp_path, data).context("Failed to write temp file")?;
    }

    fs::rename(&temp_path, path).context("Failed to rename temp file")?;

    Ok(())
}
