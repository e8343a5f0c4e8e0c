//! Document file saving functionality.
//!
//! This module writes document values to YAML or JSON files with atomic write
//! operations and optional backup creation.

use super::loader::DocumentFormat;
use crate::document::node::Value;
use crate::document::parser::{to_json_value, to_yaml_string};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Saves a document value to a file with optional backup creation.
///
/// The output format follows the file extension (see
/// [`DocumentFormat::from_path`]), and a `.gz` suffix gzip-compresses the
/// output. The write is atomic: data goes to a temporary file which is then
/// renamed over the target.
///
/// # Examples
///
/// ```no_run
/// use nestseek::document::node::Value;
/// use nestseek::file::saver::save_file;
///
/// save_file("output.yml", &Value::from("hello"), false).unwrap();
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - Backup creation fails (if requested)
/// - Serialization fails
/// - Writing or renaming the temp file fails
pub fn save_file<P: AsRef<Path>>(path: P, value: &Value, create_backup: bool) -> Result<()> {
    let path = path.as_ref();
    let should_compress = path.to_string_lossy().ends_with(".gz");

    if create_backup && path.exists() {
        backup_file(path)?;
    }

    let text = match DocumentFormat::from_path(path) {
        DocumentFormat::Yaml => to_yaml_string(value)?,
        DocumentFormat::Json => {
            let mut text = serde_json::to_string_pretty(&to_json_value(value))
                .context("Failed to serialize JSON")?;
            text.push('\n');
            text
        }
    };

    tracing::debug!(path = %path.display(), bytes = text.len(), "saving document");
    write_file_atomic(path, text.as_bytes(), should_compress)
}

/// Creates a backup of a file by copying it with a .bak extension.
fn backup_file(path: &Path) -> Result<()> {
    let mut backup_path = path.to_path_buf();
    let original_name = backup_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    backup_path.set_file_name(format!("{}.bak", original_name));
    fs::copy(path, backup_path).context("Failed to create backup")?;
    Ok(())
}

/// Writes data to a temp file next to `path`, then renames it into place.
///
/// The temp file is removed again if writing or renaming fails.
fn write_file_atomic(path: &Path, data: &[u8], compress: bool) -> Result<()> {
    let mut temp_path = path.to_path_buf();
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid file name"))?;
    temp_path.set_file_name(format!("{}.tmp", file_name));

    let result = write_temp_file(&temp_path, data, compress)
        .and_then(|()| fs::rename(&temp_path, path).context("Failed to rename temp file"));

    if result.is_err() && temp_path.exists() {
        if let Err(err) = fs::remove_file(&temp_path) {
            tracing::warn!(path = %temp_path.display(), error = %err, "could not remove temp file");
        }
    }
    result
}

fn write_temp_file(temp_path: &Path, data: &[u8], compress: bool) -> Result<()> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    if compress {
        let file = fs::File::create(temp_path).context("Failed to create temp file")?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder
            .write_all(data)
            .context("Failed to write compressed data")?;
        encoder.finish().context("Failed to finish compression")?;
    } else {
        fs::write(temp_path, data).context("Failed to write temp file")?;
    }
    Ok(())
}
