//! Document file loading functionality.
//!
//! This module provides functions to load YAML and JSON documents from files
//! or stdin, parsing them into `DocumentTree` structures that can be searched.

use crate::document::parser::{parse_json, parse_yaml};
use crate::document::tree::DocumentTree;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Text formats a document can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Determines the format from the filename, ignoring a `.gz` suffix.
    ///
    /// - `data.json` → Json
    /// - `data.json.gz` → Json
    /// - `config.yml`, anything else → Yaml
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let base = path_str.strip_suffix(".gz").unwrap_or(&*path_str);

        if base.ends_with(".json") {
            DocumentFormat::Json
        } else {
            DocumentFormat::Yaml
        }
    }
}

/// Parses document text in the given format.
pub fn parse_content(content: &str, format: DocumentFormat) -> Result<DocumentTree> {
    let root = match format {
        DocumentFormat::Yaml => parse_yaml(content)?,
        DocumentFormat::Json => parse_json(content)?,
    };
    Ok(DocumentTree::with_source(root, Some(content.to_string())))
}

/// Loads and parses a document file from the filesystem.
///
/// The format is chosen from the file extension; files ending in `.gz` are
/// decompressed first.
///
/// # Examples
///
/// ```no_run
/// use nestseek::file::loader::load_file;
///
/// let tree = load_file("config.yml").unwrap();
/// let port = tree.finder().find_key("port");
/// ```
///
/// # Errors
///
/// This function will return an error if:
/// - The file path does not exist or cannot be read
/// - A `.gz` file is not valid gzip
/// - The file contents are not valid YAML/JSON
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<DocumentTree> {
    let path_ref = path.as_ref();

    let is_gzipped = path_ref
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let content = if is_gzipped {
        read_gzipped_file(path_ref)?
    } else {
        fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read file {}", path_ref.display()))?
    };

    let format = DocumentFormat::from_path(path_ref);
    tracing::debug!(path = %path_ref.display(), ?format, gzipped = is_gzipped, "loading document");

    parse_content(&content, format)
        .with_context(|| format!("Failed to load document {}", path_ref.display()))
}

/// Loads and parses a document from standard input.
///
/// Gzip input is detected by its magic bytes. The text is parsed as YAML,
/// which also accepts JSON.
pub fn load_from_stdin() -> Result<DocumentTree> {
    use std::io::{self, Read};

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    let content = decode_bytes(buffer)?;
    tracing::debug!(bytes = content.len(), "loading document from stdin");

    parse_content(&content, DocumentFormat::Yaml).context("Failed to parse document from stdin")
}

/// Turns raw input into text, decompressing gzip (magic bytes 0x1f 0x8b).
fn decode_bytes(buffer: Vec<u8>) -> Result<String> {
    if buffer.starts_with(&[0x1f, 0x8b]) {
        decompress_gzip_bytes(&buffer)
    } else {
        String::from_utf8(buffer).context("Invalid UTF-8 in input")
    }
}

fn read_gzipped_file<P: AsRef<Path>>(path: P) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let file = fs::File::open(path).context("Failed to open gzipped file")?;
    let mut decoder = GzDecoder::new(file);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped file - file may be corrupted")?;
    Ok(content)
}

fn decompress_gzip_bytes(bytes: &[u8]) -> Result<String> {
    use flate2::read::GzDecoder;
    use std::io::Read;

    let mut decoder = GzDecoder::new(bytes);
    let mut content = String::new();
    decoder
        .read_to_string(&mut content)
        .context("Failed to decompress gzipped input")?;
    Ok(content)
}
