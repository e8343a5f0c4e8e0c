//! File I/O operations for documents.
//!
//! This module provides functionality to load YAML and JSON files from disk or
//! stdin, and save documents back to files with atomic writes and optional
//! backups.

pub mod loader;
pub mod saver;
