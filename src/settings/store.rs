//! Flat YAML settings file with get/set/save.

use crate::document::node::{Key, Value};
use crate::document::parser::{parse_yaml, to_yaml_string};
use crate::file::saver::save_file;
use crate::search::Finder;
use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A YAML mapping bound to the file it was loaded from.
///
/// A missing or empty file loads as an empty mapping, so a fresh settings
/// file can be created by loading, setting keys, and saving.
///
/// # Example
///
/// ```no_run
/// use nestseek::settings::YamlConfig;
///
/// let mut config = YamlConfig::load("config.yml").unwrap();
/// config.set("retries", 3);
/// config.save().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct YamlConfig {
    path: PathBuf,
    root: Value,
}

impl YamlConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut root = Value::Mapping(IndexMap::new());

        if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            match parse_yaml(&content)? {
                Value::Null => {}
                value @ Value::Mapping(_) => root = value,
                _ => bail!("{}: top level must be a mapping", path.display()),
            }
        }

        tracing::debug!(path = %path.display(), "loaded yaml config");
        Ok(Self { path, root })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the value for `key`; a missing key is `None`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
        self.root.get(&key.into())
    }

    /// Sets `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
        self.entries_mut().insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        self.entries_mut().shift_remove(&key.into())
    }

    pub fn len(&self) -> usize {
        self.root.as_mapping().map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Search handle over the settings.
    pub fn finder(&self) -> Finder<'_> {
        Finder::new(&self.root)
    }

    /// Writes the settings back to the file they were loaded from.
    pub fn save(&self) -> Result<()> {
        save_file(&self.path, &self.root, false)
    }

    fn entries_mut(&mut self) -> &mut IndexMap<Key, Value> {
        if self.root.as_mapping().is_none() {
            self.root = Value::Mapping(IndexMap::new());
        }
        match &mut self.root {
            Value::Mapping(entries) => entries,
            _ => unreachable!("settings root is always a mapping"),
        }
    }
}

impl fmt::Display for YamlConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = to_yaml_string(&self.root).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
