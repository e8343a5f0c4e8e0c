//! Sectioned configuration lookup with secret references.
//!
//! A configuration file is a mapping of sections, each a mapping of keys:
//!
//! ```yaml
//! vault:
//!   space: team-a
//! jira:
//!   url: https://jira.example.com
//!   vault_path: apps/jira
//!   token@vault: api_token
//! ```
//!
//! `get("jira", "url")` returns the value stored in the file. `get("jira",
//! "token")` finds no direct value, sees the `token@vault` reference, and reads
//! the `api_token` field of the secret at `apps/jira` from the attached
//! [`SecretStore`]. Resolved secrets are cached per section and key.

use crate::document::node::{Key, Value};
use crate::document::parser::{parse_yaml, to_yaml_string};
use crate::error::SettingsError;
use crate::search::{Finder, Found};
use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Suffix marking a key whose value lives in the secret store.
pub const VAULT_SUFFIX: &str = "@vault";

/// Error type returned by secret stores.
pub type SecretError = Box<dyn std::error::Error + Send + Sync>;

/// Source of secret values, such as a Vault KV engine.
pub trait SecretStore {
    /// Reads all fields of the secret at `path` within `namespace`.
    fn read(&self, path: &str, namespace: &str) -> Result<IndexMap<String, Value>, SecretError>;
}

/// Configuration with section/key lookup.
///
/// Lookups take `&self`; the secret cache uses interior mutability, so a
/// loader must stay on one thread.
pub struct ConfigLoader {
    raw: Value,
    secrets: Option<Box<dyn SecretStore>>,
    cache: RefCell<HashMap<String, Value>>,
}

impl fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("raw", &self.raw)
            .field("secrets", &self.secrets.is_some())
            .field("cached", &self.cache.borrow().len())
            .finish()
    }
}

impl ConfigLoader {
    /// Reads and parses a YAML configuration file.
    ///
    /// An empty file, or one whose root is not a mapping, gives an empty
    /// configuration.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let value = parse_yaml(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(Self::from_value(value))
    }

    /// Wraps an already parsed document.
    pub fn from_value(value: Value) -> Self {
        let raw = match value {
            Value::Mapping(_) => value,
            _ => Value::Mapping(IndexMap::new()),
        };
        Self {
            raw,
            secrets: None,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Attaches the store used to resolve `@vault` references.
    pub fn with_secret_store(mut self, store: impl SecretStore + 'static) -> Self {
        self.secrets = Some(Box::new(store));
        self
    }

    /// The whole configuration document.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Returns the value of `key` in `section`, using cached secrets.
    pub fn get(&self, section: &str, key: &str) -> Result<Value, SettingsError> {
        self.lookup(section, key, true)
    }

    /// Like [`get`](Self::get) but always reads secrets from the store.
    ///
    /// The freshly read secret replaces any cached one.
    pub fn get_uncached(&self, section: &str, key: &str) -> Result<Value, SettingsError> {
        self.lookup(section, key, false)
    }

    /// Returns a proxy for one section.
    pub fn section(&self, name: &str) -> Result<Section<'_>, SettingsError> {
        self.section_value(name)?;
        Ok(Section {
            loader: self,
            name: name.to_string(),
        })
    }

    /// Search handle over the whole configuration.
    pub fn finder(&self) -> Finder<'_> {
        Finder::new(&self.raw)
    }

    /// The value stored under the first `key` anywhere in the configuration.
    pub fn find_key(&self, key: &str) -> Option<Found<&Value>> {
        self.finder().find_key(key)
    }

    fn section_value(&self, section: &str) -> Result<&Value, SettingsError> {
        match self.raw.get(&Key::from(section)) {
            None | Some(Value::Null) => Err(SettingsError::SectionNotFound(section.to_string())),
            Some(value) => Ok(value),
        }
    }

    fn lookup(&self, section: &str, key: &str, use_cache: bool) -> Result<Value, SettingsError> {
        let not_found = || SettingsError::KeyNotFound {
            section: section.to_string(),
            key: key.to_string(),
        };

        let entries = self
            .section_value(section)?
            .as_mapping()
            .ok_or_else(not_found)?;

        if let Some(value) = entries.get(&Key::from(key)) {
            return Ok(value.clone());
        }

        let reference = entries
            .get(&Key::String(format!("{}{}", key, VAULT_SUFFIX)))
            .ok_or_else(not_found)?;

        let store = self
            .secrets
            .as_deref()
            .ok_or_else(|| SettingsError::SecretStoreUnavailable(key.to_string()))?;

        let cache_key = format!("{}:{}", section, key);
        if use_cache {
            if let Some(value) = self.cache.borrow().get(&cache_key) {
                tracing::trace!(%cache_key, "secret cache hit");
                return Ok(value.clone());
            }
        }

        let value = self.fetch_secret(store, section, entries, key, reference)?;
        self.cache.borrow_mut().insert(cache_key, value.clone());
        Ok(value)
    }

    fn fetch_secret(
        &self,
        store: &dyn SecretStore,
        section: &str,
        entries: &IndexMap<Key, Value>,
        key: &str,
        reference: &Value,
    ) -> Result<Value, SettingsError> {
        let vault_path = entries
            .get(&Key::from("vault_path"))
            .and_then(Value::as_str)
            .ok_or_else(|| SettingsError::MissingVaultPath(section.to_string()))?;

        let namespace = entries
            .get(&Key::from("vault_namespace"))
            .and_then(Value::as_str)
            .or_else(|| {
                self.raw
                    .get(&Key::from("vault"))
                    .and_then(|vault| vault.get(&Key::from("space")))
                    .and_then(Value::as_str)
            })
            .ok_or_else(|| SettingsError::MissingNamespace(section.to_string()))?;

        let field = reference.as_str().ok_or_else(|| SettingsError::Secret {
            key: key.to_string(),
            source: format!("reference {}{} must name a string field", key, VAULT_SUFFIX).into(),
        })?;

        tracing::debug!(section, key, vault_path, namespace, "reading secret");
        let mut data = store
            .read(vault_path, namespace)
            .map_err(|source| SettingsError::Secret {
                key: key.to_string(),
                source,
            })?;

        data.shift_remove(field).ok_or_else(|| SettingsError::Secret {
            key: key.to_string(),
            source: format!("field '{}' missing in secret '{}'", field, vault_path).into(),
        })
    }
}

/// Proxy for the keys of one configuration section.
#[derive(Debug, Clone)]
pub struct Section<'a> {
    loader: &'a ConfigLoader,
    name: String,
}

impl<'a> Section<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, key: &str) -> Result<Value, SettingsError> {
        self.loader.get(&self.name, key)
    }

    /// Returns `default` when the key is absent; other failures still error.
    pub fn get_or(&self, key: &str, default: Value) -> Result<Value, SettingsError> {
        match self.loader.get(&self.name, key) {
            Err(SettingsError::KeyNotFound { .. }) => Ok(default),
            other => other,
        }
    }

    /// The section as stored in the file, secret references included.
    pub fn raw(&self) -> &'a Value {
        self.loader
            .raw
            .get(&Key::from(self.name.as_str()))
            .unwrap_or(&Value::Null)
    }
}

impl fmt::Display for Section<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = to_yaml_string(self.raw()).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}
