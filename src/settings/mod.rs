//! Configuration files consumed by applications built on nestseek.
//!
//! - [`ConfigLoader`] - read-only sectioned configuration whose values may be
//!   secret references resolved through a [`SecretStore`]
//! - [`YamlConfig`] - a flat YAML settings file that can be edited and saved

pub mod loader;
pub mod store;

pub use loader::{ConfigLoader, SecretError, SecretStore, Section, VAULT_SUFFIX};
pub use store::YamlConfig;
