//! nestseek - key/value search over nested YAML and JSON documents.
//!
//! A document is a tree of mappings, sequences and scalars. A search walks it
//! depth-first, reports every (key, value) pair a predicate accepts, and
//! reconstructs the bracketed path to each one.
//!
//! ```
//! use nestseek::document::parser::parse_yaml;
//! use nestseek::document::node::Value;
//! use nestseek::search::Finder;
//!
//! let doc = parse_yaml("b: {c: 2, d: [3, 4, {e: 5}]}").unwrap();
//! let finder = Finder::new(&doc);
//!
//! let found = finder.find_value(5).unwrap();
//! assert_eq!(found.path, "['b']['d'][2]['e']");
//! assert_eq!(found.value, &parse_yaml("{e: 5}").unwrap());
//! assert_eq!(finder.find_key("c").unwrap().value, &Value::from(2));
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod file;
pub mod search;
pub mod settings;

pub use document::{DocumentTree, Key, Kind, Number, Value};
pub use error::{DocumentError, SettingsError};
pub use search::{Accessor, Finder, Found, Match, Matches};
