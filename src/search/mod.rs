//! Key/value search over nested documents.
//!
//! This module walks a document depth-first and reports every (key, value)
//! pair accepted by a predicate, together with the bracketed path from the
//! document root to that pair.
//!
//! # Path Syntax
//!
//! - `['name']` - Mapping entry with a string key
//! - `[3]` - Mapping entry with an integer key, or sequence element 3
//! - `['a']['b'][1]` - Segments concatenated root first
//!
//! # Search Rules
//!
//! - Mapping entries are visited in insertion order, sequence elements in
//!   position order, each container before its children
//! - A match is not searched further; its siblings are
//! - Scalars, including strings, are never searched into
//!
//! # Examples
//!
//! ```
//! use nestseek::document::parser::parse_yaml;
//! use nestseek::search::Finder;
//!
//! let doc = parse_yaml("b: {c: 2, d: [3, 4, {e: 5}]}").unwrap();
//! let paths: Vec<String> = Finder::new(&doc).find_values(5).map(|m| m.path).collect();
//! assert_eq!(paths, vec!["['b']['d'][2]['e']"]);
//! ```

pub mod finder;
pub mod matcher;
pub mod path;

pub use finder::{Finder, Found};
pub use matcher::{Match, Matches};
pub use path::Accessor;
