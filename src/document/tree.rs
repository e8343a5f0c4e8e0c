//! Loaded document ownership.
//!
//! This module provides the `DocumentTree` type, which owns the root `Value`
//! of a loaded document together with the source text it was parsed from.
//! Queries borrow the tree through a `Finder`.
//!
//! # Example
//!
//! ```
//! use nestseek::document::tree::DocumentTree;
//! use nestseek::document::parser::parse_yaml;
//!
//! let tree = DocumentTree::new(parse_yaml("a: {b: 1}").unwrap());
//! let found = tree.finder().find_key("b").unwrap();
//! assert_eq!(found.path, "['a']['b']");
//! ```

use super::node::Value;
use crate::search::Finder;

/// A complete document.
///
/// `DocumentTree` represents a parsed document with a root value and the
/// optional original source text.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentTree {
    root: Value,
    /// The original source text, when the tree was parsed from text
    original_source: Option<String>,
}

impl DocumentTree {
    /// Creates a new tree with the given root value and no source text.
    pub fn new(root: Value) -> Self {
        Self {
            root,
            original_source: None,
        }
    }

    /// Creates a new tree with the given root value and original source.
    pub fn with_source(root: Value, original_source: Option<String>) -> Self {
        Self {
            root,
            original_source,
        }
    }

    /// Returns a reference to the original source, if available.
    pub fn original_source(&self) -> Option<&str> {
        self.original_source.as_deref()
    }

    /// Returns a reference to the root value of the tree.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Consumes the tree and returns its root value.
    pub fn into_root(self) -> Value {
        self.root
    }

    /// Returns a query handle borrowing this tree.
    pub fn finder(&self) -> Finder<'_> {
        Finder::new(&self.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_with_original_source() {
        let tree = DocumentTree::with_source(Value::from("test"), Some("test".to_string()));

        assert_eq!(tree.original_source(), Some("test"));
        assert_eq!(tree.root(), &Value::from("test"));
    }

    #[test]
    fn test_tree_without_original_source() {
        let tree = DocumentTree::new(Value::Null);

        assert_eq!(tree.original_source(), None);
        assert_eq!(tree.into_root(), Value::Null);
    }
}
