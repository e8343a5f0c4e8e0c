//! Document node representation.
//!
//! This module provides the closed set of node kinds that every loaded document
//! is built from. A document is a `Value`: either a keyed mapping, an ordered
//! sequence, or a scalar. Mappings preserve insertion order so that searches
//! visit entries in the order they appeared in the source file.
//!
//! # Example
//!
//! ```
//! use nestseek::document::node::{Key, Kind, Value};
//! use indexmap::IndexMap;
//!
//! let mut map = IndexMap::new();
//! map.insert(Key::from("name"), Value::from("nestseek"));
//! map.insert(Key::from("ports"), Value::Sequence(vec![Value::from(80), Value::from(443)]));
//! let doc = Value::Mapping(map);
//!
//! assert_eq!(doc.kind(), Kind::Mapping);
//! assert_eq!(doc.get(&Key::from("name")), Some(&Value::from("nestseek")));
//! ```

use indexmap::IndexMap;
use std::hash::{Hash, Hasher};

/// The three shapes a node can take during traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Keyed container with insertion-ordered iteration
    Mapping,
    /// Ordered, index-addressable container
    Sequence,
    /// Terminal value
    Scalar,
}

/// Represents document numbers (integer or float).
///
/// Equality is numeric across variants, so `Integer(2)` equals `Float(2.0)`.
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl std::fmt::Display for Number {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            _ => self.as_f64() == other.as_f64(),
        }
    }
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }
}

/// A mapping key.
///
/// Keys are restricted to hashable scalars. Floats hash and compare by bit
/// pattern so that `Key` can satisfy `Eq`.
#[derive(Debug, Clone)]
pub enum Key {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::String(a), Key::String(b)) => a == b,
            (Key::Integer(a), Key::Integer(b)) => a == b,
            (Key::Float(a), Key::Float(b)) => a.to_bits() == b.to_bits(),
            (Key::Boolean(a), Key::Boolean(b)) => a == b,
            (Key::Null, Key::Null) => true,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Key::String(s) => s.hash(state),
            Key::Integer(i) => i.hash(state),
            Key::Float(f) => f.to_bits().hash(state),
            Key::Boolean(b) => b.hash(state),
            Key::Null => {}
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Key::String(s) => write!(f, "{}", s),
            Key::Integer(i) => write!(f, "{}", i),
            Key::Float(fl) => write!(f, "{}", fl),
            Key::Boolean(b) => write!(f, "{}", b),
            Key::Null => write!(f, "null"),
        }
    }
}

impl Key {
    /// Returns the key as a string slice if it is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this key, read as a value, equals `value`.
    ///
    /// Used when a single target may act as either a key or a value.
    ///
    /// # Example
    ///
    /// ```
    /// use nestseek::document::node::{Key, Value};
    ///
    /// assert!(Key::from("c").matches_value(&Value::from("c")));
    /// assert!(Key::from(2).matches_value(&Value::from(2.0)));
    /// assert!(!Key::from("2").matches_value(&Value::from(2)));
    /// ```
    pub fn matches_value(&self, value: &Value) -> bool {
        match (self, value) {
            (Key::String(a), Value::String(b)) => a == b,
            (Key::Integer(a), Value::Number(n)) => Number::Integer(*a) == *n,
            (Key::Float(a), Value::Number(n)) => Number::Float(*a) == *n,
            (Key::Boolean(a), Value::Boolean(b)) => a == b,
            (Key::Null, Value::Null) => true,
            _ => false,
        }
    }

    /// Converts the key into the equivalent scalar value.
    pub fn to_value(&self) -> Value {
        match self {
            Key::String(s) => Value::String(s.clone()),
            Key::Integer(i) => Value::Number(Number::Integer(*i)),
            Key::Float(f) => Value::Number(Number::Float(*f)),
            Key::Boolean(b) => Value::Boolean(*b),
            Key::Null => Value::Null,
        }
    }

    /// Converts a scalar value into a key.
    ///
    /// Returns `None` for mappings and sequences, which cannot be keys.
    pub fn from_value(value: &Value) -> Option<Key> {
        match value {
            Value::String(s) => Some(Key::String(s.clone())),
            Value::Number(Number::Integer(i)) => Some(Key::Integer(*i)),
            Value::Number(Number::Float(f)) => Some(Key::Float(*f)),
            Value::Boolean(b) => Some(Key::Boolean(*b)),
            Value::Null => Some(Key::Null),
            Value::Mapping(_) | Value::Sequence(_) => None,
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::String(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::String(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Integer(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Integer(i64::from(i))
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Boolean(b)
    }
}

/// A document value.
///
/// This enum is the closed set of node kinds: mappings, sequences, and the
/// scalar variants. Tuple-like and list-like input both become `Sequence`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Key-value pairs in insertion order
    Mapping(IndexMap<Key, Value>),
    /// Ordered values
    Sequence(Vec<Value>),
    /// A string scalar
    String(String),
    /// A numeric scalar (integer or float)
    Number(Number),
    /// A boolean scalar
    Boolean(bool),
    /// The null scalar
    Null,
}

impl Value {
    /// Classifies the node for traversal.
    ///
    /// Strings are scalars, never sequences of characters.
    ///
    /// # Example
    ///
    /// ```
    /// use nestseek::document::node::{Kind, Value};
    ///
    /// assert_eq!(Value::Sequence(vec![]).kind(), Kind::Sequence);
    /// assert_eq!(Value::from("abc").kind(), Kind::Scalar);
    /// assert_eq!(Value::Null.kind(), Kind::Scalar);
    /// ```
    pub fn kind(&self) -> Kind {
        match self {
            Value::Mapping(_) => Kind::Mapping,
            Value::Sequence(_) => Kind::Sequence,
            Value::String(_) | Value::Number(_) | Value::Boolean(_) | Value::Null => Kind::Scalar,
        }
    }

    /// Returns true if this value is a mapping or a sequence.
    pub fn is_container(&self) -> bool {
        self.kind() != Kind::Scalar
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<Key, Value>> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(Number::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Looks up `key` if this value is a mapping.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Number(Number::Integer(i))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Number(Number::Integer(i64::from(i)))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<IndexMap<Key, Value>> for Value {
    fn from(map: IndexMap<Key, Value>) -> Self {
        Value::Mapping(map)
    }
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        key.to_value()
    }
}
