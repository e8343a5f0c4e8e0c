//! Accessors and their bracketed path rendering.

use crate::document::node::{Key, Number, Value};
use std::fmt::Write;

/// One navigation step: a mapping key or a sequence index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Accessor<'a> {
    /// Entry of a mapping
    Key(&'a Key),
    /// Element of a sequence (0-based)
    Index(usize),
}

impl Accessor<'_> {
    /// Returns true if this accessor equals `key`.
    ///
    /// Numeric keys compare by number, so `2`, `2.0` and sequence index 2 are
    /// all equal.
    pub fn matches_key(&self, key: &Key) -> bool {
        match (self, key) {
            (_, Key::Integer(_) | Key::Float(_)) => self.matches_value(&key.to_value()),
            (Accessor::Key(k), key) => *k == key,
            (Accessor::Index(_), _) => false,
        }
    }

    /// Returns true if this accessor, read as a value, equals `value`.
    pub fn matches_value(&self, value: &Value) -> bool {
        match (self, value) {
            (Accessor::Key(k), value) => k.matches_value(value),
            (Accessor::Index(idx), Value::Number(n)) => i64::try_from(*idx)
                .map(|i| Number::Integer(i) == *n)
                .unwrap_or(false),
            (Accessor::Index(_), _) => false,
        }
    }
}

impl std::fmt::Display for Accessor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::Key(key) => write_key_literal(f, key),
            Accessor::Index(idx) => write!(f, "{}", idx),
        }
    }
}

/// Appends `[accessor]` to `path`.
///
/// The root path is the empty string.
///
/// # Example
///
/// ```
/// use nestseek::document::node::Key;
/// use nestseek::search::path::{encode, Accessor};
///
/// let key = Key::from("b");
/// let path = encode("['a']", Accessor::Key(&key));
/// assert_eq!(encode(&path, Accessor::Index(1)), "['a']['b'][1]");
/// ```
pub fn encode(path: &str, accessor: Accessor<'_>) -> String {
    let mut out = String::with_capacity(path.len() + 8);
    out.push_str(path);
    // Writing into a String cannot fail.
    let _ = write!(out, "[{}]", accessor);
    out
}

/// Renders a key in literal syntax: quoted strings, bare numbers.
fn write_key_literal<W: Write>(out: &mut W, key: &Key) -> std::fmt::Result {
    match key {
        Key::String(s) => write_quoted(out, s),
        Key::Integer(i) => write!(out, "{}", i),
        Key::Float(fl) => write!(out, "{:?}", fl),
        Key::Boolean(b) => write!(out, "{}", b),
        Key::Null => out.write_str("null"),
    }
}

/// Single quotes unless the text holds a single quote and no double quote.
fn write_quoted<W: Write>(out: &mut W, s: &str) -> std::fmt::Result {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.write_char(quote)?;
    for ch in s.chars() {
        match ch {
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if c == quote => {
                out.write_char('\\')?;
                out.write_char(c)?;
            }
            c => out.write_char(c)?,
        }
    }
    out.write_char(quote)
}
