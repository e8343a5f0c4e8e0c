use super::matcher::{Match, Matches};
use super::path::Accessor;
use crate::document::node::{Key, Value};
use std::convert::Infallible;

/// Result of a single-result query: the returned value and the path of the
/// match that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Found<T> {
    pub value: T,
    pub path: String,
}

/// Query handle over a borrowed document.
///
/// A `Finder` holds nothing but the document reference. Every query builds its
/// own iterator with its own predicate and traversal state, so one finder can
/// serve any number of interleaved queries.
///
/// # Example
///
/// ```
/// use nestseek::document::parser::parse_yaml;
/// use nestseek::document::node::Value;
/// use nestseek::search::Finder;
///
/// let doc = parse_yaml("a: {b: ['c', [0, {d: e}]]}").unwrap();
/// let finder = Finder::new(&doc);
///
/// let found = finder.find_key("d").unwrap();
/// assert_eq!(found.value, &Value::from("e"));
/// assert_eq!(found.path, "['a']['b'][1][1]['d']");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Finder<'a> {
    root: &'a Value,
}

impl<'a> Finder<'a> {
    pub fn new(root: &'a Value) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Searches with a fallible predicate.
    ///
    /// With `ignore_errors` unset the first predicate error is yielded and ends
    /// the search. With it set, a failing pair is treated as a non-match and
    /// its value is still searched.
    pub fn find<P, E>(&self, predicate: P, ignore_errors: bool) -> Matches<'a, P, E>
    where
        P: FnMut(Accessor<'_>, &Value) -> Result<bool, E>,
    {
        Matches::new(self.root, predicate, ignore_errors)
    }

    /// Searches with an infallible predicate.
    pub fn find_where<P>(&self, mut predicate: P) -> impl Iterator<Item = Match<'a>> + 'a
    where
        P: FnMut(Accessor<'_>, &Value) -> bool + 'a,
    {
        Matches::new(
            self.root,
            move |accessor: Accessor<'_>, value: &Value| {
                Ok::<_, Infallible>(predicate(accessor, value))
            },
            false,
        )
        .map(|item| match item {
            Ok(found) => found,
            Err(never) => match never {},
        })
    }

    /// All pairs whose key equals `key`.
    pub fn find_keys(&self, key: impl Into<Key>) -> impl Iterator<Item = Match<'a>> + 'a {
        let key = key.into();
        self.find_where(move |accessor, _| accessor.matches_key(&key))
    }

    /// All pairs whose value equals `value`.
    pub fn find_values(&self, value: impl Into<Value>) -> impl Iterator<Item = Match<'a>> + 'a {
        let target = value.into();
        self.find_where(move |_, value| *value == target)
    }

    /// All pairs whose key equals `key` and whose value equals `value`.
    pub fn find_keyvalues(
        &self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> impl Iterator<Item = Match<'a>> + 'a {
        let key = key.into();
        let target = value.into();
        self.find_where(move |accessor, value| accessor.matches_key(&key) && *value == target)
    }

    /// All pairs where `target` equals either the key or the value.
    pub fn find_any_keyvalues(
        &self,
        target: impl Into<Value>,
    ) -> impl Iterator<Item = Match<'a>> + 'a {
        let target = target.into();
        self.find_where(move |accessor, value| {
            accessor.matches_value(&target) || *value == target
        })
    }

    /// The value stored under the first key equal to `key`.
    pub fn find_key(&self, key: impl Into<Key>) -> Option<Found<&'a Value>> {
        self.find_keys(key).next().map(|m| Found {
            value: m.value,
            path: m.path,
        })
    }

    /// The container holding the first value equal to `value`.
    pub fn find_value(&self, value: impl Into<Value>) -> Option<Found<&'a Value>> {
        self.find_values(value).next().map(container_of)
    }

    /// The container holding the first pair matching both `key` and `value`.
    pub fn find_keyvalue(
        &self,
        key: impl Into<Key>,
        value: impl Into<Value>,
    ) -> Option<Found<&'a Value>> {
        self.find_keyvalues(key, value).next().map(container_of)
    }
}

fn container_of(m: Match<'_>) -> Found<&Value> {
    Found {
        value: m.container,
        path: m.path,
    }
}
