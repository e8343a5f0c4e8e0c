//! Conversion between serde data models and document values.
//!
//! This module is the document-model boundary: YAML and JSON text is parsed by
//! `serde_yaml` / `serde_json` and then converted into the closed `Value` node
//! set that the search engine walks. The reverse conversions are used when a
//! document is written back out or printed.
//!
//! # Example
//!
//! ```
//! use nestseek::document::parser::parse_yaml;
//! use nestseek::document::node::{Key, Value};
//!
//! let doc = parse_yaml("name: Alice\nage: 30\n").unwrap();
//! assert_eq!(doc.get(&Key::from("age")), Some(&Value::from(30)));
//! ```

use super::node::{Key, Number, Value};
use crate::error::DocumentError;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use serde_yaml::Value as YamlValue;

/// Parses YAML text into a document.
///
/// An empty input yields `Value::Null`. Since YAML is a superset of JSON this
/// also accepts JSON text.
///
/// ```
/// use nestseek::document::parser::parse_yaml;
///
/// assert!(parse_yaml("key: [unclosed").is_err());
/// ```
pub fn parse_yaml(yaml_str: &str) -> Result<Value> {
    let serde_value: YamlValue = serde_yaml::from_str(yaml_str).context("Failed to parse YAML")?;
    Ok(from_yaml_value(&serde_value)?)
}

/// Parses JSON text into a document, preserving object key order.
pub fn parse_json(json_str: &str) -> Result<Value> {
    let serde_value: JsonValue = serde_json::from_str(json_str).context("Failed to parse JSON")?;
    Ok(from_json_value(&serde_value))
}

/// Converts a `serde_yaml::Value` into a document value.
///
/// Tags are dropped and the tagged value is converted in their place. Mapping
/// keys must be scalars; a mapping or sequence used as a key is rejected.
pub fn from_yaml_value(value: &YamlValue) -> Result<Value, DocumentError> {
    let converted = match value {
        YamlValue::Mapping(map) => {
            let mut entries = IndexMap::with_capacity(map.len());
            for (k, v) in map {
                entries.insert(yaml_key(k)?, from_yaml_value(v)?);
            }
            Value::Mapping(entries)
        }
        YamlValue::Sequence(items) => Value::Sequence(
            items
                .iter()
                .map(from_yaml_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        YamlValue::String(s) => Value::String(s.clone()),
        YamlValue::Number(n) => Value::Number(yaml_number(n)),
        YamlValue::Bool(b) => Value::Boolean(*b),
        YamlValue::Null => Value::Null,
        YamlValue::Tagged(tagged) => from_yaml_value(&tagged.value)?,
    };
    Ok(converted)
}

fn yaml_number(n: &serde_yaml::Number) -> Number {
    match n.as_i64() {
        Some(i) => Number::Integer(i),
        None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn yaml_key(key: &YamlValue) -> Result<Key, DocumentError> {
    match key {
        YamlValue::String(s) => Ok(Key::String(s.clone())),
        YamlValue::Number(n) => Ok(match yaml_number(n) {
            Number::Integer(i) => Key::Integer(i),
            Number::Float(f) => Key::Float(f),
        }),
        YamlValue::Bool(b) => Ok(Key::Boolean(*b)),
        YamlValue::Null => Ok(Key::Null),
        YamlValue::Tagged(tagged) => yaml_key(&tagged.value),
        YamlValue::Mapping(_) | YamlValue::Sequence(_) => Err(DocumentError::UnsupportedKey(
            serde_yaml::to_string(key)
                .map(|s| s.trim_end().to_string())
                .unwrap_or_else(|_| "<composite>".to_string()),
        )),
    }
}

/// Converts a `serde_json::Value` into a document value.
///
/// JSON object keys are always strings, so this conversion cannot fail.
pub fn from_json_value(value: &JsonValue) -> Value {
    match value {
        JsonValue::Object(map) => Value::Mapping(
            map.iter()
                .map(|(k, v)| (Key::String(k.clone()), from_json_value(v)))
                .collect(),
        ),
        JsonValue::Array(arr) => Value::Sequence(arr.iter().map(from_json_value).collect()),
        JsonValue::String(s) => Value::String(s.clone()),
        JsonValue::Number(n) => Value::Number(match n.as_i64() {
            Some(i) => Number::Integer(i),
            None => Number::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        JsonValue::Bool(b) => Value::Boolean(*b),
        JsonValue::Null => Value::Null,
    }
}

/// Converts a document value back into a `serde_yaml::Value`.
pub fn to_yaml_value(value: &Value) -> YamlValue {
    match value {
        Value::Mapping(entries) => {
            let map: serde_yaml::Mapping = entries
                .iter()
                .map(|(k, v)| (to_yaml_value(&k.to_value()), to_yaml_value(v)))
                .collect();
            YamlValue::Mapping(map)
        }
        Value::Sequence(items) => YamlValue::Sequence(items.iter().map(to_yaml_value).collect()),
        Value::String(s) => YamlValue::String(s.clone()),
        Value::Number(Number::Integer(i)) => YamlValue::Number((*i).into()),
        Value::Number(Number::Float(f)) => YamlValue::Number((*f).into()),
        Value::Boolean(b) => YamlValue::Bool(*b),
        Value::Null => YamlValue::Null,
    }
}

/// Converts a document value into a `serde_json::Value`.
///
/// Non-string keys are rendered as their display text, and non-finite floats
/// become `null`, since JSON has no representation for either.
pub fn to_json_value(value: &Value) -> JsonValue {
    match value {
        Value::Mapping(entries) => JsonValue::Object(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), to_json_value(v)))
                .collect(),
        ),
        Value::Sequence(items) => JsonValue::Array(items.iter().map(to_json_value).collect()),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Number(Number::Integer(i)) => JsonValue::Number((*i).into()),
        Value::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Boolean(b) => JsonValue::Bool(*b),
        Value::Null => JsonValue::Null,
    }
}

/// Renders a document value as YAML text.
pub fn to_yaml_string(value: &Value) -> Result<String> {
    serde_yaml::to_string(&to_yaml_value(value)).context("Failed to serialize YAML")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_yaml("hello").unwrap(), Value::from("hello"));
        assert_eq!(parse_yaml("42").unwrap(), Value::from(42));
        assert_eq!(parse_yaml("42.5").unwrap(), Value::from(42.5));
        assert_eq!(parse_yaml("true").unwrap(), Value::from(true));
        assert_eq!(parse_yaml("~").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_empty_input_is_null() {
        assert_eq!(parse_yaml("").unwrap(), Value::Null);
    }

    #[test]
    fn test_parse_preserves_mapping_order() {
        let doc = parse_yaml("zeta: 1\nalpha: 2\nmid: 3\n").unwrap();
        let keys: Vec<String> = doc
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_json_preserves_object_order() {
        let doc = parse_json(r#"{"b": 1, "a": 2}"#).unwrap();
        let keys: Vec<String> = doc
            .as_mapping()
            .unwrap()
            .keys()
            .map(|k| k.to_string())
            .collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_non_string_keys() {
        let doc = parse_yaml("1: one\ntrue: yes\n~: nothing\n2.5: half\n").unwrap();
        let map = doc.as_mapping().unwrap();
        assert_eq!(map.get(&Key::Integer(1)), Some(&Value::from("one")));
        assert_eq!(map.get(&Key::Boolean(true)), Some(&Value::from("yes")));
        assert_eq!(map.get(&Key::Null), Some(&Value::from("nothing")));
        assert_eq!(map.get(&Key::Float(2.5)), Some(&Value::from("half")));
    }

    #[test]
    fn test_composite_key_is_rejected() {
        let err = parse_yaml("? [a, b]\n: value\n").unwrap_err();
        assert!(err.to_string().contains("unsupported mapping key"));
    }

    #[test]
    fn test_tagged_value_is_unwrapped() {
        let doc = parse_yaml("port: !custom 8080\n").unwrap();
        assert_eq!(doc.get(&Key::from("port")), Some(&Value::from(8080)));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_json(r#"{"unclosed": "#).is_err());
    }

    #[test]
    fn test_yaml_conversion_round_trip() {
        let source = "a: 1\nb:\n  c: [x, 2.5, null, false]\n";
        let doc = parse_yaml(source).unwrap();
        let back = from_yaml_value(&to_yaml_value(&doc)).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_to_json_renders_non_string_keys() {
        let doc = parse_yaml("1: one\n").unwrap();
        assert_eq!(to_json_value(&doc), serde_json::json!({"1": "one"}));
    }
}
