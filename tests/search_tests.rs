//! Integration tests for nested key/value search.

use nestseek::document::node::{Key, Value};
use nestseek::document::parser::{from_json_value, parse_yaml};
use nestseek::search::{Accessor, Finder, Match};
use serde_json::json;

/// D = {"a":1, "b":{"c":2, "d":[3,4,{"e":5}]}, "f":(6,7,{"g":8})}
fn sample() -> Value {
    from_json_value(&json!({
        "a": 1,
        "b": {"c": 2, "d": [3, 4, {"e": 5}]},
        "f": [6, 7, {"g": 8}]
    }))
}

fn v(value: serde_json::Value) -> Value {
    from_json_value(&value)
}

fn paths<'a>(matches: impl Iterator<Item = Match<'a>>) -> Vec<String> {
    matches.map(|m| m.path).collect()
}

#[test]
fn test_find_keys_single_match() {
    let doc = sample();
    let matches: Vec<Match> = Finder::new(&doc).find_keys("c").collect();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].path, "['b']['c']");
    assert_eq!(matches[0].container, &v(json!({"c": 2, "d": [3, 4, {"e": 5}]})));
}

#[test]
fn test_find_values_single_match() {
    let doc = sample();
    let matches: Vec<Match> = Finder::new(&doc).find_values(5).collect();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].path, "['b']['d'][2]['e']");
    assert_eq!(matches[0].container, &v(json!({"e": 5})));
}

#[test]
fn test_find_keyvalues_same_as_find_keys() {
    let doc = sample();
    let finder = Finder::new(&doc);
    let by_pair: Vec<Match> = finder.find_keyvalues("c", 2).collect();
    let by_key: Vec<Match> = finder.find_keys("c").collect();

    assert_eq!(by_pair, by_key);
    assert!(finder.find_keyvalues("c", 3).next().is_none());
}

#[test]
fn test_find_key_returns_value() {
    let doc = sample();
    let found = Finder::new(&doc).find_key("c").unwrap();

    assert_eq!(found.value, &Value::from(2));
    assert_eq!(found.path, "['b']['c']");
}

#[test]
fn test_find_value_returns_container() {
    let doc = sample();
    let found = Finder::new(&doc).find_value(5).unwrap();

    assert_eq!(found.value, &v(json!({"e": 5})));
    assert_eq!(found.path, "['b']['d'][2]['e']");
}

#[test]
fn test_find_keyvalue_returns_container() {
    let doc = sample();
    let found = Finder::new(&doc).find_keyvalue("c", 2).unwrap();

    assert_eq!(found.value, &v(json!({"c": 2, "d": [3, 4, {"e": 5}]})));
    assert_eq!(found.path, "['b']['c']");
}

#[test]
fn test_nested_sequences_path() {
    let doc = v(json!({"a": {"b": ["c", [0, {"d": "e"}]]}}));
    let finder = Finder::new(&doc);

    let key = finder.find_key("d").unwrap();
    assert_eq!(key.value, &Value::from("e"));
    assert_eq!(key.path, "['a']['b'][1][1]['d']");

    let value = finder.find_value("e").unwrap();
    assert_eq!(value.value, &v(json!({"d": "e"})));

    let pair = finder.find_keyvalue("d", "e").unwrap();
    assert_eq!(pair.value, &v(json!({"d": "e"})));
    assert_eq!(pair.path, "['a']['b'][1][1]['d']");
}

#[test]
fn test_tuple_like_sequence_searched_like_list() {
    let doc = sample();
    let found = Finder::new(&doc).find_key("g").unwrap();

    assert_eq!(found.value, &Value::from(8));
    assert_eq!(found.path, "['f'][2]['g']");
}

#[test]
fn test_match_prunes_subtree() {
    let doc = v(json!({"x": {"x": {"x": 1}}, "y": {"x": 2}}));
    let found = paths(Finder::new(&doc).find_keys("x"));

    assert_eq!(found, vec!["['x']", "['y']['x']"]);
}

#[test]
fn test_strings_are_not_searched_into() {
    let doc = v(json!({"word": "abc"}));
    assert!(Finder::new(&doc).find_values("a").next().is_none());
    assert!(Finder::new(&doc).find_keys(0).next().is_none());
}

#[test]
fn test_empty_results() {
    let doc = sample();
    let finder = Finder::new(&doc);

    assert!(finder.find_keys("missing").next().is_none());
    assert!(finder.find_values(99).next().is_none());
    assert!(finder.find_key("missing").is_none());
    assert!(finder.find_value(99).is_none());
    assert!(finder.find_keyvalue("a", 2).is_none());
}

#[test]
fn test_scalar_document_has_no_matches() {
    for doc in [Value::from(5), Value::from("text"), Value::Null, Value::from(true)] {
        let finder = Finder::new(&doc);
        assert!(finder.find_values(5).next().is_none());
        assert!(finder.find_any_keyvalues("text").next().is_none());
        assert!(finder.find_where(|_, _| true).next().is_none());
    }
}

#[test]
fn test_repeated_queries_are_identical() {
    let doc = sample();
    let finder = Finder::new(&doc);
    let is_int = |_: Accessor<'_>, value: &Value| value.as_i64().is_some();

    let first: Vec<Match> = finder.find_where(is_int).collect();
    let second: Vec<Match> = finder.find_where(is_int).collect();

    assert_eq!(first, second);
    assert_eq!(
        paths(first.into_iter()),
        vec![
            "['a']",
            "['b']['c']",
            "['b']['d'][0]",
            "['b']['d'][1]",
            "['b']['d'][2]['e']",
            "['f'][0]",
            "['f'][1]",
            "['f'][2]['g']",
        ]
    );
}

#[test]
fn test_error_suppression_finds_deeper_match() {
    let doc = sample();
    let finder = Finder::new(&doc);
    let failing_on_b = |accessor: Accessor<'_>, value: &Value| {
        if accessor.matches_key(&Key::from("b")) {
            Err(format!("cannot judge {}", accessor))
        } else {
            Ok(value == &Value::from(5))
        }
    };

    let suppressed: Vec<String> = finder
        .find(failing_on_b, true)
        .map(|item| item.unwrap().path)
        .collect();
    assert_eq!(suppressed, vec!["['b']['d'][2]['e']"]);

    let mut aborted = finder.find(failing_on_b, false);
    assert_eq!(aborted.next().unwrap().unwrap_err(), "cannot judge 'b'");
    assert!(aborted.next().is_none());
}

#[test]
fn test_find_any_keyvalues_on_yaml() {
    let doc = parse_yaml(
        r#"
services:
  web: {image: nginx, depends: [db]}
  db: {image: postgres}
"#,
    )
    .unwrap();

    let found = paths(Finder::new(&doc).find_any_keyvalues("db"));
    assert_eq!(found, vec!["['services']['web']['depends'][0]", "['services']['db']"]);
}

#[test]
fn test_integer_keys_render_bare() {
    let doc = parse_yaml("200: {body: ok}\n404: {body: missing}\n").unwrap();
    let found = Finder::new(&doc).find_value("missing").unwrap();
    assert_eq!(found.path, "[404]['body']");
}

#[test]
fn test_float_key_target_matches_integer_key() {
    let doc = parse_yaml("2: two\nlist: [a, b]\n").unwrap();
    let finder = Finder::new(&doc);

    let by_key = paths(finder.find_keys(Key::Float(2.0)));
    let by_any = paths(finder.find_any_keyvalues(2.0));
    assert_eq!(by_key, vec!["[2]"]);
    assert_eq!(by_key, by_any);

    let by_index = paths(finder.find_keys(Key::Float(1.0)));
    assert_eq!(by_index, vec!["['list'][1]"]);
}
