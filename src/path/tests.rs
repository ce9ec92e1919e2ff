//! Path tests

use super::*;
use crate::error::Error;
use serde_json::json;

#[test]
fn test_canonical_rendering() {
    let path = JsonPath::root()
        .child_key("a")
        .child_index(0)
        .child_key("x");
    assert_eq!(path.canonical(), "a[0].x");
    assert_eq!(path.to_string(), "a[0].x");

    let nested = JsonPath::root().child_index(2).child_index(1);
    assert_eq!(nested.canonical(), "[2][1]");
}

#[test]
fn test_root_rendering() {
    let root = JsonPath::root();
    assert!(root.is_root());
    assert_eq!(root.canonical(), "");
    assert_eq!(root.to_string(), "$");
}

#[test]
fn test_child_does_not_mutate_parent() {
    let parent = JsonPath::root().child_key("a");
    let left = parent.child_key("b");
    let right = parent.child_index(3);

    assert_eq!(parent.canonical(), "a");
    assert_eq!(left.canonical(), "a.b");
    assert_eq!(right.canonical(), "a[3]");
    assert_eq!(left.parent(), parent);
}

#[test]
fn test_parse_round_trip() {
    for text in ["a", "a.b", "a[0].x", "[1][2].c", "list[10]"] {
        let path = JsonPath::parse(text).unwrap();
        assert_eq!(path.canonical(), text);
    }
    assert_eq!(JsonPath::parse("$.a.b").unwrap().canonical(), "a.b");
    assert!(JsonPath::parse("").unwrap().is_root());
}

#[test]
fn test_parse_malformed_index() {
    assert!(matches!(
        JsonPath::parse("a[x]").unwrap_err(),
        Error::Path { .. }
    ));
    assert!(JsonPath::parse("a[1").is_err());
}

#[test]
fn test_serialize_as_segment_list() {
    let path = JsonPath::root().child_key("a").child_index(0).child_key("x");
    assert_eq!(serde_json::to_value(&path).unwrap(), json!(["a", "[0]", "x"]));
}

#[test]
fn test_resolve() {
    let doc = json!({"a": [{"x": 1}, {"x": 2}], "tags": ["red", "blue"]});

    let path = JsonPath::parse("a[1].x").unwrap();
    assert_eq!(resolve(&doc, &path).unwrap(), &json!(2));

    let member = JsonPath::root().child_key("tags").child_member(&json!("blue"));
    assert_eq!(member.canonical(), r#"tags."blue""#);
    assert_eq!(resolve(&doc, &member).unwrap(), &json!("blue"));

    assert_eq!(resolve(&doc, &JsonPath::root()).unwrap(), &doc);
}

#[test]
fn test_resolve_member_matches_json_type() {
    let doc = json!({"ids": ["1", 1]});

    let text = JsonPath::root().child_key("ids").child_member(&json!("1"));
    let number = JsonPath::root().child_key("ids").child_member(&json!(1));

    assert_ne!(text.canonical(), number.canonical());
    assert_eq!(resolve(&doc, &text).unwrap(), &json!("1"));
    assert_eq!(resolve(&doc, &number).unwrap(), &json!(1));

    let err = resolve(&json!({"ids": {"1": true}}), &number).unwrap_err();
    assert!(err.to_string().contains("not an array (object)"));
}

#[test]
fn test_resolve_errors() {
    let doc = json!({"a": [{"x": 1}], "s": "text"});

    let err = resolve(&doc, &JsonPath::parse("missing").unwrap()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Path error at 'missing': key 'missing' does not exist"
    );

    let err = resolve(&doc, &JsonPath::parse("a[5]").unwrap()).unwrap_err();
    assert!(err.to_string().contains("index 5 out of range (len 1)"));

    let err = resolve(&doc, &JsonPath::parse("s.inner").unwrap()).unwrap_err();
    assert!(err.to_string().contains("not an object (string)"));

    let err = resolve(&doc, &JsonPath::parse("s[0]").unwrap()).unwrap_err();
    assert!(err.to_string().contains("not an array (string)"));
}
