//! Schema inference and merge tests

use super::*;
use crate::config::{SchemaConfig, DEFAULT_DIALECT};
use crate::decode::decode_str;
use crate::error::Error;
use crate::path::JsonPath;
use crate::types::JsonValue;
use pretty_assertions::assert_eq;
use serde_json::json;

fn build(value: JsonValue) -> SchemaDocument {
    infer_schema(&value).unwrap()
}

fn object(doc: &SchemaDocument) -> &ObjectShape {
    doc.root.as_object().unwrap()
}

fn at<'a>(doc: &'a SchemaDocument, path: &str) -> &'a Property {
    doc.lookup(&JsonPath::parse(path).unwrap()).unwrap()
}

// ============================================================================
// Builder
// ============================================================================

#[test]
fn test_infer_simple_object() {
    let doc = build(json!({"a": 1, "b": "x"}));

    assert_eq!(doc.dialect, DEFAULT_DIALECT);
    let root = object(&doc);
    assert_eq!(root.properties.len(), 2);
    assert_eq!(at(&doc, "a").kind(), Kind::Integer);
    assert_eq!(at(&doc, "b").kind(), Kind::String);
    assert!(root.is_required("a"));
    assert!(root.is_required("b"));
}

#[test]
fn test_infer_key_order_independent() {
    let left = SchemaBuilder::new()
        .build(&decode_str(r#"{"b": 1, "a": {"y": true, "x": null}}"#).unwrap())
        .unwrap();
    let right = SchemaBuilder::new()
        .build(&decode_str(r#"{"a": {"x": null, "y": true}, "b": 1}"#).unwrap())
        .unwrap();

    assert_eq!(left, right);
}

#[test]
fn test_infer_string_bounds_and_format() {
    let doc = build(json!({"email": "a@b.co", "day": "2024-01-15", "name": "hello"}));

    let email = at(&doc, "email").as_string().unwrap();
    assert_eq!(email.format.as_deref(), Some("email"));
    assert_eq!(email.min_length, 6);
    assert_eq!(email.max_length, 6);
    assert_eq!(email.examples, vec![json!("a@b.co")]);

    assert_eq!(at(&doc, "day").format(), Some("date"));
    assert_eq!(at(&doc, "name").format(), None);
}

#[test]
fn test_infer_web_url_has_no_format() {
    let doc = build(json!({"site": "https://example.com/a", "isbn": "urn:isbn:0451450523"}));

    assert_eq!(at(&doc, "site").format(), None);
    assert_eq!(at(&doc, "isbn").format(), Some("uri"));
}

#[test]
fn test_infer_long_string_not_kept_as_example() {
    let builder = SchemaBuilder::with_config(SchemaConfig::default());
    let short = "x".repeat(19);
    let long = "x".repeat(20);

    let doc = builder.build(&json!({"short": short, "long": long})).unwrap();

    assert_eq!(at(&doc, "short").as_string().unwrap().examples.len(), 1);
    assert!(at(&doc, "long").as_string().unwrap().examples.is_empty());
    assert_eq!(at(&doc, "long").as_string().unwrap().max_length, 20);
}

#[test]
fn test_infer_numbers() {
    let doc = build(json!({"count": -3, "ratio": 2.5, "whole_float": 1.0}));

    match at(&doc, "count") {
        Property::Integer(shape) => {
            assert_eq!(shape.minimum, -3);
            assert_eq!(shape.maximum, -3);
        }
        other => panic!("expected integer, got {other:?}"),
    }
    match at(&doc, "ratio") {
        Property::Number(shape) => {
            assert_eq!(shape.minimum, 2.5);
            assert_eq!(shape.maximum, 2.5);
        }
        other => panic!("expected number, got {other:?}"),
    }
    assert_eq!(at(&doc, "whole_float").kind(), Kind::Number);
}

#[test]
fn test_infer_integer_out_of_range() {
    let err = infer_schema(&json!({"big": u64::MAX})).unwrap_err();
    match err {
        Error::UnsupportedType { path, .. } => assert_eq!(path, "big"),
        other => panic!("expected unsupported type, got {other:?}"),
    }
}

#[test]
fn test_infer_array_uses_first_element() {
    let doc = build(json!({"mixed": [1, "x", true], "empty": []}));

    let mixed = at(&doc, "mixed").as_array().unwrap();
    assert_eq!(mixed.items.as_deref().map(Property::kind), Some(Kind::Integer));
    assert_eq!(mixed.min_items, 3);
    assert_eq!(mixed.max_items, 3);

    let empty = at(&doc, "empty").as_array().unwrap();
    assert!(empty.items.is_none());
    assert_eq!(empty.min_items, 0);
}

#[test]
fn test_infer_scalar_roots() {
    assert_eq!(build(json!(null)).root, Property::Null);
    assert_eq!(build(json!(false)).root, Property::Boolean);
    assert_eq!(build(json!("s")).root.kind(), Kind::String);
}

#[test]
fn test_build_from_slice_rejects_malformed() {
    let err = SchemaBuilder::new().build_from_slice(b"{\"a\": ").unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_merge_intersects_required() {
    let mut acc = build(json!({"a": 1}));
    let incoming = build(json!({"a": 1, "b": 2}));

    SchemaMerger::new().merge(&mut acc, &incoming).unwrap();

    let root = object(&acc);
    assert!(root.get_property("a").is_some());
    assert!(root.get_property("b").is_some());
    assert_eq!(root.required.iter().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_merge_is_idempotent() {
    let doc = build(json!({"a": [{"x": "2024-01-15"}], "b": 1.5}));
    let mut acc = doc.clone();

    SchemaMerger::new().merge(&mut acc, &doc).unwrap();

    assert_eq!(acc, doc);
}

#[test]
fn test_merge_widens_bounds() {
    let merger = SchemaMerger::new();
    let mut acc = build(json!({"s": "ab", "n": 3, "list": [1]}));
    merger.merge(&mut acc, &build(json!({"s": "abcd", "n": -1, "list": [1, 2, 3]}))).unwrap();
    merger.merge(&mut acc, &build(json!({"s": "abc", "n": 0, "list": []}))).unwrap();

    let s = at(&acc, "s").as_string().unwrap();
    assert_eq!((s.min_length, s.max_length), (2, 4));
    assert_eq!(s.examples, vec![json!("ab"), json!("abcd"), json!("abc")]);

    match at(&acc, "n") {
        Property::Integer(shape) => assert_eq!((shape.minimum, shape.maximum), (-1, 3)),
        other => panic!("expected integer, got {other:?}"),
    }

    let list = at(&acc, "list").as_array().unwrap();
    assert_eq!((list.min_items, list.max_items), (0, 3));
    assert_eq!(list.items.as_deref().map(Property::kind), Some(Kind::Integer));
}

#[test]
fn test_merge_adopts_items_from_non_empty_array() {
    let mut acc = build(json!({"list": []}));
    SchemaMerger::new().merge(&mut acc, &build(json!({"list": ["x"]}))).unwrap();

    assert_eq!(at(&acc, "list[0]").kind(), Kind::String);
}

#[test]
fn test_merge_absorbs_null() {
    let merger = SchemaMerger::new();

    let mut acc = build(json!({"a": null}));
    merger.merge(&mut acc, &build(json!({"a": "x"}))).unwrap();
    assert_eq!(at(&acc, "a").kind(), Kind::String);

    merger.merge(&mut acc, &build(json!({"a": null}))).unwrap();
    assert_eq!(at(&acc, "a").kind(), Kind::String);
}

#[test]
fn test_merge_type_conflict_reports_path() {
    let mut acc = build(json!({"a": {"b": [{"c": 1}]}}));
    let incoming = build(json!({"a": {"b": [{"c": "x"}]}}));

    let err = SchemaMerger::new().merge(&mut acc, &incoming).unwrap_err();

    match err {
        Error::TypeConflict { path, left, right } => {
            assert_eq!(path, "a.b[0].c");
            assert_eq!(left, "integer");
            assert_eq!(right, "string");
        }
        other => panic!("expected type conflict, got {other:?}"),
    }
}

#[test]
fn test_merge_conflict_leaves_document_untouched() {
    let mut acc = build(json!({"a": 1, "b": 2}));
    let before = acc.clone();

    // "a" widens before "b" conflicts
    let result = SchemaMerger::new().merge(&mut acc, &build(json!({"a": 5, "b": "x"})));

    assert!(result.is_err());
    assert_eq!(acc, before);
}

#[test]
fn test_merge_integer_number_policy() {
    let ints = build(json!({"v": 1}));
    let floats = build(json!({"v": 2.5}));

    let mut strict = ints.clone();
    assert!(matches!(
        SchemaMerger::new().merge(&mut strict, &floats),
        Err(Error::TypeConflict { .. })
    ));

    let mut widened = ints.clone();
    SchemaMerger::new()
        .with_integer_widening(true)
        .merge(&mut widened, &floats)
        .unwrap();
    match at(&widened, "v") {
        Property::Number(shape) => assert_eq!((shape.minimum, shape.maximum), (1.0, 2.5)),
        other => panic!("expected number, got {other:?}"),
    }

    let mut reversed = floats;
    SchemaMerger::new()
        .with_integer_widening(true)
        .merge(&mut reversed, &build(json!({"v": -4})))
        .unwrap();
    match at(&reversed, "v") {
        Property::Number(shape) => assert_eq!((shape.minimum, shape.maximum), (-4.0, 2.5)),
        other => panic!("expected number, got {other:?}"),
    }
}

#[test]
fn test_merge_format_rules() {
    let merger = SchemaMerger::new();

    let mut adopted = build(json!({"d": "hello"}));
    merger.merge(&mut adopted, &build(json!({"d": "2024-01-15"}))).unwrap();
    assert_eq!(at(&adopted, "d").format(), Some("date"));

    let mut kept = build(json!({"d": "2024-01-15"}));
    merger.merge(&mut kept, &build(json!({"d": "user@example.com"}))).unwrap();
    assert_eq!(at(&kept, "d").format(), Some("date"));
}

#[test]
fn test_merge_caps_examples() {
    let merger = SchemaMerger::new().with_max_examples(2);
    let mut acc = build(json!({"n": 1}));
    merger.merge(&mut acc, &build(json!({"n": 2}))).unwrap();
    merger.merge(&mut acc, &build(json!({"n": 3}))).unwrap();

    match at(&acc, "n") {
        Property::Integer(shape) => {
            assert_eq!(shape.examples, vec![json!(1), json!(2)]);
            assert_eq!(shape.maximum, 3);
        }
        other => panic!("expected integer, got {other:?}"),
    }
}

#[test]
fn test_merge_many_collects_failures() {
    let mut acc = build(json!({"a": 1}));
    let docs = vec![
        build(json!({"a": 2})),
        build(json!({"a": "x"})),
        build(json!({"a": 3})),
    ];

    let failures = SchemaMerger::new().merge_many(&mut acc, &docs);

    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, 1);
    match at(&acc, "a") {
        Property::Integer(shape) => assert_eq!((shape.minimum, shape.maximum), (1, 3)),
        other => panic!("expected integer, got {other:?}"),
    }
}

#[test]
fn test_merge_schemas_helper() {
    let merged = merge_schemas(&build(json!({"a": 1})), &build(json!({"b": true}))).unwrap();
    assert!(object(&merged).required.is_empty());
    assert_eq!(object(&merged).properties.len(), 2);
}

// ============================================================================
// Stored Form
// ============================================================================

#[test]
fn test_wire_field_names() {
    let doc = build(json!({"id": 7, "email": "a@b.co"}));

    assert_eq!(
        doc.to_json().unwrap(),
        json!({
            "$schema": DEFAULT_DIALECT,
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "format": "email",
                    "minLength": 6,
                    "maxLength": 6,
                    "examples": ["a@b.co"]
                },
                "id": {
                    "type": "integer",
                    "minimum": 7,
                    "maximum": 7,
                    "examples": [7]
                }
            },
            "required": ["email", "id"]
        })
    );
}

#[test]
fn test_round_trip() {
    let mut doc = build(json!({
        "user": {"name": "Ann", "tags": ["x"], "score": 1.5},
        "items": [{"id": 1, "seen": null}],
        "empty": [],
        "flag": false
    }));
    SchemaMerger::new()
        .merge(&mut doc, &build(json!({"user": {"name": "Bo", "tags": []}, "items": [], "empty": [], "flag": true})))
        .unwrap();

    let text = doc.to_json_pretty().unwrap();
    let restored = SchemaDocument::from_json_str(&text).unwrap();

    assert_eq!(restored, doc);
}

#[test]
fn test_read_stored_schema_defaults() {
    let doc = SchemaDocument::from_value(&json!({
        "type": "object",
        "properties": {
            "count": {"type": "integer", "maximum": 9},
            "extra": {"type": "string"}
        },
        "required": ["count"],
        "additionalProperties": false
    }))
    .unwrap();

    assert_eq!(doc.dialect, DEFAULT_DIALECT);
    let root = object(&doc);
    assert_eq!(root.additional_properties, Some(false));
    match at(&doc, "count") {
        Property::Integer(shape) => assert_eq!((shape.minimum, shape.maximum), (0, 9)),
        other => panic!("expected integer, got {other:?}"),
    }
    assert_eq!(at(&doc, "extra").as_string().unwrap().min_length, 0);
}

#[test]
fn test_read_stored_schema_errors() {
    let missing_type = SchemaDocument::from_value(&json!({"properties": {}})).unwrap_err();
    assert!(matches!(missing_type, Error::Schema { .. }));

    let bad_bound = SchemaDocument::from_json_str(r#"{"type": "integer", "minimum": 1.5}"#).unwrap_err();
    assert!(matches!(bad_bound, Error::Schema { .. }));
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_lookup() {
    let doc = build(json!({"items": [{"id": 1}]}));

    assert_eq!(at(&doc, "items[3].id").kind(), Kind::Integer);
    assert_eq!(at(&doc, "").kind(), Kind::Object);

    let err = doc.lookup(&JsonPath::parse("items[0].missing").unwrap()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Path error at 'items[0].missing': key 'missing' does not exist"
    );

    let err = doc.lookup(&JsonPath::parse("items[0].id.deeper").unwrap()).unwrap_err();
    assert!(err.to_string().contains("not an object (integer)"));
}

#[test]
fn test_lookup_array_without_items() {
    let doc = build(json!({"empty": []}));
    let err = doc.lookup(&JsonPath::parse("empty[0]").unwrap()).unwrap_err();
    assert!(err.to_string().contains("array has no item schema"));
}
