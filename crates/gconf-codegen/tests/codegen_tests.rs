//! Serializer tests: XML layout, escaping, JSON shape, reading documents
//! back, and rejection of malformed input.

use gconf_codegen::{read_json, read_xml, to_json, to_xml, EmitError};
use gconf_types::{Number, SymbolTable, Value};
use pretty_assertions::assert_eq;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn table(entries: Vec<(&str, Value)>) -> SymbolTable {
    entries
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// A table touching every value shape.
fn sample() -> SymbolTable {
    table(vec![
        ("width", Value::int(10)),
        ("ratio", Value::float(0.5)),
        ("whole", Value::float(4.0)),
        ("title", Value::string("Main window")),
        (
            "sizes",
            Value::Array(vec![
                Value::int(1),
                Value::string("x"),
                Value::Array(vec![]),
                Value::Array(vec![Value::float(2.5)]),
            ]),
        ),
    ])
}

fn entries(symbols: &SymbolTable) -> Vec<(String, Value)> {
    symbols
        .iter()
        .map(|(n, v)| (n.to_string(), v.clone()))
        .collect()
}

/// Type tags all the way down, including the integer/float form.
fn tags(value: &Value) -> String {
    match value {
        Value::Number(Number::Int(_)) => "int".into(),
        Value::Number(Number::Float(_)) => "float".into(),
        Value::String(_) => "string".into(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(tags).collect();
            format!("[{}]", inner.join(","))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// XML
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_xml_layout() {
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<configuration>
  <constant name="width" type="number">10</constant>
  <constant name="ratio" type="number">0.5</constant>
  <constant name="whole" type="number">4.0</constant>
  <constant name="title" type="string">Main window</constant>
  <constant name="sizes" type="array">
    <array>
      <item type="number">1</item>
      <item type="string">x</item>
      <item type="array">
        <array/>
      </item>
      <item type="array">
        <array>
          <item type="number">2.5</item>
        </array>
      </item>
    </array>
  </constant>
</configuration>
"#;
    assert_eq!(to_xml(&sample(), 2).unwrap(), expected);
}

#[test]
fn test_xml_indent_width() {
    let symbols = table(vec![("a", Value::Array(vec![Value::int(1)]))]);
    let xml = to_xml(&symbols, 4).unwrap();
    assert!(xml.contains("\n    <constant name=\"a\" type=\"array\">\n        <array>"));
}

#[test]
fn test_xml_escapes_text() {
    let symbols = table(vec![("expr", Value::string("a<b & c>d"))]);
    let xml = to_xml(&symbols, 2).unwrap();
    assert!(xml.contains("a&lt;b &amp; c&gt;d"));
    assert_eq!(read_xml(&xml).unwrap(), entries(&symbols));
}

#[test]
fn test_xml_round_trip_keeps_tags() {
    let symbols = sample();
    let back = read_xml(&to_xml(&symbols, 2).unwrap()).unwrap();
    assert_eq!(back, entries(&symbols));
    for ((_, original), (_, read)) in entries(&symbols).iter().zip(&back) {
        assert_eq!(tags(original), tags(read));
    }
}

#[test]
fn test_xml_round_trip_preserves_string_whitespace() {
    let symbols = table(vec![
        ("padded", Value::string("  two spaces  ")),
        ("blank", Value::string("")),
        ("spaces", Value::string("   ")),
    ]);
    let back = read_xml(&to_xml(&symbols, 2).unwrap()).unwrap();
    assert_eq!(back, entries(&symbols));
}

#[test]
fn test_xml_non_finite_numbers_round_trip() {
    let symbols = table(vec![("big", Value::float(f64::INFINITY))]);
    let xml = to_xml(&symbols, 2).unwrap();
    assert!(xml.contains(">inf<"));
    let back = read_xml(&xml).unwrap();
    assert!(back[0].1.as_number().unwrap().as_f64().is_infinite());
}

#[test]
fn test_xml_reader_rejects_foreign_documents() {
    for doc in [
        "<settings/>",
        "<configuration><constant type=\"number\">1</constant></configuration>",
        "<configuration><constant name=\"a\" type=\"bool\">1</constant></configuration>",
        "<configuration><constant name=\"a\" type=\"number\">one</constant></configuration>",
        "<configuration><constant name=\"a\" type=\"number\">1</constant>",
    ] {
        assert!(read_xml(doc).is_err(), "should reject: {doc}");
    }
}

#[test]
fn test_xml_reader_accepts_empty_string_item() {
    let doc = r#"<configuration><constant name="a" type="array"><array><item type="string"/></array></constant></configuration>"#;
    assert_eq!(
        read_xml(doc).unwrap(),
        vec![("a".to_string(), Value::Array(vec![Value::string("")]))]
    );
}

// ─────────────────────────────────────────────────────────────────────
// JSON
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_json_shape() {
    let symbols = table(vec![
        ("n", Value::int(3)),
        ("list", Value::Array(vec![Value::string("a"), Value::float(1.0)])),
    ]);
    let parsed: serde_json::Value = serde_json::from_str(&to_json(&symbols).unwrap()).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "constants": [
                {"name": "n", "type": "number", "value": 3},
                {"name": "list", "type": "array", "value": [
                    {"type": "string", "value": "a"},
                    {"type": "number", "value": 1.0}
                ]}
            ]
        })
    );
}

#[test]
fn test_json_round_trip_keeps_tags() {
    let symbols = sample();
    let back = read_json(&to_json(&symbols).unwrap()).unwrap();
    assert_eq!(back, entries(&symbols));
    for ((_, original), (_, read)) in entries(&symbols).iter().zip(&back) {
        assert_eq!(tags(original), tags(read));
    }
}

#[test]
fn test_json_rejects_non_finite() {
    let symbols = table(vec![("nan", Value::float(f64::NAN))]);
    assert!(matches!(to_json(&symbols), Err(EmitError::NonFinite { .. })));
}

#[test]
fn test_json_reader_rejects_bad_input() {
    assert!(matches!(read_json("{"), Err(EmitError::Json(_))));
    assert!(read_json(r#"{"constants": [{"name": "a", "type": "color", "value": 1}]}"#).is_err());
}

// ─────────────────────────────────────────────────────────────────────
// Determinism
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_serializer_determinism_100_iterations() {
    let symbols = sample();
    let xml = to_xml(&symbols, 2).unwrap();
    let json = to_json(&symbols).unwrap();
    for i in 0..100 {
        assert_eq!(to_xml(&symbols, 2).unwrap(), xml, "XML determinism failure at iteration {i}");
        assert_eq!(to_json(&symbols).unwrap(), json, "JSON determinism failure at iteration {i}");
    }
}
