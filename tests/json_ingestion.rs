use std::error::Error as _;

use dataset_ingestion::ingestion::json::{ingest_json_from_bytes, ingest_json_from_str};
use dataset_ingestion::types::{Row, Value};
use dataset_ingestion::IngestError;

#[test]
fn ingest_json_fixture_happy_path() {
    let bytes = std::fs::read("tests/fixtures/people.json").unwrap();
    let table = ingest_json_from_bytes(&bytes).unwrap();

    assert_eq!(table.columns(), ["id", "user", "score", "active"]);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.get(0, "id"), Some(&Value::Int64(1)));
    assert_eq!(table.get(0, "score"), Some(&Value::Float64(98.5)));
    assert_eq!(table.get(1, "active"), Some(&Value::Bool(false)));
    assert_eq!(
        table.get(1, "user"),
        Some(&Value::Nested(serde_json::json!({"name": "Grace"})))
    );
}

#[test]
fn ingest_json_single_element_array() {
    let table = ingest_json_from_str(r#"[{"a":1}]"#).unwrap();
    assert_eq!(table.columns(), ["a"]);

    let mut expected = Row::new();
    expected.insert("a".to_string(), Value::Int64(1));
    assert_eq!(table.rows(), [expected]);
}

#[test]
fn ingest_json_empty_array_is_valid() {
    let table = ingest_json_from_str("[]").unwrap();
    assert!(table.columns().is_empty());
    assert_eq!(table.row_count(), 0);
}

#[test]
fn ingest_json_columns_follow_first_element_key_order() {
    let table = ingest_json_from_str(r#"[{"z":1,"a":2,"m":3}]"#).unwrap();
    assert_eq!(table.columns(), ["z", "a", "m"]);
}

#[test]
fn ingest_json_extra_keys_are_kept_but_not_advertised() {
    let table = ingest_json_from_str(r#"[{"a":1},{"a":2,"b":"x"},{"c":null}]"#).unwrap();
    assert_eq!(table.columns(), ["a"]);
    assert_eq!(table.row_count(), 3);
    assert_eq!(table.get(1, "b"), Some(&Value::Utf8("x".to_string())));
    assert_eq!(table.get(2, "a"), None);
    assert_eq!(table.get(2, "c"), Some(&Value::Null));
}

#[test]
fn ingest_json_single_object_is_one_row() {
    let table = ingest_json_from_str(r#"{"name":"Ada","age":36}"#).unwrap();
    assert_eq!(table.columns(), ["name", "age"]);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.get(0, "age"), Some(&Value::Int64(36)));
}

#[test]
fn ingest_json_scalar_mapping() {
    let table = ingest_json_from_str(
        r#"[{"i":-3,"big":18446744073709551615,"f":0.5,"s":"x","b":true,"n":null,"arr":[1,2]}]"#,
    )
    .unwrap();
    assert_eq!(table.get(0, "i"), Some(&Value::Int64(-3)));
    assert_eq!(table.get(0, "big"), Some(&Value::UInt64(u64::MAX)));
    assert_eq!(table.get(0, "f"), Some(&Value::Float64(0.5)));
    assert_eq!(table.get(0, "s"), Some(&Value::Utf8("x".to_string())));
    assert_eq!(table.get(0, "b"), Some(&Value::Bool(true)));
    assert_eq!(table.get(0, "n"), Some(&Value::Null));
    assert_eq!(
        table.get(0, "arr"),
        Some(&Value::Nested(serde_json::json!([1, 2])))
    );
}

#[test]
fn ingest_json_values_support_downstream_coercion() {
    let table = ingest_json_from_str(r#"[{"n":null,"i":7,"u":18446744073709551615,"f":1.5,"s":"9.5"}]"#).unwrap();

    assert!(table.get(0, "n").unwrap().is_null());
    assert!(!table.get(0, "i").unwrap().is_null());
    assert_eq!(table.get(0, "i").and_then(Value::as_f64), Some(7.0));
    assert_eq!(table.get(0, "u").and_then(Value::as_f64), Some(u64::MAX as f64));
    assert_eq!(table.get(0, "f").and_then(Value::as_f64), Some(1.5));
    // Strings are not numbers until the caller parses them.
    assert_eq!(table.get(0, "s").and_then(Value::as_f64), None);
    let parsed: f64 = table.get(0, "s").and_then(Value::as_str).unwrap().parse().unwrap();
    assert_eq!(parsed, 9.5);
    assert_eq!(table.get(0, "i").and_then(Value::as_str), None);
}

#[test]
fn ingest_json_round_trips_advertised_columns() {
    let input = r#"[
        {"id":1,"name":"Ada","score":98.5,"active":true,"note":null,"meta":{"x":1,"tags":["a"]},"big":18446744073709551615},
        {"id":2,"name":"Grace","score":87.25,"active":false,"extra":"dropped","meta":"{\"x\":1}","big":-9223372036854775808},
        {"id":3,"name":"Linus","meta":[]}
    ]"#;
    let original: serde_json::Value = serde_json::from_str(input).unwrap();
    let table = ingest_json_from_str(input).unwrap();

    let round_tripped = table.rows_as_json();
    let original_rows = original.as_array().unwrap();
    let rows = round_tripped.as_array().unwrap();
    assert_eq!(rows.len(), original_rows.len());

    for (orig, back) in original_rows.iter().zip(rows) {
        for column in table.columns() {
            assert_eq!(orig.get(column), back.get(column), "column={column}");
        }
        // Keys outside `columns` are the declared lossy part.
        assert!(back.get("extra").is_none());
    }
}

#[test]
fn ingest_json_errors_on_invalid_json() {
    let err = ingest_json_from_str(r#"[{"a":1},"#).unwrap_err();
    assert!(matches!(err, IngestError::MalformedInput { .. }));
    assert!(err.source().is_some());
}

#[test]
fn ingest_json_errors_on_empty_input() {
    let err = ingest_json_from_str("").unwrap_err();
    assert!(matches!(err, IngestError::MalformedInput { .. }));
}

#[test]
fn ingest_json_errors_when_first_element_is_not_an_object() {
    let err = ingest_json_from_str("[1, {\"a\":1}]").unwrap_err();
    assert!(matches!(err, IngestError::MalformedInput { .. }));
    assert!(err.to_string().contains("array element 1 is not a json object"));
}

#[test]
fn ingest_json_errors_when_later_element_is_not_an_object() {
    let err = ingest_json_from_str(r#"[{"a":1}, "oops"]"#).unwrap_err();
    assert!(err.to_string().contains("array element 2 is not a json object (got string)"));
}

#[test]
fn ingest_json_errors_on_scalar_root() {
    let err = ingest_json_from_str("42").unwrap_err();
    assert!(matches!(err, IngestError::MalformedInput { .. }));
}

#[test]
fn ingest_json_rows_without_columns_fail_schema_derivation() {
    let err = ingest_json_from_str("[{}, {\"a\":1}]").unwrap_err();
    assert!(matches!(err, IngestError::SchemaDerivationFailed { .. }));
}

#[test]
fn ingest_json_errors_on_invalid_utf8() {
    let err = ingest_json_from_bytes(&[b'[', 0xc3, 0x28, b']']).unwrap_err();
    assert!(matches!(err, IngestError::MalformedInput { .. }));
}
