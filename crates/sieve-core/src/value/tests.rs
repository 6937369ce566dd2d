use super::*;
use std::cmp::Ordering;

#[test]
fn raw_values_deserialize_untagged() {
    let raw: Vec<RawValue> = serde_json::from_str(r#"["40", 40, 4.5, true]"#).unwrap();

    assert_eq!(
        raw,
        vec![
            RawValue::Text("40".to_string()),
            RawValue::Int(40),
            RawValue::Float(4.5),
            RawValue::Bool(true),
        ]
    );
}

#[test]
fn raw_value_display_matches_wire_text() {
    assert_eq!(RawValue::from("abc").to_string(), "abc");
    assert_eq!(RawValue::from(-7).to_string(), "-7");
    assert_eq!(RawValue::from(true).to_string(), "true");
}

#[test]
fn unique_list_collapses_duplicates_in_first_seen_order() {
    let list = Value::unique_list([
        Value::Int(3),
        Value::Int(1),
        Value::Int(3),
        Value::Int(2),
        Value::Int(1),
    ]);

    assert_eq!(
        list,
        Value::List(vec![Value::Int(3), Value::Int(1), Value::Int(2)])
    );
}

#[test]
fn strict_ordering_rejects_mismatched_variants() {
    assert_eq!(
        strict_ordering(&Value::Int(1), &Value::Text("1".to_string())),
        None
    );
    assert_eq!(
        strict_ordering(&Value::Int(2), &Value::Float(1.5)),
        Some(Ordering::Greater)
    );
}

#[test]
fn canonical_cmp_sorts_null_last() {
    assert_eq!(canonical_cmp(&Value::Null, &Value::Int(1)), Ordering::Greater);
    assert_eq!(canonical_cmp(&Value::Int(1), &Value::Null), Ordering::Less);
    assert_eq!(canonical_cmp(&Value::Null, &Value::Null), Ordering::Equal);
}

#[test]
fn canonical_cmp_is_total_for_mixed_variants() {
    let left = Value::Bool(true);
    let right = Value::Text("x".to_string());

    assert_ne!(canonical_cmp(&left, &right), Ordering::Equal);
    assert_eq!(
        canonical_cmp(&left, &right),
        canonical_cmp(&right, &left).reverse()
    );
}

#[test]
fn render_text_reads_columns_as_strings() {
    let uuid = uuid::Uuid::nil();

    assert_eq!(Value::Int(42).render_text().as_deref(), Some("42"));
    assert_eq!(
        Value::Enum(ValueEnum::new(1, "INACTIVE")).render_text().as_deref(),
        Some("INACTIVE")
    );
    assert_eq!(
        Value::Uuid(uuid).render_text().as_deref(),
        Some("00000000-0000-0000-0000-000000000000")
    );
    assert_eq!(Value::Null.render_text(), None);
}

#[test]
fn display_quotes_text() {
    assert_eq!(Value::from("o'neil").to_string(), "'o''neil'");
    assert_eq!(
        Value::List(vec![Value::Int(1), Value::Null]).to_string(),
        "(1, null)"
    );
}
