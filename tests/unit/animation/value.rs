use super::*;

#[test]
fn shapes_are_classified_once() {
    assert_eq!(Value::from(3.0).shape(), Shape::Scalar);
    assert_eq!(Value::from([("x", 0.0), ("y", 1.0)]).shape(), Shape::Keyed);
    assert_eq!(Value::from([0.0, 1.0]).shape(), Shape::Sequence);
    assert_eq!(Value::from(vec![1.0]).shape(), Shape::Sequence);
}

#[test]
fn entries_use_reserved_key_and_indices() {
    assert_eq!(
        Value::Scalar(4.0).entries(),
        vec![(SCALAR_KEY.to_owned(), 4.0)]
    );
    assert_eq!(
        Value::sequence([5.0, 6.0]).entries(),
        vec![("0".to_owned(), 5.0), ("1".to_owned(), 6.0)]
    );
    assert_eq!(
        Value::keyed([("z", 1.0), ("a", 2.0)]).entries(),
        vec![("z".to_owned(), 1.0), ("a".to_owned(), 2.0)]
    );
}

#[test]
fn assemble_reverses_entries() {
    for v in [
        Value::Scalar(-1.5),
        Value::keyed([("z", 1.0), ("a", 2.0)]),
        Value::sequence([1.0, 2.0, 3.0]),
    ] {
        let entries = v.entries();
        let rebuilt = v
            .shape()
            .assemble(entries.iter().map(|(k, n)| (k.as_str(), *n)));
        assert_eq!(rebuilt, v);
    }
}

#[test]
fn serializes_untagged_in_key_order() {
    assert_eq!(serde_json::to_string(&Value::Scalar(1.0)).unwrap(), "1.0");
    assert_eq!(
        serde_json::to_string(&Value::keyed([("z", 0.0), ("a", 10.0)])).unwrap(),
        r#"{"z":0.0,"a":10.0}"#
    );
    assert_eq!(
        serde_json::to_string(&Value::sequence([1.0, 2.0])).unwrap(),
        "[1.0,2.0]"
    );
}

#[test]
fn deserializes_from_json_text() {
    let v: Value = serde_json::from_str(r#"{"y": 1, "x": 2.5}"#).unwrap();
    assert_eq!(v, Value::keyed([("y", 1.0), ("x", 2.5)]));
    let v: Value = serde_json::from_str("[0, 1]").unwrap();
    assert_eq!(v, Value::sequence([0.0, 1.0]));
    let v: Value = serde_json::from_str("-3").unwrap();
    assert_eq!(v, Value::Scalar(-3.0));
}

#[test]
fn json_value_conversion_checks_leaves() {
    let ok = Value::try_from(serde_json::json!({"b": 1, "a": 2})).unwrap();
    assert_eq!(ok, Value::keyed([("b", 1.0), ("a", 2.0)]));

    assert!(matches!(
        Value::try_from(serde_json::json!("nope")),
        Err(OlaError::Shape(_))
    ));
    assert!(matches!(
        Value::try_from(serde_json::json!({"x": "1"})),
        Err(OlaError::Shape(_))
    ));
    assert!(matches!(
        Value::try_from(serde_json::json!([1, null])),
        Err(OlaError::Shape(_))
    ));

    let back: serde_json::Value = Value::keyed([("b", 1.0), ("a", 2.0)]).into();
    assert_eq!(back.to_string(), r#"{"b":1.0,"a":2.0}"#);
}
