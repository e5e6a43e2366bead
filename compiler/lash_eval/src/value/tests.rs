#![allow(clippy::unwrap_used)]

use lash_ir::Literal;
use pretty_assertions::assert_eq;

use crate::{MapValue, Value};

fn map(entries: &[(&str, f64)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| (Value::from(*k), Value::from(*v)))
            .collect(),
    )
}

#[test]
fn only_false_and_null_are_falsy() {
    assert!(!Value::Null.is_truthy());
    assert!(!Value::Bool(false).is_truthy());
    assert!(Value::Bool(true).is_truthy());
    assert!(Value::Number(0.0).is_truthy());
    assert!(Value::str("").is_truthy());
    assert!(Value::list([]).is_truthy());
}

#[test]
fn maps_compare_regardless_of_order() {
    assert_eq!(map(&[("a", 1.0), ("b", 2.0)]), map(&[("b", 2.0), ("a", 1.0)]));
    assert_ne!(map(&[("a", 1.0)]), map(&[("a", 2.0)]));
    assert_ne!(map(&[("a", 1.0)]), map(&[("a", 1.0), ("b", 2.0)]));
}

#[test]
fn duplicate_keys_keep_the_last_value_in_the_first_position() {
    let built: MapValue = [
        (Value::from("a"), Value::from(1.0)),
        (Value::from("b"), Value::from(2.0)),
        (Value::from("a"), Value::from(3.0)),
    ]
    .into_iter()
    .collect();
    assert_eq!(built.len(), 2);
    assert_eq!(built.get(&Value::from("a")), Some(&Value::from(3.0)));
    assert_eq!(Value::Map(built).to_string(), r#"{"a" 3 "b" 2}"#);
}

#[test]
fn insert_and_remove_leave_the_original_untouched() {
    let original = MapValue::new().insert(Value::from("k"), Value::from(1.0));
    let removed = original.remove(&Value::from("k"));
    assert!(removed.is_empty());
    assert!(original.contains_key(&Value::from("k")));
}

#[test]
fn literals_become_runtime_collections() {
    let literal = Literal::Map(
        vec![(
            Literal::Number(1.0),
            Literal::List(vec![Literal::str("x"), Literal::Null].into()),
        )]
        .into(),
    );
    let value = Value::from_literal(&literal);
    assert_eq!(value.to_string(), r#"{1 ["x" null]}"#);
}

#[test]
fn display_is_raw_only_at_the_top() {
    assert_eq!(Value::str("hi").to_string(), "hi");
    assert_eq!(Value::list([Value::str("hi")]).to_string(), r#"["hi"]"#);
    assert_eq!(Value::Number(2.5).to_string(), "2.5");
    assert_eq!(Value::Number(3.0).to_string(), "3");
    assert_eq!(Value::Null.to_text(), "");
}
