//! Property-based tests for the parse/build/materialize pipeline.

use proptest::prelude::*;
use serde_knot::{
    build_tree, materialize, parse_document, parse_value, Datum, Document, Error, Value,
};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Boolean),
        (-1.0e12f64..1.0e12).prop_map(Value::Number),
        any::<i32>().prop_map(Value::from),
        "[ -~]{0,12}".prop_map(Value::String),
    ]
}

fn value() -> impl Strategy<Value = Value> {
    prop_oneof![
        4 => scalar(),
        1 => prop::collection::vec(scalar(), 0..6).prop_map(Value::Collection),
    ]
}

fn key() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z_][a-z0-9_]{0,5}", 1..4).prop_map(|segments| segments.join("."))
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec((key(), value()), 0..12)
        .prop_map(|pairs| pairs.into_iter().map(|(k, v)| Datum::new(k, v)).collect())
}

proptest! {
    #[test]
    fn prop_value_display_reparses(v in value()) {
        prop_assert_eq!(parse_value(&v.to_string()).unwrap(), v);
    }

    #[test]
    fn prop_document_display_reparses(doc in document()) {
        prop_assert_eq!(parse_document(&doc.to_string()).unwrap(), doc);
    }

    #[test]
    fn prop_materialize_is_deterministic(doc in document()) {
        match (build_tree(doc.datums()), build_tree(doc.datums())) {
            (Ok(first), Ok(second)) => {
                prop_assert_eq!(&first, &second);
                prop_assert_eq!(materialize(first), materialize(second));
            }
            (Err(first), Err(second)) => {
                prop_assert!(matches!(first, Error::StructuralConflict { .. }), "expected StructuralConflict, got {:?}", first);
                prop_assert_eq!(first, second);
            }
            _ => prop_assert!(false, "tree building is not deterministic"),
        }
    }

    #[test]
    fn prop_last_write_wins(k in key(), first in value(), second in value()) {
        let tree = build_tree(&[Datum::new(k.clone(), first), Datum::new(k.clone(), second.clone())]).unwrap();
        prop_assert_eq!(tree.get_path(&k).and_then(|e| e.as_value()), Some(&second));
    }

    #[test]
    fn prop_flatten_inverts_build(doc in document()) {
        if let Ok(tree) = build_tree(doc.datums()) {
            let rebuilt = build_tree(tree.flatten().datums()).unwrap();
            prop_assert_eq!(rebuilt, tree);
        }
    }
}
