use serde_knot::{
    build_tree, materialize, parse_document, parse_document_with_options, parse_enum,
    parse_value, Datum, Entry, Error, ParseOptions, Value,
};

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn coll(items: Vec<Value>) -> Value {
    Value::Collection(items)
}

#[test]
fn test_scalar_literals() {
    assert_eq!(parse_value("true").unwrap(), Value::Boolean(true));
    assert_eq!(parse_value("-1.5e-3").unwrap(), num(-0.0015));
    assert_eq!(parse_value("\"hi\"").unwrap(), Value::from("hi"));
}

#[test]
fn test_integer_looking_numbers_are_floats() {
    match parse_value("25").unwrap() {
        Value::Number(n) => assert_eq!(n, 25.0),
        other => panic!("Expected number, got {:?}", other),
    }
}

#[test]
fn test_collections_preserve_order_and_kinds() {
    let expected = coll(vec![num(1.0), Value::from("a"), Value::Boolean(true)]);
    assert_eq!(parse_value(r#"[1 "a" true]"#).unwrap(), expected);
    assert_eq!(parse_value(r#"[1, "a", true]"#).unwrap(), expected);
    assert_eq!(parse_value("[]").unwrap(), coll(vec![]));
}

#[test]
fn test_datums() {
    let cases = vec![
        ("a 1", Datum::new("a", 1)),
        ("a.b 1", Datum::new("a.b", 1)),
        ("a.b.c 1.0", Datum::new("a.b.c", 1)),
        ("a.b.c true", Datum::new("a.b.c", true)),
        (
            "a.b.c [1 2 3]",
            Datum::new("a.b.c", coll(vec![num(1.0), num(2.0), num(3.0)])),
        ),
        (
            r#"a.b.c ["a" "b" "c"]"#,
            Datum::new(
                "a.b.c",
                coll(vec![Value::from("a"), Value::from("b"), Value::from("c")]),
            ),
        ),
        (
            "a.b.c [true false true]",
            Datum::new(
                "a.b.c",
                coll(vec![
                    Value::Boolean(true),
                    Value::Boolean(false),
                    Value::Boolean(true),
                ]),
            ),
        ),
        ("a.b.c []", Datum::new("a.b.c", coll(vec![]))),
        (
            "quantum.planck_constant 6.62607015e-34",
            Datum::new("quantum.planck_constant", 6.62607015e-34),
        ),
    ];

    for (input, expected) in cases {
        let doc = parse_document(input).unwrap();
        assert_eq!(doc.datums(), &[expected], "input: {}", input);
    }
}

#[test]
fn test_documents_preserve_order() {
    let doc = parse_document("a 1\nb 2").unwrap();
    assert_eq!(doc.datums(), &[Datum::new("a", 1), Datum::new("b", 2)]);

    let doc = parse_document("a 1\nb 2\nc 3\nd 4\ne 5").unwrap();
    let keys: Vec<_> = doc.iter().map(Datum::key).collect();
    assert_eq!(keys, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_indented_document_with_blank_lines() {
    let input = r#"
        user.name "Cansu"

        user.age 25
        user.location "Istanbul"
    "#;
    let doc = parse_document(input).unwrap();
    assert_eq!(
        doc.datums(),
        &[
            Datum::new("user.name", "Cansu"),
            Datum::new("user.age", 25),
            Datum::new("user.location", "Istanbul"),
        ]
    );
}

#[test]
fn test_crlf_line_endings() {
    let doc = parse_document("a 1\r\nb \"x\"\r\n").unwrap();
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_empty_document() {
    assert!(parse_document("").unwrap().is_empty());
    assert!(parse_document("  \n\n ").unwrap().is_empty());
}

#[test]
fn test_malformed_documents_fail() {
    assert!(matches!(
        parse_document("a.b.c"),
        Err(Error::Syntax { line: 1, col: 6, .. })
    ));
    assert_eq!(
        parse_document("a.b.c 1 2").unwrap_err(),
        Error::trailing_input(1, 9, "2")
    );
    assert!(matches!(
        parse_document("a.b.c test"),
        Err(Error::Syntax { line: 1, col: 7, .. })
    ));
}

#[test]
fn test_malformed_documents_fail_when_lenient() {
    let lenient = ParseOptions::lenient();
    for input in ["a.b.c", "a.b.c 1 2", "a.b.c test"] {
        assert!(
            parse_document_with_options(input, &lenient).is_err(),
            "input: {}",
            input
        );
    }
}

#[test]
fn test_unterminated_collection_position() {
    assert_eq!(
        parse_document("a 1\nscores [1 2 3\nb 2").unwrap_err(),
        Error::Syntax {
            line: 3,
            col: 1,
            msg: "expected a value (quoted string, number, true/false or [collection])"
                .to_string(),
            context: "b 2".to_string(),
        }
    );
    assert_eq!(
        parse_document("a 1\nscores [1 2 3").unwrap_err(),
        Error::unterminated_collection(2, 8)
    );
}

#[test]
fn test_line_breaks_option() {
    assert!(parse_document("a 1 b 2").is_err());

    let options = ParseOptions::new().with_line_breaks(false);
    let doc = parse_document_with_options("a 1 b 2", &options).unwrap();
    assert_eq!(doc.datums(), &[Datum::new("a", 1), Datum::new("b", 2)]);
}

#[test]
fn test_empty_segments_option() {
    assert!(parse_document("a..b 1").is_err());
    assert!(parse_document(". 1").is_err());

    let options = ParseOptions::new().with_empty_segments(true);
    let doc = parse_document_with_options("a..b 1\n. 2", &options).unwrap();
    let keys: Vec<_> = doc.iter().map(Datum::key).collect();
    assert_eq!(keys, vec!["a..b", "."]);
}

#[test]
fn test_enum_grammar() {
    assert_eq!(parse_enum("red|green|blue").unwrap(), vec!["red", "green", "blue"]);
    assert_eq!(
        parse_enum("red | green | blue").unwrap(),
        vec!["red", "green", "blue"]
    );
    assert_eq!(
        parse_enum("light.sunrise|light.sunset|dark").unwrap(),
        vec!["light.sunrise", "light.sunset", "dark"]
    );
    assert_eq!(parse_enum("solo").unwrap(), vec!["solo"]);
    assert!(parse_enum("red||blue").is_err());
    assert!(parse_enum("red|\"green\"").is_err());
}

#[test]
fn test_enum_text_is_not_a_document() {
    assert!(parse_document("background.colors red|green|blue").is_err());
}

#[test]
fn test_tree_shapes() {
    let tree = build_tree(&[Datum::new("a.b.c", 1)]).unwrap();
    let a = tree.get("a").and_then(Entry::as_tree).unwrap();
    let b = a.get("b").and_then(Entry::as_tree).unwrap();
    assert_eq!(b.get("c").and_then(Entry::as_value), Some(&num(1.0)));
    assert_eq!(a.len(), 1);
    assert_eq!(b.len(), 1);

    let tree = build_tree(&[Datum::new("a", 1), Datum::new("b", 2), Datum::new("c", 3)]).unwrap();
    assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), vec!["a", "b", "c"]);
}

#[test]
fn test_structural_conflicts() {
    assert!(matches!(
        build_tree(&[Datum::new("a", 1), Datum::new("a.b", 2)]),
        Err(Error::StructuralConflict { .. })
    ));
    assert!(matches!(
        build_tree(&[Datum::new("a.b", 2), Datum::new("a", 1)]),
        Err(Error::StructuralConflict { .. })
    ));
}

#[test]
fn test_materialize_is_deterministic() {
    let datums = vec![
        Datum::new("user.name", "Cansu"),
        Datum::new("user.age", 25),
        Datum::new("topics", coll(vec![Value::from("go"), Value::from("rust")])),
    ];
    let first = materialize(build_tree(&datums).unwrap());
    let second = materialize(build_tree(&datums).unwrap());
    assert_eq!(first, second);
    assert_eq!(first["topics"][1].as_str(), Some("rust"));
}
