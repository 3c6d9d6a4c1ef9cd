use plain_codec::{decode, encode, Value};

/// Assert that encode → decode returns the same value, compact and indented.
fn assert_roundtrip(value: Value) {
    let text = encode(&value, None).expect("compact encode failed");
    let back = decode(&text).expect("compact decode failed");
    assert_eq!(back, value, "Compact roundtrip failed:\n  text: {text}");

    for indent in [1, 2, 4] {
        let text = encode(&value, Some(indent)).expect("indented encode failed");
        let back = decode(&text).expect("indented decode failed");
        assert_eq!(
            back, value,
            "Indented roundtrip failed (indent {indent}):\n  text:\n{text}"
        );
    }
}

fn s(text: &str) -> Value {
    Value::from(text)
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn roundtrip_null_and_bools() {
    assert_roundtrip(Value::Null);
    assert_roundtrip(Value::Bool(true));
    assert_roundtrip(Value::Bool(false));
}

#[test]
fn roundtrip_integers() {
    for n in [0, 1, -1, 42, i64::MAX, i64::MIN + 1] {
        assert_roundtrip(Value::Integer(n));
    }
}

#[test]
fn roundtrip_i64_min() {
    assert_roundtrip(Value::Integer(i64::MIN));
}

#[test]
fn roundtrip_floats() {
    for f in [0.5, -0.5, 3.14, 29.99, 26.991, 2.0, 1e-7, 123456789.125] {
        assert_roundtrip(Value::Float(f));
    }
}

#[test]
fn roundtrip_float_type_survives() {
    let back = decode(&encode(&Value::Float(10.0), None).unwrap()).unwrap();
    assert!(back.is_float());
}

#[test]
fn roundtrip_strings() {
    assert_roundtrip(s(""));
    assert_roundtrip(s("hello"));
    assert_roundtrip(s("null"));
    assert_roundtrip(s("42"));
    assert_roundtrip(s("  spaced  "));
    assert_roundtrip(s("caf\u{e9} \u{4f60}\u{597d}"));
}

#[test]
fn roundtrip_strings_with_quotes_and_backslashes() {
    assert_roundtrip(s("A\"B"));
    assert_roundtrip(s(r"C:\temp\new"));
    assert_roundtrip(s(r#"mix \" of "both""#));
    assert_roundtrip(s(r"trailing\"));
    assert_roundtrip(s("\\\\"));
}

#[test]
fn roundtrip_strings_with_structural_characters() {
    assert_roundtrip(s("a,b"));
    assert_roundtrip(s("[not a list]"));
    assert_roundtrip(s("{\"k\": 1}"));
    assert_roundtrip(s("key: value"));
}

#[test]
fn roundtrip_string_with_newline() {
    assert_roundtrip(s("line1\nline2"));
}

// ============================================================================
// Containers
// ============================================================================

#[test]
fn roundtrip_empty_containers() {
    assert_roundtrip(Value::Sequence(vec![]));
    assert_roundtrip(Value::Mapping(vec![]));
    assert_roundtrip(Value::Sequence(vec![
        Value::Sequence(vec![]),
        Value::Mapping(vec![]),
    ]));
}

#[test]
fn roundtrip_mixed_sequence() {
    assert_roundtrip(Value::Sequence(vec![
        Value::Integer(1),
        Value::Float(1.5),
        s("two"),
        Value::Null,
        Value::Bool(false),
    ]));
}

#[test]
fn roundtrip_strings_with_separators_inside_sequence() {
    assert_roundtrip(Value::Sequence(vec![s("a,b"), s("c]"), s("{d"), s("e:f")]));
}

#[test]
fn roundtrip_escaped_quote_inside_sequence() {
    assert_roundtrip(Value::Sequence(vec![s("say \"hi\", ok"), s("x")]));
}

#[test]
fn roundtrip_mapping_with_tricky_keys() {
    assert_roundtrip(Value::mapping([
        ("a:b", Value::Integer(1)),
        ("c,d", Value::Integer(2)),
        ("quote\"d", Value::Integer(3)),
        ("", Value::Integer(4)),
    ]));
}

#[test]
fn roundtrip_deeply_nested() {
    let mut value = Value::Integer(0);
    for i in 0..20 {
        value = if i % 2 == 0 {
            Value::Sequence(vec![value, Value::Integer(i)])
        } else {
            Value::mapping([("inner", value), ("i", Value::Integer(i))])
        };
    }
    assert_roundtrip(value);
}

#[test]
fn roundtrip_catalog_item() {
    let size = Value::mapping([
        ("id", Value::Integer(1)),
        ("name", s("M")),
        ("class_name", s("Size")),
    ]);
    let item = Value::mapping([
        ("id", Value::Integer(7)),
        ("name", s("Summer T-Shirt")),
        ("slug", s("summer-t-shirt")),
        ("available", Value::Bool(true)),
        (
            "sizes",
            Value::Sequence(vec![Value::mapping([
                ("size", size),
                ("available", Value::Bool(true)),
            ])]),
        ),
        (
            "category",
            Value::mapping([
                ("id", Value::Integer(3)),
                ("name", s("T-Shirts")),
                ("slug", s("t-shirts")),
                ("item_count", Value::Integer(1)),
                ("class_name", s("Category")),
            ]),
        ),
        ("images", Value::Sequence(vec![])),
        ("description", s("Light \"breathable\" cotton,\nsize M")),
        ("created_at", s("2024-05-01T10:30:00+00:00")),
        ("updated_at", Value::Null),
        ("price", Value::Float(29.99)),
        ("discount", Value::Float(10.0)),
        ("price_with_discount", Value::Float(26.991)),
    ]);
    assert_roundtrip(item);
}
