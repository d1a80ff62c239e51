use serde::{Deserialize, Serialize};
use strict_json::{
    from_reader, from_reader_with_options, from_str, from_value, to_string, to_value, to_writer,
    Error, Found, JsonMap, JsonValue, Kind, Number, ParseOptions,
};
use std::io::{self, Read};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
    note: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Status {
    Pending,
    Shipped { carrier: String },
    Refunded(f64),
}

fn sample_tree() -> JsonValue {
    let mut inner = JsonMap::new();
    inner.insert("escape".to_string(), JsonValue::from("\\ \" \u{8}\u{c}\n\r\t"));
    inner.insert("control".to_string(), JsonValue::from("\u{1}\u{1f}"));
    inner.insert("unicode".to_string(), JsonValue::from("é ∑ 😀 /"));
    inner.insert("empty".to_string(), JsonValue::from(""));

    let mut root = JsonMap::new();
    root.insert("inner".to_string(), JsonValue::Object(inner));
    root.insert(
        "numbers".to_string(),
        JsonValue::from(vec![
            JsonValue::from(0),
            JsonValue::from(-0.0),
            JsonValue::from(1.5e-300),
            JsonValue::from(-123456789.125),
            JsonValue::from(f64::MAX),
            JsonValue::from(f64::MIN_POSITIVE),
            JsonValue::from(9007199254740993u64),
        ]),
    );
    root.insert("flags".to_string(), JsonValue::from(vec![JsonValue::Bool(true), JsonValue::Bool(false)]));
    root.insert("nothing".to_string(), JsonValue::Null);
    root.insert("empty_object".to_string(), JsonValue::Object(JsonMap::new()));
    root.insert("empty_array".to_string(), JsonValue::Array(vec![]));
    JsonValue::Object(root)
}

#[test]
fn test_round_trip_preserves_tree() {
    let tree = sample_tree();
    let text = to_string(&tree);
    let back = from_str(&text).unwrap();
    assert_eq!(back, tree);

    let zero = back
        .get("numbers")
        .and_then(|n| n.get_index(1))
        .and_then(JsonValue::as_f64)
        .unwrap();
    assert!(zero.is_sign_negative());
}

#[test]
fn test_serialization_is_idempotent() {
    let tree = sample_tree();
    let first = to_string(&tree);
    let second = to_string(&tree);
    assert_eq!(first, second);

    let reparsed = to_string(&from_str(&first).unwrap());
    assert_eq!(reparsed, first);
}

#[test]
fn test_number_grammar() {
    for bad in ["01", "1.", "1e", "-", "+1", ".5", "1e+", "00", "-a", "0x10"] {
        assert!(from_str(bad).is_err(), "{} should be rejected", bad);
    }
    for (good, expected) in [
        ("-0", -0.0),
        ("1.0", 1.0),
        ("1e10", 1e10),
        ("1E-10", 1e-10),
        ("0.5", 0.5),
        ("-12.75e+2", -1275.0),
        ("1e-400", 0.0),
    ] {
        let value = from_str(good).unwrap();
        assert_eq!(value, JsonValue::from(expected), "{}", good);
    }
}

#[test]
fn test_escaped_text_round_trips() {
    let text = r#""back\\slash \"quote\" \b\f\n\r\t""#;
    let value = from_str(text).unwrap();
    assert_eq!(
        value.as_str(),
        Some("back\\slash \"quote\" \u{8}\u{c}\n\r\t")
    );
    assert_eq!(to_string(&value), text);
}

#[test]
fn test_raw_control_character_rejected() {
    let err = from_str("\"a\u{1}b\"").unwrap_err();
    assert!(matches!(
        err,
        Error::ControlCharacter {
            line: 1,
            col: 3,
            found: Found::Char('\u{1}')
        }
    ));
    assert_eq!(
        err.to_string(),
        "syntax error at line 1, column 3: unescaped control character U+0001 in string"
    );
}

#[test]
fn test_unicode_escapes() {
    assert_eq!(from_str(r#""\u0041""#).unwrap(), JsonValue::from("A"));
    assert_eq!(from_str(r#""\u00e9\u00E9""#).unwrap(), JsonValue::from("éé"));
    assert_eq!(from_str(r#""\ud83d\ude00""#).unwrap(), JsonValue::from("😀"));

    for bad in [r#""\u004""#, r#""\u00G1""#, r#""\u-041""#, r#""\u""#, r#""\uDE00\uD83D""#] {
        let err = from_str(bad).unwrap_err();
        assert!(
            matches!(err, Error::InvalidUnicodeEscape { .. }),
            "{}: {}",
            bad,
            err
        );
    }

    let err = from_str(r#""\u-041""#).unwrap_err();
    assert_eq!(
        err.to_string(),
        "syntax error at line 1, column 4: invalid unicode escape: hex sequence may not be negative"
    );
}

#[test]
fn test_trailing_content_rejected() {
    assert!(from_str("1").is_ok());
    let err = from_str("1 2").unwrap_err();
    assert!(matches!(
        err,
        Error::TrailingContent {
            line: 1,
            col: 3,
            found: Found::Char('2')
        }
    ));
    assert!(from_str("[] ]").is_err());
    assert!(from_str("{}\n\n  {}").is_err());
    assert!(from_str(" [1] \r\n\t").is_ok());
}

#[test]
fn test_empty_containers() {
    assert_eq!(from_str("{}").unwrap(), JsonValue::Object(JsonMap::new()));
    assert_eq!(from_str("[]").unwrap(), JsonValue::Array(vec![]));
    assert_eq!(from_str("{ \n }").unwrap(), JsonValue::Object(JsonMap::new()));
    assert_eq!(from_str("[\t]").unwrap(), JsonValue::Array(vec![]));
    assert_eq!(to_string(&from_str("[{}, []]").unwrap()), "[{},[]]");
}

#[test]
fn test_cast_failures() {
    let value = JsonValue::from("text");
    let err = value.try_as_array().unwrap_err();
    assert_eq!(err.expected, Kind::Array);
    assert_eq!(err.found, Kind::String);
    assert_eq!(value.try_as_str().unwrap(), "text");

    let err = Vec::<JsonValue>::try_from(JsonValue::from(1)).unwrap_err();
    assert!(matches!(err, Error::Cast(_)));
    assert!(!err.is_syntax());

    let number = JsonValue::from(2.5);
    assert_eq!(number.try_as_number().unwrap(), &Number::from(2.5));
    assert!(number.try_as_bool().is_err());
    assert!(JsonValue::Null.try_as_null().is_ok());
}

#[test]
fn test_exhaustive_match_on_kinds() {
    let value = from_str(r#"[{}, [], "s", 1, true, null]"#).unwrap();
    let kinds: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| match v {
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
            JsonValue::String(_) => "string",
            JsonValue::Number(_) => "number",
            JsonValue::Bool(_) => "bool",
            JsonValue::Null => "null",
        })
        .collect();
    assert_eq!(kinds, ["object", "array", "string", "number", "bool", "null"]);
}

#[test]
fn test_error_reports_position_and_expectation() {
    let input = "{\n  \"a\": [1, 2],\n  \"b\" 3\n}";
    let err = from_str(input).unwrap_err();
    assert_eq!(err.position(), Some((3, 7)));
    assert_eq!(
        err.to_string(),
        "syntax error at line 3, column 7: expected ':' but found '3'"
    );

    let err = from_str("[1, 2").unwrap_err();
    assert!(matches!(
        err,
        Error::Unexpected {
            expected: "',' or ']'",
            found: Found::Eof,
            ..
        }
    ));
}

#[test]
fn test_struct_bridging() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
        note: None,
    };

    let text = to_string(&to_value(&order).unwrap());
    assert!(text.starts_with(r#"{"order_id":12345,"customer":{"id":123"#));
    assert!(text.ends_with(r#""total":109.97,"note":null}"#));

    let back: Order = from_value(from_str(&text).unwrap()).unwrap();
    assert_eq!(back, order);
}

#[test]
fn test_enum_bridging() {
    let statuses = vec![
        Status::Pending,
        Status::Shipped {
            carrier: "DHL".to_string(),
        },
        Status::Refunded(12.5),
    ];
    let text = to_string(&to_value(&statuses).unwrap());
    assert_eq!(
        text,
        r#"["Pending",{"Shipped":{"carrier":"DHL"}},{"Refunded":12.5}]"#
    );
    let back: Vec<Status> = from_value(from_str(&text).unwrap()).unwrap();
    assert_eq!(back, statuses);
}

#[test]
fn test_value_serde_impls_match_serde_json() {
    let text = r#"{"a":[1,2.5,"x",null,true],"b":{"c":-3}}"#;
    let ours = from_str(text).unwrap();

    let through_serde_json: JsonValue = serde_json::from_str(text).unwrap();
    assert_eq!(through_serde_json, ours);

    let rendered = serde_json::to_string(&ours).unwrap();
    assert_eq!(from_str(&rendered).unwrap(), ours);
}

/// Yields its input one byte per `read` call.
struct Trickle<'a>(&'a [u8]);

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.0.split_first() {
            Some((&byte, rest)) if !buf.is_empty() => {
                buf[0] = byte;
                self.0 = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn test_reader_input_in_small_pieces() {
    let tree = sample_tree();
    let text = to_string(&tree);
    assert_eq!(from_reader(Trickle(text.as_bytes())).unwrap(), tree);

    let options = ParseOptions::new().with_buffer_size(3);
    assert_eq!(
        from_reader_with_options(text.as_bytes(), options).unwrap(),
        tree
    );
}

#[test]
fn test_large_document_spans_buffers() {
    let items: Vec<JsonValue> = (0..20_000).map(|i| JsonValue::from(format!("item-{}", i))).collect();
    let tree = JsonValue::Array(items);
    let mut bytes = Vec::new();
    to_writer(&mut bytes, &tree).unwrap();
    assert!(bytes.len() > 8192 * 10);
    assert_eq!(from_reader(bytes.as_slice()).unwrap(), tree);
}

#[test]
fn test_reader_failure_propagates() {
    struct Broken;
    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"))
        }
    }

    let err = from_reader(Broken).unwrap_err();
    assert!(matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::ConnectionReset));
    assert_eq!(err.to_string(), "peer went away");
}

#[test]
fn test_depth_limit_defaults() {
    let ok = "[".repeat(128) + &"]".repeat(128);
    assert!(from_str(&ok).is_ok());

    let deep = "[".repeat(129) + &"]".repeat(129);
    let err = from_str(&deep).unwrap_err();
    assert!(matches!(err, Error::DepthLimitExceeded { limit: 128, .. }));
}
