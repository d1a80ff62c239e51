//! Property-based tests for the core guarantees: round-trip, idempotence and
//! agreement with serde_json on generated trees.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use strict_json::{
    from_reader_with_options, from_str, from_value, to_string, to_string_with_options, to_value,
    JsonMap, JsonValue, ParseOptions, WriteOptions,
};

fn finite_f64() -> impl Strategy<Value = f64> {
    prop_oneof![
        any::<i32>().prop_map(f64::from),
        any::<f64>().prop_filter("finite", |f| f.is_finite()),
        Just(-0.0),
        Just(f64::MAX),
        Just(f64::MIN_POSITIVE),
    ]
}

fn leaf() -> impl Strategy<Value = JsonValue> {
    prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        finite_f64().prop_map(JsonValue::from),
        any::<String>().prop_map(JsonValue::String),
        "[a-z\\\\\"/\\x00-\\x1f]{0,8}".prop_map(JsonValue::String),
    ]
}

fn json_tree() -> impl Strategy<Value = JsonValue> {
    leaf().prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..8).prop_map(JsonValue::Array),
            prop::collection::vec((any::<String>(), inner), 0..8)
                .prop_map(|entries| JsonValue::Object(entries.into_iter().collect::<JsonMap>())),
        ]
    })
}

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_value(value) {
        Ok(tree) => match from_str(&to_string(&tree)).and_then(from_value::<T>) {
            Ok(back) => *value == back,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", tree);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_tree_round_trip(tree in json_tree()) {
        let text = to_string(&tree);
        prop_assert_eq!(from_str(&text).unwrap(), tree);
    }

    #[test]
    fn prop_serialization_idempotent(tree in json_tree()) {
        let first = to_string(&tree);
        let second = to_string(&from_str(&first).unwrap());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_ascii_only_round_trip(tree in json_tree()) {
        let text = to_string_with_options(&tree, &WriteOptions::new().with_ascii_only(true));
        prop_assert!(text.is_ascii());
        prop_assert_eq!(from_str(&text).unwrap(), tree);
    }

    #[test]
    fn prop_buffer_size_does_not_matter(tree in json_tree(), size in 1usize..16) {
        let text = to_string(&tree);
        let options = ParseOptions::new().with_buffer_size(size).with_max_depth(None);
        prop_assert_eq!(from_reader_with_options(text.as_bytes(), options).unwrap(), tree);
    }

    #[test]
    fn prop_serde_json_accepts_our_output(tree in json_tree()) {
        let text = to_string(&tree);
        prop_assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok(), "{}", text);
    }

    #[test]
    fn prop_we_accept_serde_json_output(tree in json_tree()) {
        let text = serde_json::to_string(&tree).unwrap();
        prop_assert!(from_str(&text).is_ok(), "{}", text);
    }

    #[test]
    fn prop_arbitrary_text_never_panics(text in "\\PC{0,40}") {
        let _ = from_str(&text);
    }

    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u32(n in any::<u32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_string(s in any::<String>()) {
        prop_assert!(roundtrip(&s));
    }

    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }
}
