//! # strict_json
//!
//! A strict RFC 8259 JSON parser and compact serializer built around a closed,
//! serde-compatible value tree.
//!
//! ## Key Features
//!
//! - **Strict**: accepts exactly the JSON grammar; no comments, trailing commas,
//!   leading zeros, `NaN`, single quotes or trailing garbage
//! - **Streaming input**: reads any [`std::io::Read`] through a fixed-size
//!   buffer with one character of lookahead
//! - **Precise errors**: every grammar error names what was expected, what was
//!   found, and the line and column where it happened
//! - **Closed value model**: [`JsonValue`] is a plain enum; exhaustive `match`
//!   covers every kind
//! - **Serde bridging**: [`to_value`] and [`from_value`] convert between trees
//!   and your own `Serialize`/`Deserialize` types
//! - **Encodings**: read and write any WHATWG encoding via [`encoding_rs`]
//!
//! ## Quick Start
//!
//! ```rust
//! use strict_json::{from_str, to_string, JsonValue};
//!
//! let value = from_str(r#" { "name": "Alice", "tags": ["a", "b"], "age": 30 } "#).unwrap();
//! assert_eq!(value.get("name").and_then(JsonValue::as_str), Some("Alice"));
//! assert_eq!(value.get("age").and_then(JsonValue::as_i64), Some(30));
//!
//! // compact output, members in their original order
//! assert_eq!(to_string(&value), r#"{"name":"Alice","tags":["a","b"],"age":30}"#);
//! ```
//!
//! ### Typed Data
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use strict_json::{from_value, to_value};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value.to_string(), r#"{"x":1,"y":2}"#);
//!
//! let point: Point = from_value(value).unwrap();
//! assert_eq!(point, Point { x: 1, y: 2 });
//! ```
//!
//! ### Rejected Input
//!
//! ```rust
//! use strict_json::from_str;
//!
//! for bad in ["", "[1,]", "{'a': 1}", "01", "NaN", "\"\\x\"", "{} x"] {
//!     assert!(from_str(bad).is_err(), "{}", bad);
//! }
//! ```
//!
//! ## Guarantees
//!
//! - Parsing either returns a complete tree or an error; never a partial tree.
//! - For any tree whose numbers are finite, parsing the serialized text yields
//!   an equal tree, and serializing again yields identical text. Trees nested
//!   deeper than [`ParseOptions::max_depth`] (128 by default) are rejected on
//!   the way back in; raise or disable the limit to read them.
//! - No `unsafe` code.
//!
//! See [`grammar`] for the exact accepted syntax and output rules.

pub mod de;
pub mod encoding;
pub mod error;
pub mod grammar;
pub mod map;
pub mod options;
pub mod read;
pub mod ser;
pub mod value;

pub use de::Parser;
pub use encoding::{
    from_reader_with_encoding, from_reader_with_label, from_slice_with_encoding,
    to_writer_with_encoding, to_writer_with_label,
};
pub use encoding_rs::Encoding;
pub use error::{CastError, Error, Found, Result};
pub use map::JsonMap;
pub use options::{ParseOptions, WriteOptions};
pub use ser::Serializer;
pub use value::{JsonValue, Kind, Number};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses one JSON document from a string.
///
/// # Examples
///
/// ```rust
/// use strict_json::{from_str, JsonValue};
///
/// let value = from_str("[true, null]").unwrap();
/// assert_eq!(value, JsonValue::from(vec![JsonValue::Bool(true), JsonValue::Null]));
/// ```
///
/// # Errors
///
/// Returns a syntax error, carrying line and column, if the text is not
/// exactly one valid JSON document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<JsonValue> {
    from_reader(s.as_bytes())
}

/// Parses one JSON document from UTF-8 bytes.
///
/// # Errors
///
/// Invalid UTF-8 is reported as [`Error::Io`] with kind
/// [`InvalidData`](io::ErrorKind::InvalidData); grammar violations as syntax
/// errors.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<JsonValue> {
    from_reader(v)
}

/// Parses one JSON document from a UTF-8 byte stream.
///
/// The stream is read in 8 KiB blocks; it need not be buffered.
///
/// # Examples
///
/// ```rust
/// use strict_json::from_reader;
/// use std::io::Cursor;
///
/// let value = from_reader(Cursor::new(b"{\"x\": 1}")).unwrap();
/// assert_eq!(value.get("x").and_then(|v| v.as_f64()), Some(1.0));
/// ```
///
/// # Errors
///
/// Errors from the reader are returned unmodified as [`Error::Io`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R: io::Read>(reader: R) -> Result<JsonValue> {
    from_reader_with_options(reader, ParseOptions::default())
}

/// Parses one JSON document from a UTF-8 byte stream with custom options.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader_with_options<R: io::Read>(reader: R, options: ParseOptions) -> Result<JsonValue> {
    Parser::with_options(reader, options)?.parse()
}

/// Renders a value as compact JSON text.
///
/// # Examples
///
/// ```rust
/// use strict_json::{to_string, JsonMap, JsonValue};
///
/// let mut map = JsonMap::new();
/// map.insert("path".to_string(), JsonValue::from("a/b\n"));
/// assert_eq!(to_string(&JsonValue::Object(map)), r#"{"path":"a/b\n"}"#);
/// ```
#[must_use]
pub fn to_string(value: &JsonValue) -> String {
    to_string_with_options(value, &WriteOptions::default())
}

#[must_use]
pub fn to_string_with_options(value: &JsonValue, options: &WriteOptions) -> String {
    let mut serializer = Serializer::new(options.clone());
    serializer.write_value(value);
    serializer.into_inner()
}

/// Writes a value as compact UTF-8 JSON text.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<W: io::Write>(writer: W, value: &JsonValue) -> Result<()> {
    to_writer_with_options(writer, value, &WriteOptions::default())
}

pub fn to_writer_with_options<W: io::Write>(
    mut writer: W,
    value: &JsonValue,
    options: &WriteOptions,
) -> Result<()> {
    let text = to_string_with_options(value, options);
    writer.write_all(text.as_bytes())?;
    Ok(())
}

/// Converts any `T: Serialize` into a [`JsonValue`].
///
/// Structs and maps become objects in field order, sequences and tuples become
/// arrays, unit and `None` become null, and all numbers become doubles.
///
/// # Examples
///
/// ```rust
/// use strict_json::to_value;
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("b", vec![1, 2]);
/// map.insert("a", vec![]);
/// assert_eq!(to_value(&map).unwrap().to_string(), r#"{"a":[],"b":[1,2]}"#);
/// ```
///
/// # Errors
///
/// Returns an error if a map key does not serialize as a string, or if the
/// type's `Serialize` impl reports one.
///
/// Integers beyond ±2^53 are rounded to the nearest double. An integer that
/// rounds up to 2^63 (`i64`) or 2^64 (`u64`) is an error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<JsonValue>
where
    T: ?Sized + Serialize,
{
    ser::to_value(value)
}

/// Converts a [`JsonValue`] into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use strict_json::{from_str, from_value};
///
/// let value = from_str("[1, 2, 3]").unwrap();
/// let numbers: Vec<u8> = from_value(value).unwrap();
/// assert_eq!(numbers, [1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns [`Error::Custom`] when the tree's shape does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: JsonValue) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(de::ValueDeserializer::new(value))
}
