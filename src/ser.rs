//! JSON serialization.
//!
//! This module holds two serializers:
//!
//! - [`Serializer`]: renders a [`JsonValue`] tree as compact JSON text.
//! - `ValueSerializer`: a serde [`Serializer`](serde::Serializer) that builds a
//!   [`JsonValue`] from any `Serialize` type, backing
//!   [`to_value`](crate::to_value).
//!
//! ## Output
//!
//! Output is always compact: no whitespace between tokens, object members in
//! map order. Strings are escaped as follows:
//!
//! - `"` and `\` are backslash-escaped
//! - backspace, form feed, newline, carriage return and tab use their short
//!   escapes; every other C0 control character is written as `\u00xx`
//! - `/` is never escaped
//! - non-ASCII characters pass through, or become `\uxxxx` escapes (with
//!   surrogate pairs) when [`WriteOptions::ascii_only`] is set
//!
//! Numbers use the shortest decimal text that reads back as the same double.
//! NaN and the infinities cannot be spelled in JSON and are written as `null`.
//!
//! ```rust
//! use strict_json::{to_string, JsonValue};
//!
//! let value = JsonValue::from(vec![
//!     JsonValue::from("tab\there"),
//!     JsonValue::from(1.5),
//!     JsonValue::from(f64::NAN),
//! ]);
//! assert_eq!(to_string(&value), r#"["tab\there",1.5,null]"#);
//! ```

use crate::options::WriteOptions;
use crate::value::Number;
use crate::{Error, JsonMap, JsonValue, Result};
use serde::ser::{self, Serialize};
use std::fmt::Write as _;

const HEX: &[u8; 16] = b"0123456789abcdef";
const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

/// Compact JSON text writer.
///
/// Writing into the internal `String` cannot fail, so none of the methods
/// return errors.
pub struct Serializer {
    output: String,
    options: WriteOptions,
}

impl Serializer {
    #[must_use]
    pub fn new(options: WriteOptions) -> Self {
        Serializer {
            output: String::new(),
            options,
        }
    }

    /// Appends the text of `value` to the output.
    pub fn write_value(&mut self, value: &JsonValue) {
        match value {
            JsonValue::Null => self.output.push_str("null"),
            JsonValue::Bool(true) => self.output.push_str("true"),
            JsonValue::Bool(false) => self.output.push_str("false"),
            JsonValue::Number(n) => self.write_number(*n),
            JsonValue::String(s) => self.write_string(s),
            JsonValue::Array(arr) => self.write_array(arr),
            JsonValue::Object(obj) => self.write_object(obj),
        }
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_array(&mut self, arr: &[JsonValue]) {
        self.output.push('[');
        for (i, element) in arr.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_value(element);
        }
        self.output.push(']');
    }

    fn write_object(&mut self, obj: &JsonMap) {
        self.output.push('{');
        for (i, (key, value)) in obj.iter().enumerate() {
            if i > 0 {
                self.output.push(',');
            }
            self.write_string(key);
            self.output.push(':');
            self.write_value(value);
        }
        self.output.push('}');
    }

    fn write_number(&mut self, n: Number) {
        if n.is_finite() {
            // infallible for String
            let _ = write!(self.output, "{}", n);
        } else {
            self.output.push_str("null");
        }
    }

    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\u{08}' => self.output.push_str("\\b"),
                '\u{0C}' => self.output.push_str("\\f"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                ch if ch < '\u{20}' => self.write_unicode_escape(ch as u16),
                ch if self.options.ascii_only && !ch.is_ascii() => {
                    let mut units = [0u16; 2];
                    for unit in ch.encode_utf16(&mut units) {
                        self.write_unicode_escape(*unit);
                    }
                }
                ch => self.output.push(ch),
            }
        }
        self.output.push('"');
    }

    fn write_unicode_escape(&mut self, unit: u16) {
        self.output.push_str("\\u");
        for shift in [12, 8, 4, 0] {
            self.output
                .push(char::from(HEX[usize::from((unit >> shift) & 0xF)]));
        }
    }
}

/// Builds a [`JsonValue`] from any `Serialize` type.
///
/// Enum variants carrying data become single-member objects keyed by the
/// variant name; unit variants become strings.
pub(crate) struct ValueSerializer;

pub(crate) struct SerializeVec {
    vec: Vec<JsonValue>,
}

pub(crate) struct SerializeTupleVariant {
    name: &'static str,
    vec: Vec<JsonValue>,
}

pub(crate) struct SerializeMap {
    map: JsonMap,
    current_key: Option<String>,
}

pub(crate) struct SerializeStructVariant {
    name: &'static str,
    map: JsonMap,
}

fn wrap_variant(name: &'static str, value: JsonValue) -> JsonValue {
    let mut map = JsonMap::with_capacity(1);
    map.insert(name.to_string(), value);
    JsonValue::Object(map)
}

pub(crate) fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<JsonValue> {
    value.serialize(ValueSerializer)
}

impl ser::Serializer for ValueSerializer {
    type Ok = JsonValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<JsonValue> {
        Ok(JsonValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<JsonValue> {
        Ok(JsonValue::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<JsonValue> {
        Ok(JsonValue::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<JsonValue> {
        Ok(JsonValue::from(v))
    }

    /// Values beyond ±2^53 are rounded to the nearest double.
    fn serialize_i64(self, v: i64) -> Result<JsonValue> {
        if v as f64 >= TWO_POW_63 {
            return Err(Error::custom(format!(
                "integer {} rounds to 2^63, outside the i64 range",
                v
            )));
        }
        Ok(JsonValue::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<JsonValue> {
        Ok(JsonValue::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<JsonValue> {
        Ok(JsonValue::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<JsonValue> {
        Ok(JsonValue::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<JsonValue> {
        if v as f64 >= TWO_POW_64 {
            return Err(Error::custom(format!(
                "integer {} rounds to 2^64, outside the u64 range",
                v
            )));
        }
        Ok(JsonValue::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<JsonValue> {
        Ok(JsonValue::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<JsonValue> {
        Ok(JsonValue::from(v))
    }

    fn serialize_char(self, v: char) -> Result<JsonValue> {
        Ok(JsonValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<JsonValue> {
        Ok(JsonValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<JsonValue> {
        Ok(v.iter().map(|&b| JsonValue::from(b)).collect())
    }

    fn serialize_none(self) -> Result<JsonValue> {
        Ok(JsonValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<JsonValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<JsonValue> {
        Ok(JsonValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<JsonValue> {
        Ok(JsonValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<JsonValue> {
        Ok(JsonValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<JsonValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<JsonValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(wrap_variant(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec {
            vec: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        ser::Serializer::serialize_seq(self, Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            name: variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: JsonMap::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap> {
        ser::Serializer::serialize_map(self, Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            name: variant,
            map: JsonMap::with_capacity(len),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = JsonValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue> {
        Ok(JsonValue::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = JsonValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<JsonValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = JsonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<JsonValue> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = JsonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue> {
        Ok(wrap_variant(self.name, JsonValue::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = JsonValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_value(key)? {
            JsonValue::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            other => Err(Error::custom(format!(
                "object keys must be strings, found {}",
                other.kind()
            ))),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue> {
        Ok(JsonValue::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = JsonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue> {
        Ok(JsonValue::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = JsonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<JsonValue> {
        Ok(wrap_variant(self.name, JsonValue::Object(self.map)))
    }
}
