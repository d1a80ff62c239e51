//! Dynamic value representation for JSON data.
//!
//! This module provides the [`JsonValue`] enum, a closed sum type over the six
//! JSON kinds. The parser produces it and the serializer consumes it; callers
//! may also build trees directly.
//!
//! ## Core Types
//!
//! - [`JsonValue`]: object, array, string, number, boolean or null
//! - [`Number`]: a single IEEE-754 double with bit-exact equality
//! - [`Kind`]: the discriminant of a value, used in cast failures
//!
//! ## Views and Casts
//!
//! Every kind has an `as_*` view returning `Option` and a `try_as_*` cast
//! returning [`CastError`] on a kind mismatch:
//!
//! ```rust
//! use strict_json::{JsonValue, Kind};
//!
//! let value = JsonValue::from(vec![JsonValue::from(1), JsonValue::from(2)]);
//! assert_eq!(value.kind(), Kind::Array);
//! assert_eq!(value.as_array().map(Vec::len), Some(2));
//! assert!(value.as_str().is_none());
//! assert!(value.try_as_object().is_err());
//! ```
//!
//! Code that must handle every kind should `match` on the enum directly; the
//! compiler then rejects any unhandled kind.

use crate::error::CastError;
use crate::JsonMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A JSON value of any kind.
///
/// Containers own their children exclusively, so a tree can never contain a
/// cycle and is dropped by ordinary ownership release.
///
/// # Examples
///
/// ```rust
/// use strict_json::{JsonMap, JsonValue};
///
/// let mut object = JsonMap::new();
/// object.insert("ok".to_string(), JsonValue::Bool(true));
/// object.insert("items".to_string(), JsonValue::Array(vec![JsonValue::Null]));
///
/// let value = JsonValue::Object(object);
/// assert_eq!(value.to_string(), r#"{"ok":true,"items":[null]}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum JsonValue {
    Object(JsonMap),
    Array(Vec<JsonValue>),
    String(String),
    Number(Number),
    Bool(bool),
    #[default]
    Null,
}

/// The kind of a [`JsonValue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl Kind {
    /// The lowercase name of the kind, e.g. `"array"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Bool => "boolean",
            Kind::Null => "null",
        }
    }

    pub(crate) const fn article(self) -> &'static str {
        match self {
            Kind::Object => "an object",
            Kind::Array => "an array",
            Kind::String => "a string",
            Kind::Number => "a number",
            Kind::Bool => "a boolean",
            Kind::Null => "null",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A JSON number, stored as a single `f64`.
///
/// Equality compares the IEEE-754 bit patterns, so `-0.0` and `0.0` are
/// different numbers and a NaN equals only a NaN with the same bits.
///
/// # Examples
///
/// ```rust
/// use strict_json::Number;
///
/// assert_eq!(Number::from(1.5), Number::from(1.5));
/// assert_ne!(Number::from(0.0), Number::from(-0.0));
/// assert_eq!(Number::from(42).as_i64(), Some(42));
/// assert_eq!(Number::from(42.5).as_i64(), None);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Number(f64);

impl Number {
    #[inline]
    #[must_use]
    pub const fn from_f64(value: f64) -> Self {
        Number(value)
    }

    #[inline]
    #[must_use]
    pub const fn as_f64(self) -> f64 {
        self.0
    }

    /// Returns `false` for NaN and the infinities, which JSON cannot spell.
    #[inline]
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// Returns the value as an `i64` if it is whole and in range.
    #[must_use]
    pub fn as_i64(self) -> Option<i64> {
        let f = self.0;
        // i64::MAX as f64 rounds up to 2^63, which is out of range.
        if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Some(f as i64)
        } else {
            None
        }
    }

    /// Returns the value as a `u64` if it is whole, non-negative and in range.
    #[must_use]
    pub fn as_u64(self) -> Option<u64> {
        let f = self.0;
        if f.fract() == 0.0 && f >= 0.0 && f < u64::MAX as f64 {
            Some(f as u64)
        } else {
            None
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl fmt::Display for Number {
    /// Finite values print as the shortest text that reads back to the same
    /// double, switching to exponent form for very large or small magnitudes.
    /// Whole values drop the `.0` suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_finite() {
            let mut buffer = ryu::Buffer::new();
            let text = buffer.format_finite(self.0);
            f.write_str(text.strip_suffix(".0").unwrap_or(text))
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number(value)
    }
}

impl From<f32> for Number {
    fn from(value: f32) -> Self {
        Number(f64::from(value))
    }
}

impl From<Number> for f64 {
    fn from(value: Number) -> Self {
        value.0
    }
}

macro_rules! number_from_lossless {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number(f64::from(value))
                }
            }

            impl From<$ty> for JsonValue {
                fn from(value: $ty) -> Self {
                    JsonValue::Number(Number::from(value))
                }
            }
        )*
    };
}

number_from_lossless!(i8 i16 i32 u8 u16 u32);

// 64-bit integers beyond 2^53 round to the nearest representable double.
macro_rules! number_from_rounding {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for Number {
                fn from(value: $ty) -> Self {
                    Number(value as f64)
                }
            }

            impl From<$ty> for JsonValue {
                fn from(value: $ty) -> Self {
                    JsonValue::Number(Number::from(value))
                }
            }
        )*
    };
}

number_from_rounding!(i64 u64 isize usize);

macro_rules! cast_methods {
    ($(
        $(#[$doc:meta])*
        $variant:ident, $view:ident, $try_view:ident, $ty:ty;
    )*) => {
        $(
            $(#[$doc])*
            #[inline]
            #[must_use]
            pub fn $view(&self) -> Option<&$ty> {
                match self {
                    JsonValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }

            /// Like the matching `as_*` view, but fails with a [`CastError`]
            /// naming the expected and actual kinds.
            #[inline]
            pub fn $try_view(&self) -> Result<&$ty, CastError> {
                match self {
                    JsonValue::$variant(inner) => Ok(inner),
                    other => Err(other.cast_error(Kind::$variant)),
                }
            }
        )*
    };
}

impl JsonValue {
    /// Returns the kind of this value.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            JsonValue::Object(_) => Kind::Object,
            JsonValue::Array(_) => Kind::Array,
            JsonValue::String(_) => Kind::String,
            JsonValue::Number(_) => Kind::Number,
            JsonValue::Bool(_) => Kind::Bool,
            JsonValue::Null => Kind::Null,
        }
    }

    fn cast_error(&self, expected: Kind) -> CastError {
        CastError {
            expected,
            found: self.kind(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, JsonValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, JsonValue::Bool(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, JsonValue::Bool(true))
    }

    #[inline]
    #[must_use]
    pub const fn is_false(&self) -> bool {
        matches!(self, JsonValue::Bool(false))
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    cast_methods! {
        /// If the value is an object, returns a reference to it.
        Object, as_object, try_as_object, JsonMap;
        /// If the value is an array, returns a reference to it.
        Array, as_array, try_as_array, Vec<JsonValue>;
        /// If the value is a number, returns a reference to it.
        Number, as_number, try_as_number, Number;
    }

    /// If the value is a string, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strict_json::JsonValue;
    ///
    /// assert_eq!(JsonValue::from("hello").as_str(), Some("hello"));
    /// assert_eq!(JsonValue::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn try_as_str(&self) -> Result<&str, CastError> {
        self.as_str().ok_or_else(|| self.cast_error(Kind::String))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn try_as_bool(&self) -> Result<bool, CastError> {
        self.as_bool().ok_or_else(|| self.cast_error(Kind::Bool))
    }

    /// Returns `Some(())` if the value is null.
    #[inline]
    #[must_use]
    pub fn as_null(&self) -> Option<()> {
        match self {
            JsonValue::Null => Some(()),
            _ => None,
        }
    }

    #[inline]
    pub fn try_as_null(&self) -> Result<(), CastError> {
        self.as_null().ok_or_else(|| self.cast_error(Kind::Null))
    }

    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.as_f64())
    }

    /// If the value is a whole number that fits an `i64`, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strict_json::JsonValue;
    ///
    /// assert_eq!(JsonValue::from(42).as_i64(), Some(42));
    /// assert_eq!(JsonValue::from(42.5).as_i64(), None);
    /// assert_eq!(JsonValue::from("42").as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().and_then(|n| n.as_i64())
    }

    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.as_number().and_then(|n| n.as_u64())
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut JsonMap> {
        match self {
            JsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn try_as_object_mut(&mut self) -> Result<&mut JsonMap, CastError> {
        match self {
            JsonValue::Object(obj) => Ok(obj),
            other => Err(other.cast_error(Kind::Object)),
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<JsonValue>> {
        match self {
            JsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn try_as_array_mut(&mut self) -> Result<&mut Vec<JsonValue>, CastError> {
        match self {
            JsonValue::Array(arr) => Ok(arr),
            other => Err(other.cast_error(Kind::Array)),
        }
    }

    /// Looks up a member of an object. Returns `None` for other kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strict_json::from_str;
    ///
    /// let value = from_str(r#"{"a": {"b": [10, 20]}}"#).unwrap();
    /// let b = value.get("a").and_then(|a| a.get("b"));
    /// assert_eq!(b.and_then(|b| b.get_index(1)).and_then(|v| v.as_i64()), Some(20));
    /// assert!(value.get_index(0).is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Looks up an element of an array. Returns `None` for other kinds.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array().and_then(|arr| arr.get(index))
    }

    /// Replaces the value with `Null` and returns the original.
    pub fn take(&mut self) -> JsonValue {
        std::mem::take(self)
    }
}

impl fmt::Display for JsonValue {
    /// Renders compact JSON text, exactly as [`crate::to_string`] does.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::to_string(self))
    }
}

impl FromStr for JsonValue {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        crate::from_str(s)
    }
}

impl Serialize for JsonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            JsonValue::Null => serializer.serialize_unit(),
            JsonValue::Bool(b) => serializer.serialize_bool(*b),
            JsonValue::Number(n) => serializer.serialize_f64(n.as_f64()),
            JsonValue::String(s) => serializer.serialize_str(s),
            JsonValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            JsonValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct JsonValueVisitor;

        impl<'de> Visitor<'de> for JsonValueVisitor {
            type Value = JsonValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(JsonValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(JsonValue::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(JsonValue::from(value))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(JsonValue::from(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(JsonValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(JsonValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(JsonValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = JsonMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(JsonValue::Object(values))
            }
        }

        deserializer.deserialize_any(JsonValueVisitor)
    }
}

impl TryFrom<JsonValue> for JsonMap {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        match value {
            JsonValue::Object(obj) => Ok(obj),
            other => Err(other.cast_error(Kind::Object).into()),
        }
    }
}

impl TryFrom<JsonValue> for Vec<JsonValue> {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        match value {
            JsonValue::Array(arr) => Ok(arr),
            other => Err(other.cast_error(Kind::Array).into()),
        }
    }
}

impl TryFrom<JsonValue> for String {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        match value {
            JsonValue::String(s) => Ok(s),
            other => Err(other.cast_error(Kind::String).into()),
        }
    }
}

impl TryFrom<JsonValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        Ok(value.try_as_number()?.as_f64())
    }
}

impl TryFrom<JsonValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        let number = *value.try_as_number()?;
        number
            .as_i64()
            .ok_or_else(|| crate::Error::custom(format!("cannot convert {} to i64", number)))
    }
}

impl TryFrom<JsonValue> for bool {
    type Error = crate::Error;

    fn try_from(value: JsonValue) -> crate::Result<Self> {
        Ok(value.try_as_bool()?)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<f32> for JsonValue {
    fn from(value: f32) -> Self {
        JsonValue::Number(Number::from(value))
    }
}

impl From<f64> for JsonValue {
    fn from(value: f64) -> Self {
        JsonValue::Number(Number::from(value))
    }
}

impl From<Number> for JsonValue {
    fn from(value: Number) -> Self {
        JsonValue::Number(value)
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

impl From<JsonMap> for JsonValue {
    fn from(value: JsonMap) -> Self {
        JsonValue::Object(value)
    }
}

impl From<()> for JsonValue {
    fn from((): ()) -> Self {
        JsonValue::Null
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(JsonValue::Null, Into::into)
    }
}

impl FromIterator<JsonValue> for JsonValue {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonValue::Array(iter.into_iter().collect())
    }
}
