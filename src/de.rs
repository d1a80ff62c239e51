//! JSON deserialization.
//!
//! This module holds two deserializers:
//!
//! - [`Parser`]: a strict recursive-descent parser that turns RFC 8259 text
//!   read through a [`Cursor`] into a [`JsonValue`] tree.
//! - `ValueDeserializer`: a serde [`Deserializer`](serde::Deserializer) over
//!   an already-parsed tree, backing [`from_value`](crate::from_value).
//!
//! ## Strictness
//!
//! The parser accepts exactly the RFC 8259 grammar and nothing else:
//!
//! - one value per document, surrounded only by space, tab, CR and LF
//! - no comments, no trailing commas, no single quotes, no bare keys
//! - no leading zeros, `+` signs, bare `.5` or `1.` numbers, no `NaN`/`Infinity`
//! - no raw control characters inside strings
//!
//! Every character is inspected once with a single character of lookahead;
//! nothing is ever pushed back. The first violation aborts the whole parse.
//!
//! ```rust
//! use strict_json::from_str;
//!
//! assert!(from_str(r#"{"a": [1, 2.5e3, true, null]}"#).is_ok());
//! assert!(from_str("[1, 2,]").is_err());
//! assert!(from_str("01").is_err());
//! assert!(from_str("{} {}").is_err());
//! ```

use crate::error::Found;
use crate::options::ParseOptions;
use crate::read::Cursor;
use crate::{Error, JsonMap, JsonValue, Number, Result};
use serde::{de, forward_to_deserialize_any};
use std::io::Read;

/// Strict JSON parser over a character cursor.
///
/// A parser handles a single document: [`Parser::parse`] consumes it.
pub struct Parser<R> {
    cursor: Cursor<R>,
    max_depth: Option<usize>,
    depth: usize,
    scratch: String,
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R) -> Result<Self> {
        Self::with_options(reader, ParseOptions::default())
    }

    pub fn with_options(reader: R, options: ParseOptions) -> Result<Self> {
        Ok(Parser {
            cursor: Cursor::with_capacity(reader, options.buffer_size)?,
            max_depth: options.max_depth,
            depth: 0,
            scratch: String::new(),
        })
    }

    /// Parses one complete document.
    ///
    /// Anything other than whitespace after the top-level value is rejected
    /// with [`Error::TrailingContent`].
    pub fn parse(mut self) -> Result<JsonValue> {
        self.skip_whitespace()?;
        let value = self.parse_value()?;
        self.skip_whitespace()?;
        match self.cursor.current() {
            None => Ok(value),
            Some(ch) => {
                let (line, col) = self.cursor.position();
                Err(Error::TrailingContent {
                    line,
                    col,
                    found: Found::Char(ch),
                })
            }
        }
    }

    fn advance(&mut self) -> Result<Option<char>> {
        Ok(self.cursor.advance()?)
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(' ' | '\n' | '\r' | '\t') = self.cursor.current() {
            self.advance()?;
        }
        Ok(())
    }

    fn unexpected(&self, expected: &'static str) -> Error {
        Error::unexpected(self.cursor.position(), expected, self.cursor.current())
    }

    fn expect(&mut self, ch: char, expected: &'static str) -> Result<()> {
        if self.cursor.current() != Some(ch) {
            return Err(self.unexpected(expected));
        }
        self.advance()?;
        Ok(())
    }

    fn parse_value(&mut self) -> Result<JsonValue> {
        match self.cursor.current() {
            Some('{') => self.parse_object().map(JsonValue::Object),
            Some('[') => self.parse_array().map(JsonValue::Array),
            Some('"') => self.parse_string().map(JsonValue::String),
            Some('t') => {
                self.parse_keyword("true")?;
                Ok(JsonValue::Bool(true))
            }
            Some('f') => {
                self.parse_keyword("false")?;
                Ok(JsonValue::Bool(false))
            }
            Some('n') => {
                self.parse_keyword("null")?;
                Ok(JsonValue::Null)
            }
            Some('-' | '0'..='9') => self.parse_number().map(JsonValue::Number),
            _ => Err(self.unexpected("a value")),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        match self.max_depth {
            Some(limit) if self.depth > limit => {
                let (line, col) = self.cursor.position();
                Err(Error::DepthLimitExceeded { line, col, limit })
            }
            _ => Ok(()),
        }
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn parse_object(&mut self) -> Result<JsonMap> {
        self.enter()?;
        self.advance()?;
        self.skip_whitespace()?;

        let mut map = JsonMap::new();
        if self.cursor.current() == Some('}') {
            self.advance()?;
            self.leave();
            return Ok(map);
        }

        loop {
            if self.cursor.current() != Some('"') {
                return Err(self.unexpected("a string key"));
            }
            let key = self.parse_string()?;
            self.skip_whitespace()?;
            self.expect(':', "':'")?;
            self.skip_whitespace()?;
            let value = self.parse_value()?;
            map.insert(key, value);

            self.skip_whitespace()?;
            match self.cursor.current() {
                Some(',') => {
                    self.advance()?;
                    self.skip_whitespace()?;
                }
                Some('}') => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }

        self.leave();
        Ok(map)
    }

    fn parse_array(&mut self) -> Result<Vec<JsonValue>> {
        self.enter()?;
        self.advance()?;
        self.skip_whitespace()?;

        let mut vec = Vec::new();
        if self.cursor.current() == Some(']') {
            self.advance()?;
            self.leave();
            return Ok(vec);
        }

        loop {
            vec.push(self.parse_value()?);

            self.skip_whitespace()?;
            match self.cursor.current() {
                Some(',') => {
                    self.advance()?;
                    self.skip_whitespace()?;
                }
                Some(']') => {
                    self.advance()?;
                    break;
                }
                _ => return Err(self.unexpected("',' or ']'")),
            }
        }

        self.leave();
        Ok(vec)
    }

    /// Parses a quoted string; the cursor is on the opening quote.
    fn parse_string(&mut self) -> Result<String> {
        self.advance()?;
        let mut out = String::new();
        loop {
            match self.cursor.current() {
                Some('"') => {
                    self.advance()?;
                    return Ok(out);
                }
                Some('\\') => {
                    self.advance()?;
                    out.push(self.parse_escape()?);
                }
                None | Some('\n') => return Err(self.unexpected("closing '\"'")),
                Some(ch) if ch < '\u{20}' => {
                    let (line, col) = self.cursor.position();
                    return Err(Error::ControlCharacter {
                        line,
                        col,
                        found: Found::Char(ch),
                    });
                }
                Some(ch) => {
                    out.push(ch);
                    self.advance()?;
                }
            }
        }
    }

    /// The cursor is on the character after the backslash.
    fn parse_escape(&mut self) -> Result<char> {
        let decoded = match self.cursor.current() {
            Some('"') => '"',
            Some('\\') => '\\',
            Some('/') => '/',
            Some('b') => '\u{08}',
            Some('f') => '\u{0C}',
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('u') => return self.parse_unicode_escape(),
            other => {
                let (line, col) = self.cursor.position();
                return Err(Error::InvalidEscape {
                    line,
                    col,
                    found: other.into(),
                });
            }
        };
        self.advance()?;
        Ok(decoded)
    }

    /// The cursor is on the `u`. Surrogate pairs must arrive as two
    /// consecutive escapes; a lone half is rejected.
    fn parse_unicode_escape(&mut self) -> Result<char> {
        let start = self.cursor.position();
        let first = self.read_hex4()?;

        let code = match first {
            0xD800..=0xDBFF => {
                if self.cursor.current() != Some('\\') || self.advance()? != Some('u') {
                    return Err(Error::unicode_escape(
                        start,
                        format!("unpaired high surrogate \\u{:04x}", first),
                    ));
                }
                let low = self.read_hex4()?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(Error::unicode_escape(
                        start,
                        format!("high surrogate \\u{:04x} followed by \\u{:04x}", first, low),
                    ));
                }
                0x1_0000 + ((first - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => {
                return Err(Error::unicode_escape(
                    start,
                    format!("unpaired low surrogate \\u{:04x}", first),
                ));
            }
            code => code,
        };

        char::from_u32(code)
            .ok_or_else(|| Error::unicode_escape(start, format!("invalid code point {:#x}", code)))
    }

    /// Reads the four hex digits following a `u`, leaving the cursor after them.
    fn read_hex4(&mut self) -> Result<u32> {
        let mut value = 0;
        for index in 0..4 {
            let ch = self.advance()?;
            let pos = self.cursor.position();
            let digit = match ch {
                Some('-') if index == 0 => {
                    return Err(Error::unicode_escape(pos, "hex sequence may not be negative"));
                }
                Some(ch) => ch.to_digit(16).ok_or_else(|| {
                    Error::unicode_escape(
                        pos,
                        format!("expected a hex digit but found {}", Found::Char(ch)),
                    )
                })?,
                None => {
                    return Err(Error::unicode_escape(pos, "expected a hex digit but found EOF"));
                }
            };
            value = (value << 4) | digit;
        }
        self.advance()?;
        Ok(value)
    }

    fn parse_keyword(&mut self, word: &'static str) -> Result<()> {
        for expected in word.chars() {
            if self.cursor.current() != Some(expected) {
                return Err(self.unexpected(word));
            }
            self.advance()?;
        }
        Ok(())
    }

    fn bump(&mut self) -> Result<()> {
        if let Some(ch) = self.cursor.current() {
            self.scratch.push(ch);
        }
        self.advance()?;
        Ok(())
    }

    fn is_digit(&self) -> bool {
        matches!(self.cursor.current(), Some('0'..='9'))
    }

    fn bump_digits(&mut self, expected: &'static str) -> Result<()> {
        if !self.is_digit() {
            return Err(self.unexpected(expected));
        }
        while self.is_digit() {
            self.bump()?;
        }
        Ok(())
    }

    fn parse_number(&mut self) -> Result<Number> {
        let (line, col) = self.cursor.position();
        self.scratch.clear();

        if self.cursor.current() == Some('-') {
            self.bump()?;
        }
        match self.cursor.current() {
            Some('0') => {
                self.bump()?;
                if self.is_digit() {
                    let (line, col) = self.cursor.position();
                    return Err(Error::LeadingZero { line, col });
                }
            }
            Some('1'..='9') => self.bump_digits("a digit")?,
            _ => return Err(self.unexpected("a digit")),
        }

        if self.cursor.current() == Some('.') {
            self.bump()?;
            self.bump_digits("a digit after '.'")?;
        }

        if let Some('e' | 'E') = self.cursor.current() {
            self.bump()?;
            if let Some('+' | '-') = self.cursor.current() {
                self.bump()?;
            }
            self.bump_digits("an exponent digit")?;
        }

        match self.scratch.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Number::from_f64(value)),
            _ => Err(Error::InvalidNumber {
                line,
                col,
                literal: self.scratch.clone(),
            }),
        }
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<JsonValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<JsonValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, JsonValue>,
    value: Option<JsonValue>,
}

impl MapDeserializer {
    fn new(map: JsonMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(JsonValue::String(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<JsonValue>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(JsonValue::String(self.variant)))?;
        Ok((variant, VariantDeserializer { value: self.value }))
    }
}

struct VariantDeserializer {
    value: Option<JsonValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(JsonValue::Null) | None => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(JsonValue::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(JsonValue::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

/// Drives a serde `Deserialize` impl from an owned [`JsonValue`].
pub(crate) struct ValueDeserializer {
    value: JsonValue,
}

impl ValueDeserializer {
    pub(crate) fn new(value: JsonValue) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            JsonValue::Null => visitor.visit_unit(),
            JsonValue::Bool(b) => visitor.visit_bool(b),
            JsonValue::Number(n) => {
                let f = n.as_f64();
                // whole numbers go through the integer visitors so integer
                // targets accept them; -0.0 stays a float to keep its sign
                if f == 0.0 && f.is_sign_negative() {
                    visitor.visit_f64(f)
                } else if let Some(i) = n.as_i64() {
                    visitor.visit_i64(i)
                } else if let Some(u) = n.as_u64() {
                    visitor.visit_u64(u)
                } else {
                    visitor.visit_f64(f)
                }
            }
            JsonValue::String(s) => visitor.visit_string(s),
            JsonValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            JsonValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_f64(self, visitor)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            JsonValue::Number(n) => visitor.visit_f64(n.as_f64()),
            other => de::Deserializer::deserialize_any(ValueDeserializer::new(other), visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            JsonValue::Null => visitor.visit_none(),
            other => visitor.visit_some(ValueDeserializer::new(other)),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    /// Unit variants are strings; other variants are single-member objects
    /// keyed by the variant name.
    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            JsonValue::String(variant) => visitor.visit_enum(EnumDeserializer {
                variant,
                value: None,
            }),
            JsonValue::Object(obj) if obj.len() == 1 => {
                let mut iter = obj.into_iter();
                match iter.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::custom("expected an enum variant")),
                }
            }
            other => Err(Error::custom(format!(
                "expected a string or single-member object for an enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}
