//! JSON decoding.
//!
//! This module provides the [`Deserializer`], a strict RFC 8259 parser that
//! builds a [`Value`] tree, and the bridge that turns such a tree into any
//! `T: DeserializeOwned`.
//!
//! ## Overview
//!
//! - **Single pass**: recursive descent with no backtracking
//! - **Strict grammar**: no comments, no trailing commas, no single quotes,
//!   no `NaN` or `Infinity`, nothing after the top-level value
//! - **Object hook**: every object is offered to
//!   [`Hooks::post_decode_object`](crate::Hooks::post_decode_object) as soon
//!   as its closing brace is read, so children reach the hook before parents
//! - **Error reporting**: byte offset plus line and column of the failure
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use hookjson::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ## Direct Parser Usage
//!
//! ```rust
//! use hookjson::{Deserializer, Value};
//!
//! let mut parser = Deserializer::from_str("[1, 2.5, \"three\"]");
//! let value = parser.decode().unwrap();
//! assert_eq!(value.as_array().map(Vec::len), Some(3));
//! ```

use crate::value::BIGINT_TOKEN;
use crate::{DecodeOptions, DuplicateKeys, Error, Map, Number, Result, Value};
use num_bigint::BigInt;
use serde::de::{self, DeserializeOwned, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// The JSON parser.
///
/// Created via [`Deserializer::from_str`] or [`Deserializer::with_options`].
pub struct Deserializer<'de, 'h> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
    depth: usize,
    options: DecodeOptions<'h>,
}

impl<'de, 'h> Deserializer<'de, 'h> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::with_options(input, &DecodeOptions::default())
    }

    pub fn with_options(input: &'de str, options: &DecodeOptions<'h>) -> Self {
        Deserializer {
            input,
            position: 0,
            line: 1,
            column: 1,
            depth: 0,
            options: *options,
        }
    }

    /// Parses the whole input as one JSON document.
    ///
    /// Whitespace may surround the value; anything else after it is an error.
    pub fn decode(&mut self) -> Result<Value> {
        let result = self.parse_document();
        if let Err(Error::Parse {
            offset,
            line,
            column,
            ref msg,
        }) = result
        {
            tracing::debug!(offset, line, column, msg = msg.as_str(), "JSON parse failed");
        }
        result
    }

    fn parse_document(&mut self) -> Result<Value> {
        self.skip_whitespace();
        let value = self.parse_value()?;
        self.skip_whitespace();
        if self.at_end() {
            Ok(value)
        } else {
            Err(self.error("trailing characters after JSON value"))
        }
    }

    fn error(&self, msg: &str) -> Error {
        Error::parse(self.position, self.line, self.column, msg)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.peek_char() {
            self.next_char();
        }
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn expect(&mut self, expected: char, msg: &str) -> Result<()> {
        if self.peek_char() == Some(expected) {
            self.next_char();
            Ok(())
        } else {
            Err(self.unexpected(msg))
        }
    }

    /// Error for the current position, reporting end of input as such.
    fn unexpected(&self, msg: &str) -> Error {
        if self.at_end() {
            self.error("unexpected end of input")
        } else {
            self.error(msg)
        }
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.peek_char() {
            Some('{') => self.parse_object(),
            Some('[') => self.parse_array(),
            Some('"') => self.parse_string().map(Value::String),
            Some('t') => self.parse_literal("true", Value::Bool(true)),
            Some('f') => self.parse_literal("false", Value::Bool(false)),
            Some('n') => self.parse_literal("null", Value::Null),
            Some('-' | '0'..='9') => self.parse_number().map(Value::Number),
            _ => Err(self.unexpected("expected value")),
        }
    }

    fn parse_literal(&mut self, word: &str, value: Value) -> Result<Value> {
        if self.input[self.position..].starts_with(word) {
            for _ in 0..word.len() {
                self.next_char();
            }
            Ok(value)
        } else {
            Err(self.error("expected value"))
        }
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.options.max_depth {
            return Err(self.error("maximum nesting depth exceeded"));
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_array(&mut self) -> Result<Value> {
        self.enter()?;
        self.next_char(); // '['
        self.skip_whitespace();

        let mut elements = Vec::new();
        if self.peek_char() == Some(']') {
            self.next_char();
            self.depth -= 1;
            return Ok(Value::Array(elements));
        }

        loop {
            elements.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                    self.skip_whitespace();
                    if self.peek_char() == Some(']') {
                        return Err(self.error("trailing comma in array"));
                    }
                }
                Some(']') => {
                    self.next_char();
                    break;
                }
                _ => return Err(self.unexpected("expected ',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Array(elements))
    }

    fn parse_object(&mut self) -> Result<Value> {
        self.enter()?;
        self.next_char(); // '{'
        self.skip_whitespace();

        let mut map = Map::new();
        if self.peek_char() == Some('}') {
            self.next_char();
        } else {
            loop {
                if self.peek_char() != Some('"') {
                    return Err(self.unexpected("expected string key"));
                }
                let key_error = self.error("duplicate key in object");
                let key = self.parse_string()?;
                if self.options.duplicate_keys == DuplicateKeys::Reject && map.contains_key(&key) {
                    return Err(key_error);
                }

                self.skip_whitespace();
                self.expect(':', "expected ':' after object key")?;
                self.skip_whitespace();
                let value = self.parse_value()?;
                map.insert(key, value);

                self.skip_whitespace();
                match self.peek_char() {
                    Some(',') => {
                        self.next_char();
                        self.skip_whitespace();
                        if self.peek_char() == Some('}') {
                            return Err(self.error("trailing comma in object"));
                        }
                    }
                    Some('}') => {
                        self.next_char();
                        break;
                    }
                    _ => return Err(self.unexpected("expected ',' or '}'")),
                }
            }
        }

        self.depth -= 1;
        match self.options.hooks {
            Some(hooks) => {
                tracing::trace!(keys = map.len(), depth = self.depth, "dispatching object to object hook");
                hooks.post_decode_object(map)
            }
            None => Ok(Value::Object(map)),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        self.next_char(); // opening quote
        let mut result = String::new();

        loop {
            let start = self.position;
            match self.next_char() {
                Some('"') => return Ok(result),
                Some('\\') => self.parse_escape(&mut result)?,
                Some(ch) if ch < '\u{0020}' => {
                    return Err(Error::parse(
                        start,
                        self.line,
                        self.column - 1,
                        "control character in string",
                    ))
                }
                Some(ch) => result.push(ch),
                None => return Err(self.error("unterminated string")),
            }
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<()> {
        match self.next_char() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('u') => {
                let unit = self.parse_hex4()?;
                let code_point = match unit {
                    0xD800..=0xDBFF => {
                        if !self.input[self.position..].starts_with("\\u") {
                            return Err(self.error("unpaired surrogate in unicode escape"));
                        }
                        self.next_char();
                        self.next_char();
                        let low = self.parse_hex4()?;
                        if !(0xDC00..=0xDFFF).contains(&low) {
                            return Err(self.error("unpaired surrogate in unicode escape"));
                        }
                        0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                    }
                    0xDC00..=0xDFFF => {
                        return Err(self.error("unpaired surrogate in unicode escape"))
                    }
                    other => other,
                };
                let ch = char::from_u32(code_point)
                    .ok_or_else(|| self.error("invalid unicode code point"))?;
                out.push(ch);
            }
            Some(_) => return Err(self.error("invalid escape sequence")),
            None => return Err(self.error("unterminated string")),
        }
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u32> {
        let mut code = 0u32;
        for _ in 0..4 {
            let digit = self
                .peek_char()
                .and_then(|ch| ch.to_digit(16))
                .ok_or_else(|| self.error("invalid unicode escape (expected 4 hex digits)"))?;
            self.next_char();
            code = code * 16 + digit;
        }
        Ok(code)
    }

    fn consume_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some('0'..='9') = self.peek_char() {
            self.next_char();
            count += 1;
        }
        count
    }

    fn parse_number(&mut self) -> Result<Number> {
        let start = self.position;
        let (start_line, start_column) = (self.line, self.column);
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.next_char();
        }

        match self.peek_char() {
            Some('0') => {
                self.next_char();
                if let Some('0'..='9') = self.peek_char() {
                    return Err(self.error("leading zeros are not allowed"));
                }
            }
            Some('1'..='9') => {
                self.consume_digits();
            }
            _ => return Err(self.unexpected("expected digit")),
        }

        if self.peek_char() == Some('.') {
            is_float = true;
            self.next_char();
            if self.consume_digits() == 0 {
                return Err(self.unexpected("expected digit after decimal point"));
            }
        }

        if let Some('e' | 'E') = self.peek_char() {
            is_float = true;
            self.next_char();
            if let Some('+' | '-') = self.peek_char() {
                self.next_char();
            }
            if self.consume_digits() == 0 {
                return Err(self.unexpected("expected digit in exponent"));
            }
        }

        let text = &self.input[start..self.position];
        let out_of_range = || Error::parse(start, start_line, start_column, "number out of range");

        if is_float {
            let f: f64 = text.parse().map_err(|_| out_of_range())?;
            if f.is_finite() {
                Ok(Number::Float(f))
            } else {
                Err(out_of_range())
            }
        } else {
            text.parse::<BigInt>()
                .map(Number::Integer)
                .map_err(|_| out_of_range())
        }
    }
}

/// Builds the parse error for input bytes that are not UTF-8.
pub(crate) fn utf8_error(bytes: &[u8], err: std::str::Utf8Error) -> Error {
    let offset = err.valid_up_to();
    // The prefix up to `valid_up_to` is valid by definition.
    let prefix = std::str::from_utf8(&bytes[..offset]).unwrap_or_default();
    let line = prefix.matches('\n').count() + 1;
    let column = prefix.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    Error::parse(offset, line, column, "input is not valid UTF-8")
}

/// Converts a [`Value`] tree into `T`.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(ValueDeserializer::new(value))
}

macro_rules! delegate_to_value {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(ValueDeserializer::new(self.decode()?), visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de, '_> {
    type Error = Error;

    delegate_to_value! {
        deserialize_any deserialize_bool
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64 deserialize_i128
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64 deserialize_u128
        deserialize_f32 deserialize_f64 deserialize_char deserialize_str deserialize_string
        deserialize_bytes deserialize_byte_buf deserialize_option deserialize_unit
        deserialize_seq deserialize_map deserialize_identifier deserialize_ignored_any
    }

    fn deserialize_unit_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_unit_struct(ValueDeserializer::new(self.decode()?), name, visitor)
    }

    fn deserialize_newtype_struct<V>(self, name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_newtype_struct(
            ValueDeserializer::new(self.decode()?),
            name,
            visitor,
        )
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(ValueDeserializer::new(self.decode()?), len, visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple_struct(
            ValueDeserializer::new(self.decode()?),
            name,
            len,
            visitor,
        )
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(
            ValueDeserializer::new(self.decode()?),
            name,
            fields,
            visitor,
        )
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_enum(
            ValueDeserializer::new(self.decode()?),
            name,
            variants,
            visitor,
        )
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
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
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: <Map as IntoIterator>::IntoIter,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(map: Map) -> Self {
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
                seed.deserialize(KeyDeserializer(key)).map(Some)
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
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Object keys are always strings; integer and boolean key types parse them.
struct KeyDeserializer(String);

macro_rules! deserialize_parsed_key {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.0.parse() {
                    Ok(parsed) => visitor.$visit(parsed),
                    Err(_) => visitor.visit_string(self.0),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.0)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(self.0.into_deserializer())
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    deserialize_parsed_key! {
        deserialize_bool => visit_bool,
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
    }

    forward_to_deserialize_any! {
        i128 u128 f32 f64 char str string bytes byte_buf option unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(KeyDeserializer(self.variant))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", other.type_name())),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::type_mismatch("newtype variant", "unit variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Some(other) => Err(Error::type_mismatch("tuple variant", other.type_name())),
            None => Err(Error::type_mismatch("tuple variant", "unit variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            Some(other) => Err(Error::type_mismatch("struct variant", other.type_name())),
            None => Err(Error::type_mismatch("struct variant", "unit variant")),
        }
    }
}

/// Deserializer reading from an owned [`Value`].
struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

fn visit_integer<'de, V>(i: BigInt, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    if let Ok(small) = i64::try_from(&i) {
        visitor.visit_i64(small)
    } else if let Ok(unsigned) = u64::try_from(&i) {
        visitor.visit_u64(unsigned)
    } else if let Ok(wide) = i128::try_from(&i) {
        visitor.visit_i128(wide)
    } else if let Ok(wide) = u128::try_from(&i) {
        visitor.visit_u128(wide)
    } else {
        // Too wide for any primitive: only `Value` recognises this shape.
        let mut map = Map::with_capacity(1);
        map.insert(BIGINT_TOKEN.to_string(), Value::String(i.to_string()));
        visitor.visit_map(MapDeserializer::new(map))
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visit_integer(i, visitor),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

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
            Value::String(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Object(obj) if obj.len() == 1 => match obj.into_iter().next() {
                Some((variant, value)) => visitor.visit_enum(EnumDeserializer::new(variant, value)),
                None => Err(Error::type_mismatch("enum", "object")),
            },
            other => Err(Error::type_mismatch("enum", other.type_name())),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::object_hook_fn;
    use serde::Deserialize;
    use std::collections::HashMap;

    fn parse(input: &str) -> Result<Value> {
        Deserializer::from_str(input).decode()
    }

    fn parse_error_at(input: &str) -> (usize, usize, usize, String) {
        match parse(input) {
            Err(Error::Parse {
                offset,
                line,
                column,
                msg,
            }) => (offset, line, column, msg),
            other => panic!("expected parse error for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_integers_and_floats() {
        assert_eq!(parse("42").unwrap(), Value::from(42));
        assert_eq!(parse("-0").unwrap(), Value::from(0));
        assert_eq!(parse("1.0").unwrap(), Value::from(1.0));
        assert_eq!(parse("1e2").unwrap(), Value::from(100.0));
        assert_eq!(parse("-2.5E-3").unwrap(), Value::from(-0.0025));
    }

    #[test]
    fn test_big_integers_keep_precision() {
        let text = "123456789012345678901234567890";
        let value = parse(text).unwrap();
        assert_eq!(value.as_bigint().map(ToString::to_string).as_deref(), Some(text));
    }

    #[test]
    fn test_float_overflow_is_rejected() {
        let (offset, _, _, msg) = parse_error_at("[1e400]");
        assert_eq!(offset, 1);
        assert_eq!(msg, "number out of range");
    }

    #[test]
    fn test_malformed_numbers() {
        assert_eq!(parse_error_at("01").3, "leading zeros are not allowed");
        assert_eq!(parse_error_at("1.").3, "unexpected end of input");
        assert_eq!(parse_error_at("-").3, "unexpected end of input");
        assert_eq!(parse_error_at("1e+x").3, "expected digit in exponent");
        assert_eq!(parse_error_at(".5").3, "expected value");
    }

    #[test]
    fn test_strings_and_escapes() {
        assert_eq!(
            parse(r#""a\"b\\c\/d\né🎉""#).unwrap(),
            Value::from("a\"b\\c/d\né🎉")
        );
        assert_eq!(parse_error_at(r#""\x""#).3, "invalid escape sequence");
        assert_eq!(parse_error_at(r#""\ud83c""#).3, "unpaired surrogate in unicode escape");
        assert_eq!(parse_error_at("\"a\u{1}\"").3, "control character in string");
        assert_eq!(parse_error_at("\"abc").3, "unterminated string");
    }

    #[test]
    fn test_strict_grammar() {
        assert_eq!(parse_error_at("[1,]").3, "trailing comma in array");
        assert_eq!(parse_error_at(r#"{"a":1,}"#).3, "trailing comma in object");
        assert_eq!(parse_error_at("{'a':1}").3, "expected string key");
        assert_eq!(parse_error_at("NaN").3, "expected value");
        assert_eq!(parse_error_at("nul").3, "expected value");
        assert_eq!(parse_error_at("[1] x").3, "trailing characters after JSON value");
        assert_eq!(parse_error_at("").3, "unexpected end of input");
        assert_eq!(parse_error_at("   ").3, "unexpected end of input");
    }

    #[test]
    fn test_error_positions() {
        assert_eq!(parse_error_at("{invalid"), (1, 1, 2, "expected string key".to_string()));
        let (offset, line, column, _) = parse_error_at("[\n  1,\n  ?\n]");
        assert_eq!((offset, line, column), (9, 3, 3));
    }

    #[test]
    fn test_duplicate_keys() {
        let value = parse(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        assert_eq!(value.get("a"), Some(&Value::from(3)));
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);

        let options = DecodeOptions::new().with_duplicate_keys(DuplicateKeys::Reject);
        let err = Deserializer::with_options(r#"{"a": 1, "a": 3}"#, &options)
            .decode()
            .unwrap_err();
        assert_eq!(err.offset(), Some(9));
    }

    #[test]
    fn test_max_depth() {
        let options = DecodeOptions::new().with_max_depth(2);
        assert!(Deserializer::with_options("[[1]]", &options).decode().is_ok());
        let err = Deserializer::with_options("[[[1]]]", &options)
            .decode()
            .unwrap_err();
        assert_eq!(err.offset(), Some(2));

        let deep = "[".repeat(10_000);
        assert!(parse(&deep).is_err());
    }

    #[test]
    fn test_object_hook_runs_innermost_first() {
        let seen = std::cell::RefCell::new(Vec::new());
        let hook = object_hook_fn(|map: Map| {
            seen.borrow_mut().push(map.keys().cloned().collect::<Vec<_>>());
            Ok(Value::Object(map))
        });
        let options = DecodeOptions::new().with_hooks(&hook);
        Deserializer::with_options(r#"{"outer": {"inner": {}}}"#, &options)
            .decode()
            .unwrap();
        assert_eq!(
            seen.into_inner(),
            vec![vec![], vec!["inner".to_string()], vec!["outer".to_string()]]
        );
    }

    #[test]
    fn test_hook_error_propagates_unchanged() {
        let hook = object_hook_fn(|_| Err(Error::hook("rejected")));
        let options = DecodeOptions::new().with_hooks(&hook);
        let err = Deserializer::with_options("[{}]", &options).decode().unwrap_err();
        assert_eq!(err, Error::hook("rejected"));
    }

    #[test]
    fn test_hook_not_consulted_for_arrays() {
        let hook = object_hook_fn(|_| Err(Error::hook("objects only")));
        let options = DecodeOptions::new().with_hooks(&hook);
        assert!(Deserializer::with_options("[[1, 2], \"x\"]", &options)
            .decode()
            .is_ok());
    }

    #[test]
    fn test_from_value_typed() {
        #[derive(Deserialize, Debug, PartialEq)]
        enum Shape {
            Unit,
            Circle(f64),
            Rect { w: u32, h: u32 },
        }

        #[derive(Deserialize, Debug, PartialEq)]
        struct Scene {
            name: String,
            shapes: Vec<Shape>,
            note: Option<String>,
        }

        let value = parse(
            r#"{"name": "s", "shapes": ["Unit", {"Circle": 2}, {"Rect": {"w": 1, "h": 2}}], "note": null}"#,
        )
        .unwrap();
        let scene: Scene = from_value(value).unwrap();
        assert_eq!(
            scene,
            Scene {
                name: "s".to_string(),
                shapes: vec![Shape::Unit, Shape::Circle(2.0), Shape::Rect { w: 1, h: 2 }],
                note: None,
            }
        );
    }

    #[test]
    fn test_integer_keys_parse() {
        let value = parse(r#"{"1": "one", "2": "two"}"#).unwrap();
        let map: HashMap<u32, String> = from_value(value).unwrap();
        assert_eq!(map.get(&2).map(String::as_str), Some("two"));
    }

    #[test]
    fn test_type_mismatch() {
        let err = from_value::<i32>(Value::from("nope")).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_utf8_error_position() {
        let bytes: &[u8] = &b"[\"ok\",\n\"\xff\"]".to_vec();
        let err = utf8_error(bytes, std::str::from_utf8(bytes).unwrap_err());
        assert_eq!(err, Error::parse(8, 2, 2, "input is not valid UTF-8"));
    }
}
