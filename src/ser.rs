//! JSON encoding.
//!
//! Encoding happens in two passes:
//!
//! 1. [`ValueSerializer`] turns any `T: Serialize` into a [`Value`] tree.
//!    Values the JSON model cannot hold are handed to the fallback encoder
//!    here, and map keys are checked against the [`KeyPolicy`].
//! 2. [`write_value`] renders the finished tree as text, compact or indented.
//!
//! Because the whole tree exists before any text is written, a failure in
//! the first pass never leaves partial output behind.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use hookjson::{to_string, to_string_pretty};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//! assert_eq!(to_string(&data).unwrap(), r#"{"x":1,"y":2}"#);
//! assert_eq!(to_string_pretty(&data).unwrap(), "{\n  \"x\": 1,\n  \"y\": 2\n}");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use hookjson::{EncodeOptions, Value, ValueSerializer};
//! use serde::Serialize;
//!
//! let options = EncodeOptions::new();
//! let value = (8, "Q").serialize(ValueSerializer::new(&options)).unwrap();
//! assert_eq!(value, Value::from(vec![Value::from(8), Value::from("Q")]));
//! ```

use crate::hooks::{Unknown, OPAQUE_TOKEN};
use crate::value::{write_float, BIGINT_TOKEN};
use crate::{EncodeOptions, Error, Hooks, KeyPolicy, Map, Number, Result, Value};
use num_bigint::BigInt;
use serde::{ser, Serialize};
use std::fmt::Write;

/// Serializer producing a [`Value`] tree.
///
/// Carries the fallback encoder and key policy of one encode call.
#[derive(Clone, Copy)]
pub struct ValueSerializer<'h> {
    hooks: Option<&'h dyn Hooks>,
    key_policy: KeyPolicy,
}

impl<'h> ValueSerializer<'h> {
    pub fn new(options: &EncodeOptions<'h>) -> Self {
        ValueSerializer {
            hooks: options.hooks,
            key_policy: options.key_policy,
        }
    }

    fn to_value<T: Serialize + ?Sized>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }

    /// Sends an unrepresentable value to the fallback and checks its answer.
    fn resolve_unknown(self, unknown: Unknown) -> Result<Value> {
        let Some(hooks) = self.hooks else {
            return Err(Error::unserializable(unknown.type_name()));
        };

        tracing::trace!(
            type_name = unknown.type_name(),
            "dispatching unknown value to fallback encoder"
        );
        let substitute = hooks.encode_unknown(&unknown)?;
        ensure_representable(&substitute)?;
        Ok(substitute)
    }

    fn map_key(self, key: Value) -> Result<String> {
        match key {
            Value::String(s) => Ok(s),
            Value::Array(_) | Value::Object(_) => Err(Error::key_type(key.type_name())),
            scalar => match self.key_policy {
                KeyPolicy::Reject => Err(Error::key_type(scalar.type_name())),
                KeyPolicy::Stringify => Ok(scalar.to_string()),
            },
        }
    }

    fn capture_opaque<T: Serialize + ?Sized>(self, value: &T) -> Result<Value> {
        let Value::Array(mut parts) = self.to_value(value)? else {
            return Err(Error::custom("malformed opaque value"));
        };
        match (parts.pop(), parts.pop(), parts.is_empty()) {
            (Some(repr), Some(Value::String(type_name)), true) => {
                self.resolve_unknown(Unknown::new(type_name, repr))
            }
            _ => Err(Error::custom("malformed opaque value")),
        }
    }
}

/// Walks a fallback result: it must not contain NaN or an infinity.
fn ensure_representable(value: &Value) -> Result<()> {
    match value {
        Value::Number(n) if !n.is_finite() => Err(Error::unserializable("f64")),
        Value::Array(arr) => arr.iter().try_for_each(ensure_representable),
        Value::Object(obj) => obj.values().try_for_each(ensure_representable),
        _ => Ok(()),
    }
}

impl<'h> ser::Serializer for ValueSerializer<'h> {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec<'h>;
    type SerializeTuple = SerializeVec<'h>;
    type SerializeTupleStruct = SerializeVec<'h>;
    type SerializeTupleVariant = SerializeTupleVariant<'h>;
    type SerializeMap = SerializeMap<'h>;
    type SerializeStruct = SerializeMap<'h>;
    type SerializeStructVariant = SerializeStructVariant<'h>;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        if !v.is_finite() {
            return self.serialize_f64(f64::from(v));
        }
        // Widen through the shortest f32 text so 0.1f32 stays 0.1.
        let widened = v.to_string().parse::<f64>().unwrap_or(f64::from(v));
        self.serialize_f64(widened)
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        if v.is_finite() {
            Ok(Value::Number(Number::Float(v)))
        } else {
            self.resolve_unknown(Unknown::new("f64", Value::Number(Number::Float(v))))
        }
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let repr = v.iter().map(|&b| Value::from(b)).collect();
        self.resolve_unknown(Unknown::new("bytes", Value::Array(repr)))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        match name {
            OPAQUE_TOKEN => self.capture_opaque(value),
            BIGINT_TOKEN => match self.to_value(value)? {
                Value::String(digits) => digits
                    .parse::<BigInt>()
                    .map(Value::from)
                    .map_err(|e| Error::custom(format!("invalid big integer: {}", e))),
                other => Err(Error::type_mismatch("big integer digits", other.type_name())),
            },
            _ => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Map::with_capacity(1);
        map.insert(variant.to_string(), self.to_value(value)?);
        Ok(Value::Object(map))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec<'h>> {
        Ok(SerializeVec::new(self, len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec<'h>> {
        Ok(SerializeVec::new(self, len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec<'h>> {
        Ok(SerializeVec::new(self, len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant<'h>> {
        Ok(SerializeTupleVariant {
            variant,
            inner: SerializeVec::new(self, len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap<'h>> {
        Ok(SerializeMap::new(self, len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeMap<'h>> {
        Ok(SerializeMap::new(self, len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant<'h>> {
        Ok(SerializeStructVariant {
            variant,
            inner: SerializeMap::new(self, len),
        })
    }
}

pub struct SerializeVec<'h> {
    ser: ValueSerializer<'h>,
    vec: Vec<Value>,
}

impl<'h> SerializeVec<'h> {
    fn new(ser: ValueSerializer<'h>, capacity: usize) -> Self {
        SerializeVec {
            ser,
            vec: Vec::with_capacity(capacity),
        }
    }

    fn push<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        self.vec.push(self.ser.to_value(value)?);
        Ok(())
    }
}

impl ser::SerializeSeq for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

pub struct SerializeTupleVariant<'h> {
    variant: &'static str,
    inner: SerializeVec<'h>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.inner.push(value)
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::with_capacity(1);
        map.insert(self.variant.to_string(), Value::Array(self.inner.vec));
        Ok(Value::Object(map))
    }
}

pub struct SerializeMap<'h> {
    ser: ValueSerializer<'h>,
    map: Map,
    current_key: Option<String>,
}

impl<'h> SerializeMap<'h> {
    fn new(ser: ValueSerializer<'h>, capacity: usize) -> Self {
        SerializeMap {
            ser,
            map: Map::with_capacity(capacity),
            current_key: None,
        }
    }
}

impl ser::SerializeMap for SerializeMap<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.ser.map_key(self.ser.to_value(key)?)?;
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), self.ser.to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

pub struct SerializeStructVariant<'h> {
    variant: &'static str,
    inner: SerializeMap<'h>,
}

impl ser::SerializeStructVariant for SerializeStructVariant<'_> {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeStruct::serialize_field(&mut self.inner, key, value)
    }

    fn end(self) -> Result<Value> {
        let mut map = Map::with_capacity(1);
        map.insert(self.variant.to_string(), Value::Object(self.inner.map));
        Ok(Value::Object(map))
    }
}

/// Renders `value` as JSON text at nesting `level`.
///
/// Expects a tree produced by [`ValueSerializer`]; NaN and the infinities
/// are written as bare words should they appear anyway.
pub fn write_value(output: &mut String, value: &Value, options: &EncodeOptions<'_>, level: usize) {
    match value {
        Value::Null => output.push_str("null"),
        Value::Bool(b) => output.push_str(if *b { "true" } else { "false" }),
        Value::Number(Number::Integer(i)) => {
            let _ = write!(output, "{}", i);
        }
        Value::Number(Number::Float(f)) => write_float(output, *f),
        Value::String(s) => write_string(output, s, options.ascii_only),
        Value::Array(arr) => write_array(output, arr, options, level),
        Value::Object(obj) => write_object(output, obj, options, level),
    }
}

fn write_newline(output: &mut String, options: &EncodeOptions<'_>, level: usize) {
    if let Some(indent) = options.indent {
        output.push('\n');
        output.extend(std::iter::repeat(' ').take(indent * level));
    }
}

fn write_array(output: &mut String, arr: &[Value], options: &EncodeOptions<'_>, level: usize) {
    if arr.is_empty() {
        output.push_str("[]");
        return;
    }

    let separators = options.separators();
    output.push('[');
    for (i, element) in arr.iter().enumerate() {
        if i > 0 {
            output.push_str(separators.item);
        }
        write_newline(output, options, level + 1);
        write_value(output, element, options, level + 1);
    }
    write_newline(output, options, level);
    output.push(']');
}

fn write_object(output: &mut String, obj: &Map, options: &EncodeOptions<'_>, level: usize) {
    if obj.is_empty() {
        output.push_str("{}");
        return;
    }

    let mut entries: Vec<(&String, &Value)> = obj.iter().collect();
    if options.sort_keys {
        entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
    }

    let separators = options.separators();
    output.push('{');
    for (i, (key, value)) in entries.into_iter().enumerate() {
        if i > 0 {
            output.push_str(separators.item);
        }
        write_newline(output, options, level + 1);
        write_string(output, key, options.ascii_only);
        output.push_str(separators.key);
        write_value(output, value, options, level + 1);
    }
    write_newline(output, options, level);
    output.push('}');
}

fn write_string(output: &mut String, s: &str, ascii_only: bool) {
    output.push('"');
    for ch in s.chars() {
        match ch {
            '"' => output.push_str("\\\""),
            '\\' => output.push_str("\\\\"),
            '\n' => output.push_str("\\n"),
            '\r' => output.push_str("\\r"),
            '\t' => output.push_str("\\t"),
            '\u{0008}' => output.push_str("\\b"),
            '\u{000C}' => output.push_str("\\f"),
            c if c < '\u{0020}' => {
                let _ = write!(output, "\\u{:04x}", c as u32);
            }
            c if ascii_only && !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(output, "\\u{:04x}", unit);
                }
            }
            c => output.push(c),
        }
    }
    output.push('"');
}
