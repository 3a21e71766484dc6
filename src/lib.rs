//! # hookjson
//!
//! A Serde-compatible JSON codec whose extension points are per-call hooks.
//!
//! ## What does it add over plain JSON?
//!
//! JSON only knows null, booleans, numbers, strings, arrays and objects. Real
//! programs also hold complex numbers, byte buffers, and domain types with
//! invariants of their own. hookjson lets each encode or decode call supply
//! a [`Hooks`] implementation:
//!
//! - a **fallback encoder** that turns an unrepresentable value into one JSON
//!   can hold, and
//! - an **object hook** that sees every decoded object, innermost first, and
//!   may replace it, typically by recognising a sentinel key such as
//!   `"__complex__"`.
//!
//! ## Key Features
//!
//! - **Serde Compatible**: works with `#[derive(Serialize, Deserialize)]` types
//! - **Strict Parser**: RFC 8259 grammar with byte offset, line and column in errors
//! - **Arbitrary-Precision Integers**: integral literals never lose digits
//! - **Deterministic Output**: insertion order by default, `sort_keys` on request
//! - **No Global State**: hooks are borrowed by one call and nothing else
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use hookjson::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     active: bool,
//! }
//!
//! let user = User { id: 123, name: "Alice".to_string(), active: true };
//!
//! let text = to_string(&user).unwrap();
//! assert_eq!(text, r#"{"id":123,"name":"Alice","active":true}"#);
//!
//! let back: User = from_str(&text).unwrap();
//! assert_eq!(user, back);
//! ```
//!
//! ### Pretty Output
//!
//! ```rust
//! use hookjson::{to_string_with_options, value, EncodeOptions};
//!
//! let data = value!({"name": "Alice", "tags": ["a", "b"]});
//! let text = to_string_with_options(&data, &EncodeOptions::new().with_indent(4)).unwrap();
//! assert_eq!(text, "{\n    \"name\": \"Alice\",\n    \"tags\": [\n        \"a\",\n        \"b\"\n    ]\n}");
//! ```
//!
//! ### Custom Types
//!
//! ```rust
//! use hookjson::hooks::{self, Unknown};
//! use hookjson::{decode_with_options, to_string_with_options, DecodeOptions, EncodeOptions, Map, Value};
//!
//! let fallback = hooks::fallback_fn(|unknown: &Unknown| {
//!     Err(hookjson::Error::unserializable(unknown.type_name()))
//! });
//! let err = to_string_with_options(&f64::NAN, &EncodeOptions::new().with_hooks(&fallback));
//! assert!(err.is_err());
//!
//! let hook = hooks::object_hook_fn(|map: Map| match hooks::untag(map, "__point__") {
//!     Ok(fields) => Ok(Value::from(fields.len())),
//!     Err(map) => Ok(Value::Object(map)),
//! });
//! let options = DecodeOptions::new().with_hooks(&hook);
//! let value = decode_with_options(r#"{"__point__": true, "x": 1, "y": 2}"#, &options).unwrap();
//! assert_eq!(value, Value::from(2));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber:
//! `trace` when a value goes to the fallback encoder or an object to the
//! object hook, `debug` when decoding fails.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - encoding and decoding derived types
//! - **`custom_types.rs`** - complex numbers through a fallback and an object hook
//! - **`todos.rs`** - reading a JSON file and grouping its records
//! - **`custom_options.rs`** - indentation, separators, key order and escaping
//!
//! Run any of them with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod format;
pub mod hooks;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::{from_value, Deserializer};
pub use error::{Error, Result};
pub use hooks::Hooks;
pub use map::Map;
pub use options::{DecodeOptions, DuplicateKeys, EncodeOptions, KeyPolicy, Separators};
pub use ser::ValueSerializer;
pub use value::{Number, Value};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Serialize any `T: Serialize` to a compact JSON string.
///
/// # Examples
///
/// ```rust
/// use hookjson::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), r#"{"x":1,"y":2}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value holds something JSON cannot represent, or a
/// map key that is not a string.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` to a JSON string indented by two spaces.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::pretty())
}

/// Serialize any `T: Serialize` to a JSON string with custom options.
///
/// # Examples
///
/// ```rust
/// use hookjson::{to_string_with_options, EncodeOptions, Separators};
///
/// let options = EncodeOptions::new().with_separators(Separators::spaced());
/// assert_eq!(to_string_with_options(&(8, "Q"), &options).unwrap(), r#"[8, "Q"]"#);
/// ```
///
/// # Errors
///
/// Returns [`Error::UnserializableType`] for values no fallback resolved,
/// [`Error::KeyType`] for rejected map keys, and any error the fallback returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions<'_>) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value_with_options(value, options)?;
    let mut output = String::new();
    ser::write_value(&mut output, &value, options, 0);
    Ok(output)
}

/// Convert any `T: Serialize` to a [`Value`].
///
/// # Examples
///
/// ```rust
/// use hookjson::{to_value, Value};
///
/// let value = to_value(&vec![1, 2]).unwrap();
/// assert_eq!(value, Value::from(vec![Value::from(1), Value::from(2)]));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    to_value_with_options(value, &EncodeOptions::default())
}

/// Convert any `T: Serialize` to a [`Value`], applying the fallback and key
/// policy of `options`. Layout options are ignored.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value_with_options<T>(value: &T, options: &EncodeOptions<'_>) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer::new(options))
}

/// Serialize any `T: Serialize` as compact JSON into a writer.
///
/// # Examples
///
/// ```rust
/// use hookjson::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &[true, false]).unwrap();
/// assert_eq!(buffer, b"[true,false]");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serialize any `T: Serialize` into a writer with custom options.
///
/// Nothing is written unless the whole document encodes successfully.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(
    mut writer: W,
    value: &T,
    options: &EncodeOptions<'_>,
) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let json = to_string_with_options(value, options)?;
    writer
        .write_all(json.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Parse JSON text into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use hookjson::{decode, Value};
///
/// let value = decode(r#"[8, "Q"]"#).unwrap();
/// assert_eq!(value, Value::from(vec![Value::from(8), Value::from("Q")]));
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] if the text is not a single well-formed JSON value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(s: &str) -> Result<Value> {
    decode_with_options(s, &DecodeOptions::default())
}

/// Parse JSON text into a [`Value`] with custom options.
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed text and any error the object hook returns.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(s: &str, options: &DecodeOptions<'_>) -> Result<Value> {
    Deserializer::with_options(s, options).decode()
}

/// Deserialize an instance of type `T` from a string of JSON text.
///
/// # Examples
///
/// ```rust
/// use hookjson::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str(r#"{"x": 1, "y": 2}"#).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid JSON or does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, &DecodeOptions::default())
}

/// Deserialize an instance of type `T` from JSON text, running the object
/// hook of `options` before mapping onto `T`.
///
/// # Errors
///
/// Returns an error if the input is not valid JSON, a hook fails, or the
/// result does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: &DecodeOptions<'_>) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode_with_options(s, options)?)
}

/// Deserialize an instance of type `T` from an I/O stream of JSON.
///
/// # Examples
///
/// ```rust
/// use hookjson::from_reader;
/// use std::io::Cursor;
///
/// let numbers: Vec<u8> = from_reader(Cursor::new(b"[1, 2, 3]")).unwrap();
/// assert_eq!(numbers, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if reading fails, the input is not valid JSON, or the
/// data does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Deserialize an instance of type `T` from bytes of JSON text.
///
/// # Errors
///
/// Returns [`Error::Parse`] at the first invalid byte if the input is not
/// UTF-8, and otherwise behaves like [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(|e| de::utf8_error(v, e))?;
    from_str(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn alice() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_serialize_deserialize_user() {
        let json = to_string(&alice()).unwrap();
        assert_eq!(
            json,
            r#"{"id":123,"name":"Alice","active":true,"tags":["admin","user"]}"#
        );
        let back: User = from_str(&json).unwrap();
        assert_eq!(back, alice());
    }

    #[test]
    fn test_pretty_printing() {
        let json = to_string_pretty(&alice()).unwrap();
        assert!(json.starts_with("{\n  \"id\": 123,\n"));
        let back: User = from_str(&json).unwrap();
        assert_eq!(back, alice());
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&alice()).unwrap();
        assert_eq!(value.get("id"), Some(&Value::from(123)));
        assert_eq!(value.get("active"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_writer_untouched_on_failure() {
        let mut buffer = Vec::new();
        let result = to_writer(&mut buffer, &vec![1.0, f64::NAN]);
        assert_eq!(result, Err(Error::unserializable("f64")));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice::<Value>(b"\"\xc3\x28\"").unwrap_err();
        assert_eq!(err.offset(), Some(1));
    }

    #[test]
    fn test_from_str_applies_object_hook() {
        let hook = hooks::object_hook_fn(|map| Ok(Value::from(map.len() as u64)));
        let options = DecodeOptions::new().with_hooks(&hook);
        let counts: Vec<u64> = from_str_with_options(r#"[{}, {"a": 1, "b": 2}]"#, &options).unwrap();
        assert_eq!(counts, vec![0, 2]);
    }
}
