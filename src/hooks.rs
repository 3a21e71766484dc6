//! Per-call extension points for custom types.
//!
//! JSON has no notion of complex numbers, byte strings, or your own domain
//! types. Two hooks bridge the gap, bundled in the [`Hooks`] strategy trait:
//!
//! - [`Hooks::encode_unknown`] is the *fallback encoder*. Encode calls it for
//!   every value the JSON model cannot hold and encodes whatever it returns.
//! - [`Hooks::post_decode_object`] is the *object hook*. Decode calls it for
//!   every object, innermost first, and the returned value takes the object's
//!   place.
//!
//! A hook set is borrowed by one call through
//! [`EncodeOptions::with_hooks`](crate::EncodeOptions::with_hooks) or
//! [`DecodeOptions::with_hooks`](crate::DecodeOptions::with_hooks). Nothing is
//! registered globally.
//!
//! ## Unknown values
//!
//! The fallback sees an [`Unknown`]: the name of the type and a raw
//! description of it. Encode produces one for
//!
//! - byte buffers (`bytes`, described as an array of integers),
//! - NaN and the infinities (`f64`),
//! - types that opt out of a native representation with [`serialize_opaque`].
//!
//! ## Sentinel keys
//!
//! By convention a custom type travels as an object carrying a marker key set
//! to `true`, for example `{"__complex__": true, "real": 3.0, "imaginary": 5.0}`.
//! [`tagged`], [`is_tagged`] and [`untag`] help with that shape; the codec
//! itself gives no sentinel any meaning.
//!
//! ## Examples
//!
//! ```rust
//! use hookjson::hooks::{self, Unknown};
//! use hookjson::{to_string_with_options, EncodeOptions};
//! use serde::{Serialize, Serializer};
//!
//! struct Complex { re: f64, im: f64 }
//!
//! impl Serialize for Complex {
//!     fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
//!         hooks::serialize_opaque("Complex", &(self.re, self.im), serializer)
//!     }
//! }
//!
//! let fallback = hooks::fallback_fn(|unknown: &Unknown| match unknown.type_name() {
//!     "Complex" => Ok(unknown.repr().clone()),
//!     other => Err(hookjson::Error::unserializable(other)),
//! });
//!
//! let options = EncodeOptions::new().with_hooks(&fallback);
//! let text = to_string_with_options(&Complex { re: 3.0, im: 5.0 }, &options).unwrap();
//! assert_eq!(text, "[3.0,5.0]");
//! ```

use crate::{Error, Map, Result, Value};
use serde::{Serialize, Serializer};

/// Newtype-struct name marking a value as opaque to the JSON model.
pub(crate) const OPAQUE_TOKEN: &str = "$hookjson::private::Opaque";

/// A value encode could not represent, as handed to the fallback encoder.
#[derive(Clone, Debug, PartialEq)]
pub struct Unknown {
    type_name: String,
    repr: Value,
}

impl Unknown {
    pub(crate) fn new(type_name: impl Into<String>, repr: Value) -> Self {
        Unknown {
            type_name: type_name.into(),
            repr,
        }
    }

    /// Name of the offending type (`bytes`, `f64`, or the name given to [`serialize_opaque`]).
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Raw description of the value. For `f64` it holds the non-finite number itself.
    #[must_use]
    pub fn repr(&self) -> &Value {
        &self.repr
    }

    /// Consumes the unknown, returning its description.
    #[must_use]
    pub fn into_repr(self) -> Value {
        self.repr
    }
}

/// Strategy for types the JSON model does not cover natively.
///
/// Both methods have defaults, so an implementation only overrides the side
/// it cares about. Errors returned by either method reach the caller of
/// encode or decode unchanged.
pub trait Hooks {
    /// Replaces a value that has no JSON representation.
    ///
    /// The result must itself be representable; a result still containing
    /// NaN or an infinity fails with [`Error::UnserializableType`].
    fn encode_unknown(&self, value: &Unknown) -> Result<Value> {
        Err(Error::unserializable(value.type_name()))
    }

    /// Replaces a freshly decoded object. Children are processed before parents.
    fn post_decode_object(&self, map: Map) -> Result<Value> {
        Ok(Value::Object(map))
    }
}

impl<H: Hooks + ?Sized> Hooks for &H {
    fn encode_unknown(&self, value: &Unknown) -> Result<Value> {
        (**self).encode_unknown(value)
    }

    fn post_decode_object(&self, map: Map) -> Result<Value> {
        (**self).post_decode_object(map)
    }
}

impl<H: Hooks + ?Sized> Hooks for Box<H> {
    fn encode_unknown(&self, value: &Unknown) -> Result<Value> {
        (**self).encode_unknown(value)
    }

    fn post_decode_object(&self, map: Map) -> Result<Value> {
        (**self).post_decode_object(map)
    }
}

/// Hooks that do nothing: unknown values fail, objects stay objects.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoHooks;

impl Hooks for NoHooks {}

/// A fallback encoder built from a closure. See [`fallback_fn`].
#[derive(Clone, Copy, Debug)]
pub struct FallbackFn<F>(F);

impl<F> Hooks for FallbackFn<F>
where
    F: Fn(&Unknown) -> Result<Value>,
{
    fn encode_unknown(&self, value: &Unknown) -> Result<Value> {
        (self.0)(value)
    }
}

/// Wraps a closure as a fallback encoder.
pub fn fallback_fn<F>(f: F) -> FallbackFn<F>
where
    F: Fn(&Unknown) -> Result<Value>,
{
    FallbackFn(f)
}

/// An object hook built from a closure. See [`object_hook_fn`].
#[derive(Clone, Copy, Debug)]
pub struct ObjectHookFn<F>(F);

impl<F> Hooks for ObjectHookFn<F>
where
    F: Fn(Map) -> Result<Value>,
{
    fn post_decode_object(&self, map: Map) -> Result<Value> {
        (self.0)(map)
    }
}

/// Wraps a closure as an object hook.
///
/// # Examples
///
/// ```rust
/// use hookjson::{decode_with_options, hooks, DecodeOptions, Value};
///
/// // Collapse every object to its key count.
/// let hook = hooks::object_hook_fn(|map| Ok(Value::from(map.len())));
/// let options = DecodeOptions::new().with_hooks(&hook);
/// let value = decode_with_options(r#"[{"a": 1}, {"b": {"c": 2}}]"#, &options).unwrap();
/// assert_eq!(value, Value::from(vec![Value::from(1), Value::from(1)]));
/// ```
pub fn object_hook_fn<F>(f: F) -> ObjectHookFn<F>
where
    F: Fn(Map) -> Result<Value>,
{
    ObjectHookFn(f)
}

/// Combines the fallback of one hook set with the object hook of another.
#[derive(Clone, Copy, Debug)]
pub struct Chain<E, D> {
    pub encode: E,
    pub decode: D,
}

impl<E: Hooks, D: Hooks> Hooks for Chain<E, D> {
    fn encode_unknown(&self, value: &Unknown) -> Result<Value> {
        self.encode.encode_unknown(value)
    }

    fn post_decode_object(&self, map: Map) -> Result<Value> {
        self.decode.post_decode_object(map)
    }
}

/// Serializes `repr` as an opaque value of type `type_name`.
///
/// Call it from a manual `Serialize` impl to declare that the type has no
/// native JSON form. This codec then routes it to the fallback encoder as an
/// [`Unknown`] whose `repr` is `repr` encoded normally. Other serde formats
/// see a newtype struct wrapping the pair `(type_name, repr)`.
pub fn serialize_opaque<S, T>(
    type_name: &'static str,
    repr: &T,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
    T: ?Sized + Serialize,
{
    serializer.serialize_newtype_struct(OPAQUE_TOKEN, &(type_name, repr))
}

/// Builds `{sentinel: true, ..fields}`.
///
/// # Examples
///
/// ```rust
/// use hookjson::{hooks, Value};
///
/// let value = hooks::tagged("__complex__", [
///     ("real".to_string(), Value::from(3.0)),
///     ("imaginary".to_string(), Value::from(5.0)),
/// ]);
/// assert_eq!(value.to_string(), r#"{"__complex__":true,"real":3.0,"imaginary":5.0}"#);
/// ```
pub fn tagged<I>(sentinel: &str, fields: I) -> Value
where
    I: IntoIterator<Item = (String, Value)>,
{
    let mut map = Map::new();
    map.insert(sentinel.to_string(), Value::Bool(true));
    for (key, value) in fields {
        map.insert(key, value);
    }
    Value::Object(map)
}

/// Returns `true` when `map` carries `sentinel` set to `true`.
#[must_use]
pub fn is_tagged(map: &Map, sentinel: &str) -> bool {
    matches!(map.get(sentinel), Some(Value::Bool(true)))
}

/// Strips the sentinel from a tagged map, or hands the map back untouched.
///
/// # Examples
///
/// ```rust
/// use hookjson::{decode, hooks, Value};
///
/// let Value::Object(map) = decode(r#"{"__point__": true, "x": 1}"#).unwrap() else { unreachable!() };
/// let fields = hooks::untag(map, "__point__").unwrap();
/// assert_eq!(fields.get("x"), Some(&Value::from(1)));
/// assert!(!fields.contains_key("__point__"));
/// ```
pub fn untag(mut map: Map, sentinel: &str) -> std::result::Result<Map, Map> {
    if is_tagged(&map, sentinel) {
        map.remove(sentinel);
        Ok(map)
    } else {
        Err(map)
    }
}
