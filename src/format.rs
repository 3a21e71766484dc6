//! JSON mapping as implemented by this library.
//!
//! This module holds no code. It documents how Rust data meets JSON text in
//! both directions.
//!
//! # Grammar
//!
//! Input is parsed as strict RFC 8259 JSON:
//!
//! - whitespace is space, tab, line feed and carriage return only
//! - exactly one value per document, optionally surrounded by whitespace
//! - no comments, trailing commas, single quotes, or bare words besides
//!   `true`, `false` and `null`
//! - `NaN`, `Infinity` and `-Infinity` are rejected
//!
//! # Encoding
//!
//! | Rust (serde data model) | JSON |
//! |-------------------------|------|
//! | `()`, unit struct, `None` | `null` |
//! | `bool` | `true` / `false` |
//! | integers of any width | decimal digits |
//! | finite `f32` / `f64` | shortest text that reads back to the same value, always with `.` or an exponent (`1.0`, `1e300`) |
//! | `char`, `&str`, `String` | string |
//! | sequences, tuples, tuple structs | array, elements in order |
//! | maps, structs | object, entries in insertion order |
//! | unit variant | `"Variant"` |
//! | newtype, tuple and struct variants | `{"Variant": ...}` |
//!
//! No Rust type above needs a hook. The fallback encoder sees only:
//!
//! | Value | `Unknown::type_name` | `Unknown::repr` |
//! |-------|----------------------|-----------------|
//! | NaN, infinities | `f64` | the number itself |
//! | `serialize_bytes` | `bytes` | array of integers |
//! | [`serialize_opaque`](crate::hooks::serialize_opaque) | caller's type name | caller's description |
//!
//! Map keys must serialize to strings. Under
//! [`KeyPolicy::Stringify`](crate::KeyPolicy::Stringify) integer, float,
//! boolean and null keys become their JSON text (`{"1": ...}`); array and
//! object keys always fail.
//!
//! ## Strings
//!
//! `"` and `\` are backslash-escaped, as are the control characters with
//! short forms (`\b \f \n \r \t`). Other characters below U+0020 are written
//! as `\u00XX`. With `ascii_only`, every non-ASCII character is written as
//! `\uXXXX`, using a surrogate pair above U+FFFF.
//!
//! ## Layout
//!
//! Compact output has no whitespace: `{"a":[1,2]}`. With an indent of `n`,
//! every element of a non-empty array or object starts a new line indented by
//! `n` spaces per level:
//!
//! ```text
//! {
//!     "a": [
//!         1,
//!         2
//!     ],
//!     "b": {}
//! }
//! ```
//!
//! Empty containers stay `[]` and `{}` in both layouts.
//!
//! # Decoding
//!
//! | JSON | [`Value`](crate::Value) |
//! |------|-------------------------|
//! | `null` | `Null` |
//! | `true` / `false` | `Bool` |
//! | number without fraction or exponent | `Number::Integer`, arbitrary precision |
//! | any other number | `Number::Float`; overflow to infinity is a parse error |
//! | string | `String` |
//! | array | `Array` |
//! | object | `Object`, or whatever the object hook returns for it |
//!
//! Repeated keys keep the last value by default, at the position of the first.
//! Nesting deeper than [`DecodeOptions::max_depth`](crate::DecodeOptions) (128
//! by default) is a parse error. Encoding has no depth limit, so reading back
//! a document nested past 128 levels needs a larger `with_max_depth`.
//!
//! Typed decoding (`from_str::<T>`) builds the full `Value` first, object hook
//! included, then maps it onto `T` with the encoding table read backwards.
//! Integer-valued object keys parse into integer map key types.
