//! Error types for JSON encoding and decoding.
//!
//! Every failure aborts the whole operation: encode never hands back partial
//! text and decode never hands back a partial value.
//!
//! ## Error Categories
//!
//! - **UnserializableType**: a value with no JSON representation that no fallback resolved
//! - **Parse**: malformed JSON text, with byte offset plus line/column
//! - **KeyType**: a map key that is not a string under [`KeyPolicy::Reject`](crate::KeyPolicy)
//! - **Hook**: raised by a caller-supplied hook
//! - **TypeMismatch**: a decoded value does not fit the requested Rust type
//!
//! ## Examples
//!
//! ```rust
//! use hookjson::{decode, Error};
//!
//! let err = decode("{invalid").unwrap_err();
//! assert!(matches!(err, Error::Parse { offset: 1, .. }));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding JSON.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Encode met a value with no JSON representation and no fallback resolved it
    #[error("Object of type {type_name} is not JSON serializable")]
    UnserializableType { type_name: String },

    /// Decode input is not well-formed JSON
    #[error("Parse error at line {line}, column {column} (offset {offset}): {msg}")]
    Parse {
        offset: usize,
        line: usize,
        column: usize,
        msg: String,
    },

    /// Map key that is not a string, with no coercion policy allowing it
    #[error("Map keys must be strings, found {found}")]
    KeyType { found: String },

    /// Raised by a fallback encoder or object hook
    #[error("Hook error: {0}")]
    Hook(String),

    /// Decoded value does not match the requested Rust type
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an unserializable-type error naming the offending type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hookjson::Error;
    ///
    /// let err = Error::unserializable("Complex");
    /// assert_eq!(err.to_string(), "Object of type Complex is not JSON serializable");
    /// ```
    pub fn unserializable(type_name: &str) -> Self {
        Error::UnserializableType {
            type_name: type_name.to_string(),
        }
    }

    /// Creates a parse error at a byte offset with line and column information.
    pub fn parse(offset: usize, line: usize, column: usize, msg: &str) -> Self {
        Error::Parse {
            offset,
            line,
            column,
            msg: msg.to_string(),
        }
    }

    /// Creates a key type error describing the key that was found.
    pub fn key_type(found: &str) -> Self {
        Error::KeyType {
            found: found.to_string(),
        }
    }

    /// Creates an error for hooks to return when they cannot handle their input.
    ///
    /// The codec hands whatever error a hook returns back to the caller unchanged;
    /// this constructor only exists so hooks have a variant of their own.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hookjson::Error;
    ///
    /// let err = Error::hook("missing field `real`");
    /// assert!(err.to_string().contains("real"));
    /// ```
    pub fn hook<T: fmt::Display>(msg: T) -> Self {
        Error::Hook(msg.to_string())
    }

    /// Creates a type mismatch error when conversion to a Rust type fails.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the byte offset for parse errors.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::Parse { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected, exp: &dyn serde::de::Expected) -> Self {
        Error::type_mismatch(&exp.to_string(), &unexp.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
