//! Configuration options for encoding and decoding.
//!
//! - [`EncodeOptions`]: indentation, separators, key ordering, escaping, key coercion, fallback hooks
//! - [`DecodeOptions`]: object hooks, duplicate-key policy, nesting limit
//!
//! Options are plain builder structs passed to a single call. Hooks are
//! borrowed for the duration of that call only.
//!
//! ## Examples
//!
//! ```rust
//! use hookjson::{to_string_with_options, EncodeOptions, Separators};
//!
//! let options = EncodeOptions::new().with_separators(Separators::spaced());
//! let text = to_string_with_options(&(8, "Q"), &options).unwrap();
//! assert_eq!(text, r#"[8, "Q"]"#);
//! ```

use crate::Hooks;
use std::fmt;

/// Item and key separators.
///
/// # Examples
///
/// ```rust
/// use hookjson::Separators;
///
/// assert_eq!(Separators::compact().item, ",");
/// assert_eq!(Separators::spaced().key, ": ");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Separators {
    pub item: &'static str,
    pub key: &'static str,
}

impl Separators {
    /// `,` and `:` with no whitespace.
    #[must_use]
    pub const fn compact() -> Self {
        Separators {
            item: ",",
            key: ":",
        }
    }

    /// `, ` and `: `, the single-line layout most people read comfortably.
    #[must_use]
    pub const fn spaced() -> Self {
        Separators {
            item: ", ",
            key: ": ",
        }
    }

    /// `,` and `: `, used by pretty output where items end the line.
    #[must_use]
    pub const fn pretty() -> Self {
        Separators {
            item: ",",
            key: ": ",
        }
    }
}

/// What to do with map keys that serialize to something other than a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyPolicy {
    /// Fail with [`Error::KeyType`](crate::Error::KeyType).
    #[default]
    Reject,
    /// Render integer, float, boolean and null keys as their JSON text.
    /// Array and object keys are still rejected.
    Stringify,
}

/// How decode treats an object that repeats a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// The last occurrence wins and keeps the position of the first.
    #[default]
    LastWins,
    /// Fail with a parse error at the repeated key.
    Reject,
}

/// Configuration for encoding.
///
/// # Examples
///
/// ```rust
/// use hookjson::EncodeOptions;
///
/// // Compact single-line output
/// let options = EncodeOptions::new();
/// assert_eq!(options.indent, None);
///
/// // Four spaces per level, keys sorted
/// let options = EncodeOptions::pretty().with_indent(4).with_sort_keys(true);
/// assert_eq!(options.indent, Some(4));
/// ```
#[derive(Clone, Copy, Default)]
pub struct EncodeOptions<'h> {
    pub indent: Option<usize>,
    pub separators: Option<Separators>,
    pub sort_keys: bool,
    pub ascii_only: bool,
    pub key_policy: KeyPolicy,
    pub hooks: Option<&'h dyn Hooks>,
}

impl<'h> EncodeOptions<'h> {
    /// Creates default options: compact, insertion order, no hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty output with 2-space indentation.
    #[must_use]
    pub fn pretty() -> Self {
        EncodeOptions {
            indent: Some(2),
            ..Default::default()
        }
    }

    /// Sets the indentation (spaces per level) and turns on multi-line output.
    ///
    /// `0` puts every element on its own line without indenting it.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    /// Overrides the item and key separators.
    #[must_use]
    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = Some(separators);
        self
    }

    /// Emits object keys in sorted order instead of insertion order.
    #[must_use]
    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Escapes every non-ASCII character as `\uXXXX`.
    #[must_use]
    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    /// Sets the policy for non-string map keys.
    #[must_use]
    pub fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }

    /// Installs the fallback encoder for values with no JSON representation.
    #[must_use]
    pub fn with_hooks(mut self, hooks: &'h dyn Hooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Effective separators: explicit ones, or the defaults for the layout.
    pub(crate) fn separators(&self) -> Separators {
        match (self.separators, self.indent) {
            (Some(separators), _) => separators,
            (None, Some(_)) => Separators::pretty(),
            (None, None) => Separators::compact(),
        }
    }
}

impl fmt::Debug for EncodeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeOptions")
            .field("indent", &self.indent)
            .field("separators", &self.separators)
            .field("sort_keys", &self.sort_keys)
            .field("ascii_only", &self.ascii_only)
            .field("key_policy", &self.key_policy)
            .field("hooks", &self.hooks.is_some())
            .finish()
    }
}

/// Configuration for decoding.
///
/// # Examples
///
/// ```rust
/// use hookjson::{DecodeOptions, DuplicateKeys};
///
/// let options = DecodeOptions::new().with_duplicate_keys(DuplicateKeys::Reject);
/// assert_eq!(options.max_depth, 128);
/// ```
#[derive(Clone, Copy)]
pub struct DecodeOptions<'h> {
    pub hooks: Option<&'h dyn Hooks>,
    pub duplicate_keys: DuplicateKeys,
    pub max_depth: usize,
}

impl Default for DecodeOptions<'_> {
    fn default() -> Self {
        DecodeOptions {
            hooks: None,
            duplicate_keys: DuplicateKeys::default(),
            max_depth: 128,
        }
    }
}

impl<'h> DecodeOptions<'h> {
    /// Creates default options: no hooks, last duplicate wins, depth 128.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the object hook run on every decoded object.
    #[must_use]
    pub fn with_hooks(mut self, hooks: &'h dyn Hooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Sets the duplicate-key policy.
    #[must_use]
    pub fn with_duplicate_keys(mut self, duplicate_keys: DuplicateKeys) -> Self {
        self.duplicate_keys = duplicate_keys;
        self
    }

    /// Sets how deeply arrays and objects may nest.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl fmt::Debug for DecodeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeOptions")
            .field("hooks", &self.hooks.is_some())
            .field("duplicate_keys", &self.duplicate_keys)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
