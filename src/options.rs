//! Configuration options for parsing and writing JSON.
//!
//! - [`ParseOptions`]: read buffer size and nesting depth limit
//! - [`WriteOptions`]: output escaping policy
//!
//! Both are plain values with builder-style setters and sensible defaults;
//! the `from_*` and `to_*` functions without an `_with_options` suffix use the
//! defaults.
//!
//! ## Examples
//!
//! ```rust
//! use strict_json::{from_reader_with_options, to_string_with_options, ParseOptions, WriteOptions};
//!
//! let options = ParseOptions::new().with_max_depth(Some(2));
//! assert!(from_reader_with_options("[[1]]".as_bytes(), options.clone()).is_ok());
//! assert!(from_reader_with_options("[[[1]]]".as_bytes(), options).is_err());
//!
//! let value = strict_json::from_str(r#""é""#).unwrap();
//! let ascii = to_string_with_options(&value, &WriteOptions::new().with_ascii_only(true));
//! assert_eq!(ascii, r#""\u00e9""#);
//! ```

/// Number of bytes the cursor pulls from the underlying reader per refill.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Maximum nesting of arrays and objects accepted by default.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling how text is read and parsed.
///
/// # Examples
///
/// ```rust
/// use strict_json::ParseOptions;
///
/// let options = ParseOptions::new();
/// assert_eq!(options.buffer_size, 8192);
/// assert_eq!(options.max_depth, Some(128));
///
/// let unbounded = ParseOptions::new().with_max_depth(None);
/// assert_eq!(unbounded.max_depth, None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub buffer_size: usize,
    /// `None` disables the limit; deeply nested input then recurses without bound.
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            buffer_size: DEFAULT_BUFFER_SIZE,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the refill block size. Zero is treated as one.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options controlling how values are rendered as text.
///
/// Output is always compact. Quotes, backslashes and every C0 control
/// character are escaped regardless of these options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Escape every non-ASCII character as `\uXXXX`.
    pub ascii_only: bool,
}

impl WriteOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }
}
