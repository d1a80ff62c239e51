//! Error types for JSON parsing, serialization and value casts.
//!
//! Two failure classes exist:
//!
//! - **Parse failures** ([`Error`]): the input violated the JSON grammar, the
//!   underlying stream failed, or an encoding could not be applied. Parsing
//!   either fully succeeds or fully fails; no partial tree is ever returned.
//! - **Cast failures** ([`CastError`]): the caller asked for a specific view of a
//!   [`JsonValue`](crate::JsonValue) whose actual kind differs. These describe a
//!   wrong assumption in the calling code, not malformed input.
//!
//! ## Error Context
//!
//! Every grammar error carries the 1-based line and column of the offending
//! character, what the parser expected, and what it actually found:
//!
//! ```rust
//! use strict_json::{from_str, Error};
//!
//! let err = from_str("[1, 2").unwrap_err();
//! assert!(err.is_syntax());
//! assert_eq!(err.position(), Some((1, 6)));
//! assert_eq!(
//!     err.to_string(),
//!     "syntax error at line 1, column 6: expected ',' or ']' but found EOF"
//! );
//! ```

use crate::value::Kind;
use std::fmt;
use std::io;
use thiserror::Error;

/// What the parser saw where it expected something else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Found {
    Char(char),
    Eof,
}

impl From<Option<char>> for Found {
    fn from(ch: Option<char>) -> Self {
        match ch {
            Some(ch) => Found::Char(ch),
            None => Found::Eof,
        }
    }
}

impl fmt::Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Found::Char('\n') => f.write_str("a newline"),
            Found::Char(ch) if ch.is_control() => write!(f, "U+{:04X}", *ch as u32),
            Found::Char(ch) => write!(f, "'{}'", ch),
            Found::Eof => f.write_str("EOF"),
        }
    }
}

/// Raised when a value is viewed as a kind it does not have.
///
/// # Examples
///
/// ```rust
/// use strict_json::{JsonValue, Kind};
///
/// let value = JsonValue::from("hello");
/// let err = value.try_as_array().unwrap_err();
/// assert_eq!(err.expected, Kind::Array);
/// assert_eq!(err.found, Kind::String);
/// assert_eq!(err.to_string(), "not an array: found a string");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastError {
    pub expected: Kind,
    pub found: Kind,
}

impl fmt::Display for CastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "not {}: found {}",
            self.expected.article(),
            self.found.article()
        )
    }
}

impl std::error::Error for CastError {}

/// All failures produced while reading, writing or converting JSON.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying stream failed. Propagated unmodified.
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("syntax error at line {line}, column {col}: expected {expected} but found {found}")]
    Unexpected {
        line: usize,
        col: usize,
        expected: &'static str,
        found: Found,
    },

    #[error("syntax error at line {line}, column {col}: superfluous leading zero")]
    LeadingZero { line: usize, col: usize },

    #[error("syntax error at line {line}, column {col}: unescaped control character {found} in string")]
    ControlCharacter { line: usize, col: usize, found: Found },

    #[error("syntax error at line {line}, column {col}: invalid escape sequence, found {found}")]
    InvalidEscape { line: usize, col: usize, found: Found },

    #[error("syntax error at line {line}, column {col}: invalid unicode escape: {msg}")]
    InvalidUnicodeEscape {
        line: usize,
        col: usize,
        msg: String,
    },

    #[error("syntax error at line {line}, column {col}: number {literal} is out of range")]
    InvalidNumber {
        line: usize,
        col: usize,
        literal: String,
    },

    #[error("syntax error at line {line}, column {col}: trailing content {found} after the document")]
    TrailingContent { line: usize, col: usize, found: Found },

    #[error("nesting depth limit of {limit} exceeded at line {line}, column {col}")]
    DepthLimitExceeded {
        line: usize,
        col: usize,
        limit: usize,
    },

    #[error("unknown text encoding label {0:?}")]
    UnknownEncoding(String),

    #[error("text cannot be represented in the {0} encoding")]
    Unmappable(&'static str),

    /// The encoding can be read but has no encoder of its own.
    #[error("the {0} encoding cannot be written")]
    UnwritableEncoding(&'static str),

    #[error(transparent)]
    Cast(#[from] CastError),

    #[error("{0}")]
    Custom(String),
}

impl Error {
    pub(crate) fn unexpected(
        (line, col): (usize, usize),
        expected: &'static str,
        found: impl Into<Found>,
    ) -> Self {
        Error::Unexpected {
            line,
            col,
            expected,
            found: found.into(),
        }
    }

    pub(crate) fn unicode_escape((line, col): (usize, usize), msg: impl Into<String>) -> Self {
        Error::InvalidUnicodeEscape {
            line,
            col,
            msg: msg.into(),
        }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use strict_json::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert_eq!(err.to_string(), "something went wrong");
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Returns `true` if the input text violated the JSON grammar.
    ///
    /// I/O, encoding, cast and custom errors are not syntax errors.
    #[must_use]
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::Unexpected { .. }
                | Error::LeadingZero { .. }
                | Error::ControlCharacter { .. }
                | Error::InvalidEscape { .. }
                | Error::InvalidUnicodeEscape { .. }
                | Error::InvalidNumber { .. }
                | Error::TrailingContent { .. }
                | Error::DepthLimitExceeded { .. }
        )
    }

    /// Returns the 1-based `(line, column)` the error was detected at, if any.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match *self {
            Error::Unexpected { line, col, .. }
            | Error::LeadingZero { line, col }
            | Error::ControlCharacter { line, col, .. }
            | Error::InvalidEscape { line, col, .. }
            | Error::InvalidUnicodeEscape { line, col, .. }
            | Error::InvalidNumber { line, col, .. }
            | Error::TrailingContent { line, col, .. }
            | Error::DepthLimitExceeded { line, col, .. } => Some((line, col)),
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
}

pub type Result<T> = std::result::Result<T, Error>;
