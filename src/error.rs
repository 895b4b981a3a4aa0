//! Error types for Knot parsing, tree building and serde conversion.
//!
//! Every failure is reported at the first problem found; there is no
//! partial-result recovery. Parse errors carry a 1-based line and column.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: no grammar rule matches at the current position
//! - **Unterminated Collections**: a `[` without its closing `]`
//! - **Trailing Input**: unconsumed text after the last valid datum
//! - **Structural Conflicts**: a key path used both as a value and as a branch
//!
//! ## Examples
//!
//! ```rust
//! use serde_knot::{parse_document, Error};
//!
//! let result = parse_document("scores [1 2 3");
//! assert!(matches!(result, Err(Error::UnterminatedCollection { line: 1, col: 8 })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while handling Knot text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// No grammar rule matches at the given position
    #[error("Syntax error at line {line}, column {col}: {msg}\n{context}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
    },

    /// A collection was opened at the given position and never closed
    #[error("Unterminated collection opened at line {line}, column {col}: expected ']'")]
    UnterminatedCollection { line: usize, col: usize },

    /// Input remains after the last value that could be parsed
    #[error("Unexpected trailing input at line {line}, column {col}: {found:?}")]
    TrailingInput {
        line: usize,
        col: usize,
        found: String,
    },

    /// `path` is used as a value by one datum and as a branch by another
    #[error("Structural conflict for key '{key}': '{path}' is used both as a value and as a branch")]
    StructuralConflict { key: String, path: String },

    /// A Rust shape that has no Knot representation
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A field or map key that cannot be written as a key segment
    #[error("Invalid key: {0:?} (segments may only contain letters, digits and '_')")]
    InvalidKey(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line, column and the offending source line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::Error;
    ///
    /// let err = Error::syntax(3, 7, "expected a value", "user.name");
    /// assert!(err.to_string().contains("line 3, column 7"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str, context: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates an unterminated-collection error pointing at the opening bracket.
    pub fn unterminated_collection(line: usize, col: usize) -> Self {
        Error::UnterminatedCollection { line, col }
    }

    /// Creates a trailing-input error; `found` is the rest of the offending line.
    pub fn trailing_input(line: usize, col: usize, found: &str) -> Self {
        Error::TrailingInput {
            line,
            col,
            found: found.to_string(),
        }
    }

    /// Creates a structural-conflict error for `key`, where `path` is the
    /// prefix claimed both as a leaf and as a branch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::Error;
    ///
    /// let err = Error::structural_conflict("a.b", "a");
    /// assert!(err.to_string().contains("'a' is used both"));
    /// ```
    pub fn structural_conflict(key: &str, path: &str) -> Self {
        Error::StructuralConflict {
            key: key.to_string(),
            path: path.to_string(),
        }
    }

    /// Creates an unsupported type error for shapes Knot cannot express.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates an invalid key error.
    pub fn invalid_key(key: &str) -> Self {
        Error::InvalidKey(key.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the `(line, column)` of a parse error, if it has one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::parse_document;
    ///
    /// let err = parse_document("a 1\nb oops").unwrap_err();
    /// assert_eq!(err.position(), Some((2, 3)));
    /// ```
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, col, .. }
            | Error::UnterminatedCollection { line, col }
            | Error::TrailingInput { line, col, .. } => Some((*line, *col)),
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
