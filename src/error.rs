//! Error types for MINION parsing and serialization.
//!
//! All parse errors carry the position where the problem was detected
//! (1-based line number and byte offset within that line) plus a context
//! window of up to 80 bytes of the input preceding that position, clipped
//! to a UTF-8 code-point boundary.
//!
//! ## Error Categories
//!
//! - **Lex**: illegal byte, unterminated string or comment, bad escape
//! - **Syntax**: wrong or missing structural token, empty document,
//!   trailing content after the document item
//! - **Semantic**: duplicate map key, duplicate macro name, reference to
//!   an undefined macro
//!
//! ## Examples
//!
//! ```rust
//! use minion::{from_str, Error};
//!
//! let result = from_str("{ a: \"1\", a: \"2\" }");
//! assert!(matches!(result, Err(Error::Semantic { .. })));
//!
//! if let Err(err) = from_str("\"unterminated") {
//!     eprintln!("parse error: {}", err);
//! }
//! ```

use thiserror::Error;

/// All errors that can occur while reading or dumping MINION text.
///
/// Exactly one of {document, error} is produced per `read` call; an error
/// means no partial result exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lexical error: illegal byte, unterminated string or comment,
    /// malformed escape sequence.
    #[error("lexical error at {line}.{byte}: {msg}\n ... {context}")]
    Lex {
        line: usize,
        byte: usize,
        msg: String,
        context: String,
    },

    /// Structural error: wrong or missing `:`/`,`/`]`/`}`, empty document,
    /// content after the document item.
    #[error("syntax error at {line}.{byte}: {msg}\n ... {context}")]
    Syntax {
        line: usize,
        byte: usize,
        msg: String,
        context: String,
    },

    /// Duplicate map key, duplicate macro name, or undefined macro.
    #[error("semantic error at {line}.{byte}: {msg}\n ... {context}")]
    Semantic {
        line: usize,
        byte: usize,
        msg: String,
        context: String,
    },

    /// The configured nesting depth limit was exceeded.
    #[error("nesting depth limit ({limit}) exceeded at {line}.{byte}")]
    DepthExceeded {
        limit: usize,
        line: usize,
        byte: usize,
    },

    /// The serializer met a value it cannot render (for example `Null`).
    /// No partial output is produced.
    #[error("dump failed: {0}")]
    Dump(String),

    /// Programmatic construction error (builder or `minion!` literal).
    #[error("invalid construction: {0}")]
    Build(String),
}

impl Error {
    /// Creates a lexical error at the given position.
    pub fn lex(
        line: usize,
        byte: usize,
        msg: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Error::Lex {
            line,
            byte,
            msg: msg.into(),
            context: context.into(),
        }
    }

    /// Creates a syntax error at the given position.
    pub fn syntax(
        line: usize,
        byte: usize,
        msg: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Error::Syntax {
            line,
            byte,
            msg: msg.into(),
            context: context.into(),
        }
    }

    /// Creates a semantic error at the given position.
    pub fn semantic(
        line: usize,
        byte: usize,
        msg: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Error::Semantic {
            line,
            byte,
            msg: msg.into(),
            context: context.into(),
        }
    }

    /// Creates a serializer failure.
    pub fn dump(msg: impl Into<String>) -> Self {
        Error::Dump(msg.into())
    }

    /// Creates a construction failure.
    pub fn build(msg: impl Into<String>) -> Self {
        Error::Build(msg.into())
    }

    /// The position the error refers to, if it has one.
    ///
    /// Returns `(line, byte)` where `line` is 1-based and `byte` is the
    /// byte offset within that line.
    #[must_use]
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::Lex { line, byte, .. }
            | Error::Syntax { line, byte, .. }
            | Error::Semantic { line, byte, .. }
            | Error::DepthExceeded { line, byte, .. } => Some((*line, *byte)),
            Error::Dump(_) | Error::Build(_) => None,
        }
    }

    /// The context window (input preceding the error position), if any.
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Error::Lex { context, .. }
            | Error::Syntax { context, .. }
            | Error::Semantic { context, .. } => Some(context),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
