//! # minion
//!
//! A parser and serializer for MINION, a compact, human-writable JSON-like
//! text format.
//!
//! ## What is MINION?
//!
//! MINION extends ordinary JSON syntax with features aimed at hand-written
//! configuration:
//!
//! - **Bare strings**: unquoted string literals terminated by whitespace or
//!   a structural character (`key: value` instead of `"key": "value"`)
//! - **Comments**: `#` to end of line, `#[ ... ]#` blocks, and `\[ ... \]`
//!   comments embedded inside delimited strings
//! - **Extra escapes**: `\u` + 4 hex digits, `\U` + 6 hex digits
//! - **Macros**: document-scoped named values (`&name: value,`) referenced
//!   elsewhere in the same document, sharing one allocation instead of
//!   duplicating data
//!
//! All scalar values are strings; lists and maps provide the structure.
//!
//! ## Quick Start
//!
//! ```rust
//! use minion::{from_str, to_string_pretty};
//!
//! let text = r#"
//! ## server configuration
//! &fallback: "127.0.0.1",
//! {
//!     hosts: [&fallback, "10.0.0.2"],
//!     port: 8080,
//! }
//! "#;
//!
//! let doc = from_str(text).unwrap();
//! assert_eq!(doc.root().get("port").and_then(|v| v.as_str()), Some("8080"));
//!
//! let pretty = to_string_pretty(&doc).unwrap();
//! let again = from_str(&pretty).unwrap();
//! assert_eq!(to_string_pretty(&again).unwrap(), pretty);
//! ```
//!
//! ## Ownership
//!
//! A parse produces one [`Document`]: an arena of nodes plus a root handle.
//! Macro references share subtrees by handle, so a node can be reachable
//! from several tree paths; the arena owns every node and frees each one
//! exactly once when the document drops, on success and error paths alike.
//! [`Document::deep_copy`] produces a fully independent tree when a value
//! must outlive its document.
//!
//! ## Errors
//!
//! Parse errors are position-annotated ([`Error`]): 1-based line, byte
//! offset within the line, and a window of the preceding input. Exactly one
//! of {document, error} is produced per call; there are no partial results.
//!
//! ## Interop
//!
//! [`Document`] and [`ValueRef`] implement `serde::Serialize`, so a parsed
//! document can be re-encoded with any serde serializer (JSON, etc.).

pub mod error;
mod lexer;
pub mod macros;
pub mod map;
pub mod parser;
pub mod ser;
pub mod value;

pub use error::{Error, Result};
pub use map::MinionMap;
pub use parser::{Parser, DEFAULT_MAX_DEPTH};
pub use ser::Dumper;
pub use value::{Document, DocumentBuilder, ListIter, MapIter, Node, NodeId, ValueRef};

/// Parses one MINION document from a string.
///
/// # Examples
///
/// ```rust
/// use minion::from_str;
///
/// let doc = from_str("[a, b, c]").unwrap();
/// assert_eq!(doc.root().as_list().unwrap().len(), 3);
/// ```
///
/// # Errors
///
/// Returns a position-annotated [`Error`] if the input is not a valid
/// MINION document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(input: &str) -> Result<Document> {
    Parser::new().read(input)
}

/// Serializes a document to compact MINION text (no inserted whitespace).
///
/// # Errors
///
/// Fails if the tree contains a `Null` node.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(doc: &Document) -> Result<String> {
    doc.dump(None)
}

/// Serializes a document to pretty-printed MINION text (2-space indent).
///
/// # Errors
///
/// Fails if the tree contains a `Null` node.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(doc: &Document) -> Result<String> {
    doc.dump(Some(2))
}

/// Serializes a document with a custom indent width per nesting level.
///
/// A width of 0 separates elements with bare newlines.
///
/// # Errors
///
/// Fails if the tree contains a `Null` node.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_indent(doc: &Document, width: usize) -> Result<String> {
    doc.dump(Some(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_dump_roundtrip() {
        let doc = from_str(r#"{a: "1", b: [x, y]}"#).unwrap();
        let compact = to_string(&doc).unwrap();
        assert_eq!(compact, r#"{"a":"1","b":["x","y"]}"#);
        let doc2 = from_str(&compact).unwrap();
        assert_eq!(to_string(&doc2).unwrap(), compact);
    }

    #[test]
    fn test_pretty_matches_compact_content() {
        let doc = from_str("[a, b]").unwrap();
        assert_eq!(to_string(&doc).unwrap(), r#"["a","b"]"#);
        assert_eq!(to_string_pretty(&doc).unwrap(), "[\n  \"a\",\n  \"b\"\n]");
        assert_eq!(
            to_string_with_indent(&doc, 0).unwrap(),
            "[\n\"a\",\n\"b\"\n]"
        );
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(from_str("").is_err());
        assert!(from_str("# only a comment\n").is_err());
    }

    #[test]
    fn test_macro_example() {
        let doc = from_str("&x: \"v\", [&x, &x]").unwrap();
        assert_eq!(to_string(&doc).unwrap(), r#"["v","v"]"#);
    }
}
