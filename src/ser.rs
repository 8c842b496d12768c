//! MINION serialization.
//!
//! [`Dumper`] renders a document tree back to text, either compact (no
//! inserted whitespace) or indented (each nesting level starts its elements
//! on a fresh line padded with `depth * width` spaces). String rendering is
//! the exact syntactic inverse of the lexer's escape decoding, so a
//! dump-parse cycle preserves every value byte for byte.
//!
//! ```rust
//! use minion::{from_str, Dumper};
//!
//! let doc = from_str("[a, b]").unwrap();
//! let mut dumper = Dumper::new();
//! assert_eq!(
//!     dumper.dump(&doc, doc.root_id(), None).unwrap(),
//!     r#"["a","b"]"#
//! );
//! assert_eq!(
//!     dumper.dump(&doc, doc.root_id(), Some(2)).unwrap(),
//!     "[\n  \"a\",\n  \"b\"\n]"
//! );
//! ```

use crate::error::{Error, Result};
use crate::map::MinionMap;
use crate::value::{Document, Node, NodeId};
use std::fmt::Write as _;

/// Serializes document trees to MINION text.
///
/// The output buffer is reused across [`Dumper::dump`] calls. A dumper is
/// not meant to be shared between threads; use one per thread.
#[derive(Debug, Default)]
pub struct Dumper {
    buffer: String,
    indent: Option<usize>,
    depth: usize,
}

impl Dumper {
    #[must_use]
    pub fn new() -> Self {
        Dumper::default()
    }

    /// Renders the subtree of `doc` rooted at `id`.
    ///
    /// `indent = None` is the compact form; `Some(width)` pretty-prints with
    /// `width` spaces per level (`Some(0)` separates with bare newlines).
    /// The returned slice borrows the dumper's buffer and is valid until the
    /// next call.
    ///
    /// # Errors
    ///
    /// Fails on a `Null` node anywhere in the subtree; no partial text is
    /// returned.
    pub fn dump(&mut self, doc: &Document, id: NodeId, indent: Option<usize>) -> Result<&str> {
        self.indent = indent;
        self.depth = 0;
        self.buffer.clear();
        self.dump_value(doc, id)?;
        Ok(&self.buffer)
    }

    fn dump_value(&mut self, doc: &Document, id: NodeId) -> Result<()> {
        match doc.node(id) {
            Node::Str(s) => {
                self.dump_string(s);
                Ok(())
            }
            Node::List(items) => self.dump_list(doc, items),
            Node::Map(entries) => self.dump_map(doc, entries),
            Node::Null => Err(Error::dump("cannot render a null value")),
        }
    }

    /// Re-escapes a string. Inverse of the lexer's escape decoding: control
    /// bytes other than the named escapes come out as `\u00XX` with
    /// uppercase hex digits, everything from 32 up except `"`, `\` and
    /// byte 127 is copied verbatim.
    fn dump_string(&mut self, source: &str) {
        self.buffer.push('"');
        for ch in source.chars() {
            match ch {
                '"' => self.buffer.push_str("\\\""),
                '\\' => self.buffer.push_str("\\\\"),
                '\n' => self.buffer.push_str("\\n"),
                '\t' => self.buffer.push_str("\\t"),
                '\u{08}' => self.buffer.push_str("\\b"),
                '\u{0C}' => self.buffer.push_str("\\f"),
                '\r' => self.buffer.push_str("\\r"),
                '\u{7F}' => self.buffer.push_str("\\u007F"),
                c if (c as u32) < 32 => {
                    // writing into a String cannot fail
                    let _ = write!(self.buffer, "\\u00{:02X}", c as u32);
                }
                c => self.buffer.push(c),
            }
        }
        self.buffer.push('"');
    }

    /// In indented mode, starts a fresh line padded for the current depth.
    fn pad(&mut self) {
        if let Some(width) = self.indent {
            self.buffer.push('\n');
            for _ in 0..self.depth * width {
                self.buffer.push(' ');
            }
        }
    }

    fn dump_list(&mut self, doc: &Document, items: &[NodeId]) -> Result<()> {
        self.buffer.push('[');
        if !items.is_empty() {
            self.depth += 1;
            for &item in items {
                self.pad();
                self.dump_value(doc, item)?;
                self.buffer.push(',');
            }
            self.depth -= 1;
            self.buffer.pop(); // the final trailing separator
            self.pad();
        }
        self.buffer.push(']');
        Ok(())
    }

    fn dump_map(&mut self, doc: &Document, entries: &MinionMap) -> Result<()> {
        self.buffer.push('{');
        if !entries.is_empty() {
            self.depth += 1;
            for (key, &value) in entries {
                self.pad();
                self.dump_string(key);
                self.buffer.push(':');
                if self.indent.is_some() {
                    self.buffer.push(' ');
                }
                self.dump_value(doc, value)?;
                self.buffer.push(',');
            }
            self.depth -= 1;
            self.buffer.pop(); // the final trailing separator
            self.pad();
        }
        self.buffer.push('}');
        Ok(())
    }
}
