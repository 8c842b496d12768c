//! MINION parsing.
//!
//! [`Parser::read`] turns one document's text into a [`Document`]: a loop of
//! macro definitions followed by exactly one root value, then end of input.
//! Lists and maps are parsed by recursive descent over the tokens produced
//! by the lexer; macro references are resolved against the table of macros
//! defined earlier in the same document, sharing the referenced subtree's
//! handle instead of copying it.
//!
//! Every error aborts the parse immediately. The in-progress arena is
//! dropped wholesale, so no allocation leaks on any error path and no
//! partial result is ever observable.
//!
//! A `Parser` keeps its macro table allocation across calls; it is cheap to
//! reuse for many documents but must not be shared between threads without
//! external synchronization. Independent documents parse safely on
//! independent parsers.
//!
//! ```rust
//! use minion::Parser;
//!
//! let mut parser = Parser::new();
//! let doc = parser.read("&greeting: \"hi\", [&greeting, &greeting]").unwrap();
//! assert_eq!(doc.dump(None).unwrap(), r#"["hi","hi"]"#);
//! ```

use crate::error::{Error, Result};
use crate::lexer::{Cursor, Token};
use crate::map::MinionMap;
use crate::value::{Document, Node, NodeId};
use std::collections::HashMap;

/// Default maximum nesting depth for lists and maps.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// The MINION parser.
///
/// Working state (the macro table) is reused across [`Parser::read`] calls.
#[derive(Debug)]
pub struct Parser {
    macros: HashMap<String, NodeId>,
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Parser {
            macros: HashMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Parser::default()
    }

    /// Sets the maximum nesting depth (default [`DEFAULT_MAX_DEPTH`]).
    ///
    /// Input nesting deeper than this fails with [`Error::DepthExceeded`]
    /// instead of growing the call stack without bound.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parses one complete document.
    ///
    /// On success the returned [`Document`] owns every node built during the
    /// parse, including values of macros that were never referenced; all of
    /// them are freed exactly once when it drops. The macro table itself is
    /// discarded at the end of the call.
    ///
    /// # Errors
    ///
    /// Returns a [`Lex`](Error::Lex), [`Syntax`](Error::Syntax),
    /// [`Semantic`](Error::Semantic) or
    /// [`DepthExceeded`](Error::DepthExceeded) error; there is no partial
    /// result and parsing does not resume.
    pub fn read(&mut self, input: &str) -> Result<Document> {
        self.macros.clear();
        let mut run = Run {
            cursor: Cursor::new(input),
            nodes: Vec::new(),
            macros: &mut self.macros,
            max_depth: self.max_depth,
        };
        let root = run.document()?;
        let nodes = run.nodes;
        self.macros.clear();
        Ok(Document::from_parts(nodes, root))
    }
}

/// One parsed item: either data or a structural marker.
enum Item {
    /// A string, still unattached (lists, maps and the document root decide
    /// whether it becomes a node or, for map keys, stays text).
    Str(String),
    /// A fully built value already in the arena: a list, a map, or a
    /// resolved macro reference.
    Value(NodeId),
    /// An unresolved macro name.
    Macro(String),
    ListEnd,
    MapEnd,
    Comma,
    Colon,
    End,
}

struct Run<'a, 'p> {
    cursor: Cursor<'a>,
    nodes: Vec<Node>,
    macros: &'p mut HashMap<String, NodeId>,
    max_depth: usize,
}

impl Run<'_, '_> {
    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            let pos = self.cursor.here();
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
                line: pos.line,
                byte: pos.byte,
            });
        }
        Ok(())
    }

    /// Reads the next item, recursing into list/map parsing on the opening
    /// bracket tokens.
    fn next_item(&mut self, depth: usize) -> Result<Item> {
        match self.cursor.next_token()? {
            Token::Str(s) => Ok(Item::Str(s)),
            Token::Macro(name) => Ok(Item::Macro(name)),
            Token::ListStart => self.parse_list(depth + 1).map(Item::Value),
            Token::MapStart => self.parse_map(depth + 1).map(Item::Value),
            Token::ListEnd => Ok(Item::ListEnd),
            Token::MapEnd => Ok(Item::MapEnd),
            Token::Comma => Ok(Item::Comma),
            Token::Colon => Ok(Item::Colon),
            Token::End => Ok(Item::End),
        }
    }

    /// Parses a list; the opening `[` has already been consumed.
    ///
    /// A `,` before the closing bracket is allowed.
    fn parse_list(&mut self, depth: usize) -> Result<NodeId> {
        self.check_depth(depth)?;
        let mut items: Vec<NodeId> = Vec::new();
        let mut pos = self.cursor.here();
        let mut item = self.next_item(depth)?;
        loop {
            match item {
                Item::Str(s) => {
                    item = Item::Value(self.push(Node::Str(s)));
                }
                Item::Value(id) => {
                    items.push(id);
                    pos = self.cursor.here();
                    match self.next_item(depth)? {
                        Item::ListEnd => break,
                        Item::Comma => {
                            pos = self.cursor.here();
                            item = self.next_item(depth)?;
                        }
                        _ => {
                            return self
                                .cursor
                                .syntax_err(pos, "reading list, expecting ',' or ']'")
                        }
                    }
                }
                Item::Macro(name) => match self.macros.get(&name) {
                    // The shared subtree's handle is appended; nothing is
                    // copied and the arena frees the node once.
                    Some(&id) => item = Item::Value(id),
                    None => {
                        return self
                            .cursor
                            .semantic_err(pos, format!("undefined macro name: &{name}"))
                    }
                },
                Item::ListEnd => break,
                _ => return self.cursor.syntax_err(pos, "expecting list item or ']'"),
            }
        }
        Ok(self.push(Node::List(items)))
    }

    /// Parses a map; the opening `{` has already been consumed.
    ///
    /// Entries are `key ':' value` with keys checked for uniqueness against
    /// all keys already accumulated in this map literal. A `,` before the
    /// closing bracket is allowed.
    fn parse_map(&mut self, depth: usize) -> Result<NodeId> {
        self.check_depth(depth)?;
        let mut entries = MinionMap::new();
        let mut pos = self.cursor.here();
        let mut item = self.next_item(depth)?;
        loop {
            match item {
                Item::Str(key) => {
                    if entries.contains_key(&key) {
                        return self
                            .cursor
                            .semantic_err(pos, format!("map key already defined: {key}"));
                    }
                    pos = self.cursor.here();
                    if !matches!(self.next_item(depth)?, Item::Colon) {
                        return self.cursor.syntax_err(pos, "expecting ':' in map item");
                    }
                    pos = self.cursor.here();
                    let value = match self.next_item(depth)? {
                        Item::Str(s) => self.push(Node::Str(s)),
                        Item::Value(id) => id,
                        Item::Macro(name) => match self.macros.get(&name) {
                            Some(&id) => id,
                            None => {
                                return self.cursor.semantic_err(
                                    pos,
                                    format!("expecting map value, undefined macro name: &{name}"),
                                )
                            }
                        },
                        _ => return self.cursor.syntax_err(pos, "expecting map value"),
                    };
                    entries.insert(key, value);
                    pos = self.cursor.here();
                    match self.next_item(depth)? {
                        Item::MapEnd => break,
                        Item::Comma => {
                            pos = self.cursor.here();
                            item = self.next_item(depth)?;
                        }
                        _ => {
                            return self
                                .cursor
                                .syntax_err(pos, "reading map, expecting ',' or '}'")
                        }
                    }
                }
                Item::MapEnd => break,
                _ => return self.cursor.syntax_err(pos, "reading map, expecting a key"),
            }
        }
        Ok(self.push(Node::Map(entries)))
    }

    /// Document level: `(macro-def)* value end-of-input`.
    fn document(&mut self) -> Result<NodeId> {
        let root;
        loop {
            let pos = self.cursor.here();
            match self.next_item(0)? {
                Item::Macro(name) => {
                    if self.macros.contains_key(&name) {
                        return self
                            .cursor
                            .semantic_err(pos, format!("macro name already defined: &{name}"));
                    }
                    let pos = self.cursor.here();
                    if !matches!(self.next_item(0)?, Item::Colon) {
                        return self
                            .cursor
                            .syntax_err(pos, "expecting ':' in macro definition");
                    }
                    let pos = self.cursor.here();
                    let value = match self.next_item(0)? {
                        Item::Str(s) => self.push(Node::Str(s)),
                        Item::Value(id) => id,
                        Item::Macro(reference) => match self.macros.get(&reference) {
                            Some(&id) => id,
                            None => {
                                return self.cursor.semantic_err(
                                    pos,
                                    format!(
                                        "in macro definition, undefined macro name: &{reference}"
                                    ),
                                )
                            }
                        },
                        _ => {
                            return self
                                .cursor
                                .syntax_err(pos, "in macro definition, expecting a value")
                        }
                    };
                    let pos = self.cursor.here();
                    if !matches!(self.next_item(0)?, Item::Comma) {
                        return self
                            .cursor
                            .syntax_err(pos, "after macro definition: expecting ','");
                    }
                    self.macros.insert(name, value);
                }
                Item::Str(s) => {
                    root = self.push(Node::Str(s));
                    break;
                }
                Item::Value(id) => {
                    root = id;
                    break;
                }
                Item::End => {
                    return self.cursor.syntax_err(pos, "document contains no main item")
                }
                _ => return self.cursor.syntax_err(pos, "invalid item"),
            }
        }
        let pos = self.cursor.here();
        match self.next_item(0)? {
            Item::End => Ok(root),
            _ => self
                .cursor
                .syntax_err(pos, "unexpected item after document item"),
        }
    }
}
