//! The MINION value model: an arena-backed document tree.
//!
//! A parse produces exactly one [`Document`]: an arena of [`Node`]s plus the
//! handle of the root node. Within a document, ownership is tree-shaped with
//! one exception: a node reached through a macro reference has more than one
//! incoming edge. The arena, not any single tree edge, owns every node, so
//! dropping the `Document` frees each allocation exactly once no matter how
//! many edges point at it. Handles ([`NodeId`]) are plain integers; sharing
//! a subtree is copying a handle.
//!
//! ## Navigating
//!
//! ```rust
//! use minion::from_str;
//!
//! let doc = from_str(r#"{name: "Alice", tags: [admin, dev]}"#).unwrap();
//! let root = doc.root();
//! assert_eq!(root.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! let tags: Vec<_> = root
//!     .get("tags")
//!     .and_then(|v| v.as_list())
//!     .unwrap()
//!     .filter_map(|v| v.as_str().map(str::to_string))
//!     .collect();
//! assert_eq!(tags, vec!["admin", "dev"]);
//! ```
//!
//! ## Building
//!
//! [`DocumentBuilder`] constructs documents programmatically. Sharing and
//! deep-copying are separate, explicitly named operations: [`DocumentBuilder::share`]
//! copies a handle (both edges point at the same node), while
//! [`DocumentBuilder::deep_copy`] clones the whole subtree into fresh slots.
//!
//! ```rust
//! use minion::DocumentBuilder;
//!
//! let mut b = DocumentBuilder::new();
//! let v = b.string("v");
//! let shared = b.share(v);
//! let root = b.list([v, shared]);
//! let doc = b.finish(root);
//! assert_eq!(doc.dump(None).unwrap(), r#"["v","v"]"#);
//! ```

use crate::error::{Error, Result};
use crate::map::MinionMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// Handle of a node in a document's arena.
///
/// Handles are only meaningful for the document (or builder) that issued
/// them; indexing another document with a foreign handle is a logic error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// A single value node.
///
/// `Null` marks the absence of content: it never results from parsing (an
/// empty document is a parse error) and cannot be dumped. It exists so that
/// a default document and programmatically built placeholders are
/// representable.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Node {
    #[default]
    Null,
    Str(String),
    List(Vec<NodeId>),
    Map(MinionMap),
}

impl Node {
    /// Returns `true` if this node is `Null`.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Returns `true` if this node is a string.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Node::Str(_))
    }

    /// Returns `true` if this node is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Node::List(_))
    }

    /// Returns `true` if this node is a map.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }
}

/// One parsed (or built) MINION document: an arena of nodes and a root.
///
/// The default document has a `Null` root; it cannot be dumped.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Document {
            nodes: vec![Node::Null],
            root: NodeId(0),
        }
    }
}

impl Document {
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Document { nodes, root }
    }

    /// Handle of the root node.
    #[must_use]
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// A reference to the root value.
    #[must_use]
    pub fn root(&self) -> ValueRef<'_> {
        self.value(self.root)
    }

    /// A reference to the value behind `id`.
    #[must_use]
    pub fn value(&self, id: NodeId) -> ValueRef<'_> {
        ValueRef { doc: self, id }
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by a different document.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    /// Number of arena slots, including nodes only reachable through macro
    /// sharing and orphaned values of macros that were never referenced.
    /// Every slot is freed exactly once when the document drops.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Produces a fully independent document whose root is a deep copy of
    /// the subtree at `id`: no nodes are shared with `self` or within the
    /// copy, so it outlives the original freely.
    #[must_use]
    pub fn deep_copy(&self, id: NodeId) -> Document {
        let mut builder = DocumentBuilder::new();
        let root = self.copy_into(id, &mut builder);
        builder.finish(root)
    }

    fn copy_into(&self, id: NodeId, builder: &mut DocumentBuilder) -> NodeId {
        match self.node(id) {
            Node::Null => builder.null(),
            Node::Str(s) => builder.string(s.clone()),
            Node::List(items) => {
                let copies: Vec<NodeId> = items
                    .iter()
                    .map(|&item| self.copy_into(item, builder))
                    .collect();
                builder.list(copies)
            }
            Node::Map(entries) => {
                let copies: MinionMap = entries
                    .iter()
                    .map(|(key, &value)| (key.clone(), self.copy_into(value, builder)))
                    .collect();
                builder.push(Node::Map(copies))
            }
        }
    }

    /// Serializes this document to MINION text.
    ///
    /// `indent = None` produces the compact form; `Some(width)` pretty-prints
    /// with `width` spaces per nesting level (`Some(0)` is newline-separated
    /// without padding).
    ///
    /// # Errors
    ///
    /// Fails without partial output if the tree contains a `Null` node.
    pub fn dump(&self, indent: Option<usize>) -> Result<String> {
        crate::ser::Dumper::new()
            .dump(self, self.root, indent)
            .map(str::to_string)
    }
}

/// A borrowed view of one value inside a [`Document`].
#[derive(Clone, Copy, Debug)]
pub struct ValueRef<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> ValueRef<'a> {
    /// The handle of this value.
    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The underlying node.
    #[must_use]
    pub fn node(&self) -> &'a Node {
        self.doc.node(self.id)
    }

    /// Returns `true` if this value is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.node().is_null()
    }

    /// If this value is a string, returns it.
    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self.node() {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    /// If this value is a list, returns an iterator over its elements.
    #[must_use]
    pub fn as_list(&self) -> Option<ListIter<'a>> {
        match self.node() {
            Node::List(items) => Some(ListIter {
                doc: self.doc,
                ids: items.iter(),
            }),
            _ => None,
        }
    }

    /// If this value is a map, returns it.
    #[must_use]
    pub fn as_map(&self) -> Option<&'a MinionMap> {
        match self.node() {
            Node::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// If this value is a map, returns an iterator over its entries in
    /// insertion order.
    #[must_use]
    pub fn entries(&self) -> Option<MapIter<'a>> {
        match self.node() {
            Node::Map(entries) => Some(MapIter {
                doc: self.doc,
                entries: entries.iter(),
            }),
            _ => None,
        }
    }

    /// Map lookup: the value stored under `key`, if this is a map.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<ValueRef<'a>> {
        match self.node() {
            Node::Map(entries) => entries.get(key).map(|id| self.doc.value(id)),
            _ => None,
        }
    }

    /// List indexing: the `index`-th element, if this is a list.
    #[must_use]
    pub fn index(&self, index: usize) -> Option<ValueRef<'a>> {
        match self.node() {
            Node::List(items) => items.get(index).map(|&id| self.doc.value(id)),
            _ => None,
        }
    }
}

/// Iterator over the elements of a list value.
pub struct ListIter<'a> {
    doc: &'a Document,
    ids: std::slice::Iter<'a, NodeId>,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = ValueRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.ids.next().map(|&id| self.doc.value(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl ExactSizeIterator for ListIter<'_> {}

/// Iterator over the entries of a map value, in insertion order.
pub struct MapIter<'a> {
    doc: &'a Document,
    entries: indexmap::map::Iter<'a, String, NodeId>,
}

impl<'a> Iterator for MapIter<'a> {
    type Item = (&'a str, ValueRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries
            .next()
            .map(|(key, &id)| (key.as_str(), self.doc.value(id)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for MapIter<'_> {}

/// Builds documents programmatically, slot by slot.
///
/// Handles returned by the builder are valid for the builder and for the
/// document produced by [`DocumentBuilder::finish`].
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    nodes: Vec<Node>,
}

impl DocumentBuilder {
    #[must_use]
    pub fn new() -> Self {
        DocumentBuilder::default()
    }

    pub(crate) fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Allocates a `Null` placeholder.
    pub fn null(&mut self) -> NodeId {
        self.push(Node::Null)
    }

    /// Allocates a string node.
    pub fn string(&mut self, text: impl Into<String>) -> NodeId {
        self.push(Node::Str(text.into()))
    }

    /// Allocates a list node over already-built elements.
    pub fn list(&mut self, items: impl IntoIterator<Item = NodeId>) -> NodeId {
        self.push(Node::List(items.into_iter().collect()))
    }

    /// Allocates a map node over already-built values.
    ///
    /// # Errors
    ///
    /// Fails if two entries carry the same key (byte-exact comparison).
    pub fn map(&mut self, entries: impl IntoIterator<Item = (String, NodeId)>) -> Result<NodeId> {
        let mut map = MinionMap::new();
        for (key, value) in entries {
            if map.insert(key.clone(), value).is_some() {
                return Err(Error::build(format!("map key already defined: {key}")));
            }
        }
        Ok(self.push(Node::Map(map)))
    }

    /// Shares a subtree: returns a handle to the same node, so the new edge
    /// and the old one point at one allocation. The arena still frees it
    /// exactly once.
    #[must_use]
    pub fn share(&self, id: NodeId) -> NodeId {
        id
    }

    /// Deep-copies a subtree into fresh slots; the result shares nothing
    /// with the source handle.
    pub fn deep_copy(&mut self, id: NodeId) -> NodeId {
        let node = self.nodes[id.0 as usize].clone();
        match node {
            Node::Null => self.push(Node::Null),
            Node::Str(s) => self.push(Node::Str(s)),
            Node::List(items) => {
                let copies: Vec<NodeId> =
                    items.into_iter().map(|item| self.deep_copy(item)).collect();
                self.push(Node::List(copies))
            }
            Node::Map(entries) => {
                let copies: MinionMap = entries
                    .into_iter()
                    .map(|(key, value)| (key, self.deep_copy(value)))
                    .collect();
                self.push(Node::Map(copies))
            }
        }
    }

    /// Finishes the document with `root` as its root value.
    #[must_use]
    pub fn finish(self, root: NodeId) -> Document {
        Document::from_parts(self.nodes, root)
    }
}

impl Serialize for ValueRef<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.node() {
            Node::Null => serializer.serialize_unit(),
            Node::Str(s) => serializer.serialize_str(s),
            Node::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for &item in items {
                    seq.serialize_element(&self.doc.value(item))?;
                }
                seq.end()
            }
            Node::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, &value) in entries {
                    map.serialize_entry(key, &self.doc.value(value))?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.root().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_shared_handle() {
        let mut b = DocumentBuilder::new();
        let v = b.string("v");
        let shared = b.share(v);
        assert_eq!(v, shared);
        let root = b.list([v, shared]);
        let doc = b.finish(root);
        // one string slot, one list slot: the string is shared, not copied
        assert_eq!(doc.node_count(), 2);
        let items: Vec<_> = doc.root().as_list().unwrap().collect();
        assert_eq!(items[0].as_str(), Some("v"));
        assert_eq!(items[1].as_str(), Some("v"));
        assert_eq!(items[0].id(), items[1].id());
    }

    #[test]
    fn test_builder_deep_copy_is_independent() {
        let mut b = DocumentBuilder::new();
        let v = b.string("v");
        let copy = b.deep_copy(v);
        assert_ne!(v, copy);
        let root = b.list([v, copy]);
        let doc = b.finish(root);
        assert_eq!(doc.node_count(), 3);
        let items: Vec<_> = doc.root().as_list().unwrap().collect();
        assert_ne!(items[0].id(), items[1].id());
        assert_eq!(items[0].as_str(), items[1].as_str());
    }

    #[test]
    fn test_builder_duplicate_key_rejected() {
        let mut b = DocumentBuilder::new();
        let one = b.string("1");
        let two = b.string("2");
        let result = b.map([("k".to_string(), one), ("k".to_string(), two)]);
        assert!(matches!(result, Err(Error::Build(_))));
    }

    #[test]
    fn test_document_deep_copy_unshares() {
        let mut b = DocumentBuilder::new();
        let v = b.string("v");
        let root = b.list([v, b.share(v)]);
        let doc = b.finish(root);

        let copy = doc.deep_copy(doc.root_id());
        let items: Vec<_> = copy.root().as_list().unwrap().collect();
        assert_ne!(items[0].id(), items[1].id());
        assert_eq!(items[0].as_str(), Some("v"));
        drop(doc);
        assert_eq!(copy.root().as_list().unwrap().len(), 2);
    }

    #[test]
    fn test_dump_returns_owned_text() {
        let mut b = DocumentBuilder::new();
        let root = b.string("v");
        let doc = b.finish(root);
        let text: String = doc.dump(None).unwrap();
        let again = doc.dump(None).unwrap();
        assert_eq!(text, "\"v\"");
        assert_eq!(again, text);
    }

    #[test]
    fn test_default_document_is_null() {
        let doc = Document::default();
        assert!(doc.root().is_null());
        assert!(doc.dump(None).is_err());
    }

    #[test]
    fn test_map_navigation() {
        let mut b = DocumentBuilder::new();
        let one = b.string("1");
        let two = b.string("2");
        let root = b
            .map([("a".to_string(), one), ("b".to_string(), two)])
            .unwrap();
        let doc = b.finish(root);
        assert_eq!(doc.root().get("a").and_then(|v| v.as_str()), Some("1"));
        assert_eq!(doc.root().get("missing").map(|v| v.id()), None);
        let keys: Vec<_> = doc.root().entries().unwrap().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_serde_serialize_to_json() {
        let mut b = DocumentBuilder::new();
        let name = b.string("Alice");
        let tag = b.string("admin");
        let tags = b.list([tag]);
        let root = b
            .map([("name".to_string(), name), ("tags".to_string(), tags)])
            .unwrap();
        let doc = b.finish(root);
        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(json, r#"{"name":"Alice","tags":["admin"]}"#);
    }
}
