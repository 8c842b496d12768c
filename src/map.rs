//! Ordered map type for MINION maps.
//!
//! This module provides [`MinionMap`], a wrapper around [`IndexMap`] that
//! maintains insertion order for map entries. MINION maps are ordered: a
//! parsed map serializes its entries in the order they appeared in the
//! source, and key lookups during parsing (duplicate detection) are O(1).
//!
//! Values are [`NodeId`] handles into the owning document's arena, not
//! inline values; see [`crate::value`] for the sharing rules.

use crate::value::NodeId;
use indexmap::IndexMap;

/// An insertion-ordered map of string keys to arena handles.
///
/// Keys are unique (case-sensitive, byte-exact); uniqueness is enforced by
/// the parser and builder at construction time.
///
/// # Examples
///
/// ```rust
/// use minion::from_str;
///
/// let doc = from_str("{b: \"1\", a: \"2\"}").unwrap();
/// let map = doc.root().as_map().unwrap();
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["b", "a"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MinionMap(IndexMap<String, NodeId>);

impl MinionMap {
    /// Creates an empty `MinionMap`.
    #[must_use]
    pub fn new() -> Self {
        MinionMap(IndexMap::new())
    }

    /// Creates an empty `MinionMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        MinionMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous handle if the key
    /// was already present.
    pub fn insert(&mut self, key: String, value: NodeId) -> Option<NodeId> {
        self.0.insert(key, value)
    }

    /// Returns the handle stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<NodeId> {
        self.0.get(key).copied()
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, NodeId> {
        self.0.keys()
    }

    /// Returns an iterator over the key-handle pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, NodeId> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a MinionMap {
    type Item = (&'a String, &'a NodeId);
    type IntoIter = indexmap::map::Iter<'a, String, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MinionMap {
    type Item = (String, NodeId);
    type IntoIter = indexmap::map::IntoIter<String, NodeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, NodeId)> for MinionMap {
    fn from_iter<T: IntoIterator<Item = (String, NodeId)>>(iter: T) -> Self {
        MinionMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_preserved() {
        let mut map = MinionMap::new();
        map.insert("z".to_string(), NodeId(0));
        map.insert("a".to_string(), NodeId(1));
        map.insert("m".to_string(), NodeId(2));
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_duplicate_detection() {
        let mut map = MinionMap::new();
        assert!(map.insert("k".to_string(), NodeId(0)).is_none());
        assert!(map.contains_key("k"));
        assert!(!map.contains_key("K"));
        assert!(map.insert("k".to_string(), NodeId(1)).is_some());
    }
}
