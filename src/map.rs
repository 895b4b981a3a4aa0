//! Ordered tree type for reconstructed Knot data.
//!
//! This module provides [`Tree`], a wrapper around [`IndexMap`] mapping one
//! key segment to an [`Entry`]: either a nested tree or a leaf [`Value`].
//!
//! ## Why IndexMap?
//!
//! Fields keep the order in which their first datum appeared, so a tree
//! flattens back into a document in the original order and serializes to
//! JSON deterministically.
//!
//! ## Examples
//!
//! ```rust
//! use serde_knot::{parse_tree, Value};
//!
//! let tree = parse_tree("user.name \"Cansu\"\nuser.age 25").unwrap();
//! assert_eq!(tree.get_path("user.age").and_then(|e| e.as_value()), Some(&Value::Number(25.0)));
//! ```

use crate::{Datum, Document, Value};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// One slot of a [`Tree`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Branch(Tree),
    Leaf(Value),
}

impl Entry {
    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Entry::Branch(_))
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Entry::Leaf(_))
    }

    #[must_use]
    pub fn as_tree(&self) -> Option<&Tree> {
        match self {
            Entry::Branch(tree) => Some(tree),
            Entry::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Entry::Leaf(value) => Some(value),
            Entry::Branch(_) => None,
        }
    }
}

impl Serialize for Entry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Entry::Branch(tree) => tree.serialize(serializer),
            Entry::Leaf(value) => value.serialize(serializer),
        }
    }
}

/// An ordered, nested mapping from key segment to [`Entry`].
///
/// # Examples
///
/// ```rust
/// use serde_knot::{Entry, Tree, Value};
///
/// let mut tree = Tree::new();
/// tree.insert("first".to_string(), Entry::Leaf(Value::from(1)));
/// tree.insert("second".to_string(), Entry::Leaf(Value::from(2)));
///
/// let keys: Vec<_> = tree.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tree(IndexMap<String, Entry>);

impl Tree {
    #[must_use]
    pub fn new() -> Self {
        Tree(IndexMap::new())
    }

    /// Inserts an entry, returning the previous one. An existing key keeps
    /// its position.
    pub fn insert(&mut self, key: String, entry: Entry) -> Option<Entry> {
        self.0.insert(key, entry)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.0.get(key)
    }

    pub(crate) fn entry(&mut self, key: String) -> indexmap::map::Entry<'_, String, Entry> {
        self.0.entry(key)
    }

    /// Looks up a dotted path such as `user.address.city`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::parse_tree;
    ///
    /// let tree = parse_tree("a.b.c 1").unwrap();
    /// assert!(tree.get_path("a.b").unwrap().is_branch());
    /// assert!(tree.get_path("a.b.c").unwrap().is_leaf());
    /// assert!(tree.get_path("a.x").is_none());
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Entry> {
        let mut segments = path.split('.');
        let mut entry = self.get(segments.next()?)?;
        for segment in segments {
            entry = entry.as_tree()?.get(segment)?;
        }
        Some(entry)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Entry> {
        self.0.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Entry> {
        self.0.iter()
    }

    /// Flattens the tree back into a document, depth first, in field order.
    ///
    /// Empty branches produce no datum.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::parse_tree;
    ///
    /// let tree = parse_tree("user.name \"Cansu\"\nuser.age 25\nactive true").unwrap();
    /// assert_eq!(tree.flatten().to_string(), "user.name \"Cansu\"\nuser.age 25\nactive true");
    /// ```
    #[must_use]
    pub fn flatten(&self) -> Document {
        let mut doc = Document::new();
        flatten_into(self, &mut String::new(), &mut doc);
        doc
    }
}

fn flatten_into(tree: &Tree, prefix: &mut String, doc: &mut Document) {
    for (key, entry) in tree.iter() {
        let restore = prefix.len();
        if !prefix.is_empty() {
            prefix.push('.');
        }
        prefix.push_str(key);
        match entry {
            Entry::Leaf(value) => doc.push(Datum::new(prefix.clone(), value.clone())),
            Entry::Branch(child) => flatten_into(child, prefix, doc),
        }
        prefix.truncate(restore);
    }
}

impl Serialize for Tree {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (k, v) in self.iter() {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl IntoIterator for Tree {
    type Item = (String, Entry);
    type IntoIter = indexmap::map::IntoIter<String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = (&'a String, &'a Entry);
    type IntoIter = indexmap::map::Iter<'a, String, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Entry)> for Tree {
    fn from_iter<T: IntoIterator<Item = (String, Entry)>>(iter: T) -> Self {
        Tree(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_existing_key_keeps_position() {
        let mut tree = Tree::new();
        tree.insert("a".to_string(), Entry::Leaf(Value::from(1)));
        tree.insert("b".to_string(), Entry::Leaf(Value::from(2)));
        let old = tree.insert("a".to_string(), Entry::Leaf(Value::from(3)));

        assert_eq!(old, Some(Entry::Leaf(Value::from(1))));
        let keys: Vec<_> = tree.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(tree.get("a"), Some(&Entry::Leaf(Value::from(3))));
    }

    #[test]
    fn test_flatten_skips_empty_branches() {
        let mut tree = Tree::new();
        tree.insert("empty".to_string(), Entry::Branch(Tree::new()));
        tree.insert("x".to_string(), Entry::Leaf(Value::from(true)));
        assert_eq!(tree.flatten().to_string(), "x true");
    }

    #[test]
    fn test_serialize_to_json() {
        let mut inner = Tree::new();
        inner.insert("b".to_string(), Entry::Leaf(Value::from("x")));
        let mut tree = Tree::new();
        tree.insert("a".to_string(), Entry::Branch(inner));

        assert_eq!(serde_json::to_string(&tree).unwrap(), r#"{"a":{"b":"x"}}"#);
    }
}
