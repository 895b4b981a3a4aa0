//! Field-addressable object graph built from a [`Tree`].
//!
//! [`Node`] is what application code usually walks: branches expose their
//! fields by name, sequences iterate in order and leaves hold a scalar.
//!
//! ```rust
//! use serde_knot::parse_node;
//!
//! let root = parse_node("user.name \"Cansu\"\nuser.interests [\"chess\" \"go\"]").unwrap();
//! assert_eq!(root["user"]["name"].as_str(), Some("Cansu"));
//! assert_eq!(root["user"]["interests"][1].as_str(), Some("go"));
//! ```

use crate::map::{Entry, Tree};
use crate::{Document, Result, Value};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::ops::Index;

/// A materialized node.
///
/// `Leaf` only ever wraps a scalar; collections become `Sequence`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Branch(IndexMap<String, Node>),
    Sequence(Vec<Node>),
    Leaf(Value),
}

impl Node {
    /// Materializes a single value. Collections turn into sequences,
    /// recursively.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Collection(items) => {
                Node::Sequence(items.into_iter().map(Node::from_value).collect())
            }
            scalar => Node::Leaf(scalar),
        }
    }

    /// Returns the named field of a branch.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::parse_node;
    ///
    /// let root = parse_node("a.b 1").unwrap();
    /// assert!(root.get("a").is_some());
    /// assert!(root.get("b").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Node> {
        match self {
            Node::Branch(fields) => fields.get(field),
            _ => None,
        }
    }

    /// Follows a dotted path of field names.
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Node> {
        path.split('.').try_fold(self, |node, field| node.get(field))
    }

    /// Returns the element at `index` of a sequence.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        match self {
            Node::Sequence(items) => items.get(index),
            _ => None,
        }
    }

    /// Iterates a sequence in order. Any other node yields nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::parse_node;
    ///
    /// let root = parse_node("xs [1 2 3]").unwrap();
    /// let sum: f64 = root["xs"].iter().filter_map(|n| n.as_f64()).sum();
    /// assert_eq!(sum, 6.0);
    /// ```
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        let items: &[Node] = match self {
            Node::Sequence(items) => items,
            _ => &[],
        };
        items.iter()
    }

    /// Field names of a branch, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        let fields = match self {
            Node::Branch(fields) => Some(fields.keys().map(String::as_str)),
            _ => None,
        };
        fields.into_iter().flatten()
    }

    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Node::Leaf(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        self.as_value().and_then(Value::as_f64)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_value().and_then(Value::as_bool)
    }

    #[must_use]
    pub const fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }

    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self, Node::Sequence(_))
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }
}

impl From<Tree> for Node {
    fn from(tree: Tree) -> Self {
        Node::Branch(
            tree.into_iter()
                .map(|(key, entry)| (key, Node::from(entry)))
                .collect(),
        )
    }
}

impl From<Entry> for Node {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Branch(tree) => Node::from(tree),
            Entry::Leaf(value) => Node::from_value(value),
        }
    }
}

/// Converts a tree into a root node.
///
/// # Examples
///
/// ```rust
/// use serde_knot::{build_tree, materialize, Datum};
///
/// let tree = build_tree(&[Datum::new("a.b", 1)]).unwrap();
/// let root = materialize(tree);
/// assert_eq!(root.get_path("a.b").and_then(|n| n.as_f64()), Some(1.0));
/// ```
#[must_use]
pub fn materialize(tree: Tree) -> Node {
    Node::from(tree)
}

/// Builds the tree for a document and converts it into a root node.
///
/// # Errors
///
/// Propagates [`Error::StructuralConflict`](crate::Error::StructuralConflict)
/// from tree building.
pub fn materialize_document(doc: &Document) -> Result<Node> {
    Ok(materialize(doc.to_tree()?))
}

impl Index<&str> for Node {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if the node is not a branch or has no such field.
    fn index(&self, field: &str) -> &Node {
        match self.get(field) {
            Some(node) => node,
            None => panic!("no field named '{}'", field),
        }
    }
}

impl Index<usize> for Node {
    type Output = Node;

    /// # Panics
    ///
    /// Panics if the node is not a sequence or the index is out of bounds.
    fn index(&self, index: usize) -> &Node {
        match self.get_index(index) {
            Some(node) => node,
            None => panic!("no element at index {}", index),
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::Branch(fields) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (k, v) in fields {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Node::Sequence(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Leaf(value) => value.serialize(serializer),
        }
    }
}
