//! Reconstruction of a nested [`Tree`] from flat datums.
//!
//! Each key is split on `.`: every segment but the last names a branch, the
//! last names the leaf. Datums are applied in document order, so a repeated
//! path keeps the last value. A path may never be both a leaf and a branch.

use crate::map::{Entry, Tree};
use crate::{Datum, Error, Result};
use log::{debug, trace};

/// Builds a nested tree from datums in order.
///
/// # Examples
///
/// ```rust
/// use serde_knot::{build_tree, Datum, Value};
///
/// let tree = build_tree(&[Datum::new("a.b.c", 1)]).unwrap();
/// let leaf = tree.get_path("a.b.c").and_then(|e| e.as_value());
/// assert_eq!(leaf, Some(&Value::Number(1.0)));
/// ```
///
/// # Errors
///
/// Returns [`Error::StructuralConflict`] when one datum stores a value at a
/// path another datum needs as a branch, in either order.
///
/// ```rust
/// use serde_knot::{build_tree, Datum, Error};
///
/// let err = build_tree(&[Datum::new("a", 1), Datum::new("a.b", 2)]).unwrap_err();
/// assert!(matches!(err, Error::StructuralConflict { .. }));
/// ```
pub fn build_tree(datums: &[Datum]) -> Result<Tree> {
    let mut root = Tree::new();
    for datum in datums {
        insert_datum(&mut root, datum)?;
    }
    debug!(
        "built tree with {} top-level fields from {} datums",
        root.len(),
        datums.len()
    );
    Ok(root)
}

fn insert_datum(root: &mut Tree, datum: &Datum) -> Result<()> {
    let key = datum.key();
    // rsplit_once keeps the empty-key and no-dot cases on the same path
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };

    let mut current = root;
    let mut consumed = 0;
    if let Some(parents) = parents {
        for segment in parents.split('.') {
            consumed += segment.len();
            let path = &key[..consumed];
            consumed += 1;

            current = match current
                .entry(segment.to_string())
                .or_insert_with(|| Entry::Branch(Tree::new()))
            {
                Entry::Branch(child) => child,
                Entry::Leaf(_) => return Err(Error::structural_conflict(key, path)),
            };
        }
    }

    if let Some(Entry::Branch(_)) = current.get(leaf) {
        return Err(Error::structural_conflict(key, key));
    }
    if current
        .insert(leaf.to_string(), Entry::Leaf(datum.value().clone()))
        .is_some()
    {
        trace!("'{}' overwritten by a later datum", key);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    fn leaf(tree: &Tree, path: &str) -> Option<Value> {
        tree.get_path(path).and_then(|e| e.as_value()).cloned()
    }

    #[test]
    fn test_single_segment() {
        let tree = build_tree(&[Datum::new("a", 1)]).unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(leaf(&tree, "a"), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_three_levels() {
        let tree = build_tree(&[Datum::new("a.b.c", 1)]).unwrap();
        let a = tree.get("a").and_then(Entry::as_tree).unwrap();
        let b = a.get("b").and_then(Entry::as_tree).unwrap();
        assert_eq!(b.get("c"), Some(&Entry::Leaf(Value::Number(1.0))));
    }

    #[test]
    fn test_siblings_share_branch() {
        let datums = vec![
            Datum::new("user.name", "Cansu"),
            Datum::new("user.age", 25),
            Datum::new("user.location", "Istanbul"),
        ];
        let tree = build_tree(&datums).unwrap();
        let user = tree.get("user").and_then(Entry::as_tree).unwrap();
        let keys: Vec<_> = user.keys().cloned().collect();
        assert_eq!(keys, vec!["name", "age", "location"]);
    }

    #[test]
    fn test_last_write_wins() {
        let datums = vec![
            Datum::new("a.b", 1),
            Datum::new("c", 2),
            Datum::new("a.b", 3),
        ];
        let tree = build_tree(&datums).unwrap();
        assert_eq!(leaf(&tree, "a.b"), Some(Value::Number(3.0)));
        let keys: Vec<_> = tree.keys().cloned().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_leaf_then_branch_conflicts() {
        let err = build_tree(&[Datum::new("a", 1), Datum::new("a.b", 2)]).unwrap_err();
        assert_eq!(err, Error::structural_conflict("a.b", "a"));
    }

    #[test]
    fn test_branch_then_leaf_conflicts() {
        let err = build_tree(&[Datum::new("a.b.c", 1), Datum::new("a.b", 2)]).unwrap_err();
        assert_eq!(err, Error::structural_conflict("a.b", "a.b"));
    }

    #[test]
    fn test_branch_reused_in_first_seen_order() {
        let tree = build_tree(&[
            Datum::new("a.x", 1),
            Datum::new("b", 2),
            Datum::new("a.y", 3),
            Datum::new("a.x", 4),
        ])
        .unwrap();
        assert_eq!(tree.keys().cloned().collect::<Vec<_>>(), vec!["a", "b"]);
        let a = tree.get("a").and_then(Entry::as_tree).unwrap();
        assert_eq!(a.keys().cloned().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(leaf(&tree, "a.x"), Some(Value::Number(4.0)));
    }

    #[test]
    fn test_deep_conflict_reports_prefix() {
        let err = build_tree(&[Datum::new("x.y", 1), Datum::new("x.y.z.w", 2)]).unwrap_err();
        assert_eq!(err, Error::structural_conflict("x.y.z.w", "x.y"));
    }

    #[test]
    fn test_empty_segments_are_plain_field_names() {
        let tree = build_tree(&[Datum::new("a..b", 1), Datum::new("", 2)]).unwrap();
        assert_eq!(leaf(&tree, "a..b"), Some(Value::Number(1.0)));
        assert_eq!(tree.get(""), Some(&Entry::Leaf(Value::Number(2.0))));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(&[]).unwrap().is_empty());
    }
}
