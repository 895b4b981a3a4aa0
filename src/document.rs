//! Datums and documents: the flat, ordered output of the parser.
//!
//! A [`Document`] keeps datums in the order they appeared. Order matters:
//! when two datums name the same path, the later one wins once the document
//! is turned into a [`Tree`](crate::Tree).

use crate::{Tree, Value};
use std::fmt;

/// One `key value` line.
///
/// The key is kept exactly as written (dots included); [`Datum::segments`]
/// splits it.
///
/// # Examples
///
/// ```rust
/// use serde_knot::{Datum, Value};
///
/// let datum = Datum::new("user.name", Value::from("Cansu"));
/// assert_eq!(datum.segments().collect::<Vec<_>>(), vec!["user", "name"]);
/// assert_eq!(datum.to_string(), "user.name \"Cansu\"");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Datum {
    key: String,
    value: Value,
}

impl Datum {
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Datum {
            key: key.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Splits the key on `.`. Always yields at least one segment.
    pub fn segments(&self) -> std::str::Split<'_, char> {
        self.key.split('.')
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Value) {
        (self.key, self.value)
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key, self.value)
    }
}

impl<K: Into<String>, V: Into<Value>> From<(K, V)> for Datum {
    fn from((key, value): (K, V)) -> Self {
        Datum::new(key, value)
    }
}

/// An ordered sequence of datums.
///
/// # Examples
///
/// ```rust
/// use serde_knot::parse_document;
///
/// let doc = parse_document("a 1\nb 2").unwrap();
/// let keys: Vec<_> = doc.iter().map(|d| d.key()).collect();
/// assert_eq!(keys, vec!["a", "b"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document(Vec<Datum>);

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document(Vec::new())
    }

    pub fn push(&mut self, datum: Datum) {
        self.0.push(datum);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn datums(&self) -> &[Datum] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Datum> {
        self.0.iter()
    }

    /// Builds the nested tree for this document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralConflict`](crate::Error::StructuralConflict)
    /// when a path is used both as a value and as a branch.
    pub fn to_tree(&self) -> crate::Result<Tree> {
        crate::tree::build_tree(&self.0)
    }
}

/// Renders one datum per line, in document order.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, datum) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", datum)?;
        }
        Ok(())
    }
}

impl From<Vec<Datum>> for Document {
    fn from(datums: Vec<Datum>) -> Self {
        Document(datums)
    }
}

impl From<Document> for Vec<Datum> {
    fn from(doc: Document) -> Self {
        doc.0
    }
}

impl<D: Into<Datum>> FromIterator<D> for Document {
    fn from_iter<T: IntoIterator<Item = D>>(iter: T) -> Self {
        Document(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for Document {
    type Item = Datum;
    type IntoIter = std::vec::IntoIter<Datum>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Datum;
    type IntoIter = std::slice::Iter<'a, Datum>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_keep_empty_parts() {
        let datum = Datum::new("a..b", 1);
        assert_eq!(datum.segments().collect::<Vec<_>>(), vec!["a", "", "b"]);

        let datum = Datum::new("", 1);
        assert_eq!(datum.segments().count(), 1);
    }

    #[test]
    fn test_document_display_one_datum_per_line() {
        let doc: Document = vec![("a", Value::from(1)), ("b.c", Value::from("x"))]
            .into_iter()
            .collect();
        assert_eq!(doc.to_string(), "a 1\nb.c \"x\"");
    }
}
