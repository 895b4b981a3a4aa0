//! # serde_knot
//!
//! A parser and Serde bridge for Knot, a flattened key-value format built
//! for language-model output.
//!
//! ## What is Knot?
//!
//! Asking a model for JSON is slow and token-hungry, and not every model
//! produces it reliably. Knot writes one `key value` pair per line and
//! encodes nesting in dotted keys:
//!
//! ```text
//! user.name "Cansu"
//! user.age 25
//! conversation.topics ["politics" "sports" "technology"]
//! ```
//!
//! ## The Pipeline
//!
//! ```text
//! text ──parse_document──▶ Document ──build_tree──▶ Tree ──materialize──▶ Node
//!                                                    │
//!                                                    └──from_tree──▶ T: Deserialize
//! ```
//!
//! - [`parse_document`] turns text into an ordered list of [`Datum`]s.
//! - [`build_tree`] nests them by splitting keys on `.`; later datums win,
//!   and a path used both as a value and a branch is an error.
//! - [`materialize`] converts the tree into a [`Node`] graph with field
//!   lookup by name.
//! - [`from_str`] runs the whole pipeline into any `T: Deserialize`.
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_knot::{from_str, parse_node};
//!
//! let reply = "user.name \"Cansu\"\nuser.age 25\nuser.topics [\"chess\" \"go\"]";
//!
//! // Walk it dynamically
//! let root = parse_node(reply).unwrap();
//! assert_eq!(root["user"]["age"].as_f64(), Some(25.0));
//!
//! // Or deserialize it
//! #[derive(Deserialize)]
//! struct User { name: String, age: u32, topics: Vec<String> }
//! #[derive(Deserialize)]
//! struct Reply { user: User }
//!
//! let parsed: Reply = from_str(reply).unwrap();
//! assert_eq!(parsed.user.topics.len(), 2);
//! ```
//!
//! ## Prompting
//!
//! [`format::formatting_instructions`] returns text that teaches a model to
//! answer in Knot.
//!
//! ## Strictness
//!
//! Parsing is strict by default; see [`ParseOptions`] for the separator,
//! line-break and empty-segment rules and for the extended enum grammar.

pub mod de;
pub mod document;
pub mod error;
pub mod format;
pub mod macros;
pub mod map;
pub mod node;
pub mod options;
pub mod parser;
pub mod ser;
pub mod tree;
pub mod value;

pub use de::Deserializer;
pub use document::{Datum, Document};
pub use error::{Error, Result};
pub use map::{Entry, Tree};
pub use node::{materialize, materialize_document, Node};
pub use options::{GrammarVariant, ParseOptions, SeparatorPolicy};
pub use parser::Parser;
pub use ser::TreeSerializer;
pub use tree::build_tree;
pub use value::Value;

use serde::{de::DeserializeOwned, Serialize};
use std::io;

/// Parses a document with the default options.
///
/// # Examples
///
/// ```rust
/// use serde_knot::{parse_document, Datum};
///
/// let doc = parse_document("a 1\nb 2").unwrap();
/// assert_eq!(doc.datums(), &[Datum::new("a", 1.0), Datum::new("b", 2.0)]);
///
/// assert!(parse_document("").unwrap().is_empty());
/// ```
///
/// # Errors
///
/// Returns the first syntax, unterminated-collection or trailing-input
/// error. Error messages include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_document(text: &str) -> Result<Document> {
    parse_document_with_options(text, &ParseOptions::default())
}

/// Parses a document with custom options.
///
/// # Errors
///
/// See [`parse_document`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_document_with_options(text: &str, options: &ParseOptions) -> Result<Document> {
    Parser::with_options(text, options.clone()).parse_document()
}

/// Parses a single value that must span the whole input.
///
/// # Examples
///
/// ```rust
/// use serde_knot::{parse_value, Value};
///
/// assert_eq!(parse_value("-1.5e-3").unwrap(), Value::Number(-0.0015));
/// assert!(parse_value("[1 2] 3").is_err());
/// ```
///
/// # Errors
///
/// Returns a syntax error if the input is not exactly one value.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_value(text: &str) -> Result<Value> {
    let mut parser = Parser::new(text);
    let value = parser.parse_value()?;
    parser.finish()?;
    Ok(value)
}

/// Parses a `|`-separated enum declaration with the extended grammar.
///
/// # Examples
///
/// ```rust
/// use serde_knot::parse_enum;
///
/// let options = parse_enum("light.sunrise|light.sunset|dark").unwrap();
/// assert_eq!(options, vec!["light.sunrise", "light.sunset", "dark"]);
/// ```
///
/// # Errors
///
/// Fails on a malformed key or on input left after the last key.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_enum(text: &str) -> Result<Vec<String>> {
    let mut parser = Parser::with_options(text, ParseOptions::extended());
    let keys = parser.parse_enum()?;
    parser.finish()?;
    Ok(keys)
}

/// Parses text and builds its tree.
///
/// # Errors
///
/// Returns a parse error or a structural conflict.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_tree(text: &str) -> Result<Tree> {
    parse_document(text)?.to_tree()
}

/// Parses text with custom options and builds its tree.
///
/// # Errors
///
/// Returns a parse error or a structural conflict.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_tree_with_options(text: &str, options: &ParseOptions) -> Result<Tree> {
    parse_document_with_options(text, options)?.to_tree()
}

/// Parses text all the way into a root [`Node`].
///
/// # Examples
///
/// ```rust
/// use serde_knot::parse_node;
///
/// let root = parse_node("settings.theme \"dark\"").unwrap();
/// assert_eq!(root["settings"]["theme"].as_str(), Some("dark"));
/// ```
///
/// # Errors
///
/// Returns a parse error or a structural conflict.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_node(text: &str) -> Result<Node> {
    Ok(materialize(parse_tree(text)?))
}

/// Deserialize an instance of type `T` from Knot text.
///
/// # Examples
///
/// ```rust
/// use serde_knot::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x 1\ny 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the text does not parse, has a structural conflict,
/// or does not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_tree(parse_tree(s)?)
}

/// Deserialize an instance of type `T` from an already built tree.
///
/// # Errors
///
/// Returns an error if the tree does not match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_tree<T>(tree: Tree) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::from_tree(tree))
}

/// Deserialize an instance of type `T` from bytes of Knot text.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or see [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v).map_err(Error::custom)?;
    from_str(s)
}

/// Deserialize an instance of type `T` from an I/O stream of Knot text.
///
/// # Examples
///
/// ```rust
/// use serde_knot::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_reader(Cursor::new(b"x 1\ny 2")).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or see [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Convert any `T: Serialize` into a tree.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `T` is not a struct or map at the
/// top level or holds a shape Knot cannot express, and
/// [`Error::InvalidKey`] for field names that are not valid key segments.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_tree<T>(value: &T) -> Result<Tree>
where
    T: ?Sized + Serialize,
{
    match value.serialize(TreeSerializer)? {
        Some(Entry::Branch(tree)) => Ok(tree),
        None => Ok(Tree::new()),
        Some(Entry::Leaf(value)) => Err(Error::unsupported_type(&format!(
            "a top-level {} needs a key; serialize a struct or map",
            value.kind()
        ))),
    }
}

/// Convert any `T: Serialize` into a flat document.
///
/// # Errors
///
/// See [`to_tree`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_document<T>(value: &T) -> Result<Document>
where
    T: ?Sized + Serialize,
{
    Ok(to_tree(value)?.flatten())
}

/// Serialize any `T: Serialize` to Knot text.
///
/// # Examples
///
/// ```rust
/// use serde_knot::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// assert_eq!(to_string(&Point { x: 1, y: 2 }).unwrap(), "x 1\ny 2");
/// ```
///
/// # Errors
///
/// See [`to_tree`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(to_document(value)?.to_string())
}

/// Serialize any `T: Serialize` to a writer as Knot text.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let knot = to_string(value)?;
    writer
        .write_all(knot.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
