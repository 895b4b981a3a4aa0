//! Knot serialization.
//!
//! Serialization runs in two steps: [`TreeSerializer`] turns any
//! `T: Serialize` into a [`Tree`], and the tree is flattened into a
//! [`Document`](crate::Document) whose `Display` impl writes one datum per
//! line.
//!
//! ## What maps to what
//!
//! | Rust | Knot |
//! |------|------|
//! | struct, map | branch (field names become key segments) |
//! | `bool`, integers, floats, `char`, `String` | leaf |
//! | `Vec`, slices, tuples of scalars | collection |
//! | `None`, `()` | omitted |
//! | unit enum variant | string leaf |
//! | newtype / struct enum variant | branch with one field named after the variant |
//!
//! Collections may only hold scalars, and integers become `f64`, so values
//! above 2^53 lose precision.
//!
//! ## Examples
//!
//! ```rust
//! use serde_knot::to_string;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User { name: String, age: u32 }
//!
//! #[derive(Serialize)]
//! struct Data { user: User, topics: Vec<&'static str> }
//!
//! let data = Data {
//!     user: User { name: "Cansu".to_string(), age: 25 },
//!     topics: vec!["politics", "sports"],
//! };
//! assert_eq!(
//!     to_string(&data).unwrap(),
//!     "user.name \"Cansu\"\nuser.age 25\ntopics [\"politics\" \"sports\"]"
//! );
//! ```

use crate::map::{Entry, Tree};
use crate::value::is_whole;
use crate::{Error, Result, Value};
use serde::ser::{self, Impossible, Serialize};

/// Serializes a value into an optional tree entry. `None` means the value
/// has no Knot representation and its field is omitted.
pub struct TreeSerializer;

fn leaf(value: Value) -> Result<Option<Entry>> {
    Ok(Some(Entry::Leaf(value)))
}

fn number(n: f64) -> Result<Option<Entry>> {
    if n.is_finite() {
        leaf(Value::Number(n))
    } else {
        Err(Error::unsupported_type(&format!("non-finite number {}", n)))
    }
}

fn check_key(key: &str) -> Result<()> {
    if !key.is_empty() && key.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        Ok(())
    } else {
        Err(Error::invalid_key(key))
    }
}

/// An empty branch flattens to no datums, so it would not survive a round trip.
fn non_empty(key: &str, entry: Entry) -> Result<Entry> {
    match entry {
        Entry::Branch(tree) if tree.is_empty() => Err(Error::unsupported_type(&format!(
            "empty map or struct at '{}' writes no lines",
            key
        ))),
        entry => Ok(entry),
    }
}

fn single_field(name: &str, entry: Entry) -> Entry {
    let mut tree = Tree::new();
    tree.insert(name.to_string(), entry);
    Entry::Branch(tree)
}

impl ser::Serializer for TreeSerializer {
    type Ok = Option<Entry>;
    type Error = Error;

    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = Impossible<Option<Entry>, Error>;
    type SerializeMap = MapSerializer;
    type SerializeStruct = MapSerializer;
    type SerializeStructVariant = StructVariantSerializer;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        leaf(Value::Boolean(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        number(f64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        number(f64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        number(f64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        number(v as f64)
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        number(f64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        number(f64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        number(f64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        number(v as f64)
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        number(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        number(v)
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        leaf(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        leaf(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        leaf(Value::Collection(
            v.iter().map(|&b| Value::Number(f64::from(b))).collect(),
        ))
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        leaf(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        check_key(variant)?;
        match value.serialize(TreeSerializer)? {
            Some(entry) => Ok(Some(single_field(variant, non_empty(variant, entry)?))),
            None => Ok(None),
        }
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SeqSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::unsupported_type(&format!(
            "tuple variant {}::{}",
            name, variant
        )))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(MapSerializer {
            tree: Tree::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        check_key(variant)?;
        Ok(StructVariantSerializer {
            variant,
            tree: Tree::new(),
        })
    }
}

pub struct SeqSerializer {
    items: Vec<Value>,
}

impl SeqSerializer {
    fn push<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match value.serialize(TreeSerializer)? {
            Some(Entry::Leaf(value)) if value.is_scalar() => {
                self.items.push(value);
                Ok(())
            }
            Some(_) => Err(Error::unsupported_type(
                "collections may only contain strings, numbers and booleans",
            )),
            None => Err(Error::unsupported_type("empty element in a collection")),
        }
    }

    fn finish(self) -> Result<Option<Entry>> {
        leaf(Value::Collection(self.items))
    }
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = Option<Entry>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = Option<Entry>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = Option<Entry>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

pub struct MapSerializer {
    tree: Tree,
    next_key: Option<String>,
}

impl MapSerializer {
    fn insert<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        check_key(&key)?;
        if let Some(entry) = value.serialize(TreeSerializer)? {
            let entry = non_empty(&key, entry)?;
            self.tree.insert(key, entry);
        }
        Ok(())
    }
}

impl ser::SerializeMap for MapSerializer {
    type Ok = Option<Entry>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match key.serialize(TreeSerializer)? {
            Some(Entry::Leaf(Value::String(s))) => s,
            Some(Entry::Leaf(Value::Number(n))) if is_whole(n) => (n as i64).to_string(),
            _ => return Err(Error::unsupported_type("map keys must be strings or integers")),
        };
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match self.next_key.take() {
            Some(key) => self.insert(key, value),
            None => Err(Error::custom("serialize_value called before serialize_key")),
        }
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(Entry::Branch(self.tree)))
    }
}

impl ser::SerializeStruct for MapSerializer {
    type Ok = Option<Entry>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.insert(key.to_string(), value)
    }

    fn end(self) -> Result<Self::Ok> {
        Ok(Some(Entry::Branch(self.tree)))
    }
}

pub struct StructVariantSerializer {
    variant: &'static str,
    tree: Tree,
}

impl ser::SerializeStructVariant for StructVariantSerializer {
    type Ok = Option<Entry>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        check_key(key)?;
        if let Some(entry) = value.serialize(TreeSerializer)? {
            self.tree.insert(key.to_string(), non_empty(key, entry)?);
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        let fields = non_empty(self.variant, Entry::Branch(self.tree))?;
        Ok(Some(single_field(self.variant, fields)))
    }
}
