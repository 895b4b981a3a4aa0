//! Knot deserialization.
//!
//! Knot text is parsed into a [`Tree`] first; the deserializer in this module
//! then walks the tree. Branches deserialize as maps or structs, collections
//! as sequences, and numbers into any integer type when they have no
//! fractional part.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_knot::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct User { name: String, age: u32 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { user: User, topics: Vec<String> }
//!
//! let knot = "user.name \"Cansu\"\nuser.age 25\ntopics [\"politics\" \"sports\"]";
//! let data: Data = from_str(knot).unwrap();
//! assert_eq!(data.user.age, 25);
//! assert_eq!(data.topics, vec!["politics", "sports"]);
//! ```

use crate::map::{Entry, Tree};
use crate::value::is_whole;
use crate::{Error, Result, Value};
use serde::de::{self, Unexpected};
use serde::forward_to_deserialize_any;

/// A deserializer over one tree entry.
pub struct Deserializer {
    entry: Entry,
}

impl Deserializer {
    /// Creates a deserializer whose root is the given tree.
    #[must_use]
    pub fn from_tree(tree: Tree) -> Self {
        Deserializer {
            entry: Entry::Branch(tree),
        }
    }

    fn new(entry: Entry) -> Self {
        Deserializer { entry }
    }

    fn unexpected(&self) -> Unexpected<'_> {
        match &self.entry {
            Entry::Branch(_) => Unexpected::Map,
            Entry::Leaf(Value::String(s)) => Unexpected::Str(s),
            Entry::Leaf(Value::Number(n)) => Unexpected::Float(*n),
            Entry::Leaf(Value::Boolean(b)) => Unexpected::Bool(*b),
            Entry::Leaf(Value::Collection(_)) => Unexpected::Seq,
        }
    }
}

macro_rules! deserialize_integer {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.entry {
                    Entry::Leaf(Value::Number(n)) if is_whole(n) => visitor.visit_i64(n as i64),
                    Entry::Leaf(Value::Number(_)) => {
                        Err(de::Error::invalid_type(self.unexpected(), &"an integer"))
                    }
                    _ => self.deserialize_any(visitor),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for Deserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.entry {
            Entry::Branch(tree) => visitor.visit_map(MapDeserializer::new(tree)),
            Entry::Leaf(Value::String(s)) => visitor.visit_string(s),
            Entry::Leaf(Value::Number(n)) => visitor.visit_f64(n),
            Entry::Leaf(Value::Boolean(b)) => visitor.visit_bool(b),
            Entry::Leaf(Value::Collection(items)) => visitor.visit_seq(SeqDeserializer::new(items)),
        }
    }

    deserialize_integer! {
        deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        // Absent fields never reach here; serde fills them with None.
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.entry {
            Entry::Leaf(Value::String(variant)) => {
                visitor.visit_enum(EnumDeserializer::new(variant, None))
            }
            Entry::Branch(tree) if tree.len() == 1 => {
                let mut fields = tree.into_iter();
                match fields.next() {
                    Some((variant, entry)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, Some(entry)))
                    }
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            _ => Err(de::Error::invalid_type(
                self.unexpected(),
                &"a variant name or a branch with one field",
            )),
        }
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(Deserializer::new(Entry::Leaf(value))).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, Entry>,
    entry: Option<Entry>,
}

impl MapDeserializer {
    fn new(tree: Tree) -> Self {
        MapDeserializer {
            iter: tree.into_iter(),
            entry: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, entry)) => {
                self.entry = Some(entry);
                seed.deserialize(Deserializer::new(Entry::Leaf(Value::String(key))))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.entry.take() {
            Some(entry) => seed.deserialize(Deserializer::new(entry)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    entry: Option<Entry>,
}

impl EnumDeserializer {
    fn new(variant: String, entry: Option<Entry>) -> Self {
        EnumDeserializer { variant, entry }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant =
            seed.deserialize(Deserializer::new(Entry::Leaf(Value::String(self.variant))))?;
        Ok((variant, VariantDeserializer { entry: self.entry }))
    }
}

struct VariantDeserializer {
    entry: Option<Entry>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.entry {
            None => Ok(()),
            Some(_) => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.entry {
            Some(entry) => seed.deserialize(Deserializer::new(entry)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.entry {
            Some(Entry::Leaf(Value::Collection(items))) => {
                visitor.visit_seq(SeqDeserializer::new(items))
            }
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.entry {
            Some(Entry::Branch(tree)) => visitor.visit_map(MapDeserializer::new(tree)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}
