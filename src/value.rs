//! Value representation for Knot data.
//!
//! A [`Value`] is what follows a key on a Knot line: a quoted string, a
//! number, a boolean, or a flat collection of those.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_knot::Value;
//!
//! let text = Value::from("hello");
//! let number = Value::from(42);
//! let flag = Value::from(true);
//! let list = Value::from(vec![Value::from(1), Value::from("a")]);
//! assert!(list.is_collection());
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use serde_knot::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::from(2.5);
//! assert_eq!(f64::try_from(value).unwrap(), 2.5);
//! ```
//!
//! ### Display
//!
//! `Display` renders a value in Knot syntax, so the output can be parsed back:
//!
//! ```rust
//! use serde_knot::Value;
//!
//! let value = Value::Collection(vec![Value::from(1), Value::from("say \"hi\"")]);
//! assert_eq!(value.to_string(), r#"[1 "say \"hi\""]"#);
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

/// Any value that can follow a key.
///
/// Numbers are always `f64`: `25` and `25.0` parse to the same value.
/// Collection elements need not share a kind.
///
/// # Examples
///
/// ```rust
/// use serde_knot::Value;
///
/// let value = Value::Number(-1.5e-3);
/// assert!(value.is_number());
/// assert_eq!(value.as_f64(), Some(-0.0015));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    String(String),
    Number(f64),
    Boolean(bool),
    Collection(Vec<Value>),
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Value::Collection(_))
    }

    /// Returns `true` for strings, numbers and booleans.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !self.is_collection()
    }

    /// If the value is a string, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::Value;
    ///
    /// assert_eq!(Value::from("hi").as_str(), Some("hi"));
    /// assert_eq!(Value::from(1).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as `i64` when it has no fractional part and fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_knot::Value;
    ///
    /// assert_eq!(Value::Number(25.0).as_i64(), Some(25));
    /// assert_eq!(Value::Number(2.5).as_i64(), None);
    /// ```
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) if is_whole(*n) => Some(*n as i64),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_collection(&self) -> Option<&[Value]> {
        match self {
            Value::Collection(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the value kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Boolean(_) => "boolean",
            Value::Collection(_) => "collection",
        }
    }
}

/// `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
pub(crate) fn is_whole(n: f64) -> bool {
    n.is_finite() && n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => {
                f.write_str("\"")?;
                for ch in s.chars() {
                    if ch == '"' || ch == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", ch)?;
                }
                f.write_str("\"")
            }
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Collection(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Collection(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) if is_whole(n) => Ok(n as i64),
            Value::Number(n) => Err(crate::Error::custom(format!(
                "cannot convert {} to i64",
                n
            ))),
            other => Err(crate::Error::custom(format!(
                "expected number, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n),
            other => Err(crate::Error::custom(format!(
                "expected number, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Boolean(b) => Ok(b),
            other => Err(crate::Error::custom(format!(
                "expected boolean, found {}",
                other.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(crate::Error::custom(format!(
                "expected string, found {}",
                other.kind()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(f64::from(n))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, u8, u16, u32, f32, f64);

// Magnitudes above 2^53 round to the nearest representable f64.
macro_rules! impl_from_wide_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_wide_integer!(i64, u64, isize, usize);

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Collection(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        let result: i64 = TryFrom::try_from(Value::Number(42.0)).unwrap();
        assert_eq!(result, 42);

        assert!(i64::try_from(Value::Number(4.2)).is_err());
        assert!(i64::try_from(Value::from("42")).is_err());
    }

    #[test]
    fn test_i64_bounds() {
        let two_pow_63 = 2f64.powi(63);
        assert_eq!(Value::Number(two_pow_63).as_i64(), None);
        assert!(i64::try_from(Value::Number(two_pow_63)).is_err());
        assert_eq!(Value::Number(-two_pow_63).as_i64(), Some(i64::MIN));
        assert_eq!(Value::Number(2f64.powi(62)).as_i64(), Some(1 << 62));
    }

    #[test]
    fn test_tryfrom_scalars() {
        assert_eq!(f64::try_from(Value::Number(3.5)).unwrap(), 3.5);
        assert!(bool::try_from(Value::Boolean(true)).unwrap());
        assert!(bool::try_from(Value::Number(1.0)).is_err());
        assert_eq!(String::try_from(Value::from("hello")).unwrap(), "hello");
        assert!(String::try_from(Value::Number(1.0)).is_err());
    }

    #[test]
    fn test_from_primitives_are_floats() {
        assert_eq!(Value::from(42i32), Value::Number(42.0));
        assert_eq!(Value::from(7u8), Value::Number(7.0));
        assert_eq!(Value::from(true), Value::Boolean(true));
        assert_eq!(Value::from("x"), Value::String("x".to_string()));
    }

    #[test]
    fn test_from_wide_integers() {
        assert_eq!(Value::from(-5i64), Value::Number(-5.0));
        assert_eq!(Value::from(7usize), Value::Number(7.0));
        assert_eq!(Value::from(u64::MAX), Value::Number(2f64.powi(64)));
        assert_eq!(crate::Datum::new("n", 42i64).value().as_i64(), Some(42));
    }

    #[test]
    fn test_display_is_knot_syntax() {
        assert_eq!(Value::Number(1.0).to_string(), "1");
        assert_eq!(Value::Number(-0.0015).to_string(), "-0.0015");
        assert_eq!(Value::Boolean(false).to_string(), "false");
        assert_eq!(Value::from(r"a\b").to_string(), r#""a\\b""#);
        assert_eq!(Value::Collection(vec![]).to_string(), "[]");
        assert_eq!(
            Value::Collection(vec![Value::from(1), Value::from("a"), Value::from(true)])
                .to_string(),
            r#"[1 "a" true]"#
        );
    }

    #[test]
    fn test_serialize_to_json() {
        let value = Value::Collection(vec![Value::from(1), Value::from("a"), Value::from(true)]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1.0,"a",true]"#);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(Value::from("a").kind(), "string");
        assert_eq!(Value::Collection(vec![]).kind(), "collection");
        assert!(Value::Number(0.0).is_scalar());
        assert!(!Value::Collection(vec![]).is_scalar());
    }
}
