use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::{Fault, Markup, ObjectId};

// -----------------------------------------------------------------------------
// Value

/// A runtime value.
///
/// Scalars, markup documents and faults are stored inline and have no
/// identity. Sequences, collections, maps and composites live in a
/// [`Graph`](crate::Graph) and are referenced through [`Value::Object`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(DateTime<Utc>),
    Object(ObjectId),
    Markup(Markup),
    Fault(Box<Fault>),
}

impl Value {
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` for booleans, numbers, text and dates.
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_) | Value::Date(_)
        )
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the number as `f64`, widening integers.
    #[inline]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(id) => Some(*id),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_markup(&self) -> Option<&Markup> {
        match self {
            Value::Markup(v) => Some(v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_fault(&self) -> Option<&Fault> {
        match self {
            Value::Fault(v) => Some(v),
            _ => None,
        }
    }

    /// The shape name, used in diagnostics.
    pub const fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Object(_) => "object",
            Value::Markup(_) => "markup",
            Value::Fault(_) => "fault",
        }
    }
}

macro_rules! impl_from {
    ($ty:ty => $variant:ident) => {
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Value::$variant(value.into())
            }
        }
    };
}

impl_from!(bool => Bool);
impl_from!(i32 => Int);
impl_from!(i64 => Int);
impl_from!(u32 => Int);
impl_from!(f64 => Float);
impl_from!(String => Text);
impl_from!(&str => Text);
impl_from!(DateTime<Utc> => Date);
impl_from!(ObjectId => Object);
impl_from!(Markup => Markup);
impl_from!(Fault => Fault);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// -----------------------------------------------------------------------------
// MapKey

/// A scalar map key.
///
/// Keys are written as native scalars.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapKey {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl MapKey {
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            MapKey::Text(v) => Some(v),
            _ => None,
        }
    }
}

impl fmt::Display for MapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapKey::Bool(v) => fmt::Display::fmt(v, f),
            MapKey::Int(v) => fmt::Display::fmt(v, f),
            MapKey::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for MapKey {
    #[inline]
    fn from(value: bool) -> Self {
        MapKey::Bool(value)
    }
}

impl From<i64> for MapKey {
    #[inline]
    fn from(value: i64) -> Self {
        MapKey::Int(value)
    }
}

impl From<i32> for MapKey {
    #[inline]
    fn from(value: i32) -> Self {
        MapKey::Int(value.into())
    }
}

impl From<String> for MapKey {
    #[inline]
    fn from(value: String) -> Self {
        MapKey::Text(value)
    }
}

impl From<&str> for MapKey {
    #[inline]
    fn from(value: &str) -> Self {
        MapKey::Text(value.into())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{MapKey, Value};

    #[test]
    fn conversions() {
        assert_eq!(Value::from(3), Value::Int(3));
        assert_eq!(Value::from("x").as_text(), Some("x"));
        assert_eq!(Value::from(Option::<bool>::None), Value::Null);
        assert_eq!(Value::from(2).as_float(), Some(2.0));
        assert!(Value::from(1.5).is_scalar());
        assert!(!Value::Null.is_scalar());
    }

    #[test]
    fn key_display() {
        assert_eq!(MapKey::from("wheel").to_string(), "wheel");
        assert_eq!(MapKey::from(7).to_string(), "7");
    }
}
