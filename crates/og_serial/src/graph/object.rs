use core::fmt;

use crate::graph::{MapKey, Value};
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// Object

/// A value with identity, stored in a [`Graph`](crate::Graph).
#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    /// An ordered sequence: arrays and lists.
    Sequence(Vec<Value>),
    /// A keyed collection, such as a set. Element order is kept as inserted.
    Collection(Vec<Value>),
    /// Scalar keys to values, kept in insertion order.
    Map(Vec<(MapKey, Value)>),
    Composite(Composite),
}

impl Object {
    /// The shape name, used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Object::Sequence(_) => "sequence",
            Object::Collection(_) => "collection",
            Object::Map(_) => "map",
            Object::Composite(_) => "composite",
        }
    }

    /// Number of elements, entries or fields.
    pub fn len(&self) -> usize {
        match self {
            Object::Sequence(items) | Object::Collection(items) => items.len(),
            Object::Map(entries) => entries.len(),
            Object::Composite(c) => c.values.len(),
        }
    }

    #[inline]
    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Object::Sequence(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_collection(&self) -> Option<&[Value]> {
        match self {
            Object::Collection(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&[(MapKey, Value)]> {
        match self {
            Object::Map(entries) => Some(entries),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_composite(&self) -> Option<&Composite> {
        match self {
            Object::Composite(c) => Some(c),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_composite_mut(&mut self) -> Option<&mut Composite> {
        match self {
            Object::Composite(c) => Some(c),
            _ => None,
        }
    }

    /// Looks up a map entry by key.
    pub fn lookup(&self, key: &MapKey) -> Option<&Value> {
        self.as_map()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns the runtime type of a composite.
    #[inline]
    pub fn type_info(&self) -> Option<&'static TypeInfo> {
        self.as_composite().map(Composite::type_info)
    }
}

impl From<Composite> for Object {
    #[inline]
    fn from(value: Composite) -> Self {
        Object::Composite(value)
    }
}

// -----------------------------------------------------------------------------
// Composite

/// An instance of a [`TypeInfo`]: one value per declared field.
///
/// Field slots are fixed by the type. Setting a name the type does not
/// declare is refused.
#[derive(Clone)]
pub struct Composite {
    ty: &'static TypeInfo,
    values: Box<[Value]>,
}

impl Composite {
    /// Creates an instance with every field `Null`.
    pub fn new(ty: &'static TypeInfo) -> Self {
        Self {
            ty,
            values: core::iter::repeat_with(Value::default)
                .take(ty.field_len())
                .collect(),
        }
    }

    #[inline]
    pub const fn type_info(&self) -> &'static TypeInfo {
        self.ty
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.ty.field_index(name).map(|i| &self.values[i])
    }

    #[inline]
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.ty.field_index(name).map(|i| &mut self.values[i])
    }

    /// Sets field `name`. Returns `false` if the type has no such field.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Builder-style [`set`](Self::set); unknown names are ignored.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    #[inline]
    pub fn value_at(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub(crate) fn set_at(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.values.get_mut(index) {
            *slot = value;
        }
    }

    /// Iterates over `(field name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.ty
            .fields()
            .iter()
            .map(|f| f.name())
            .zip(self.values.iter())
    }
}

impl PartialEq for Composite {
    fn eq(&self, other: &Self) -> bool {
        self.ty.is(other.ty) && self.values == other.values
    }
}

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct(self.ty.type_name());
        for (name, value) in self.iter() {
            dbg.field(name, value);
        }
        dbg.finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Composite, Object};
    use crate::graph::{MapKey, Value};
    use crate::info::{Declared, FieldInfo, TypeInfo};

    static POINT: TypeInfo = TypeInfo::new(
        "tests::Point",
        &[
            FieldInfo::new("x", Declared::INT),
            FieldInfo::new("y", Declared::INT),
        ],
    );

    #[test]
    fn composite_fields() {
        let mut p = Composite::new(&POINT).with("x", 1);
        assert!(p.get("y").unwrap().is_null());
        assert!(p.set("y", 2));
        assert!(!p.set("z", 3));

        let pairs: Vec<_> = p.iter().map(|(n, v)| (n, v.as_int())).collect();
        assert_eq!(pairs, [("x", Some(1)), ("y", Some(2))]);
        assert_eq!(format!("{p:?}"), "Point { x: Int(1), y: Int(2) }");
    }

    #[test]
    fn map_lookup() {
        let map = Object::Map(vec![
            (MapKey::from("a"), Value::from(1)),
            (MapKey::from(2), Value::from("b")),
        ]);
        assert_eq!(map.lookup(&MapKey::from(2)), Some(&Value::from("b")));
        assert_eq!(map.lookup(&MapKey::from("z")), None);
        assert_eq!(map.kind(), "map");
        assert_eq!(map.len(), 2);
    }
}
