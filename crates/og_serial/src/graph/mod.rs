//! The runtime object graph.
//!
//! Objects live in a [`Graph`] arena and refer to each other through
//! [`ObjectId`]s, so shared and cyclic structures need no owning pointers.
//!
//! ## Menu
//!
//! - [`Graph`]: The arena.
//! - [`Object`]: Values with identity: sequences, keyed collections, maps and composites.
//! - [`Composite`]: A record of named fields described by a [`TypeInfo`](crate::info::TypeInfo).
//! - [`Value`]: Scalars, markup, faults, or a reference to an [`Object`].
//! - [`MapKey`]: Scalar map keys.
//! - [`Markup`]: A structured markup document.
//! - [`Fault`]: An error chain with call-stack frames.

// -----------------------------------------------------------------------------
// Modules

mod fault;
mod markup;
mod object;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use fault::{Fault, Frame};
pub use markup::{Attribute, Element, Markup, MarkupError, MarkupNode};
pub use object::{Composite, Object};
pub use value::{MapKey, Value};

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// The identity of an [`Object`] inside a [`Graph`].
    pub struct ObjectId;
}

// -----------------------------------------------------------------------------
// Graph

/// An arena of [`Object`]s.
///
/// Identity is the [`ObjectId`]: two values referring to the same id refer to
/// the same instance, and a decoded graph preserves that sharing.
///
/// # Examples
///
/// ```
/// use og_serial::{Graph, Object, Value};
///
/// let mut graph = Graph::new();
/// let list = graph.insert(Object::Sequence(vec![Value::from(1), Value::from("two")]));
///
/// assert_eq!(graph.get(list).unwrap().len(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Graph {
    objects: SlotMap<ObjectId, Object>,
}

impl Graph {
    /// Create an empty graph.
    #[inline]
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            objects: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Moves an object into the graph and returns its identity.
    #[inline]
    pub fn insert(&mut self, object: impl Into<Object>) -> ObjectId {
        self.objects.insert(object.into())
    }

    #[inline]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    #[inline]
    pub fn get(&self, id: ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    #[inline]
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
        self.objects.get_mut(id)
    }

    /// Returns the object as a [`Composite`], if it is one.
    #[inline]
    pub fn composite(&self, id: ObjectId) -> Option<&Composite> {
        self.get(id).and_then(Object::as_composite)
    }

    /// Returns the object as a mutable [`Composite`], if it is one.
    #[inline]
    pub fn composite_mut(&mut self, id: ObjectId) -> Option<&mut Composite> {
        self.get_mut(id).and_then(Object::as_composite_mut)
    }

    /// Returns the value of field `name` of the composite `id`.
    pub fn field(&self, id: ObjectId, name: &str) -> Option<&Value> {
        self.composite(id).and_then(|c| c.get(name))
    }

    /// Follows the object reference stored in field `name` of the composite `id`.
    pub fn follow(&self, id: ObjectId, name: &str) -> Option<ObjectId> {
        self.field(id, name).and_then(Value::as_object)
    }

    /// Number of objects in the graph.
    #[inline]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterates over all objects, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects.iter()
    }

    /// Replaces the object stored under `id`, returning the previous one.
    pub(crate) fn replace(&mut self, id: ObjectId, object: Object) -> Option<Object> {
        self.objects
            .get_mut(id)
            .map(|slot| core::mem::replace(slot, object))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Composite, Graph, Object, Value};
    use crate::info::{Declared, FieldInfo, TypeInfo};

    static NODE: TypeInfo = TypeInfo::new(
        "tests::Node",
        &[
            FieldInfo::new("label", Declared::TEXT),
            FieldInfo::new("next", Declared::Exact(&NODE)),
        ],
    );

    #[test]
    fn self_loop() {
        let mut graph = Graph::new();
        let node = graph.insert(Composite::new(&NODE).with("label", "a"));
        assert!(graph.composite_mut(node).unwrap().set("next", node));

        assert_eq!(graph.follow(node, "next"), Some(node));
        assert_eq!(graph.field(node, "label"), Some(&Value::from("a")));
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn replace_keeps_identity() {
        let mut graph = Graph::new();
        let id = graph.insert(Object::Sequence(Vec::new()));

        let old = graph.replace(id, Object::Sequence(vec![Value::from(true)]));
        assert_eq!(old, Some(Object::Sequence(Vec::new())));
        assert_eq!(graph.get(id).unwrap().len(), 1);
    }
}
