use core::fmt;

use crate::graph::Composite;
use crate::info::Declared;

// -----------------------------------------------------------------------------
// FieldInfo

/// Information for a named field of a composite type.
#[derive(Clone, Copy, Debug)]
pub struct FieldInfo {
    name: &'static str,
    declared: Declared,
}

impl FieldInfo {
    /// Creates a new [`FieldInfo`] for the given field `name` and declared type.
    ///
    /// Names starting with `@` are reserved by the codec.
    #[inline]
    pub const fn new(name: &'static str, declared: Declared) -> Self {
        Self { name, declared }
    }

    /// Returns the field name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the declared type of the field.
    #[inline]
    pub const fn declared(&self) -> Declared {
        self.declared
    }
}

// -----------------------------------------------------------------------------
// TypeInfo

/// A concrete composite type: a stable type path plus its ordered fields.
///
/// The type path is the identity of the type. Two descriptors with the same
/// path denote the same type.
///
/// A `TypeInfo` also carries the constructor capability needed for cycles:
/// [`instantiate`](Self::instantiate) allocates an instance with every field
/// `Null`, which the decoder fills in after the instance has been made
/// reachable to back-references.
///
/// # Examples
///
/// ```
/// use og_serial::info::{Declared, FieldInfo, TypeInfo};
///
/// static WHEEL: TypeInfo = TypeInfo::new(
///     "demo::parts::Wheel",
///     &[FieldInfo::new("replaceable", Declared::BOOL)],
/// );
///
/// assert_eq!(WHEEL.type_path(), "demo::parts::Wheel");
/// assert_eq!(WHEEL.type_name(), "Wheel");
/// assert_eq!(WHEEL.field_index("replaceable"), Some(0));
/// assert!(WHEEL.instantiate().get("replaceable").unwrap().is_null());
/// ```
pub struct TypeInfo {
    type_path: &'static str,
    fields: &'static [FieldInfo],
}

impl TypeInfo {
    /// Creates a type descriptor.
    #[inline]
    pub const fn new(type_path: &'static str, fields: &'static [FieldInfo]) -> Self {
        Self { type_path, fields }
    }

    /// Returns the full type path, e.g. `demo::parts::Wheel`.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// Returns the last segment of the type path, e.g. `Wheel`.
    pub fn type_name(&self) -> &'static str {
        match self.type_path.rsplit_once("::") {
            Some((_, name)) => name,
            None => self.type_path,
        }
    }

    /// Returns `true` if both descriptors denote the same type.
    #[inline]
    pub fn is(&self, other: &TypeInfo) -> bool {
        core::ptr::eq(self, other) || self.type_path == other.type_path
    }

    /// Returns the fields in declaration order.
    #[inline]
    pub const fn fields(&self) -> &'static [FieldInfo] {
        self.fields
    }

    #[inline]
    pub const fn field_len(&self) -> usize {
        self.fields.len()
    }

    /// Returns the field at `index`.
    #[inline]
    pub fn field_at(&self, index: usize) -> Option<&'static FieldInfo> {
        self.fields.get(index)
    }

    /// Returns the field called `name`.
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns the position of the field called `name`.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Allocates an unpopulated instance: every field is `Null`.
    #[inline]
    pub fn instantiate(&'static self) -> Composite {
        Composite::new(self)
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeInfo")
            .field("type_path", &self.type_path)
            .field("fields", &self.fields)
            .finish()
    }
}
