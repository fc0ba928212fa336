use alloc::borrow::Cow;

use og_utils::hash::HashMap;

use crate::RegistryError;
use crate::info::TypeInfo;

// -----------------------------------------------------------------------------
// TypeRegistry

/// A bidirectional map between discriminator tags and composite types.
///
/// Each tag names exactly one type and each type has at most one tag.
/// Lookups by type compare [type paths](TypeInfo::type_path); subtyping is
/// never consulted, so an unregistered type is unknown even if a related type
/// is registered.
///
/// # Examples
///
/// ```
/// use og_serial::info::{Declared, FieldInfo, TypeInfo};
/// use og_serial::registry::TypeRegistry;
///
/// static CAR: TypeInfo = TypeInfo::new("demo::Car", &[FieldInfo::new("seats", Declared::INT)]);
///
/// let mut registry = TypeRegistry::new();
/// registry.register("car", &CAR).unwrap();
///
/// assert_eq!(registry.resolve_tag(&CAR), Some("car"));
/// assert!(registry.resolve_type("car").unwrap().is(&CAR));
/// assert!(registry.register("vehicle", &CAR).is_err());
/// ```
#[derive(Clone, Default)]
pub struct TypeRegistry {
    by_tag: HashMap<Cow<'static, str>, &'static TypeInfo>,
    by_path: HashMap<&'static str, Cow<'static, str>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `tag` to `ty`.
    ///
    /// Registering an identical pair again is a no-op.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::DuplicateTag`] if `tag` is bound to another type.
    /// - [`RegistryError::DuplicateType`] if `ty` is bound to another tag.
    pub fn register(
        &mut self,
        tag: impl Into<Cow<'static, str>>,
        ty: &'static TypeInfo,
    ) -> Result<(), RegistryError> {
        let tag = tag.into();

        if let Some(existing) = self.by_tag.get(tag.as_ref()) {
            if existing.is(ty) {
                return Ok(());
            }
            return Err(RegistryError::DuplicateTag {
                tag,
                existing: existing.type_path(),
            });
        }
        if let Some(existing) = self.by_path.get(ty.type_path()) {
            return Err(RegistryError::DuplicateType {
                type_path: ty.type_path(),
                existing: existing.clone(),
            });
        }

        self.by_path.insert(ty.type_path(), tag.clone());
        self.by_tag.insert(tag, ty);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(
        mut self,
        tag: impl Into<Cow<'static, str>>,
        ty: &'static TypeInfo,
    ) -> Result<Self, RegistryError> {
        self.register(tag, ty)?;
        Ok(self)
    }

    /// Returns the tag of `ty`, if it is registered.
    pub fn resolve_tag(&self, ty: &TypeInfo) -> Option<&str> {
        self.by_path.get(ty.type_path()).map(AsRef::as_ref)
    }

    /// Returns the type bound to `tag`.
    pub fn resolve_type(&self, tag: &str) -> Option<&'static TypeInfo> {
        self.by_tag.get(tag).copied()
    }

    #[inline]
    pub fn is_known(&self, ty: &TypeInfo) -> bool {
        self.by_path.contains_key(ty.type_path())
    }

    #[inline]
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.by_tag.contains_key(tag)
    }

    /// Number of registered pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.by_tag.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_tag.is_empty()
    }

    /// Iterates over `(tag, type)` pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static TypeInfo)> {
        self.by_tag.iter().map(|(tag, ty)| (tag.as_ref(), *ty))
    }

    /// Registers every pair submitted with [`register_type!`](crate::register_type).
    ///
    /// Pairs that conflict with existing bindings are skipped with a warning.
    /// Repeated calls do not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if automatic registration works on the current platform.
    /// Without the `auto_register` feature this always does nothing and returns `false`.
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use super::auto_register::{available, registrations};

            for item in registrations() {
                if let Err(err) = self.register(item.tag, item.type_info) {
                    log::warn!("auto_register skipped `{}`: {err}", item.tag);
                }
            }
            available()
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }
}

impl core::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.by_tag.iter().map(|(k, v)| (k, v.type_path())))
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TypeRegistry;
    use crate::RegistryError;
    use crate::info::{Declared, FieldInfo, TypeInfo};

    static A: TypeInfo = TypeInfo::new("tests::A", &[]);
    static B: TypeInfo = TypeInfo::new("tests::B", &[FieldInfo::new("a", Declared::Exact(&A))]);

    #[test]
    fn idempotent_pair() {
        let mut registry = TypeRegistry::new();
        registry.register("a", &A).unwrap();
        registry.register("a", &A).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.is_known(&A));
        assert!(!registry.is_known(&B));
    }

    #[test]
    fn conflicts() {
        let mut registry = TypeRegistry::new().with("a", &A).unwrap();

        let err = registry.register("a", &B).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateTag { existing: "tests::A", .. }));

        let err = registry.register(String::from("other"), &A).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateType { type_path: "tests::A", .. }));
        assert_eq!(err.to_string(), "type `tests::A` is already registered under tag `a`");

        assert!(!registry.contains_tag("other"));
        assert_eq!(registry.iter().count(), 1);
    }

    #[test]
    fn resolve_by_path() {
        // A second descriptor with the same path denotes the same type.
        static A2: TypeInfo = TypeInfo::new("tests::A", &[]);

        let registry = TypeRegistry::new().with("a", &A).unwrap();
        assert_eq!(registry.resolve_tag(&A2), Some("a"));
        assert!(registry.resolve_type("b").is_none());
    }
}
