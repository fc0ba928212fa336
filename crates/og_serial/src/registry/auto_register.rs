use crate::info::TypeInfo;

/// A `(tag, type)` pair collected by [`TypeRegistry::auto_register`].
///
/// Create these with [`register_type!`](crate::register_type).
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
#[derive(Debug, Clone, Copy)]
pub struct TypeRegistration {
    pub tag: &'static str,
    pub type_info: &'static TypeInfo,
}

impl TypeRegistration {
    #[inline]
    pub const fn new(tag: &'static str, type_info: &'static TypeInfo) -> Self {
        Self { tag, type_info }
    }
}

#[cfg(feature = "auto_register")]
inventory::collect!(TypeRegistration);

// Submitted by this crate so that a working platform always yields one item.
#[cfg(feature = "auto_register")]
struct Available;

#[cfg(feature = "auto_register")]
inventory::collect!(Available);

#[cfg(feature = "auto_register")]
inventory::submit! { Available }

/// Submits a `(tag, type)` pair for [`TypeRegistry::auto_register`].
///
/// Without the `auto_register` feature the macro expands to nothing.
///
/// # Examples
///
/// ```
/// use og_serial::info::{Declared, FieldInfo, TypeInfo};
/// use og_serial::registry::TypeRegistry;
///
/// static ENGINE: TypeInfo = TypeInfo::new(
///     "demo::Engine",
///     &[FieldInfo::new("power", Declared::INT)],
/// );
///
/// og_serial::register_type!("engine", ENGINE);
///
/// let mut registry = TypeRegistry::new();
/// if registry.auto_register() {
///     assert_eq!(registry.resolve_tag(&ENGINE), Some("engine"));
/// }
/// ```
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! register_type {
    ($tag:expr, $type_info:path) => {
        $crate::registry::inventory::submit! {
            $crate::registry::TypeRegistration::new($tag, &$type_info)
        }
    };
}

/// Submits a `(tag, type)` pair for `TypeRegistry::auto_register`.
///
/// The `auto_register` feature is disabled, so this expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! register_type {
    ($tag:expr, $type_info:path) => {};
}

/// Returns `false` when static registration does not work on this platform.
#[cfg(feature = "auto_register")]
pub(super) fn available() -> bool {
    inventory::iter::<Available>.into_iter().next().is_some()
}

#[cfg(feature = "auto_register")]
pub(super) fn registrations() -> impl Iterator<Item = &'static TypeRegistration> {
    inventory::iter::<TypeRegistration>.into_iter()
}
