//! Discriminator tags for polymorphic composites.
//!
//! ## Menu
//!
//! - [`TypeRegistry`]: A bidirectional, unambiguous map between tags and [`TypeInfo`]s.
//! - [`TypeRegistration`]: A statically submitted `(tag, type)` pair.
//! - [`register_type!`]: Submit a pair for [`TypeRegistry::auto_register`].
//!
//! Only composites that appear where an abstract or `Any` type is declared need
//! a tag. Exactly-declared positions never consult the registry.
//!
//! ## auto_register
//!
//! We use [`inventory`] crate to implement static registration,
//! not all platforms support it (although major platforms do).
//!
//! If it is not supported, [`TypeRegistry::auto_register`] returns `false`
//! without causing any errors.
//!
//! [`TypeInfo`]: crate::info::TypeInfo
//! [`register_type!`]: crate::register_type

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use auto_register::TypeRegistration;
pub use type_registry::TypeRegistry;

#[doc(hidden)]
#[cfg(feature = "auto_register")]
pub use inventory;
