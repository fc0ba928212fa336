//! Static type descriptors.
//!
//! ## Menu
//!
//! - [`TypeInfo`]: A concrete composite type, its stable type path and its ordered fields.
//! - [`FieldInfo`]: A named field and its [`Declared`] type.
//! - [`Declared`]: The type declared at a use site (field, element, root), possibly abstract.
//! - [`ScalarKind`]: The scalar shapes.
//!
//! Descriptors are plain `static` items, so recursive types can refer to themselves:
//!
//! ```
//! use og_serial::info::{Declared, FieldInfo, TypeInfo};
//!
//! static PERSON: TypeInfo = TypeInfo::new(
//!     "demo::Person",
//!     &[
//!         FieldInfo::new("name", Declared::TEXT),
//!         FieldInfo::new("best_friend", Declared::Exact(&PERSON)),
//!         FieldInfo::new("relatives", Declared::Sequence(&Declared::Exact(&PERSON))),
//!     ],
//! );
//!
//! assert_eq!(PERSON.type_name(), "Person");
//! assert_eq!(PERSON.field_len(), 3);
//! ```

// -----------------------------------------------------------------------------
// Modules

mod declared;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use declared::{Declared, ScalarKind};
pub use type_info::{FieldInfo, TypeInfo};
