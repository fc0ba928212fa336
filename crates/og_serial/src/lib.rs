#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Alloc

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod codec;
mod error;
mod serializer;

pub mod adapter;
pub mod format;
pub mod graph;
pub mod info;
pub mod registry;
pub mod tracker;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use error::{RegistryError, SerialError};
pub use format::FormatType;
pub use graph::{Composite, Graph, MapKey, Object, ObjectId, Value};
pub use graph::{Fault, Frame};
pub use graph::{Attribute, Element, Markup, MarkupError, MarkupNode};
pub use info::{Declared, FieldInfo, ScalarKind, TypeInfo};
pub use registry::TypeRegistry;
pub use serializer::{DEFAULT_MAX_DEPTH, Decoded, Serializer, SerializerBuilder, SerializerConfig};
