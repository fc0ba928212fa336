//! The structural codec: graph values to serde tokens and back.
//!
//! # Wire shapes
//!
//! Every shape is a self-describing map token whose reserved keys start with `@`:
//!
//! | value                | token                                                  |
//! |----------------------|--------------------------------------------------------|
//! | null                 | unit                                                   |
//! | bool, int, float     | native scalar                                          |
//! | text                 | string                                                 |
//! | date                 | `{"@date": "2024-01-02T03:04:05Z"}`, a plain string in a date slot |
//! | back-reference       | `{"@ref": slot}`                                       |
//! | composite            | `{"@type"?: tag, "@id": slot, field: value, ...}`      |
//! | sequence             | `{"@id": slot, "@items": [value, ...]}`                |
//! | keyed collection     | `{"@id": slot, "@bag": [value, ...]}`                  |
//! | map                  | `{"@id": slot, "@entries": [[key, value], ...]}`       |
//! | adapter-encoded      | `{"@adapter": name, "@value": payload}`                |
//!
//! `@type` is only written when the declared type at the position is not
//! exactly the runtime type.
//!
//! ## Encoding
//!
//! `EncodeContext` holds the per-call state; `ValueSerializer` writes one
//! value and recurses through the graph. Objects are tracked on first
//! encounter, later encounters write `@ref`. Composites whose type cannot be
//! written are dropped from their container, the root excepted.
//!
//! ## Decoding
//!
//! `DecodeContext` holds the per-call state; `ValueSeed` reads one value.
//! Objects are reserved in the graph before their body is read, so
//! back-references inside the body resolve to the same instance.

// -----------------------------------------------------------------------------
// Debug utils

mod error_utils;

// -----------------------------------------------------------------------------
// Modules

mod de;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use de::{DecodeContext, Outcome, ValueSeed};
pub(crate) use ser::EncodeContext;

/// Reserved keys.
pub(crate) mod keys {
    pub const REF: &str = "@ref";
    pub const DATE: &str = "@date";
    pub const TYPE: &str = "@type";
    pub const ID: &str = "@id";
    pub const ITEMS: &str = "@items";
    pub const BAG: &str = "@bag";
    pub const ENTRIES: &str = "@entries";
    pub const ADAPTER: &str = "@adapter";
    pub const VALUE: &str = "@value";
}
