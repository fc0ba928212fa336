// -----------------------------------------------------------------------------
// Modules

mod context;
mod object_serializer;
mod value_serializer;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use context::EncodeContext;
pub(crate) use value_serializer::ValueSerializer;
