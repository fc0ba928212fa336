// -----------------------------------------------------------------------------
// Modules

mod adapter_seed;
mod context;
mod object_seed;
mod skip_seed;
mod value_seed;

// -----------------------------------------------------------------------------
// Exports

pub(crate) use context::DecodeContext;
pub(crate) use value_seed::{Outcome, ValueSeed};
