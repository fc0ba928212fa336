//! Object identity during one encode or decode call.
//!
//! ## Menu
//!
//! - [`Slot`]: The wire-level identity of an object within one payload.
//! - [`RefTracker`]: Encode side, assigns slots on first encounter.
//! - [`SlotTable`]: Decode side, maps slots back to graph objects.
//!
//! Both are created per call and dropped when the call returns.

// -----------------------------------------------------------------------------
// Modules

mod ref_tracker;
mod slot_table;

// -----------------------------------------------------------------------------
// Exports

pub use ref_tracker::{RefTracker, Track};
pub use slot_table::SlotTable;

use core::fmt;

use serde::{Deserialize, Serialize};

/// An identity slot, assigned in traversal order starting at `0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slot(pub u32);

impl fmt::Display for Slot {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
