use slotmap::SecondaryMap;

use crate::graph::ObjectId;
use crate::tracker::Slot;

/// The outcome of [`RefTracker::track`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Track {
    /// First encounter, the object body must be written under this slot.
    FirstSeen(Slot),
    /// The object was written before, only a reference is emitted.
    AlreadySeen(Slot),
}

/// Encode-side identity tracking.
///
/// # Examples
///
/// ```
/// use og_serial::{Graph, Object};
/// use og_serial::tracker::{RefTracker, Slot, Track};
///
/// let mut graph = Graph::new();
/// let a = graph.insert(Object::Sequence(Vec::new()));
/// let b = graph.insert(Object::Sequence(Vec::new()));
///
/// let mut tracker = RefTracker::new();
/// assert_eq!(tracker.track(a), Track::FirstSeen(Slot(0)));
/// assert_eq!(tracker.track(b), Track::FirstSeen(Slot(1)));
/// assert_eq!(tracker.track(a), Track::AlreadySeen(Slot(0)));
/// ```
#[derive(Debug, Default)]
pub struct RefTracker {
    seen: SecondaryMap<ObjectId, Slot>,
    next: u32,
}

impl RefTracker {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns the next slot to `id` on first encounter.
    pub fn track(&mut self, id: ObjectId) -> Track {
        if let Some(slot) = self.seen.get(id) {
            return Track::AlreadySeen(*slot);
        }
        let slot = Slot(self.next);
        self.next += 1;
        self.seen.insert(id, slot);
        Track::FirstSeen(slot)
    }

    /// Returns the slot of `id` if it was tracked.
    #[inline]
    pub fn slot_of(&self, id: ObjectId) -> Option<Slot> {
        self.seen.get(id).copied()
    }

    /// Number of distinct objects seen.
    #[inline]
    pub fn len(&self) -> usize {
        self.seen.len()
    }
}
