//! Deterministic hash containers over *hashbrown* and *foldhash*.
//!
//! [`FixedHashState`] is based on `foldhash` with a fixed seed,
//! so hash results (and therefore iteration order) only depend on the input.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHasher

/// Seed shared by every [`FixedHashState`].
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x2C3B_9E1D_57A0_F846);

/// The hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A `BuildHasher` whose output depends on the input only.
///
/// # Examples
///
/// ```
/// use core::hash::{BuildHasher, Hash, Hasher};
/// use og_utils::hash::FixedHashState;
///
/// let hash = |v: u32| {
///     let mut hasher = FixedHashState.build_hasher();
///     v.hash(&mut hasher);
///     hasher.finish()
/// };
///
/// assert_eq!(hash(7), hash(7));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
///
/// Create one with `HashMap::default()`.
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
///
/// Create one with `HashSet::default()`.
pub type HashSet<T> = hashbrown::HashSet<T, FixedHashState>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{HashMap, HashSet};
    use alloc::string::String;

    #[test]
    fn borrowed_lookup() {
        let mut map: HashMap<String, u32> = HashMap::default();
        map.insert(String::from("wheel"), 1);

        assert_eq!(map.get("wheel"), Some(&1));
        assert!(map.get("crank").is_none());
    }

    #[test]
    fn set_dedup() {
        let mut set: HashSet<&str> = HashSet::default();
        assert!(set.insert("a"));
        assert!(!set.insert("a"));
        assert_eq!(set.len(), 1);
    }
}
