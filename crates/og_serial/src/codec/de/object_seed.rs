use alloc::vec::Vec;
use core::fmt;

use serde::de::{DeserializeSeed, Deserializer, SeqAccess, Visitor};

use super::DecodeContext;
use super::value_seed::{Outcome, ValueSeed};
use crate::graph::{MapKey, Value};
use crate::info::Declared;

// Guards preallocation against hostile size hints.
const MAX_PREALLOCATE: usize = 1024;

// -----------------------------------------------------------------------------
// Items

/// Reads `@items` and `@bag` arrays. Skipped elements are left out.
pub(super) struct ItemsSeed<'c, 'a> {
    ctx: &'c mut DecodeContext<'a>,
    declared: Declared,
}

impl<'c, 'a> ItemsSeed<'c, 'a> {
    #[inline]
    pub fn new(ctx: &'c mut DecodeContext<'a>, declared: Declared) -> Self {
        Self { ctx, declared }
    }
}

impl<'de> DeserializeSeed<'de> for ItemsSeed<'_, '_> {
    type Value = Vec<Value>;

    #[inline]
    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for ItemsSeed<'_, '_> {
    type Value = Vec<Value>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "elements of `{}`", self.declared.describe())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE));
        loop {
            let seed = ValueSeed::new(&mut *self.ctx, self.declared);
            match seq.next_element_seed(seed)? {
                Some(Outcome::Value(value)) => items.push(value),
                Some(Outcome::Skipped) => {}
                None => break,
            }
        }
        Ok(items)
    }
}

// -----------------------------------------------------------------------------
// Entries

/// Reads `@entries`, an array of `[key, value]` pairs.
pub(super) struct EntriesSeed<'c, 'a> {
    ctx: &'c mut DecodeContext<'a>,
    declared: Declared,
}

impl<'c, 'a> EntriesSeed<'c, 'a> {
    #[inline]
    pub fn new(ctx: &'c mut DecodeContext<'a>, declared: Declared) -> Self {
        Self { ctx, declared }
    }
}

impl<'de> DeserializeSeed<'de> for EntriesSeed<'_, '_> {
    type Value = Vec<(MapKey, Value)>;

    #[inline]
    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for EntriesSeed<'_, '_> {
    type Value = Vec<(MapKey, Value)>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "entries of `{}`", self.declared.describe())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(MAX_PREALLOCATE));
        while let Some(entry) = seq.next_element_seed(EntrySeed {
            ctx: &mut *self.ctx,
            declared: self.declared,
        })? {
            // A skipped value drops the whole entry.
            if let Some(entry) = entry {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

struct EntrySeed<'c, 'a> {
    ctx: &'c mut DecodeContext<'a>,
    declared: Declared,
}

impl<'de> DeserializeSeed<'de> for EntrySeed<'_, '_> {
    type Value = Option<(MapKey, Value)>;

    #[inline]
    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for EntrySeed<'_, '_> {
    type Value = Option<(MapKey, Value)>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a `[key, value]` pair")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let Some(key) = seq.next_element::<MapKey>()? else {
            return Err(self.ctx.malformed("map entry without a key"));
        };
        let seed = ValueSeed::new(&mut *self.ctx, self.declared);
        let Some(outcome) = seq.next_element_seed(seed)? else {
            return Err(<A::Error as serde::de::Error>::invalid_length(1, &self));
        };
        Ok(match outcome {
            Outcome::Value(value) => Some((key, value)),
            Outcome::Skipped => None,
        })
    }
}
