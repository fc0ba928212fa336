use alloc::vec::Vec;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::{EncodeContext, ValueSerializer};
use crate::codec::keys;
use crate::graph::{Composite, MapKey, Value};
use crate::info::Declared;
use crate::tracker::Slot;

// -----------------------------------------------------------------------------
// Items

/// The elements of a sequence or keyed collection.
pub(super) struct ItemsSerializer<'c, 'a> {
    ctx: &'c EncodeContext<'a>,
    items: &'c [Value],
    declared: Declared,
}

impl<'c, 'a> ItemsSerializer<'c, 'a> {
    #[inline]
    pub const fn new(ctx: &'c EncodeContext<'a>, items: &'c [Value], declared: Declared) -> Self {
        Self {
            ctx,
            items,
            declared,
        }
    }
}

impl Serialize for ItemsSerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let admitted: Vec<_> = self
            .items
            .iter()
            .filter_map(|value| {
                let tag = self.ctx.admit(value, self.declared).keep()?;
                Some(ValueSerializer::new(self.ctx, value, self.declared, tag))
            })
            .collect();

        let mut state = serializer.serialize_seq(Some(admitted.len()))?;
        for element in &admitted {
            state.serialize_element(element)?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// Entries

/// Map entries, each written as a `[key, value]` pair.
pub(super) struct EntriesSerializer<'c, 'a> {
    ctx: &'c EncodeContext<'a>,
    entries: &'c [(MapKey, Value)],
    declared: Declared,
}

impl<'c, 'a> EntriesSerializer<'c, 'a> {
    #[inline]
    pub const fn new(
        ctx: &'c EncodeContext<'a>,
        entries: &'c [(MapKey, Value)],
        declared: Declared,
    ) -> Self {
        Self {
            ctx,
            entries,
            declared,
        }
    }
}

struct EntrySerializer<'c, 'a> {
    key: &'c MapKey,
    value: ValueSerializer<'c, 'a>,
}

impl Serialize for EntrySerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(2))?;
        state.serialize_element(self.key)?;
        state.serialize_element(&self.value)?;
        state.end()
    }
}

impl Serialize for EntriesSerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // An entry whose value cannot be written is dropped with its key.
        let admitted: Vec<_> = self
            .entries
            .iter()
            .filter_map(|(key, value)| {
                let tag = self.ctx.admit(value, self.declared).keep()?;
                Some(EntrySerializer {
                    key,
                    value: ValueSerializer::new(self.ctx, value, self.declared, tag),
                })
            })
            .collect();

        let mut state = serializer.serialize_seq(Some(admitted.len()))?;
        for entry in &admitted {
            state.serialize_element(entry)?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// Composite

/// A composite body: optional tag, slot, then the fields in declaration order.
pub(super) struct CompositeSerializer<'c, 'a> {
    ctx: &'c EncodeContext<'a>,
    composite: &'c Composite,
    slot: Slot,
    tag: Option<&'a str>,
}

impl<'c, 'a> CompositeSerializer<'c, 'a> {
    #[inline]
    pub const fn new(
        ctx: &'c EncodeContext<'a>,
        composite: &'c Composite,
        slot: Slot,
        tag: Option<&'a str>,
    ) -> Self {
        Self {
            ctx,
            composite,
            slot,
            tag,
        }
    }
}

impl Serialize for CompositeSerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let fields = self.composite.type_info().fields();

        // A field whose value cannot be written is omitted and reads back as null.
        let admitted: Vec<_> = fields
            .iter()
            .enumerate()
            .filter_map(|(index, field)| {
                let value = self.composite.value_at(index)?;
                let tag = self.ctx.admit(value, field.declared()).keep()?;
                Some((
                    field.name(),
                    ValueSerializer::new(self.ctx, value, field.declared(), tag),
                ))
            })
            .collect();

        let len = admitted.len() + 1 + usize::from(self.tag.is_some());
        let mut state = serializer.serialize_map(Some(len))?;
        if let Some(tag) = self.tag {
            state.serialize_entry(keys::TYPE, tag)?;
        }
        state.serialize_entry(keys::ID, &self.slot)?;
        for (name, value) in &admitted {
            state.serialize_entry(*name, value)?;
        }
        state.end()
    }
}
