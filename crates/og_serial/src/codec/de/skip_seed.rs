use alloc::string::String;
use core::fmt;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};

use super::DecodeContext;
use crate::codec::keys;
use crate::tracker::Slot;

/// Walks a value that is not decoded, marking every `@id` inside it as skipped.
///
/// Later references to those slots are then dropped instead of dangling.
pub(super) struct SkipSeed<'c, 'a> {
    ctx: &'c mut DecodeContext<'a>,
}

impl<'c, 'a> SkipSeed<'c, 'a> {
    #[inline]
    pub fn new(ctx: &'c mut DecodeContext<'a>) -> Self {
        Self { ctx }
    }
}

/// Skips the remaining entries of a map token.
pub(super) fn skip_rest<'de, A: MapAccess<'de>>(
    ctx: &mut DecodeContext<'_>,
    map: &mut A,
) -> Result<(), A::Error> {
    while let Some(key) = map.next_key::<String>()? {
        if key == keys::ID {
            let slot = map.next_value::<Slot>()?;
            ctx.skip_slot::<A::Error>(slot)?;
        } else {
            map.next_value_seed(SkipSeed::new(ctx))?;
        }
    }
    Ok(())
}

impl<'de> DeserializeSeed<'de> for SkipSeed<'_, '_> {
    type Value = ();

    #[inline]
    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for SkipSeed<'_, '_> {
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("any value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<(), E> {
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<(), E> {
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<(), E> {
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<(), E> {
        Ok(())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<(), E> {
        Ok(())
    }

    fn visit_bytes<E: de::Error>(self, _: &[u8]) -> Result<(), E> {
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_none<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        self.ctx.enter::<A::Error>("skipped")?;
        while seq.next_element_seed(SkipSeed::new(&mut *self.ctx))?.is_some() {}
        self.ctx.leave();
        Ok(())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        self.ctx.enter::<A::Error>("skipped")?;
        skip_rest(&mut *self.ctx, &mut map)?;
        self.ctx.leave();
        Ok(())
    }
}
