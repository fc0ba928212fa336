use serde::de::{DeserializeSeed, Deserializer, Error};

use crate::adapter::SpecialAdapter;
use crate::graph::Value;

/// Hands an `@value` payload to its adapter through an erased deserializer.
pub(super) struct AdapterSeed<'a> {
    pub adapter: &'a dyn SpecialAdapter,
}

impl<'de> DeserializeSeed<'de> for AdapterSeed<'_> {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let mut erased = <dyn erased_serde::Deserializer>::erase(deserializer);
        self.adapter
            .decode(&mut erased)
            .map_err(<D::Error as Error>::custom)
    }
}
