use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};

use super::DecodeContext;
use super::adapter_seed::AdapterSeed;
use super::object_seed::{EntriesSeed, ItemsSeed};
use super::skip_seed::{SkipSeed, skip_rest};
use crate::SerialError;
use crate::codec::keys;
use crate::graph::{Object, Value};
use crate::info::{Declared, ScalarKind, TypeInfo};
use crate::tracker::Slot;

/// The result of decoding one value.
#[derive(Debug)]
pub(crate) enum Outcome {
    Value(Value),
    /// The value named a type or adapter this side does not know.
    Skipped,
}

// -----------------------------------------------------------------------------
// ValueSeed

/// Reads one value at a position declared as `declared`.
pub(crate) struct ValueSeed<'c, 'a> {
    ctx: &'c mut DecodeContext<'a>,
    declared: Declared,
    root: bool,
}

impl<'c, 'a> ValueSeed<'c, 'a> {
    #[inline]
    pub(crate) fn new(ctx: &'c mut DecodeContext<'a>, declared: Declared) -> Self {
        Self {
            ctx,
            declared,
            root: false,
        }
    }

    /// The root value: unknown types fail instead of being skipped.
    #[inline]
    pub(crate) fn root(ctx: &'c mut DecodeContext<'a>, declared: Declared) -> Self {
        Self {
            ctx,
            declared,
            root: true,
        }
    }

    /// Skips an element of unknown type. At the root this is an error.
    fn skip<E: de::Error>(self, reason: &str, type_name: &str) -> Result<Outcome, E> {
        if self.root {
            return Err(self.ctx.fail(SerialError::unsupported_root(type_name)));
        }
        log::debug!(
            "skipping {reason} `{type_name}` in a `{}` position",
            self.declared.describe()
        );
        Ok(Outcome::Skipped)
    }

    fn parse_date<E: de::Error>(self, text: &str) -> Result<Outcome, E> {
        match DateTime::parse_from_rfc3339(text) {
            Ok(date) => Ok(Outcome::Value(Value::Date(date.with_timezone(&Utc)))),
            Err(err) => Err(self
                .ctx
                .malformed(format_args!("invalid date `{text}`: {err}"))),
        }
    }

    fn visit_object<'de, A: MapAccess<'de>>(
        self,
        slot: Slot,
        mut map: A,
    ) -> Result<Outcome, A::Error> {
        let next = map.next_key::<String>()?;

        let shell = match next.as_deref() {
            Some(keys::ITEMS) => Object::Sequence(Vec::new()),
            Some(keys::BAG) => Object::Collection(Vec::new()),
            Some(keys::ENTRIES) => Object::Map(Vec::new()),
            _ => {
                let ty = match self.declared {
                    Declared::Exact(ty) => ty,
                    _ => {
                        self.ctx.skip_slot::<A::Error>(slot)?;
                        if next.is_some() {
                            map.next_value_seed(SkipSeed::new(&mut *self.ctx))?;
                        }
                        skip_rest(&mut *self.ctx, &mut map)?;
                        let type_name = self.declared.describe().to_string();
                        return self.skip("untagged composite for", &type_name);
                    }
                };
                return visit_composite(self.ctx, ty, slot, next, map);
            }
        };

        let ctx = self.ctx;
        let element = self.declared.element();
        ctx.enter::<A::Error>(shell.kind())?;
        ctx.slots
            .reserve(slot, shell.clone(), &mut ctx.graph)
            .map_err(|e| ctx.fail::<A::Error>(e))?;

        let object = match shell {
            Object::Sequence(_) => {
                Object::Sequence(map.next_value_seed(ItemsSeed::new(ctx, element))?)
            }
            Object::Collection(_) => {
                Object::Collection(map.next_value_seed(ItemsSeed::new(ctx, element))?)
            }
            _ => Object::Map(map.next_value_seed(EntriesSeed::new(ctx, element))?),
        };
        skip_rest(&mut *ctx, &mut map)?;

        let id = ctx
            .slots
            .populate(slot, object, &mut ctx.graph)
            .map_err(|e| ctx.fail::<A::Error>(e))?;
        ctx.leave();
        Ok(Outcome::Value(Value::Object(id)))
    }
}

/// Reads a composite body of type `ty`, `pending` being an already consumed field key.
fn visit_composite<'de, A: MapAccess<'de>>(
    ctx: &mut DecodeContext<'_>,
    ty: &'static TypeInfo,
    slot: Slot,
    pending: Option<String>,
    mut map: A,
) -> Result<Outcome, A::Error> {
    ctx.enter::<A::Error>(ty.type_path())?;
    ctx.slots
        .reserve(slot, Object::Composite(ty.instantiate()), &mut ctx.graph)
        .map_err(|e| ctx.fail::<A::Error>(e))?;

    let mut composite = ty.instantiate();
    let mut pending = pending;
    loop {
        let name = match pending.take() {
            Some(name) => name,
            None => match map.next_key::<String>()? {
                Some(name) => name,
                None => break,
            },
        };
        // Unknown names are ignored.
        let Some(index) = ty.field_index(&name) else {
            map.next_value_seed(SkipSeed::new(&mut *ctx))?;
            continue;
        };
        let declared = ty.fields()[index].declared();
        if let Outcome::Value(value) = map.next_value_seed(ValueSeed::new(ctx, declared))? {
            composite.set_at(index, value);
        }
    }

    let id = ctx
        .slots
        .populate(slot, Object::Composite(composite), &mut ctx.graph)
        .map_err(|e| ctx.fail::<A::Error>(e))?;
    ctx.leave();
    Ok(Outcome::Value(Value::Object(id)))
}

/// Consumes the remaining entries of a map token.
fn drain<'de, A: MapAccess<'de>>(map: &mut A) -> Result<(), A::Error> {
    while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
    Ok(())
}

impl<'de> DeserializeSeed<'de> for ValueSeed<'_, '_> {
    type Value = Outcome;

    #[inline]
    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for ValueSeed<'_, '_> {
    type Value = Outcome;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a value for `{}`", self.declared.describe())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Outcome::Value(Value::Null))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Outcome::Value(Value::Null))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_newtype_struct<D: Deserializer<'de>>(
        self,
        deserializer: D,
    ) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
        Ok(Outcome::Value(Value::Bool(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        if self.declared.is_scalar(ScalarKind::Float) {
            return Ok(Outcome::Value(Value::Float(v as f64)));
        }
        Ok(Outcome::Value(Value::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        if self.declared.is_scalar(ScalarKind::Float) {
            return Ok(Outcome::Value(Value::Float(v as f64)));
        }
        match i64::try_from(v) {
            Ok(v) => Ok(Outcome::Value(Value::Int(v))),
            Err(_) => Err(self.ctx.malformed(format_args!("integer {v} is out of range"))),
        }
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(Outcome::Value(Value::Float(v)))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Self::Value, E> {
        self.visit_string(String::from(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        if self.declared.is_scalar(ScalarKind::Date) {
            return self.parse_date(v);
        }
        Ok(Outcome::Value(Value::Text(String::from(v))))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        if self.declared.is_scalar(ScalarKind::Date) {
            return self.parse_date(&v);
        }
        Ok(Outcome::Value(Value::Text(v)))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, _: A) -> Result<Self::Value, A::Error> {
        Err(self.ctx.malformed("a bare sequence is not a value token"))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let Some(key) = map.next_key::<String>()? else {
            return Err(self.ctx.malformed("empty map token"));
        };

        match key.as_str() {
            keys::REF => {
                let slot = map.next_value::<Slot>()?;
                drain(&mut map)?;
                match self.ctx.slots.resolve(slot) {
                    Ok(Some(id)) => Ok(Outcome::Value(Value::Object(id))),
                    Ok(None) => self.skip("reference to the skipped object", &slot.to_string()),
                    Err(err) => Err(self.ctx.fail(err)),
                }
            }
            keys::DATE => {
                let text = map.next_value::<String>()?;
                drain(&mut map)?;
                self.parse_date(&text)
            }
            keys::ADAPTER => {
                let name = map.next_value::<String>()?;
                if map.next_key::<String>()?.as_deref() != Some(keys::VALUE) {
                    return Err(self.ctx.malformed(format_args!("adapter `{name}` has no payload")));
                }
                let adapters = self.ctx.adapters;
                match adapters.by_name(&name) {
                    Some(adapter) => {
                        let value = map.next_value_seed(AdapterSeed { adapter })?;
                        drain(&mut map)?;
                        Ok(Outcome::Value(value))
                    }
                    None => {
                        map.next_value::<IgnoredAny>()?;
                        drain(&mut map)?;
                        self.skip("unknown adapter", &name)
                    }
                }
            }
            keys::TYPE => {
                let tag = map.next_value::<String>()?;
                let Some(ty) = self.ctx.registry.resolve_type(&tag) else {
                    skip_rest(&mut *self.ctx, &mut map)?;
                    return self.skip("unknown type tag", &tag);
                };
                if map.next_key::<String>()?.as_deref() != Some(keys::ID) {
                    return Err(self.ctx.malformed(format_args!("`{tag}` has no object slot")));
                }
                let slot = map.next_value::<Slot>()?;
                visit_composite(self.ctx, ty, slot, None, map)
            }
            keys::ID => {
                let slot = map.next_value::<Slot>()?;
                self.visit_object(slot, map)
            }
            other => Err(self
                .ctx
                .malformed(format_args!("unexpected key `{other}` in a value token"))),
        }
    }
}
