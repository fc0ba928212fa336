use chrono::SecondsFormat;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::EncodeContext;
use super::object_serializer::{CompositeSerializer, EntriesSerializer, ItemsSerializer};
use crate::codec::keys;
use crate::graph::{Object, ObjectId, Value};
use crate::info::{Declared, ScalarKind};
use crate::tracker::Track;

/// Writes one [`Value`] at a position declared as `declared`.
///
/// `tag` is the discriminator decided by [`EncodeContext::admit`]; it is only
/// used when the value is a composite written for the first time.
pub(crate) struct ValueSerializer<'c, 'a> {
    ctx: &'c EncodeContext<'a>,
    value: &'c Value,
    declared: Declared,
    tag: Option<&'a str>,
}

impl<'c, 'a> ValueSerializer<'c, 'a> {
    #[inline]
    pub(crate) const fn new(
        ctx: &'c EncodeContext<'a>,
        value: &'c Value,
        declared: Declared,
        tag: Option<&'a str>,
    ) -> Self {
        Self {
            ctx,
            value,
            declared,
            tag,
        }
    }

    fn serialize_object<S: Serializer>(
        &self,
        id: ObjectId,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let ctx = self.ctx;
        let Some(object) = ctx.graph.get(id) else {
            return Err(ctx.malformed("reference to an object missing from the graph"));
        };

        let track = ctx.tracker.borrow_mut().track(id);
        let slot = match track {
            Track::AlreadySeen(slot) => {
                let mut state = serializer.serialize_map(Some(1))?;
                state.serialize_entry(keys::REF, &slot)?;
                return state.end();
            }
            Track::FirstSeen(slot) => slot,
        };

        let label = match object {
            Object::Composite(c) => c.type_info().type_path(),
            other => other.kind(),
        };
        ctx.enter::<S::Error>(label)?;

        let element = self.declared.element();
        let output = match object {
            Object::Sequence(items) | Object::Collection(items) => {
                let key = match object {
                    Object::Sequence(_) => keys::ITEMS,
                    _ => keys::BAG,
                };
                let mut state = serializer.serialize_map(Some(2))?;
                state.serialize_entry(keys::ID, &slot)?;
                state.serialize_entry(key, &ItemsSerializer::new(ctx, items, element))?;
                state.end()
            }
            Object::Map(entries) => {
                let mut state = serializer.serialize_map(Some(2))?;
                state.serialize_entry(keys::ID, &slot)?;
                state.serialize_entry(keys::ENTRIES, &EntriesSerializer::new(ctx, entries, element))?;
                state.end()
            }
            Object::Composite(composite) => {
                CompositeSerializer::new(ctx, composite, slot, self.tag).serialize(serializer)
            }
        };

        ctx.leave();
        output
    }
}

impl Serialize for ValueSerializer<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let ctx = self.ctx;

        if self.value.is_null() {
            return serializer.serialize_unit();
        }

        if let Some(adapter) = ctx.adapters.find(self.value) {
            let Some(payload) = adapter.payload(self.value) else {
                return Err(ctx.malformed(format_args!(
                    "adapter `{}` rejected a {} value",
                    adapter.name(),
                    self.value.shape(),
                )));
            };
            let mut state = serializer.serialize_map(Some(2))?;
            state.serialize_entry(keys::ADAPTER, adapter.name())?;
            state.serialize_entry(keys::VALUE, &*payload)?;
            return state.end();
        }

        if let Value::Float(v) = self.value
            && !v.is_finite()
        {
            return Err(ctx.malformed(format_args!("float {v} has no portable form")));
        }
        if let Declared::Scalar(kind) = self.declared
            && let Some(actual) = scalar_kind(self.value)
            && actual != kind
        {
            return Err(ctx.malformed(format_args!(
                "{} value in a `{}` slot",
                self.value.shape(),
                kind.name(),
            )));
        }

        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Text(v) => serializer.serialize_str(v),
            Value::Date(v) => {
                let text = v.to_rfc3339_opts(SecondsFormat::AutoSi, true);
                if self.declared.is_scalar(ScalarKind::Date) {
                    serializer.serialize_str(&text)
                } else {
                    let mut state = serializer.serialize_map(Some(1))?;
                    state.serialize_entry(keys::DATE, &text)?;
                    state.end()
                }
            }
            Value::Object(id) => self.serialize_object(*id, serializer),
            Value::Markup(_) | Value::Fault(_) => Err(ctx.malformed(format_args!(
                "no adapter for {} values",
                self.value.shape()
            ))),
        }
    }
}

/// The kind of a scalar value, `None` for nulls, objects and adapted values.
#[inline]
const fn scalar_kind(value: &Value) -> Option<ScalarKind> {
    match value {
        Value::Bool(_) => Some(ScalarKind::Bool),
        Value::Int(_) => Some(ScalarKind::Int),
        Value::Float(_) => Some(ScalarKind::Float),
        Value::Text(_) => Some(ScalarKind::Text),
        Value::Date(_) => Some(ScalarKind::Date),
        Value::Null | Value::Object(_) | Value::Markup(_) | Value::Fault(_) => None,
    }
}
