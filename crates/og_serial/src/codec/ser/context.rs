use core::cell::{Cell, RefCell};
use core::fmt::Display;

use serde::ser::Error;

use super::ValueSerializer;
use crate::SerialError;
use crate::adapter::AdapterSet;
use crate::codec::error_utils::{TypeStack, describe};
use crate::graph::{Graph, Object, Value};
use crate::info::Declared;
use crate::registry::TypeRegistry;
use crate::tracker::RefTracker;

/// How a value is written at a position with a given declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Admit<'a> {
    /// Written without a discriminator.
    Plain,
    /// A composite written with this discriminator tag.
    Tagged(&'a str),
    /// A composite whose type cannot be written here.
    Drop,
}

impl<'a> Admit<'a> {
    /// `None` for [`Admit::Drop`], otherwise the tag to write, if any.
    #[inline]
    pub fn keep(self) -> Option<Option<&'a str>> {
        match self {
            Admit::Plain => Some(None),
            Admit::Tagged(tag) => Some(Some(tag)),
            Admit::Drop => None,
        }
    }
}

/// Per-call encode state.
pub(crate) struct EncodeContext<'a> {
    pub(super) graph: &'a Graph,
    pub(super) adapters: &'a AdapterSet,
    registry: &'a TypeRegistry,
    include_type_hints: bool,
    max_depth: Option<usize>,
    pub(super) tracker: RefCell<RefTracker>,
    depth: Cell<usize>,
    stack: RefCell<TypeStack>,
    failure: RefCell<Option<SerialError>>,
}

impl<'a> EncodeContext<'a> {
    pub fn new(
        graph: &'a Graph,
        registry: &'a TypeRegistry,
        adapters: &'a AdapterSet,
        include_type_hints: bool,
        max_depth: Option<usize>,
    ) -> Self {
        Self {
            graph,
            adapters,
            registry,
            include_type_hints,
            max_depth,
            tracker: RefCell::new(RefTracker::new()),
            depth: Cell::new(0),
            stack: RefCell::new(TypeStack::new()),
            failure: RefCell::new(None),
        }
    }

    /// Decides whether `value` can be written where `declared` is expected.
    ///
    /// Only composites are ever refused: exactly-declared ones are written
    /// plain, others need a registered tag and type hints enabled.
    pub fn admit(&self, value: &Value, declared: Declared) -> Admit<'a> {
        let Value::Object(id) = value else {
            return Admit::Plain;
        };
        let Some(ty) = self.graph.get(*id).and_then(Object::type_info) else {
            return Admit::Plain;
        };
        if declared.is_exactly(ty) || self.adapters.find(value).is_some() {
            return Admit::Plain;
        }
        if !self.include_type_hints {
            log::debug!(
                "dropping `{}` in a `{}` position: type hints are disabled",
                ty.type_path(),
                declared.describe(),
            );
            return Admit::Drop;
        }
        match self.registry.resolve_tag(ty) {
            Some(tag) => Admit::Tagged(tag),
            None => {
                log::debug!(
                    "dropping `{}` in a `{}` position: type is not registered",
                    ty.type_path(),
                    declared.describe(),
                );
                Admit::Drop
            }
        }
    }

    /// The serializer for the root value.
    ///
    /// Fails with [`SerialError::UnsupportedRootType`] if the root would be dropped.
    pub fn root<'c>(
        &'c self,
        value: &'c Value,
        declared: Declared,
    ) -> Result<ValueSerializer<'c, 'a>, SerialError> {
        match self.admit(value, declared).keep() {
            Some(tag) => Ok(ValueSerializer::new(self, value, declared, tag)),
            None => {
                let type_name = value
                    .as_object()
                    .and_then(|id| self.graph.get(id))
                    .and_then(Object::type_info)
                    .map_or("unknown", |ty| ty.type_path());
                Err(SerialError::unsupported_root(type_name))
            }
        }
    }

    /// The typed error recorded by the last failure, if any.
    #[inline]
    pub fn take_failure(&self) -> Option<SerialError> {
        self.failure.borrow_mut().take()
    }

    /// Number of distinct objects written.
    #[inline]
    pub fn objects_written(&self) -> usize {
        self.tracker.borrow().len()
    }

    /// Records `err` and converts it for the serializer.
    pub(super) fn fail<E: Error>(&self, err: SerialError) -> E {
        let error = E::custom(&err);
        let mut failure = self.failure.borrow_mut();
        if failure.is_none() {
            *failure = Some(err);
        }
        error
    }

    pub(super) fn malformed<E: Error>(&self, msg: impl Display) -> E {
        let message = describe(msg, &self.stack.borrow());
        self.fail(SerialError::Malformed(message))
    }

    /// Enters an object, checking the depth limit.
    pub(super) fn enter<E: Error>(&self, label: &'static str) -> Result<(), E> {
        let depth = self.depth.get() + 1;
        if let Some(limit) = self.max_depth
            && depth > limit
        {
            return Err(self.fail(SerialError::DepthExceeded { limit }));
        }
        self.depth.set(depth);
        self.stack.borrow_mut().push(label);
        Ok(())
    }

    pub(super) fn leave(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
        self.stack.borrow_mut().pop();
    }
}
