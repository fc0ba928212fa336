use core::fmt::Display;

use serde::de::Error;

use crate::SerialError;
use crate::adapter::AdapterSet;
use crate::codec::error_utils::{TypeStack, describe};
use crate::graph::Graph;
use crate::registry::TypeRegistry;
use crate::tracker::{Slot, SlotTable};

/// Per-call decode state. Owns the graph being rebuilt.
pub(crate) struct DecodeContext<'a> {
    pub(super) registry: &'a TypeRegistry,
    pub(super) adapters: &'a AdapterSet,
    pub(super) graph: Graph,
    pub(super) slots: SlotTable,
    max_depth: Option<usize>,
    depth: usize,
    stack: TypeStack,
    failure: Option<SerialError>,
}

impl<'a> DecodeContext<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        adapters: &'a AdapterSet,
        max_depth: Option<usize>,
    ) -> Self {
        Self {
            registry,
            adapters,
            graph: Graph::new(),
            slots: SlotTable::new(),
            max_depth,
            depth: 0,
            stack: TypeStack::new(),
            failure: None,
        }
    }

    /// The typed error recorded by the last failure, if any.
    #[inline]
    pub fn take_failure(&mut self) -> Option<SerialError> {
        self.failure.take()
    }

    /// Consumes the context, returning the decoded graph.
    #[inline]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Records `err` and converts it for the deserializer.
    pub(super) fn fail<E: Error>(&mut self, err: SerialError) -> E {
        let error = E::custom(&err);
        if self.failure.is_none() {
            self.failure = Some(err);
        }
        error
    }

    pub(super) fn malformed<E: Error>(&mut self, msg: impl Display) -> E {
        let message = describe(msg, &self.stack);
        self.fail(SerialError::Malformed(message))
    }

    /// Marks `slot` as the identity of an object that is not decoded.
    pub(super) fn skip_slot<E: Error>(&mut self, slot: Slot) -> Result<(), E> {
        self.slots.skip(slot).map_err(|err| self.fail(err))
    }

    /// Enters an object, checking the depth limit.
    pub(super) fn enter<E: Error>(&mut self, label: &'static str) -> Result<(), E> {
        let depth = self.depth + 1;
        if let Some(limit) = self.max_depth
            && depth > limit
        {
            return Err(self.fail(SerialError::DepthExceeded { limit }));
        }
        self.depth = depth;
        self.stack.push(label);
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.stack.pop();
    }
}
