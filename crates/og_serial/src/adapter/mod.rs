//! Structural adapters for values the generic codec cannot describe.
//!
//! An adapter claims values with [`SpecialAdapter::matches`] and writes them as
//! `{"@adapter": name, "@value": payload}`. On decode the payload is handed back
//! to the adapter registered under that name.
//!
//! ## Menu
//!
//! - [`SpecialAdapter`]: The adapter interface.
//! - [`AdapterSet`]: Ordered adapters, user adapters before built-ins.
//! - [`MarkupAdapter`]: Markup documents, as text.
//! - [`FaultAdapter`]: Error chains with their call-stack frames.

// -----------------------------------------------------------------------------
// Modules

mod fault;
mod markup;

// -----------------------------------------------------------------------------
// Exports

pub use fault::FaultAdapter;
pub use markup::MarkupAdapter;

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::graph::Value;

// -----------------------------------------------------------------------------
// SpecialAdapter

/// Custom encoding for a family of inline values.
///
/// # Examples
///
/// ```
/// use og_serial::Value;
/// use og_serial::adapter::SpecialAdapter;
///
/// /// Writes negative integers as text.
/// struct Negative;
///
/// impl SpecialAdapter for Negative {
///     fn name(&self) -> &'static str {
///         "neg"
///     }
///
///     fn matches(&self, value: &Value) -> bool {
///         value.as_int().is_some_and(|v| v < 0)
///     }
///
///     fn payload<'a>(&self, value: &'a Value) -> Option<Box<dyn erased_serde::Serialize + 'a>> {
///         value.as_int().map(|v| Box::new(v.to_string()) as Box<dyn erased_serde::Serialize>)
///     }
///
///     fn decode(
///         &self,
///         deserializer: &mut dyn erased_serde::Deserializer<'_>,
///     ) -> Result<Value, erased_serde::Error> {
///         let text: String = erased_serde::deserialize(deserializer)?;
///         text.parse::<i64>()
///             .map(Value::Int)
///             .map_err(<erased_serde::Error as serde::de::Error>::custom)
///     }
/// }
/// ```
pub trait SpecialAdapter: Send + Sync + 'static {
    /// The name written as `@adapter`. Must be unique within an [`AdapterSet`].
    fn name(&self) -> &'static str;

    /// Returns `true` if this adapter encodes `value`.
    fn matches(&self, value: &Value) -> bool;

    /// The serializable payload of a matched value.
    fn payload<'a>(&self, value: &'a Value) -> Option<Box<dyn erased_serde::Serialize + 'a>>;

    /// Rebuilds a value from its payload.
    fn decode(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<Value, erased_serde::Error>;
}

// -----------------------------------------------------------------------------
// AdapterSet

/// An ordered set of adapters.
///
/// Matching takes the first adapter whose predicate accepts the value. User
/// adapters are placed before the built-ins, so they take precedence.
#[derive(Clone)]
pub struct AdapterSet {
    adapters: Vec<Arc<dyn SpecialAdapter>>,
    user: usize,
}

impl Default for AdapterSet {
    /// See [`AdapterSet::builtin`].
    #[inline]
    fn default() -> Self {
        Self::builtin()
    }
}

impl AdapterSet {
    /// A set without any adapter.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            adapters: Vec::new(),
            user: 0,
        }
    }

    /// The markup and fault adapters.
    pub fn builtin() -> Self {
        Self {
            adapters: vec![Arc::new(MarkupAdapter), Arc::new(FaultAdapter)],
            user: 0,
        }
    }

    /// Adds a user adapter, ahead of the built-ins.
    ///
    /// An existing adapter with the same name is replaced.
    pub fn insert(&mut self, adapter: impl SpecialAdapter) {
        self.insert_arc(Arc::new(adapter));
    }

    pub(crate) fn insert_arc(&mut self, adapter: Arc<dyn SpecialAdapter>) {
        if let Some(index) = self.adapters.iter().position(|a| a.name() == adapter.name()) {
            self.adapters.remove(index);
            if index < self.user {
                self.user -= 1;
            }
        }
        self.adapters.insert(self.user, adapter);
        self.user += 1;
    }

    /// The first adapter that claims `value`.
    pub fn find(&self, value: &Value) -> Option<&dyn SpecialAdapter> {
        self.adapters
            .iter()
            .find(|a| a.matches(value))
            .map(AsRef::as_ref)
    }

    /// The adapter registered as `name`.
    pub fn by_name(&self, name: &str) -> Option<&dyn SpecialAdapter> {
        self.adapters
            .iter()
            .find(|a| a.name() == name)
            .map(AsRef::as_ref)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.adapters.iter().map(|a| a.name())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }
}

impl core::fmt::Debug for AdapterSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
