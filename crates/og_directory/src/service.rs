use core::fmt;
use std::sync::Arc;

use crate::ServiceName;

slotmap::new_key_type! {
    /// The identity of a registration within one registry.
    pub struct ServiceId;
}

// -----------------------------------------------------------------------------
// Endpoint

/// Where a service is reachable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    address: String,
}

impl Endpoint {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    #[inline]
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

// -----------------------------------------------------------------------------
// Handlers

/// A processing step messages of a service pass through.
pub trait Handler: Send + Sync + 'static {
    fn name(&self) -> &str;
}

/// An ordered list of handlers.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    #[inline]
    pub const fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a handler to the end of the chain.
    pub fn push(&mut self, handler: impl Handler) {
        self.handlers.push(Arc::new(handler));
    }

    #[must_use]
    pub fn with(mut self, handler: impl Handler) -> Self {
        self.push(handler);
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterates over the handlers in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Handler> {
        self.handlers.iter().map(AsRef::as_ref)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(Handler::name)
    }
}

impl fmt::Debug for HandlerChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

// -----------------------------------------------------------------------------
// ServiceDomain

/// A named group of services.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceDomain {
    name: String,
}

impl ServiceDomain {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

// -----------------------------------------------------------------------------
// Service

/// A registration handle.
#[derive(Debug)]
pub struct Service {
    pub(crate) id: ServiceId,
    pub(crate) name: ServiceName,
    pub(crate) endpoint: Endpoint,
    pub(crate) handlers: HandlerChain,
    pub(crate) domain: ServiceDomain,
}

impl Service {
    #[inline]
    pub fn id(&self) -> ServiceId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &ServiceName {
        &self.name
    }

    #[inline]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    #[inline]
    pub fn handlers(&self) -> &HandlerChain {
        &self.handlers
    }

    #[inline]
    pub fn domain(&self) -> &ServiceDomain {
        &self.domain
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{Handler, HandlerChain};

    struct Named(&'static str);

    impl Handler for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn chain_order() {
        let chain = HandlerChain::new().with(Named("auth")).with(Named("audit"));
        assert_eq!(chain.names().collect::<Vec<_>>(), ["auth", "audit"]);
        assert_eq!(format!("{chain:?}"), r#"["auth", "audit"]"#);
    }
}
