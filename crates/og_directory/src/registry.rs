use std::sync::{Arc, PoisonError, RwLock};

use slotmap::SlotMap;

use crate::{DirectoryError, Endpoint, HandlerChain, Service, ServiceDomain, ServiceId, ServiceName};

// -----------------------------------------------------------------------------
// ServiceRegistry

/// Binds named services to endpoints, handler chains and domains.
///
/// Lookups return registrations in registration order.
pub trait ServiceRegistry: Send + Sync {
    /// Registers a service and returns its handle.
    fn register(
        &self,
        name: ServiceName,
        endpoint: Endpoint,
        handlers: HandlerChain,
        domain: ServiceDomain,
    ) -> Arc<Service>;

    /// Removes a registration.
    ///
    /// # Errors
    ///
    /// [`DirectoryError::NotRegistered`] if the handle is unknown or was
    /// already unregistered.
    fn unregister(&self, service: &Service) -> Result<(), DirectoryError>;

    /// Every registration.
    fn services(&self) -> Vec<Arc<Service>>;

    /// Registrations under `name`.
    fn services_named(&self, name: &ServiceName) -> Vec<Arc<Service>>;

    /// Registrations in the domain called `domain`.
    fn services_for_domain(&self, domain: &str) -> Vec<Arc<Service>>;
}

// -----------------------------------------------------------------------------
// InMemoryServiceRegistry

#[derive(Default)]
struct Inner {
    services: SlotMap<ServiceId, Arc<Service>>,
    order: Vec<ServiceId>,
}

impl Inner {
    fn select(&self, mut pred: impl FnMut(&Service) -> bool) -> Vec<Arc<Service>> {
        self.order
            .iter()
            .filter_map(|id| self.services.get(*id))
            .filter(|s| pred(s))
            .cloned()
            .collect()
    }
}

/// A thread-safe [`ServiceRegistry`] kept in memory.
#[derive(Default)]
pub struct InMemoryServiceRegistry {
    inner: RwLock<Inner>,
}

impl InMemoryServiceRegistry {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.read(|inner| inner.services.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<R>(&self, f: impl FnOnce(&Inner) -> R) -> R {
        f(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        f(&mut self.inner.write().unwrap_or_else(PoisonError::into_inner))
    }
}

impl ServiceRegistry for InMemoryServiceRegistry {
    fn register(
        &self,
        name: ServiceName,
        endpoint: Endpoint,
        handlers: HandlerChain,
        domain: ServiceDomain,
    ) -> Arc<Service> {
        log::debug!("registering `{name}` at `{endpoint}` in domain `{}`", domain.name());
        self.write(|inner| {
            let id = inner.services.insert_with_key(|id| {
                Arc::new(Service {
                    id,
                    name,
                    endpoint,
                    handlers,
                    domain,
                })
            });
            inner.order.push(id);
            inner.services[id].clone()
        })
    }

    fn unregister(&self, service: &Service) -> Result<(), DirectoryError> {
        let removed = self.write(|inner| {
            // Handles of other registries may share the key.
            let removed = inner
                .services
                .get(service.id)
                .is_some_and(|s| core::ptr::eq(s.as_ref(), service));
            if removed {
                inner.services.remove(service.id);
                inner.order.retain(|id| *id != service.id);
            }
            removed
        });
        if removed {
            Ok(())
        } else {
            log::warn!("cannot unregister `{}`: not registered", service.name);
            Err(DirectoryError::NotRegistered {
                name: service.name.clone(),
            })
        }
    }

    fn services(&self) -> Vec<Arc<Service>> {
        self.read(|inner| inner.select(|_| true))
    }

    fn services_named(&self, name: &ServiceName) -> Vec<Arc<Service>> {
        self.read(|inner| inner.select(|s| s.name == *name))
    }

    fn services_for_domain(&self, domain: &str) -> Vec<Arc<Service>> {
        self.read(|inner| inner.select(|s| s.domain.name() == domain))
    }
}

impl core::fmt::Debug for InMemoryServiceRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.read(|inner| {
            f.debug_list()
                .entries(inner.select(|_| true).iter().map(|s| s.name.to_string()))
                .finish()
        })
    }
}
