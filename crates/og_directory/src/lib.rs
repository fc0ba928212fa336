#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod error;
mod name;
mod registry;
mod service;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::DirectoryError;
pub use name::ServiceName;
pub use registry::{InMemoryServiceRegistry, ServiceRegistry};
pub use service::{Endpoint, Handler, HandlerChain, Service, ServiceDomain, ServiceId};
