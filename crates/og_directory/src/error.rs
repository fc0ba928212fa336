use thiserror::Error;

use crate::ServiceName;

/// An error returned by a [`ServiceRegistry`](crate::ServiceRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DirectoryError {
    /// The handle does not belong to a live registration.
    #[error("service `{name}` is not registered")]
    NotRegistered { name: ServiceName },
    /// The text is not a valid `{namespace}local` name.
    #[error("invalid service name `{0}`")]
    InvalidName(String),
}
