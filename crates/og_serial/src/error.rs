use alloc::borrow::Cow;
use alloc::string::String;

use thiserror::Error;

use crate::tracker::Slot;

// -----------------------------------------------------------------------------
// RegistryError

/// An error returned when a tag/type binding conflicts with an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("tag `{tag}` is already bound to `{existing}`")]
    DuplicateTag {
        tag: Cow<'static, str>,
        existing: &'static str,
    },
    #[error("type `{type_path}` is already registered under tag `{existing}`")]
    DuplicateType {
        type_path: &'static str,
        existing: Cow<'static, str>,
    },
}

// -----------------------------------------------------------------------------
// SerialError

/// Every failure of [`Serializer::serialize`] and [`Serializer::deserialize`].
///
/// [`Serializer::serialize`]: crate::Serializer::serialize
/// [`Serializer::deserialize`]: crate::Serializer::deserialize
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerialError {
    /// The root value is a composite whose type cannot be written or resolved.
    #[error("unsupported root type `{type_name}`")]
    UnsupportedRootType { type_name: String },
    /// A reference points at a slot that no earlier object introduced.
    #[error("reference to unknown object slot {slot}")]
    DanglingReference { slot: Slot },
    /// Nesting went past the configured limit.
    #[error("nesting depth exceeded the limit of {limit}")]
    DepthExceeded { limit: usize },
    /// The input is well-formed for the format but not a valid graph encoding.
    #[error("malformed input: {0}")]
    Malformed(String),
    /// The format backend failed to produce or read bytes.
    #[error("{format} error: {message}")]
    Format {
        format: &'static str,
        message: String,
    },
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl SerialError {
    #[inline]
    pub(crate) fn unsupported_root(type_name: impl Into<String>) -> Self {
        SerialError::UnsupportedRootType {
            type_name: type_name.into(),
        }
    }

    #[inline]
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        SerialError::Malformed(message.into())
    }
}
