//! Byte formats.
//!
//! The codec speaks serde; a [`FormatBackend`] turns its tokens into bytes
//! and back. Any self-describing serde format can be plugged in.
//!
//! ## Menu
//!
//! - [`FormatBackend`]: The backend interface.
//! - [`FormatType`]: Selects a built-in backend.
//! - [`JsonFormat`]: `serde_json`, feature `json`.
//! - [`RonFormat`]: `ron`, feature `ron`.

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "json")]
mod json;
#[cfg(feature = "ron")]
mod ron;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "json")]
pub use json::JsonFormat;
#[cfg(feature = "ron")]
pub use ron::RonFormat;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt::Display;

use crate::SerialError;

/// The callback [`FormatBackend::decode`] hands its deserializer to.
pub type DecodeFn<'f> =
    dyn FnMut(&mut dyn erased_serde::Deserializer<'_>) -> Result<(), erased_serde::Error> + 'f;

// -----------------------------------------------------------------------------
// FormatBackend

/// A self-describing serde format.
///
/// Decoding goes through `deserialize_any`, so the format must be able to
/// describe its own tokens. Binary formats that need type hints from the
/// reader are not suitable.
pub trait FormatBackend: Send + Sync + 'static {
    /// A short name used in errors and logs.
    fn name(&self) -> &'static str;

    /// Writes `value` to bytes.
    fn encode(&self, value: &dyn erased_serde::Serialize) -> Result<Vec<u8>, SerialError>;

    /// Builds a deserializer over `bytes` and passes it to `visit`.
    ///
    /// Errors returned by `visit` must be reported as [`SerialError::Format`].
    /// Trailing input after the value is an error.
    fn decode(&self, bytes: &[u8], visit: &mut DecodeFn<'_>) -> Result<(), SerialError>;
}

// -----------------------------------------------------------------------------
// FormatType

/// The built-in formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum FormatType {
    #[cfg(feature = "json")]
    Json,
    #[cfg(feature = "ron")]
    Ron,
}

impl FormatType {
    /// Creates the backend for this format.
    pub fn backend(self) -> Box<dyn FormatBackend> {
        match self {
            #[cfg(feature = "json")]
            FormatType::Json => Box::new(JsonFormat::new()),
            #[cfg(feature = "ron")]
            FormatType::Ron => Box::new(RonFormat::new()),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "json")]
            FormatType::Json => "json",
            #[cfg(feature = "ron")]
            FormatType::Ron => "ron",
        }
    }
}

#[inline]
pub(crate) fn format_error(format: &'static str, err: impl Display) -> SerialError {
    SerialError::Format {
        format,
        message: err.to_string(),
    }
}
