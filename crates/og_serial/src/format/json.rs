use alloc::vec::Vec;

use super::{DecodeFn, FormatBackend, format_error};
use crate::SerialError;

/// JSON through `serde_json`.
///
/// The reader's recursion limit is disabled, nesting is bounded by the
/// serializer's `max_depth` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat {
    pretty: bool,
}

impl JsonFormat {
    #[inline]
    pub const fn new() -> Self {
        Self { pretty: false }
    }

    /// Indented output.
    #[inline]
    pub const fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl FormatBackend for JsonFormat {
    #[inline]
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, value: &dyn erased_serde::Serialize) -> Result<Vec<u8>, SerialError> {
        let output = if self.pretty {
            serde_json::to_vec_pretty(value)
        } else {
            serde_json::to_vec(value)
        };
        output.map_err(|e| format_error("json", e))
    }

    fn decode(&self, bytes: &[u8], visit: &mut DecodeFn<'_>) -> Result<(), SerialError> {
        let mut de = serde_json::Deserializer::from_slice(bytes);
        de.disable_recursion_limit();
        {
            let mut erased = <dyn erased_serde::Deserializer>::erase(&mut de);
            visit(&mut erased).map_err(|e| format_error("json", e))?;
        }
        de.end().map_err(|e| format_error("json", e))
    }
}
