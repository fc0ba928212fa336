use alloc::vec::Vec;

use super::{DecodeFn, FormatBackend, format_error};
use crate::SerialError;

/// Rusty Object Notation through `ron`.
///
/// As with the JSON backend, the recursion limit of `ron` is
/// lifted in both directions.
#[derive(Debug, Clone, Default)]
pub struct RonFormat {
    pretty: Option<ron::ser::PrettyConfig>,
}

impl RonFormat {
    #[inline]
    pub const fn new() -> Self {
        Self { pretty: None }
    }

    /// Indented output with the given configuration.
    #[inline]
    pub fn pretty(config: ron::ser::PrettyConfig) -> Self {
        Self {
            pretty: Some(config),
        }
    }
}

impl FormatBackend for RonFormat {
    #[inline]
    fn name(&self) -> &'static str {
        "ron"
    }

    fn encode(&self, value: &dyn erased_serde::Serialize) -> Result<Vec<u8>, SerialError> {
        let options = unbounded();
        let output = match &self.pretty {
            Some(config) => options.to_string_pretty(value, config.clone()),
            None => options.to_string(value),
        };
        output
            .map(String::into_bytes)
            .map_err(|e| format_error("ron", e))
    }

    fn decode(&self, bytes: &[u8], visit: &mut DecodeFn<'_>) -> Result<(), SerialError> {
        let text = core::str::from_utf8(bytes).map_err(|e| format_error("ron", e))?;
        let mut de = ron::Deserializer::from_str_with_options(text, &unbounded())
            .map_err(|e| format_error("ron", e))?;
        {
            let mut erased = <dyn erased_serde::Deserializer>::erase(&mut de);
            visit(&mut erased).map_err(|e| format_error("ron", e))?;
        }
        de.end().map_err(|e| format_error("ron", e))
    }
}

#[inline]
fn unbounded() -> ron::Options {
    ron::Options::default().without_recursion_limit()
}
