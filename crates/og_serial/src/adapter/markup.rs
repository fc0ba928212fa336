use alloc::boxed::Box;
use alloc::string::String;

use serde::de::Error as _;

use crate::adapter::SpecialAdapter;
use crate::graph::{Markup, Value};

/// Encodes [`Markup`] documents as their textual form.
///
/// A document whose text would not parse back to the same tree is refused,
/// see [`Markup::validate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupAdapter;

impl SpecialAdapter for MarkupAdapter {
    #[inline]
    fn name(&self) -> &'static str {
        "markup"
    }

    #[inline]
    fn matches(&self, value: &Value) -> bool {
        matches!(value, Value::Markup(_))
    }

    fn payload<'a>(&self, value: &'a Value) -> Option<Box<dyn erased_serde::Serialize + 'a>> {
        let markup = value.as_markup()?;
        if let Err(err) = markup.validate() {
            log::debug!("markup adapter refused a document: {err}");
            return None;
        }
        Some(Box::new(markup.to_string()))
    }

    fn decode(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<Value, erased_serde::Error> {
        let text: String = erased_serde::deserialize(deserializer)?;
        let markup = Markup::parse(&text).map_err(erased_serde::Error::custom)?;
        Ok(Value::Markup(markup))
    }
}
