use alloc::boxed::Box;

use crate::adapter::SpecialAdapter;
use crate::graph::{Fault, Value};

/// Encodes [`Fault`] chains: kind, message, frames and causes.
#[derive(Debug, Clone, Copy, Default)]
pub struct FaultAdapter;

impl SpecialAdapter for FaultAdapter {
    #[inline]
    fn name(&self) -> &'static str {
        "fault"
    }

    #[inline]
    fn matches(&self, value: &Value) -> bool {
        matches!(value, Value::Fault(_))
    }

    fn payload<'a>(&self, value: &'a Value) -> Option<Box<dyn erased_serde::Serialize + 'a>> {
        let fault: &'a Fault = value.as_fault()?;
        Some(Box::new(fault))
    }

    fn decode(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
    ) -> Result<Value, erased_serde::Error> {
        let fault: Fault = erased_serde::deserialize(deserializer)?;
        Ok(Value::Fault(Box::new(fault)))
    }
}
