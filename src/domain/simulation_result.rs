use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One figure as the simulation service sent it: a number, a preformatted
/// string, a bool or null. Objects and arrays are not figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Figure(Value);

impl Figure {
    pub fn new(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Figure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(_) | Value::Object(_) => {
                Err(D::Error::custom("expected a number, string, bool or null"))
            }
            value => Ok(Self(value)),
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::Null => f.write_str("n/a"),
            Value::String(text) => f.write_str(text),
            other => write!(f, "{other}"),
        }
    }
}

/// Savings and ROI figures computed by the simulation service. Values are
/// kept exactly as the service encoded them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub monthly_savings: Figure,
    pub cumulative_savings: Figure,
    pub net_savings: Figure,
    pub payback_months: Figure,
    pub roi_percentage: Figure,
}
