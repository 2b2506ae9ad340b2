use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::trigger::Trigger;

/// One declared behavior attached to a component instance.
///
/// Deserializes from the camelCase JSON the component configuration uses.
/// Numeric fields are read leniently: anything that is not a number (or a
/// numeric string) counts as "not requested".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDescriptor {
    pub trigger: Trigger,
    pub action: String,
    #[serde(default)]
    pub input_variables: Map<String, Value>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout: Option<f64>,
    #[serde(
        default,
        deserialize_with = "strict_true",
        skip_serializing_if = "std::ops::Not::not"
    )]
    pub stop: bool,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub polling_period: Option<f64>,
}

impl ActionDescriptor {
    pub fn new(trigger: impl Into<Trigger>, action: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            action: action.into(),
            input_variables: Map::new(),
            timeout: None,
            stop: false,
            polling_period: None,
        }
    }

    pub fn with_input(mut self, key: impl Into<String>, value: Value) -> Self {
        self.input_variables.insert(key.into(), value);
        self
    }

    pub fn with_timeout(mut self, timeout_ms: f64) -> Self {
        self.timeout = Some(timeout_ms);
        self
    }

    pub fn polling_every(mut self, period_ms: f64) -> Self {
        self.polling_period = Some(period_ms);
        self
    }

    /// Turn this descriptor into a "stop polling" request for its action.
    pub fn stopping(mut self) -> Self {
        self.stop = true;
        self
    }

    /// The timeout to attach to the dispatched message, if it is valid.
    pub fn valid_timeout(&self) -> Option<f64> {
        self.timeout.filter(|t| is_positive_finite(*t))
    }

    /// The polling period, if this descriptor describes a repeating action.
    ///
    /// Periods too large for a `Duration` saturate at `Duration::MAX`.
    pub fn valid_polling_period(&self) -> Option<Duration> {
        self.polling_period
            .filter(|p| is_positive_finite(*p))
            .map(|p| Duration::try_from_secs_f64(p / 1000.0).unwrap_or(Duration::MAX))
            .filter(|d| !d.is_zero())
    }
}

fn is_positive_finite(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

// Only a literal `true` requests a stop.
fn strict_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(matches!(value, Some(Value::Bool(true))))
}
