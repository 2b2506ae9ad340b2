use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The unit sent to the external store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchMessage {
    /// Normalized action name.
    #[serde(rename = "type")]
    pub kind: String,
    /// Named inputs passed through from the descriptor.
    ///
    /// `None` for polled dispatches, which carry no payload.
    #[serde(
        rename = "inputVariables",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub input_variables: Option<Map<String, Value>>,
    /// Timeout in milliseconds for the store to honor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

impl DispatchMessage {
    /// A one-shot action message.
    pub fn action(
        kind: impl Into<String>,
        input_variables: Map<String, Value>,
        timeout: Option<f64>,
    ) -> Self {
        Self {
            kind: kind.into(),
            input_variables: Some(input_variables),
            timeout,
        }
    }

    /// A polled tick message: the type tag only.
    pub fn tick(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            input_variables: None,
            timeout: None,
        }
    }
}
