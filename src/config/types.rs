use serde::{Deserialize, Serialize};

use crate::action::WhitespaceStyle;

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub naming: NamingConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How action names become message type tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NamingConfig {
    /// "collapse" (default) or "per_character".
    #[serde(default)]
    pub whitespace: WhitespaceStyle,
}

/// Poll registry behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Allow a cancelled action name to be polled again (default: true).
    #[serde(default = "default_restart_after_cancel")]
    pub restart_after_cancel: bool,
    /// Lower bound for polling periods in milliseconds (default: 0).
    #[serde(default)]
    pub min_period_ms: u64,
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info").
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_restart_after_cancel() -> bool {
    true
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            restart_after_cancel: default_restart_after_cancel(),
            min_period_ms: 0,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}
