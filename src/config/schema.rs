//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::output::OutputTarget;

/// Environment variable that disables logging when set to a non-empty value.
pub const DISABLE_ENV_VAR: &str = "LOGHTTP_DISABLED";

/// Root configuration for the logging client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Render transcripts. Fixed for the lifetime of a client.
    pub enabled: bool,

    /// Destination for transcripts.
    pub output: OutputTarget,

    /// Timeouts for the default transport.
    pub timeouts: TimeoutConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            output: OutputTarget::Stdout,
            timeouts: TimeoutConfig::default(),
        }
    }
}

impl LogConfig {
    /// Defaults with the environment toggle applied.
    pub fn from_env() -> Self {
        Self::default().with_env_toggle(|key| std::env::var(key).ok())
    }

    /// Disable logging if `lookup` yields a non-empty `LOGHTTP_DISABLED`.
    /// Absence or an empty value leaves `enabled` untouched.
    pub fn with_env_toggle<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(DISABLE_ENV_VAR).is_some_and(|value| !value.is_empty()) {
            self.enabled = false;
        }
        self
    }
}

/// Timeout configuration for the default transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}
