//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::recording::{RecorderConfiguration, Timeout};

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Host address (`unix:<path>`, `tcp:<host>:<port>`, or a socket path)
    pub host: Option<String>,
    /// Default timeout for host calls (e.g., 10s, 500ms)
    pub timeout: Option<String>,
    /// Whether the host runs in a web context (output path optional)
    pub web: Option<bool>,
    /// Default recorder configuration
    pub recorder: Option<RecorderConfiguration>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            host: None,
            timeout: Some(Timeout::default_timeout().to_string()),
            web: Some(false),
            recorder: Some(RecorderConfiguration::default()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    ///
    /// The recorder section is replaced as a whole: it is validated as one
    /// value and cannot be partially merged.
    pub fn merge(self, other: Self) -> Self {
        Self {
            host: other.host.or(self.host),
            timeout: other.timeout.or(self.timeout),
            web: other.web.or(self.web),
            recorder: other.recorder.or(self.recorder),
        }
    }

    /// Get web setting, or false if not set
    pub fn web_or_default(&self) -> bool {
        self.web.unwrap_or(false)
    }

    /// Get recorder configuration, or the default configuration if not set
    pub fn recorder_or_default(&self) -> RecorderConfiguration {
        self.recorder.clone().unwrap_or_default()
    }
}
