//! Explorer configuration
//!
//! Parses the `explorer:` section of the configuration file.

use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::loader::load_yaml;

/// Public REST Countries endpoint
pub const DEFAULT_API_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Environment variable overriding `api_base_url`
pub const ENV_API_URL: &str = "COUNTRIES_API_URL";

/// Environment variable overriding `close_delay_ms`
pub const ENV_CLOSE_DELAY_MS: &str = "COUNTRIES_CLOSE_DELAY_MS";

/// How a row's compare control behaves once two countries are selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareControl {
    /// Greyed out but still clickable; clicking replaces the second pick
    #[default]
    Styled,
    /// Greyed out and inert
    Disabled,
}

/// Configuration from the `explorer:` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Base URL of the REST Countries API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Fields requested for the country list (`/all?fields=...`)
    #[serde(default = "default_list_fields")]
    pub list_fields: Vec<String>,

    /// Delay between closing the comparison panel and clearing its selection
    #[serde(default = "default_close_delay_ms")]
    pub close_delay_ms: u64,

    #[serde(default)]
    pub compare_control: CompareControl,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_list_fields() -> Vec<String> {
    [
        "name",
        "capital",
        "region",
        "subregion",
        "population",
        "area",
        "flags",
        "currencies",
        "languages",
        "borders",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_close_delay_ms() -> u64 {
    300
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            list_fields: default_list_fields(),
            close_delay_ms: default_close_delay_ms(),
            compare_control: CompareControl::default(),
        }
    }
}

impl ExplorerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let yaml = load_yaml(path)?;
        Self::from_yaml(&yaml)
    }

    /// Parse configuration from a YAML value
    ///
    /// A document without an `explorer:` section yields the defaults.
    pub fn from_yaml(yaml: &Value) -> ConfigResult<Self> {
        let section = match yaml {
            Value::Null => Value::Mapping(serde_yaml::Mapping::new()),
            Value::Mapping(mapping) => mapping
                .get(&Value::String("explorer".to_string()))
                .cloned()
                .unwrap_or(Value::Mapping(serde_yaml::Mapping::new())),
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: "root".to_string(),
                    reason: "configuration must be a mapping".to_string(),
                })
            }
        };

        let config: ExplorerConfig =
            serde_yaml::from_value(section).map_err(|e| ConfigError::InvalidValue {
                key: "explorer".to_string(),
                reason: e.to_string(),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_overrides(|var| std::env::var(var).ok())
    }

    /// Apply overrides from `lookup`, keyed by the `COUNTRIES_*` variable names
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(url) = lookup(ENV_API_URL) {
            debug!(url = %url, "Overriding API base URL from environment");
            self.api_base_url = url;
        }

        if let Some(raw) = lookup(ENV_CLOSE_DELAY_MS) {
            self.close_delay_ms = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_CLOSE_DELAY_MS.to_string(),
                reason: format!("'{raw}' is not a number of milliseconds"),
            })?;
        }

        self.validate()
    }

    /// Check values that deserialize fine but cannot work
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::Invalid {
                message: format!("api_base_url '{}' must be an http(s) URL", self.api_base_url),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                message: "request_timeout_secs must be greater than zero".to_string(),
            });
        }
        if !self.list_fields.iter().any(|f| f == "name") {
            return Err(ConfigError::Invalid {
                message: "list_fields must include 'name'".to_string(),
            });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn close_delay(&self) -> Duration {
        Duration::from_millis(self.close_delay_ms)
    }
}
