//! YAML configuration for the countries explorer
//!
//! Every key has a default, so the explorer runs without a configuration
//! file. The loader understands two custom tags:
//!
//! - `!include path` - Include another YAML file
//! - `!env_var VAR [default]` - Environment variable substitution
//!
//! # Example
//!
//! ```yaml
//! explorer:
//!   api_base_url: !env_var COUNTRIES_API_URL https://restcountries.com/v3.1
//!   close_delay_ms: 300
//!   compare_control: styled
//! ```

mod error;
mod explorer;
mod loader;

pub use error::{ConfigError, ConfigResult};
pub use explorer::{
    CompareControl, ExplorerConfig, DEFAULT_API_BASE_URL, ENV_API_URL, ENV_CLOSE_DELAY_MS,
};
pub use loader::{load_yaml, load_yaml_string, ConfigLoader};

// Re-export serde_yaml::Value for convenience
pub use serde_yaml::Value;
