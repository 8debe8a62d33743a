//! Configuration errors

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A `!include` that is not a string or that loops back on itself
    #[error("bad !include in {path}: {reason}")]
    Include { path: PathBuf, reason: String },

    /// `!env_var` without a default names an unset variable
    #[error("environment variable {var} is not set and has no default")]
    MissingEnvVar { var: String },

    /// A value has the wrong type or cannot be parsed
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    /// Values that parse but cannot work together
    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}
