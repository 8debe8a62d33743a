//! YAML loading with `!include` and `!env_var` tags

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::value::TaggedValue;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Loads a YAML document and resolves its tags
///
/// `!include` paths are relative to the file that contains them. The
/// chain of files currently being loaded is kept so an include cycle is
/// reported instead of recursing forever.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    chain: Vec<PathBuf>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_file(&mut self, path: impl AsRef<Path>) -> ConfigResult<Value> {
        let path = path.as_ref().to_path_buf();
        if self.chain.contains(&path) {
            let cycle = self
                .chain
                .iter()
                .chain(std::iter::once(&path))
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(ConfigError::Include {
                path,
                reason: format!("include cycle {cycle}"),
            });
        }

        debug!(path = %path.display(), "Loading configuration file");
        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        self.chain.push(path.clone());
        let result = self.load_string(&content, &path);
        self.chain.pop();
        result
    }

    /// Parse `content` as if it had been read from `origin`
    pub fn load_string(&mut self, content: &str, origin: &Path) -> ConfigResult<Value> {
        let document = serde_yaml::from_str(content).map_err(|source| ConfigError::Yaml {
            path: origin.to_path_buf(),
            source,
        })?;
        self.resolve(document, origin)
    }

    fn resolve(&mut self, value: Value, origin: &Path) -> ConfigResult<Value> {
        Ok(match value {
            Value::Tagged(tagged) => self.resolve_tag(*tagged, origin)?,
            Value::Mapping(mapping) => {
                let mut resolved = Mapping::with_capacity(mapping.len());
                for (key, value) in mapping {
                    resolved.insert(key, self.resolve(value, origin)?);
                }
                Value::Mapping(resolved)
            }
            Value::Sequence(items) => Value::Sequence(
                items
                    .into_iter()
                    .map(|item| self.resolve(item, origin))
                    .collect::<ConfigResult<_>>()?,
            ),
            scalar => scalar,
        })
    }

    fn resolve_tag(&mut self, tagged: TaggedValue, origin: &Path) -> ConfigResult<Value> {
        let TaggedValue { tag, value } = tagged;
        trace!(%tag, "Resolving tag");

        if tag == "include" {
            let target = include_target(&value, origin)?;
            self.load_file(target)
        } else if tag == "env_var" {
            process_env_var(value, |var| std::env::var(var).ok())
        } else {
            // Unknown tags are left for the consumer
            let value = self.resolve(value, origin)?;
            Ok(Value::Tagged(Box::new(TaggedValue { tag, value })))
        }
    }
}

/// Resolve `VAR` or `VAR default` through `lookup`
///
/// The result is parsed as a YAML scalar, so `!env_var DELAY 300` yields a
/// number.
fn process_env_var(value: Value, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Value> {
    let Value::String(text) = value else {
        return Err(ConfigError::InvalidValue {
            key: "!env_var".to_string(),
            reason: "expected a variable name".to_string(),
        });
    };

    let (var, default) = match text.split_once(char::is_whitespace) {
        Some((var, default)) => (var, Some(default.trim())),
        None => (text.as_str(), None),
    };

    let raw = lookup(var)
        .or_else(|| default.map(str::to_string))
        .ok_or_else(|| ConfigError::MissingEnvVar {
            var: var.to_string(),
        })?;

    debug!(var, "Substituted environment variable");
    Ok(serde_yaml::from_str(&raw).unwrap_or(Value::String(raw)))
}

fn include_target(value: &Value, origin: &Path) -> ConfigResult<PathBuf> {
    let Value::String(target) = value else {
        return Err(ConfigError::Include {
            path: origin.to_path_buf(),
            reason: format!("expected a file name, found {value:?}"),
        });
    };

    let target = Path::new(target);
    Ok(match origin.parent() {
        Some(dir) if target.is_relative() => dir.join(target),
        _ => target.to_path_buf(),
    })
}

/// Load a YAML file, resolving its tags
pub fn load_yaml(path: impl AsRef<Path>) -> ConfigResult<Value> {
    ConfigLoader::new().load_file(path)
}

/// Load YAML text, resolving includes relative to `origin`
pub fn load_yaml_string(content: &str, origin: &str) -> ConfigResult<Value> {
    ConfigLoader::new().load_string(content, Path::new(origin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_plain_file() {
        let temp = TempDir::new().unwrap();
        let path = write_file(temp.path(), "explorer.yaml", "explorer:\n  close_delay_ms: 150\n");

        let value = load_yaml(&path).unwrap();
        assert_eq!(value["explorer"]["close_delay_ms"].as_u64(), Some(150));
    }

    #[test]
    fn test_include_relative_to_origin() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "conf/fields.yaml", "- name\n- population\n");
        let path = write_file(
            temp.path(),
            "conf/explorer.yaml",
            "explorer:\n  list_fields: !include fields.yaml\n",
        );

        let value = load_yaml(&path).unwrap();
        let fields = value["explorer"]["list_fields"].as_sequence().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].as_str(), Some("population"));
    }

    #[test]
    fn test_include_cycle() {
        let temp = TempDir::new().unwrap();
        write_file(temp.path(), "a.yaml", "b: !include b.yaml\n");
        write_file(temp.path(), "b.yaml", "a: !include a.yaml\n");

        let err = load_yaml(temp.path().join("a.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Include { ref reason, .. } if reason.contains("cycle")));
    }

    #[test]
    fn test_include_needs_a_name() {
        let err = load_yaml_string("fields: !include [a, b]\n", "inline.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Include { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = load_yaml("/nonexistent/explorer.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = load_yaml_string("explorer: [unclosed", "inline.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_env_var_lookup_and_default() {
        let lookup = |var: &str| (var == "SET_VAR").then(|| "250".to_string());

        let value = process_env_var(Value::String("SET_VAR".into()), lookup).unwrap();
        assert_eq!(value.as_u64(), Some(250));

        let value =
            process_env_var(Value::String("UNSET_VAR https://example.org".into()), lookup).unwrap();
        assert_eq!(value.as_str(), Some("https://example.org"));

        let err = process_env_var(Value::String("UNSET_VAR".into()), lookup).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar { var } if var == "UNSET_VAR"));

        let err = process_env_var(Value::Bool(true), lookup).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_env_var_tag_with_default() {
        let value = load_yaml_string(
            "explorer:\n  api_base_url: !env_var CE_TEST_SURELY_UNSET_URL http://localhost:9000\n",
            "inline.yaml",
        )
        .unwrap();
        assert_eq!(
            value["explorer"]["api_base_url"].as_str(),
            Some("http://localhost:9000")
        );
    }
}
