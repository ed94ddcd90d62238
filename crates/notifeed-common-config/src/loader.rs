//! Configuration file loading and parsing.

use crate::env::{EnvError, Environment};
use crate::types::FeedConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the project directory.
pub const CONFIG_FILE: &str = "notifeed.yaml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },

    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Configuration loader.
pub struct ConfigLoader {
    base_path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the given project directory.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            base_path: project_dir.as_ref().to_path_buf(),
        }
    }

    /// Load configuration from `notifeed.yaml`, falling back to defaults,
    /// then apply environment overrides.
    pub fn load(&self) -> Result<FeedConfig, ConfigError> {
        let config_path = self.base_path.join(CONFIG_FILE);

        let mut config = if config_path.exists() {
            self.read_file(&config_path)?
        } else {
            FeedConfig::default()
        };

        Environment::apply_overrides(&mut config)?;
        self.validate(&config)?;
        Ok(config)
    }

    /// Load configuration from an explicit file, which must exist.
    pub fn load_from(&self, path: impl AsRef<Path>) -> Result<FeedConfig, ConfigError> {
        let path = notifeed_common_fs::path::resolve(&self.base_path, path);

        if !path.is_file() {
            return Err(ConfigError::NotFound { path });
        }

        let mut config = self.read_file(&path)?;
        Environment::apply_overrides(&mut config)?;
        self.validate(&config)?;
        Ok(config)
    }

    fn read_file(&self, path: &Path) -> Result<FeedConfig, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let expanded = self.expand_env_vars(&contents)?;

        if expanded.trim().is_empty() {
            return Ok(FeedConfig::default());
        }

        serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }

    /// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
    fn expand_env_vars(&self, content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")?;

        for cap in re.captures_iter(content) {
            let Some(full_match) = cap.get(0) else {
                continue;
            };
            let var_name = &cap[1];
            let default = cap.get(2).map(|m| m.as_str());

            let value = match std::env::var(var_name) {
                Ok(v) => v,
                Err(_) => match default {
                    Some(d) => d.to_string(),
                    None => {
                        return Err(ConfigError::EnvVarNotFound {
                            var: var_name.to_string(),
                        })
                    }
                },
            };

            result = result.replace(full_match.as_str(), &value);
        }

        Ok(result)
    }

    /// Validate configuration values.
    pub fn validate(&self, config: &FeedConfig) -> Result<(), ConfigError> {
        if config.extensions.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "extensions must not be empty".to_string(),
            });
        }

        if let Some(ext) = config
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.') || e.contains(['/', '*']))
        {
            return Err(ConfigError::ValidationError {
                message: format!("invalid extension '{ext}' (expected e.g. 'yml', without dot)"),
            });
        }

        let output_file = Path::new(&config.output_file);
        if config.output_file.is_empty()
            || output_file.file_name() != Some(output_file.as_os_str())
        {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "output_file must be a bare file name, got '{}'",
                    config.output_file
                ),
            });
        }

        if config.max_file_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_file_size must be greater than 0".to_string(),
            });
        }

        // The output directory is removed on every run.
        if config
            .input_path(&self.base_path)
            .starts_with(config.output_path(&self.base_path))
        {
            return Err(ConfigError::ValidationError {
                message: "output_dir must not contain input_dir".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderingMode;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_defaults_when_no_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        let config = loader.load().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("notifications"));
        assert_eq!(config.output_file, "feed.yaml");
    }

    #[test]
    fn test_load_config_from_yaml_file() {
        let dir = tempdir().unwrap();
        let config_content = r#"
input_dir: specs/notifications
output_dir: public
ordering: discovery
extensions: [yml]
"#;
        fs::write(dir.path().join(CONFIG_FILE), config_content).unwrap();

        let config = ConfigLoader::new(dir.path()).load().unwrap();

        assert_eq!(config.input_dir, PathBuf::from("specs/notifications"));
        assert_eq!(config.output_dir, PathBuf::from("public"));
        assert_eq!(config.ordering, OrderingMode::Discovery);
        assert_eq!(config.extensions, vec!["yml".to_string()]);

        // Unspecified values use defaults
        assert_eq!(config.output_file, "feed.yaml");
        assert_eq!(config.max_file_size, crate::DEFAULT_MAX_FILE_SIZE);
    }

    #[test]
    fn test_empty_file_means_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "\n").unwrap();
        let config = ConfigLoader::new(dir.path()).load().unwrap();
        assert_eq!(config.input_dir, PathBuf::from("notifications"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "input_directory: specs\n").unwrap();

        match ConfigLoader::new(dir.path()).load().unwrap_err() {
            ConfigError::ParseError { message, .. } => assert!(message.contains("input_directory")),
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());
        assert!(matches!(
            loader.load_from("custom.yaml").unwrap_err(),
            ConfigError::NotFound { .. }
        ));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("custom.yaml"), "output_file: notices.yaml\n").unwrap();

        let config = ConfigLoader::new(dir.path()).load_from("custom.yaml").unwrap();
        assert_eq!(config.output_file, "notices.yaml");
    }

    #[test]
    fn test_env_var_expansion() {
        std::env::set_var("NOTIFEED_TEST_EXPAND", "test_value");
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${NOTIFEED_TEST_EXPAND}").unwrap();
        assert_eq!(result, "key: test_value");
        std::env::remove_var("NOTIFEED_TEST_EXPAND");
    }

    #[test]
    fn test_env_var_default() {
        let loader = ConfigLoader::new(".");
        let result = loader.expand_env_vars("key: ${NOTIFEED_NONEXISTENT:-default}").unwrap();
        assert_eq!(result, "key: default");
    }

    #[test]
    fn test_env_var_missing_error() {
        let loader = ConfigLoader::new(".");
        match loader.expand_env_vars("key: ${NOTIFEED_MISSING_VAR}").unwrap_err() {
            ConfigError::EnvVarNotFound { var } => assert_eq!(var, "NOTIFEED_MISSING_VAR"),
            other => panic!("Expected EnvVarNotFound error, got {other:?}"),
        }
    }

    #[test]
    fn test_validation_errors() {
        let dir = tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path());

        let config = FeedConfig {
            extensions: vec![],
            ..FeedConfig::default()
        };
        assert!(matches!(
            loader.validate(&config),
            Err(ConfigError::ValidationError { message }) if message.contains("extensions")
        ));

        let config = FeedConfig {
            extensions: vec![".yml".to_string()],
            ..FeedConfig::default()
        };
        assert!(loader.validate(&config).is_err());

        let config = FeedConfig {
            output_file: "nested/feed.yaml".to_string(),
            ..FeedConfig::default()
        };
        assert!(matches!(
            loader.validate(&config),
            Err(ConfigError::ValidationError { message }) if message.contains("output_file")
        ));

        let config = FeedConfig {
            max_file_size: 0,
            ..FeedConfig::default()
        };
        assert!(loader.validate(&config).is_err());

        let config = FeedConfig {
            output_dir: PathBuf::from("./notifications"),
            ..FeedConfig::default()
        };
        assert!(matches!(
            loader.validate(&config),
            Err(ConfigError::ValidationError { message }) if message.contains("must not contain")
        ));

        let config = FeedConfig {
            output_dir: PathBuf::from("."),
            ..FeedConfig::default()
        };
        assert!(loader.validate(&config).is_err());

        assert!(loader.validate(&FeedConfig::default()).is_ok());
    }

    #[test]
    fn test_parse_error_with_line_number() {
        let dir = tempdir().unwrap();
        let bad_yaml = r#"
input_dir: notifications
extensions: [unclosed
"#;
        fs::write(dir.path().join(CONFIG_FILE), bad_yaml).unwrap();

        match ConfigLoader::new(dir.path()).load().unwrap_err() {
            ConfigError::ParseError { line, .. } => assert!(line.is_some()),
            other => panic!("Expected ParseError with line number, got {other:?}"),
        }
    }

    #[test]
    fn test_load_from_nested_file() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/feed.yaml"),
            "output_dir: dist\nordering: discovery\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path());
        let config = loader.load_from("config/feed.yaml").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("dist"));
        assert_eq!(config.ordering, OrderingMode::Discovery);

        assert!(matches!(
            loader.load_from("config/missing.yaml"),
            Err(ConfigError::NotFound { .. })
        ));
    }
}
