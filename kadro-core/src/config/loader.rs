//! Configuration loading and validation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::CoreConfig;
use crate::error::{ConfigError, CoreError};
use crate::utils::fs as kadro_fs;
use crate::utils::paths::{get_app_config_dir, get_app_state_dir};

const CONFIG_FILE_NAME: &str = "config.toml";
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LOG_FORMATS: [&str; 2] = ["text", "json"];

/// Namespace struct for configuration loading logic.
///
/// The entry points are [`ConfigLoader::load`] (application config directory)
/// and [`ConfigLoader::load_from_path`] (explicit file, used by tests and
/// tooling). A missing file yields the validated default configuration.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates `config.toml` from the application configuration
    /// directory, falling back to defaults when the file does not exist.
    pub fn load() -> Result<CoreConfig, CoreError> {
        let path = get_app_config_dir()?.join(CONFIG_FILE_NAME);
        Self::load_from_path(&path)
    }

    /// Loads and validates the configuration file at `path`.
    pub fn load_from_path(path: &Path) -> Result<CoreConfig, CoreError> {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str::<CoreConfig>(&content)
                .map_err(|e| CoreError::Config(ConfigError::ParseError(e)))?,
            Err(e) if e.kind() == ErrorKind::NotFound => CoreConfig::default(),
            Err(source) => {
                return Err(CoreError::Config(ConfigError::ReadError {
                    path: path.to_path_buf(),
                    source,
                }))
            }
        };
        Self::validate_config(&mut config)?;
        Ok(config)
    }

    /// Normalizes and validates a configuration in place.
    ///
    /// - log level and format are lowercased and checked against the
    ///   supported sets;
    /// - a relative log file path is resolved against the application state
    ///   directory and its parent directory is created;
    /// - notification capacities must be non-zero.
    fn validate_config(config: &mut CoreConfig) -> Result<(), CoreError> {
        let level = config.logging.level.to_lowercase();
        if !VALID_LOG_LEVELS.contains(&level.as_str()) {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "unsupported log level '{}'",
                config.logging.level
            ))));
        }
        config.logging.level = level;

        let format = config.logging.format.to_lowercase();
        if !VALID_LOG_FORMATS.contains(&format.as_str()) {
            return Err(CoreError::Config(ConfigError::ValidationError(format!(
                "unsupported log format '{}'",
                config.logging.format
            ))));
        }
        config.logging.format = format;

        if let Some(file_path) = config.logging.file_path.take() {
            let resolved: PathBuf = if file_path.is_absolute() {
                file_path
            } else {
                get_app_state_dir()?.join(file_path)
            };
            if let Some(parent) = resolved.parent() {
                if !parent.as_os_str().is_empty() {
                    kadro_fs::ensure_dir_exists(parent)?;
                }
            }
            config.logging.file_path = Some(resolved);
        }

        if config.notifications.pipeline_event_capacity == 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "notifications.pipeline_event_capacity must be at least 1".to_string(),
            )));
        }
        if config.notifications.push_buffer_size == 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "notifications.push_buffer_size must be at least 1".to_string(),
            )));
        }
        if config.notifications.inbox_page_size_cap == 0 {
            return Err(CoreError::Config(ConfigError::ValidationError(
                "notifications.inbox_page_size_cap must be at least 1".to_string(),
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let tmp = tempdir().unwrap();
        let config = ConfigLoader::load_from_path(&tmp.path().join("absent.toml")).unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.notifications.push_buffer_size, 32);
    }

    #[test]
    fn loads_and_normalizes_level_and_format() {
        let tmp = tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
                [logging]
                level = "DEBUG"
                format = "JSON"
            "#,
        );
        let config = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn rejects_unknown_log_level() {
        let tmp = tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
                [logging]
                level = "verbose"
            "#,
        );
        let err = ConfigLoader::load_from_path(&path).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn rejects_malformed_toml() {
        let tmp = tempdir().unwrap();
        let path = write_config(tmp.path(), "logging = nonsense");
        let err = ConfigLoader::load_from_path(&path).unwrap_err();
        assert!(matches!(err, CoreError::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn rejects_zero_capacities() {
        let tmp = tempdir().unwrap();
        let path = write_config(
            tmp.path(),
            r#"
                [notifications]
                push_buffer_size = 0
            "#,
        );
        let err = ConfigLoader::load_from_path(&path).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn resolves_absolute_log_path_and_creates_parent() {
        let tmp = tempdir().unwrap();
        let log_path = tmp.path().join("logs/kadro.log");
        let path = write_config(
            tmp.path(),
            &format!(
                r#"
                    [logging]
                    file_path = "{}"
                "#,
                log_path.display()
            ),
        );
        let config = ConfigLoader::load_from_path(&path).unwrap();
        assert_eq!(config.logging.file_path, Some(log_path.clone()));
        assert!(log_path.parent().unwrap().is_dir());
    }
}
