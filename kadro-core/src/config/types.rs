//! Configuration schema for the Kadro core system.

use super::defaults;
use serde::Deserialize;
use std::path::PathBuf;

/// Configuration for the logging subsystem.
///
/// Consumed by `kadro_core::logging` when initializing the global subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Minimum level to record: "trace", "debug", "info", "warn" or "error"
    /// (case-insensitive, normalized during validation).
    #[serde(default = "defaults::default_log_level")]
    pub level: String,
    /// Optional log file path. `None` disables file logging. Relative paths
    /// are resolved against the application state directory at validation.
    #[serde(default = "defaults::default_log_file_path")]
    pub file_path: Option<PathBuf>,
    /// File log format: "text" or "json".
    #[serde(default = "defaults::default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::default_log_level(),
            file_path: defaults::default_log_file_path(),
            format: defaults::default_log_format(),
        }
    }
}

/// Tunables of the notification pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotificationConfig {
    /// Capacity of the pipeline event broadcast channel.
    #[serde(default = "defaults::default_pipeline_event_capacity")]
    pub pipeline_event_capacity: usize,
    /// Buffered payloads per live push connection; a full buffer drops the
    /// payload for that connection rather than blocking the pipeline.
    #[serde(default = "defaults::default_push_buffer_size")]
    pub push_buffer_size: usize,
    /// Upper bound on the page size of inbox listing queries.
    #[serde(default = "defaults::default_inbox_page_size_cap")]
    pub inbox_page_size_cap: usize,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            pipeline_event_capacity: defaults::default_pipeline_event_capacity(),
            push_buffer_size: defaults::default_push_buffer_size(),
            inbox_page_size_cap: defaults::default_inbox_page_size_cap(),
        }
    }
}

/// Root configuration structure for the Kadro core system.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Logging subsystem configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Notification pipeline tunables.
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.file_path, None);
        assert_eq!(config.format, "text");
    }

    #[test]
    fn notification_config_defaults() {
        let config = NotificationConfig::default();
        assert_eq!(config.pipeline_event_capacity, 64);
        assert_eq!(config.push_buffer_size, 32);
        assert_eq!(config.inbox_page_size_cap, 100);
    }

    #[test]
    fn core_config_partial_toml_fills_defaults() {
        let toml_str = r#"
            [logging]
            level = "debug"
            format = "json"

            [notifications]
            push_buffer_size = 8
        "#;
        let config: CoreConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.file_path, None);
        assert_eq!(config.notifications.push_buffer_size, 8);
        assert_eq!(config.notifications.pipeline_event_capacity, 64);
    }

    #[test]
    fn core_config_rejects_unknown_fields() {
        let toml_str = r#"
            [logging]
            level = "info"
            colour = "mauve"
        "#;
        assert!(toml::from_str::<CoreConfig>(toml_str).is_err());
    }
}
