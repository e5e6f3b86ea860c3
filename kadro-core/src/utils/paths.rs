//! Application path resolution.
//!
//! Resolves the XDG-style base directories used for configuration files and
//! mutable state (log files) via `directories-next`.

use crate::error::{ConfigError, CoreError};
use directories_next::ProjectDirs;
use std::path::PathBuf;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "Kadro";
const APPLICATION: &str = "kadro";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Returns the application configuration directory (e.g. `~/.config/kadro`).
pub fn get_app_config_dir() -> Result<PathBuf, CoreError> {
    project_dirs()
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "config".to_string(),
            })
        })
}

/// Returns the application state directory used for log files and other
/// mutable data (e.g. `~/.local/share/kadro`).
pub fn get_app_state_dir() -> Result<PathBuf, CoreError> {
    project_dirs()
        .map(|dirs| dirs.data_local_dir().to_path_buf())
        .ok_or_else(|| {
            CoreError::Config(ConfigError::DirectoryUnavailable {
                dir_type: "state".to_string(),
            })
        })
}
