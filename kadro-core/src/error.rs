//! Error handling for the Kadro core layer.
//!
//! Defines the error types shared by the infrastructure concerns of the
//! workspace: configuration loading, logging initialization, and filesystem
//! access. The main type is [`CoreError`], which wraps the more specific
//! [`ConfigError`] and [`LoggingError`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the Kadro core layer.
///
/// Higher layers wrap this type rather than matching on infrastructure
/// details; the specific sub-errors stay reachable through `source()`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration loading, parsing, or validation failed.
    #[error("Configuration Error: {0}")]
    Config(#[from] ConfigError),

    /// The logging system could not be initialized.
    #[error("Logging Initialization Failed: {0}")]
    LoggingInitialization(String),

    /// A filesystem operation outside of configuration handling failed.
    #[error("Filesystem Error: {message} (Path: {path:?})")]
    Filesystem {
        message: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// General I/O error not covered by a more specific variant.
    #[error("I/O Error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input provided to a core API.
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    /// Unexpected internal failure within the core library.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// Errors produced while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file from {path:?}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for the expected schema.
    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration parsed, but a value failed validation.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),

    /// No configuration file was found at any of the candidate locations.
    #[error("Configuration file not found at expected locations: {locations:?}")]
    NotFound { locations: Vec<PathBuf> },

    /// A required base directory (XDG config/state home) could not be resolved.
    #[error("Could not determine base directory for {dir_type}")]
    DirectoryUnavailable { dir_type: String },
}

/// Errors produced by the logging subsystem after initialization.
///
/// Setup failures surface as [`CoreError::LoggingInitialization`]; this type
/// covers operational failures of the logging machinery itself.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The log filter directive could not be parsed.
    #[error("Failed to set log filter: {0}")]
    FilterError(String),

    /// Writing to a log target failed.
    #[error("Logging I/O error: {0}")]
    IoError(#[from] io::Error),
}
