//! # Kadro Core Library (`kadro-core`)
//!
//! `kadro-core` is the infrastructure layer of the Kadro HR administration
//! platform. It carries the cross-cutting concerns the domain crates build
//! on:
//!
//! - **Error Handling**: a unified error system through [`CoreError`] and the
//!   specific [`ConfigError`] and [`LoggingError`] types.
//! - **Configuration Management**: TOML-based configuration loading with
//!   default fallbacks and validation via [`ConfigLoader`] and [`CoreConfig`].
//! - **Logging**: a structured logging setup on top of the `tracing` crate,
//!   with console output and an optional rolling log file.
//! - **Utilities**: filesystem and path helpers under [`utils`].
//!
//! ```rust,ignore
//! use kadro_core::config::ConfigLoader;
//! use kadro_core::error::CoreError;
//! use kadro_core::logging;
//!
//! fn main() -> Result<(), CoreError> {
//!     let config = ConfigLoader::load()?;
//!     logging::init_logging(&config.logging)?;
//!     tracing::info!("kadro core initialized");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod utils;

pub use config::{ConfigLoader, CoreConfig, LoggingConfig, NotificationConfig};
pub use error::{ConfigError, CoreError, LoggingError};
