//! Configuration management for the Kadro core layer.
//!
//! Configuration is TOML-based and split into three pieces:
//!
//! - [`types`]: the schema structs, [`CoreConfig`], [`LoggingConfig`], and
//!   [`NotificationConfig`], all serde-deserializable with defaults applied
//!   for missing fields.
//! - [`defaults`]: the default-value functions referenced by the serde
//!   `default` attributes.
//! - [`loader`]: [`ConfigLoader`], which locates `config.toml` in the
//!   application configuration directory, parses it, and validates the
//!   result. A missing file yields the default configuration; a malformed or
//!   invalid file is an error.

pub mod defaults;
pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{CoreConfig, LoggingConfig, NotificationConfig};
