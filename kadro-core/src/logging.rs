//! Logging setup for Kadro, built on the `tracing` ecosystem.
//!
//! Supports console output on stderr plus an optional daily-rolling log file
//! in text or JSON format. The non-blocking file writer's [`WorkerGuard`] is
//! parked in a process-global slot so buffered records are flushed on exit.

use crate::config::LoggingConfig;
use crate::error::CoreError;
use crate::utils::fs as kadro_fs;

use once_cell::sync::Lazy;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
    Registry,
};

static FILE_WRITER_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// Initializes a minimal logging setup directed at stderr.
///
/// Intended for tests, early startup before configuration is available, or as
/// a fallback when [`init_logging`] fails. Respects `RUST_LOG`, defaulting to
/// "info". Errors (e.g. a subscriber already installed) are ignored.
pub fn init_minimal_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string()));

    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .try_init();
}

/// Initializes the global logging subscriber from a validated
/// [`LoggingConfig`].
///
/// Installs a stderr console layer filtered by `config.level`, plus a
/// daily-rolling file layer when `config.file_path` is set. May be called at
/// most once per process; a second call fails with
/// [`CoreError::LoggingInitialization`].
pub fn init_logging(config: &LoggingConfig) -> Result<(), CoreError> {
    let filter = EnvFilter::try_new(&config.level).map_err(|e| {
        CoreError::LoggingInitialization(format!(
            "invalid log filter '{}': {}",
            config.level, e
        ))
    })?;

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr));

    let mut guard_slot = None;
    let file_layer = match &config.file_path {
        Some(path) => {
            let (layer, guard) = create_file_layer(path, &config.format)?;
            guard_slot = Some(guard);
            Some(layer)
        }
        None => None,
    };

    Registry::default()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CoreError::LoggingInitialization(e.to_string()))?;

    if let Ok(mut slot) = FILE_WRITER_GUARD.lock() {
        *slot = guard_slot;
    }
    Ok(())
}

/// Builds the rolling-file layer and its flush guard.
///
/// Ensures the log directory exists, then wires a daily appender through a
/// non-blocking writer. `format` selects "json" or text output; ANSI escapes
/// are always disabled for files.
fn create_file_layer<S>(
    log_path: &Path,
    format: &str,
) -> Result<(Box<dyn Layer<S> + Send + Sync + 'static>, WorkerGuard), CoreError>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a> + Send + Sync + 'static,
{
    if let Some(parent) = log_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            kadro_fs::ensure_dir_exists(parent)?;
        }
    }

    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .unwrap_or_else(|| std::ffi::OsStr::new("kadro.log"));

    let appender = tracing_appender::rolling::daily(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    match format {
        "json" => {
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            Ok((Box::new(layer), guard))
        }
        _ => {
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            Ok((Box::new(layer), guard))
        }
    }
}
