//! Errors of the event publish boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventBusError {
    /// A required event field is empty or missing. The only error surfaced
    /// to publishing business code.
    #[error("Event field '{field}' must not be empty.")]
    MissingField { field: &'static str },

    /// The audit storage rejected the event row. Logged and swallowed at the
    /// publish boundary, never returned to the publisher.
    #[error("Event audit storage failed: {0}")]
    AuditStorage(String),
}
