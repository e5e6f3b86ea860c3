//! Error module for the Kadro domain layer.

use thiserror::Error;

use kadro_core::error::CoreError;

use crate::events::errors::EventBusError;
use crate::notifications::errors::NotificationStoreError;
use crate::rules::errors::RuleError;

/// A general Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

/// The primary error type for the domain layer.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Core infrastructure error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Event publish boundary error.
    #[error(transparent)]
    EventBus(#[from] EventBusError),

    /// Receiver resolution error.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Notification storage error.
    #[error(transparent)]
    NotificationStore(#[from] NotificationStoreError),

    /// Other error.
    #[error("Domain error: {0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_variants_keep_inner_messages() {
        let err: DomainError = EventBusError::MissingField { field: "actor_id" }.into();
        assert_eq!(format!("{}", err), "Event field 'actor_id' must not be empty.");

        let err: DomainError = NotificationStoreError::storage("upsert", "boom").into();
        assert_eq!(
            format!("{}", err),
            "Notification storage failed during 'upsert': boom"
        );
    }
}
