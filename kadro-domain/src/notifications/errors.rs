//! Errors of the notification store.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationStoreError {
    /// The underlying storage rejected the operation. The orchestrator logs
    /// this and skips delivery for the affected receiver; it never reaches
    /// the publishing business operation.
    #[error("Notification storage failed during '{operation}': {message}")]
    Storage {
        operation: &'static str,
        message: String,
    },
}

impl NotificationStoreError {
    pub fn storage(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Storage {
            operation,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_display() {
        assert_eq!(
            format!("{}", NotificationStoreError::storage("upsert", "connection reset")),
            "Notification storage failed during 'upsert': connection reset"
        );
    }
}
