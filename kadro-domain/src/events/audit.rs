//! Durable storage of the event audit trail.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::errors::EventBusError;
use super::types::DomainEvent;

/// Storage port for the append-only event audit trail.
///
/// Rows are immutable once recorded; the trait deliberately offers no update
/// or delete operation.
#[async_trait]
pub trait EventAuditProvider: Send + Sync {
    /// Appends one event row.
    async fn record(&self, event: &DomainEvent) -> Result<(), EventBusError>;

    /// All recorded events concerning a target, in publish order.
    async fn events_for_target(
        &self,
        target_type: &str,
        target_id: &str,
    ) -> Result<Vec<DomainEvent>, EventBusError>;

    /// Number of recorded events.
    async fn len(&self) -> usize;
}

/// In-memory audit trail, used in tests and as the development default.
///
/// A relational adapter implements the same port against an events table in
/// production deployments.
#[derive(Default)]
pub struct InMemoryEventAudit {
    events: RwLock<Vec<DomainEvent>>,
}

impl InMemoryEventAudit {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventAuditProvider for InMemoryEventAudit {
    async fn record(&self, event: &DomainEvent) -> Result<(), EventBusError> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn events_for_target(
        &self,
        target_type: &str,
        target_id: &str,
    ) -> Result<Vec<DomainEvent>, EventBusError> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.target_type == target_type && e.target_id == target_id)
            .cloned()
            .collect())
    }

    async fn len(&self) -> usize {
        self.events.read().await.len()
    }
}
