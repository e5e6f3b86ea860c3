//! The publish boundary between business modules and the notification
//! pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::audit::EventAuditProvider;
use super::errors::EventBusError;
use super::types::{DomainEvent, DomainEventInput};
use crate::pipeline::NotificationPipeline;

/// Entry point business modules use to emit a domain event.
///
/// Publishing is best-effort relative to the business transaction that
/// already committed: apart from input validation, nothing that happens
/// downstream of `publish` surfaces as an error to the caller.
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish(&self, input: DomainEventInput) -> Result<DomainEvent, EventBusError>;
}

/// Default bus: validate, persist the audit row, hand off to the pipeline.
pub struct DefaultEventBus {
    audit: Arc<dyn EventAuditProvider>,
    pipeline: Arc<dyn NotificationPipeline>,
}

impl DefaultEventBus {
    pub fn new(audit: Arc<dyn EventAuditProvider>, pipeline: Arc<dyn NotificationPipeline>) -> Self {
        Self { audit, pipeline }
    }

    fn validate(input: &DomainEventInput) -> Result<(), EventBusError> {
        if input.event_type.trim().is_empty() {
            return Err(EventBusError::MissingField {
                field: "event_type",
            });
        }
        if input.actor_id.trim().is_empty() {
            return Err(EventBusError::MissingField { field: "actor_id" });
        }
        if input.target_id.trim().is_empty() {
            return Err(EventBusError::MissingField { field: "target_id" });
        }
        if input.target_type.trim().is_empty() {
            return Err(EventBusError::MissingField {
                field: "target_type",
            });
        }
        Ok(())
    }
}

#[async_trait]
impl EventBus for DefaultEventBus {
    async fn publish(&self, input: DomainEventInput) -> Result<DomainEvent, EventBusError> {
        Self::validate(&input)?;
        let event = DomainEvent::new(input, Uuid::new_v4(), Utc::now());

        // The business state change is already committed; an audit storage
        // failure must not abort the caller. The pipeline only runs for
        // events that made it into the audit trail.
        if let Err(e) = self.audit.record(&event).await {
            warn!(
                event_id = %event.id,
                event_type = %event.event_type,
                "event audit insert failed, notification skipped: {}",
                e
            );
            return Ok(event);
        }

        debug!(event_id = %event.id, event_type = %event.event_type, "event recorded, dispatching");
        self.pipeline.handle_event(&event).await;
        Ok(event)
    }
}
