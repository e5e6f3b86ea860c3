//! Observability events emitted by the pipeline.

use uuid::Uuid;

use crate::notifications::Notification;

/// Broadcast to pipeline subscribers as an event moves through the stages.
/// Consumed by tests and by UI surfaces (e.g. an unread badge) that want to
/// react without sitting on the push transport.
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    /// A rule resolved the receiver set for an event.
    ReceiversResolved {
        event_id: Uuid,
        receiver_count: usize,
    },
    /// A notification row was created or merged and delivery was attempted.
    NotificationStored { notification: Notification },
    /// No rule is registered for the event's type; the event was skipped.
    EventIgnored { event_type: String },
}
