//! Domain layer of the Kadro HR administration platform: the domain-event
//! notification pipeline.
//!
//! Business modules (leave, tickets, attendance) call
//! [`EventBus::publish`](events::EventBus) with a [`DomainEvent`] input; the
//! pipeline persists the event as an immutable audit row, resolves the
//! receiver set through the [`rules`] registry, merges the event into the
//! per-receiver aggregated [`Notification`](notifications::Notification) row,
//! renders a message, and pushes it to every live connection of each
//! receiver. Persisted rows are the source of truth; push delivery is
//! best-effort.

// Re-export core module
pub use kadro_core as core;

// Export domain modules
pub mod delivery;
pub mod error;
pub mod events;
pub mod notifications;
pub mod pipeline;
pub mod renderer;
pub mod rules;
pub mod shared_types;

// Re-export common types and interfaces
pub use delivery::{ConnectionHandle, ConnectionRegistry, PushPayload};
pub use error::{DomainError, DomainResult};
pub use events::{
    DefaultEventBus, DomainEvent, DomainEventInput, EventAuditProvider, EventBus, EventBusError,
    InMemoryEventAudit,
};
pub use notifications::{
    InMemoryNotificationStore, Notification, NotificationState, NotificationStore,
    NotificationStoreError,
};
pub use pipeline::{DefaultNotificationPipeline, NotificationPipeline, PipelineEvent};
pub use renderer::render;
pub use rules::{
    AggregationKey, DecisionRule, InMemoryStaffDirectory, NotificationRule, RuleError,
    RuleRegistry, StaffAccount, StaffDirectory, SubmissionRule,
};
pub use shared_types::{
    Actor, Receiver, StaffRole, SubjectId, SubjectKind, PRIVILEGED_ROLES,
};

use kadro_core::config::NotificationConfig;
use kadro_core::error::CoreError;
use std::sync::Arc;

/// The wired-up domain services of one process.
pub struct DomainServices {
    pub event_bus: Arc<DefaultEventBus>,
    pub pipeline: Arc<DefaultNotificationPipeline>,
    pub store: Arc<InMemoryNotificationStore>,
    pub connections: Arc<ConnectionRegistry>,
    pub audit: Arc<InMemoryEventAudit>,
}

/// Initializes the domain layer over in-memory adapters.
///
/// The composition root for development and tests; production deployments
/// substitute relational adapters for the audit and notification ports and
/// wire the connection registry to the real push transport.
pub fn initialize(
    directory: Arc<dyn StaffDirectory>,
    config: &NotificationConfig,
) -> DomainResult<DomainServices> {
    if config.pipeline_event_capacity == 0 {
        return Err(DomainError::Core(CoreError::InvalidInput(
            "pipeline_event_capacity must be at least 1".to_string(),
        )));
    }
    if config.push_buffer_size == 0 {
        return Err(DomainError::Core(CoreError::InvalidInput(
            "push_buffer_size must be at least 1".to_string(),
        )));
    }

    let store = Arc::new(InMemoryNotificationStore::new());
    let connections = Arc::new(ConnectionRegistry::new(config.push_buffer_size));
    let registry = Arc::new(RuleRegistry::with_default_rules(directory));
    let pipeline = Arc::new(DefaultNotificationPipeline::new(
        registry,
        store.clone(),
        connections.clone(),
        config,
    ));
    let audit = Arc::new(InMemoryEventAudit::new());
    let event_bus = Arc::new(DefaultEventBus::new(audit.clone(), pipeline.clone()));

    Ok(DomainServices {
        event_bus,
        pipeline,
        store,
        connections,
        audit,
    })
}
