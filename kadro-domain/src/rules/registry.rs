//! The rule registry: a static mapping from event type to the rule that
//! resolves its receivers and aggregation keys.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::directory::StaffDirectory;
use super::types::AggregationKey;
use crate::events::types::{event_types, metadata_keys};
use crate::events::DomainEvent;
use crate::shared_types::{Receiver, PRIVILEGED_ROLES};

/// A notification rule for one or more event types.
///
/// `resolve_receivers` is pure given the persisted directory state and must
/// return an empty list, never an error, when inputs are incomplete; an
/// empty list is a legitimate skip. `aggregation_key` is deterministic and
/// collision-free across unrelated notifications; the canonical form is
/// provided and rules rarely need to override it.
#[async_trait]
pub trait NotificationRule: Send + Sync {
    async fn resolve_receivers(&self, event: &DomainEvent) -> Vec<Receiver>;

    fn aggregation_key(&self, event: &DomainEvent, receiver: &Receiver) -> AggregationKey {
        AggregationKey::compute(event, receiver)
    }
}

/// "Many raise, few decide": routes an employee-originated submission to
/// every active privileged staff account.
pub struct SubmissionRule {
    directory: Arc<dyn StaffDirectory>,
}

impl SubmissionRule {
    pub fn new(directory: Arc<dyn StaffDirectory>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl NotificationRule for SubmissionRule {
    async fn resolve_receivers(&self, event: &DomainEvent) -> Vec<Receiver> {
        match self
            .directory
            .active_staff_with_roles(&PRIVILEGED_ROLES)
            .await
        {
            Ok(accounts) => accounts
                .into_iter()
                .map(|account| Receiver::staff(account.id))
                .collect(),
            Err(e) => {
                warn!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "receiver resolution degraded to empty set: {}",
                    e
                );
                Vec::new()
            }
        }
    }
}

/// "One decides, one is told": routes a decision back to the single employee
/// named in the event metadata.
pub struct DecisionRule;

#[async_trait]
impl NotificationRule for DecisionRule {
    async fn resolve_receivers(&self, event: &DomainEvent) -> Vec<Receiver> {
        match event.metadata_subject_id(metadata_keys::EMPLOYEE_ID) {
            Some(employee_id) => vec![Receiver::employee(employee_id)],
            None => {
                warn!(
                    event_id = %event.id,
                    event_type = %event.event_type,
                    "decision event without '{}' metadata, no receiver",
                    metadata_keys::EMPLOYEE_ID
                );
                Vec::new()
            }
        }
    }
}

/// Static event-type-to-rule mapping.
///
/// Lookup of an unregistered tag returns `None`; the orchestrator treats
/// that as a silent no-op so business code may emit event types this layer
/// does not understand yet.
#[derive(Default)]
pub struct RuleRegistry {
    rules: HashMap<String, Arc<dyn NotificationRule>>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-populated with the HR business taxonomy.
    pub fn with_default_rules(directory: Arc<dyn StaffDirectory>) -> Self {
        let mut registry = Self::new();
        let submission: Arc<dyn NotificationRule> = Arc::new(SubmissionRule::new(directory));
        let decision: Arc<dyn NotificationRule> = Arc::new(DecisionRule);

        for event_type in [
            event_types::LEAVE_REQUESTED,
            event_types::TICKET_CREATED,
            event_types::ATTENDANCE_MISSED,
        ] {
            registry.register(event_type, submission.clone());
        }
        for event_type in [
            event_types::LEAVE_APPROVED,
            event_types::LEAVE_REJECTED,
            event_types::TICKET_APPROVED,
            event_types::TICKET_REJECTED,
        ] {
            registry.register(event_type, decision.clone());
        }
        registry
    }

    pub fn register(&mut self, event_type: impl Into<String>, rule: Arc<dyn NotificationRule>) {
        self.rules.insert(event_type.into(), rule);
    }

    pub fn lookup(&self, event_type: &str) -> Option<Arc<dyn NotificationRule>> {
        self.rules.get(event_type).cloned()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
