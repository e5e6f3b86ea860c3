//! Rule vocabulary types.

use crate::events::DomainEvent;
use crate::shared_types::Receiver;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Identity of "the one notification that should absorb this event", scoped
/// by receiver, event type, and target.
///
/// Canonical form: `{kind}_{receiver}:{event_type}:{target_id}`. Repeated
/// events for the same target therefore keep merging into one evolving row
/// per receiver per event type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregationKey(String);

impl AggregationKey {
    /// Computes the canonical key for an event/receiver pair.
    pub fn compute(event: &DomainEvent, receiver: &Receiver) -> Self {
        Self(format!(
            "{}_{}:{}:{}",
            receiver.kind, receiver.id, event.event_type, event.target_id
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AggregationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{event_types, DomainEventInput};
    use chrono::Utc;
    use std::collections::HashMap;
    use uuid::Uuid;

    fn event(event_type: &str, target_id: &str) -> DomainEvent {
        DomainEvent::new(
            DomainEventInput {
                event_type: event_type.to_string(),
                actor_id: "e1".to_string(),
                target_id: target_id.to_string(),
                target_type: "leave".to_string(),
                metadata: HashMap::new(),
                created_at: None,
            },
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    #[test]
    fn canonical_form() {
        let key = AggregationKey::compute(
            &event(event_types::LEAVE_REQUESTED, "77"),
            &Receiver::staff("a1"),
        );
        assert_eq!(key.as_str(), "staff_a1:LEAVE_REQUESTED:77");
    }

    #[test]
    fn key_distinguishes_receiver_type_and_target() {
        let e = event(event_types::LEAVE_REQUESTED, "77");
        let a = AggregationKey::compute(&e, &Receiver::staff("1"));
        let b = AggregationKey::compute(&e, &Receiver::employee("1"));
        assert_ne!(a, b);

        let other_target = event(event_types::LEAVE_REQUESTED, "78");
        let c = AggregationKey::compute(&other_target, &Receiver::staff("1"));
        assert_ne!(a, c);

        let other_type = event(event_types::LEAVE_APPROVED, "77");
        let d = AggregationKey::compute(&other_type, &Receiver::staff("1"));
        assert_ne!(a, d);
    }

    #[test]
    fn key_is_deterministic() {
        let e = event(event_types::TICKET_CREATED, "5");
        let receiver = Receiver::staff("hr-2");
        assert_eq!(
            AggregationKey::compute(&e, &receiver),
            AggregationKey::compute(&e, &receiver)
        );
    }
}
