//! Domain event data model.

use crate::shared_types::{Actor, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Event type tags emitted by the HR business modules.
///
/// The tag space is open: business code may emit tags the notification layer
/// does not know yet, which the pipeline ignores.
pub mod event_types {
    pub const LEAVE_REQUESTED: &str = "LEAVE_REQUESTED";
    pub const LEAVE_APPROVED: &str = "LEAVE_APPROVED";
    pub const LEAVE_REJECTED: &str = "LEAVE_REJECTED";
    pub const TICKET_CREATED: &str = "TICKET_CREATED";
    pub const TICKET_APPROVED: &str = "TICKET_APPROVED";
    pub const TICKET_REJECTED: &str = "TICKET_REJECTED";
    pub const ATTENDANCE_MISSED: &str = "ATTENDANCE_MISSED";
}

/// Well-known metadata keys the rules and the bus read.
pub mod metadata_keys {
    /// Display name of the acting subject, captured for rendering.
    pub const ACTOR_NAME: &str = "actor_name";
    /// Employee addressed by a decision event.
    pub const EMPLOYEE_ID: &str = "employee_id";
}

/// Input shape accepted at the publish boundary.
///
/// Optional fields are defaulted: `metadata` to an empty map, `created_at`
/// to the publish instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEventInput {
    pub event_type: String,
    pub actor_id: String,
    pub target_id: String,
    pub target_type: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// An immutable record of a business occurrence.
///
/// Created once by the event bus at publish time; never mutated or deleted.
/// The persisted rows double as the audit trail of the business modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainEvent {
    pub id: Uuid,
    pub event_type: String,
    pub actor: Actor,
    pub target_id: String,
    pub target_type: String,
    pub metadata: HashMap<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl DomainEvent {
    /// Materializes an event from validated input.
    ///
    /// The actor's display name is lifted out of the
    /// [`metadata_keys::ACTOR_NAME`] metadata entry when present.
    pub fn new(input: DomainEventInput, id: Uuid, created_at: DateTime<Utc>) -> Self {
        let display_name = input
            .metadata
            .get(metadata_keys::ACTOR_NAME)
            .and_then(|v| v.as_str())
            .map(str::to_string);
        Self {
            id,
            event_type: input.event_type,
            actor: Actor::new(input.actor_id, display_name),
            target_id: input.target_id,
            target_type: input.target_type,
            metadata: input.metadata,
            created_at: input.created_at.unwrap_or(created_at),
        }
    }

    /// String value of a metadata entry, if present and a string.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(|v| v.as_str())
    }

    /// Subject id carried in a metadata entry.
    ///
    /// Accepts both string and integer encodings, since the emitting modules
    /// serialize numeric ids either way.
    pub fn metadata_subject_id(&self, key: &str) -> Option<SubjectId> {
        match self.metadata.get(key)? {
            serde_json::Value::String(s) if !s.is_empty() => Some(SubjectId::new(s.clone())),
            serde_json::Value::Number(n) => Some(SubjectId::new(n.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input_with_metadata(metadata: HashMap<String, serde_json::Value>) -> DomainEventInput {
        DomainEventInput {
            event_type: event_types::LEAVE_REQUESTED.to_string(),
            actor_id: "e1".to_string(),
            target_id: "77".to_string(),
            target_type: "leave".to_string(),
            metadata,
            created_at: None,
        }
    }

    #[test]
    fn event_from_input_captures_actor_name() {
        let mut metadata = HashMap::new();
        metadata.insert(metadata_keys::ACTOR_NAME.to_string(), json!("E1"));
        let event = DomainEvent::new(input_with_metadata(metadata), Uuid::new_v4(), Utc::now());

        assert_eq!(event.actor.id.as_str(), "e1");
        assert_eq!(event.actor.display_name.as_deref(), Some("E1"));
        assert_eq!(event.event_type, event_types::LEAVE_REQUESTED);
    }

    #[test]
    fn event_without_actor_name_has_no_display_name() {
        let event =
            DomainEvent::new(input_with_metadata(HashMap::new()), Uuid::new_v4(), Utc::now());
        assert_eq!(event.actor.display_name, None);
    }

    #[test]
    fn explicit_created_at_is_preserved() {
        let stamp = Utc::now() - chrono::Duration::hours(3);
        let mut input = input_with_metadata(HashMap::new());
        input.created_at = Some(stamp);
        let event = DomainEvent::new(input, Uuid::new_v4(), Utc::now());
        assert_eq!(event.created_at, stamp);
    }

    #[test]
    fn metadata_subject_id_accepts_string_and_number() {
        let mut metadata = HashMap::new();
        metadata.insert(metadata_keys::EMPLOYEE_ID.to_string(), json!(42));
        let event = DomainEvent::new(input_with_metadata(metadata), Uuid::new_v4(), Utc::now());
        assert_eq!(
            event.metadata_subject_id(metadata_keys::EMPLOYEE_ID),
            Some(SubjectId::new("42"))
        );

        let mut metadata = HashMap::new();
        metadata.insert(metadata_keys::EMPLOYEE_ID.to_string(), json!("43"));
        let event = DomainEvent::new(input_with_metadata(metadata), Uuid::new_v4(), Utc::now());
        assert_eq!(
            event.metadata_subject_id(metadata_keys::EMPLOYEE_ID),
            Some(SubjectId::new("43"))
        );

        let mut metadata = HashMap::new();
        metadata.insert(metadata_keys::EMPLOYEE_ID.to_string(), json!(null));
        let event = DomainEvent::new(input_with_metadata(metadata), Uuid::new_v4(), Utc::now());
        assert_eq!(event.metadata_subject_id(metadata_keys::EMPLOYEE_ID), None);
    }

    #[test]
    fn input_defaults_via_serde() {
        let json_minimal = r#"
        {
            "event_type": "TICKET_CREATED",
            "actor_id": "e2",
            "target_id": "5",
            "target_type": "ticket"
        }
        "#;
        let input: DomainEventInput = serde_json::from_str(json_minimal).unwrap();
        assert!(input.metadata.is_empty());
        assert_eq!(input.created_at, None);
    }
}
