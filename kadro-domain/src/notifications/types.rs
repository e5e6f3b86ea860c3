//! The notification row: the mutable aggregation unit of the pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::DomainEvent;
use crate::rules::AggregationKey;
use crate::shared_types::{Actor, Receiver};

/// Read state of a notification.
///
/// A merge always resets the row to `Unread`, even when previously `Seen`:
/// new activity on an already-seen item must resurface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationState {
    #[default]
    Unread,
    Seen,
}

/// One aggregated notification for one receiver.
///
/// Exactly one row exists per distinct aggregation key. `count` never
/// decreases and `actors` only grows; both absorb every event merged into
/// the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub aggregation_key: AggregationKey,
    pub receiver: Receiver,
    pub event_type: String,
    pub target_id: String,
    pub target_type: String,
    pub actors: Vec<Actor>,
    pub count: u64,
    pub state: NotificationState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Notification {
    /// A fresh row for the first event on a key.
    pub fn from_event(
        event: &DomainEvent,
        receiver: &Receiver,
        aggregation_key: AggregationKey,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            aggregation_key,
            receiver: receiver.clone(),
            event_type: event.event_type.clone(),
            target_id: event.target_id.clone(),
            target_type: event.target_type.clone(),
            actors: vec![event.actor.clone()],
            count: 1,
            state: NotificationState::Unread,
            created_at: now,
            updated_at: now,
        }
    }

    /// Absorbs a subsequent event for the same key: appends the actor when
    /// new (first-seen order preserved), increments the repeat counter,
    /// resets the read state, bumps `updated_at`.
    pub fn merge_event(&mut self, event: &DomainEvent, now: DateTime<Utc>) {
        if !self.actors.iter().any(|a| a.id == event.actor.id) {
            self.actors.push(event.actor.clone());
        }
        self.count += 1;
        self.state = NotificationState::Unread;
        self.updated_at = now;
    }

    pub fn is_unread(&self) -> bool {
        self.state == NotificationState::Unread
    }
}
