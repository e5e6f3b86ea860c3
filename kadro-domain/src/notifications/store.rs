//! The notification store port and its in-memory implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::errors::NotificationStoreError;
use super::types::{Notification, NotificationState};
use crate::events::DomainEvent;
use crate::rules::AggregationKey;
use crate::shared_types::Receiver;

/// Storage port for notification rows.
///
/// `upsert` is the single mutation primitive of the pipeline and must be a
/// conditional write keyed by the aggregation-key unique constraint, not a
/// read-then-write: two events for the same key arriving concurrently from
/// different request handlers must both land in one row.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Creates the row for `aggregation_key`, or merges the event into the
    /// existing one. Returns the resulting row.
    async fn upsert(
        &self,
        event: &DomainEvent,
        receiver: &Receiver,
        aggregation_key: &AggregationKey,
    ) -> Result<Notification, NotificationStoreError>;

    /// Marks rows of `receiver` as seen: the listed ids, or every unread row
    /// when `notification_ids` is `None`. Idempotent; rows of other
    /// receivers are never touched. Returns the number of rows transitioned.
    async fn mark_seen(
        &self,
        receiver: &Receiver,
        notification_ids: Option<&[Uuid]>,
    ) -> Result<usize, NotificationStoreError>;

    /// A page of the receiver's rows, ordered by `updated_at` descending.
    async fn list_for_receiver(
        &self,
        receiver: &Receiver,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Notification>, NotificationStoreError>;

    /// Number of unread rows for the receiver.
    async fn unread_count(&self, receiver: &Receiver) -> Result<u64, NotificationStoreError>;
}

/// In-memory store keyed by aggregation key.
///
/// The map's write guard is held across the whole read-modify-write of
/// `upsert`, so same-key upserts are mutually exclusive and applied in
/// arrival order. A relational adapter implements the same port with an
/// `INSERT ... ON CONFLICT (aggregation_key) DO UPDATE` statement.
#[derive(Default)]
pub struct InMemoryNotificationStore {
    rows: RwLock<HashMap<AggregationKey, Notification>>,
}

impl InMemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of rows, across all receivers.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    /// The row for a key, if present.
    pub async fn get(&self, aggregation_key: &AggregationKey) -> Option<Notification> {
        self.rows.read().await.get(aggregation_key).cloned()
    }
}

#[async_trait]
impl NotificationStore for InMemoryNotificationStore {
    async fn upsert(
        &self,
        event: &DomainEvent,
        receiver: &Receiver,
        aggregation_key: &AggregationKey,
    ) -> Result<Notification, NotificationStoreError> {
        let mut rows = self.rows.write().await;
        let now = Utc::now();
        let row = match rows.get_mut(aggregation_key) {
            Some(existing) => {
                existing.merge_event(event, now);
                existing.clone()
            }
            None => {
                let fresh =
                    Notification::from_event(event, receiver, aggregation_key.clone(), now);
                rows.insert(aggregation_key.clone(), fresh.clone());
                fresh
            }
        };
        Ok(row)
    }

    async fn mark_seen(
        &self,
        receiver: &Receiver,
        notification_ids: Option<&[Uuid]>,
    ) -> Result<usize, NotificationStoreError> {
        let mut rows = self.rows.write().await;
        let mut transitioned = 0;
        for row in rows.values_mut() {
            if &row.receiver != receiver || !row.is_unread() {
                continue;
            }
            if let Some(ids) = notification_ids {
                if !ids.contains(&row.id) {
                    continue;
                }
            }
            row.state = NotificationState::Seen;
            transitioned += 1;
        }
        Ok(transitioned)
    }

    async fn list_for_receiver(
        &self,
        receiver: &Receiver,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Notification>, NotificationStoreError> {
        let rows = self.rows.read().await;
        let mut page: Vec<Notification> = rows
            .values()
            .filter(|row| &row.receiver == receiver)
            .cloned()
            .collect();
        page.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(page.into_iter().skip(offset).take(limit).collect())
    }

    async fn unread_count(&self, receiver: &Receiver) -> Result<u64, NotificationStoreError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|row| &row.receiver == receiver && row.is_unread())
            .count() as u64)
    }
}
