//! The notification pipeline service.

use std::sync::Arc;

use async_trait::async_trait;
use kadro_core::config::NotificationConfig;
use tokio::sync::broadcast;
use tracing::{debug, error};
use uuid::Uuid;

use super::events::PipelineEvent;
use crate::delivery::{ConnectionRegistry, PushPayload};
use crate::events::DomainEvent;
use crate::notifications::errors::NotificationStoreError;
use crate::notifications::{Notification, NotificationStore};
use crate::renderer::render;
use crate::rules::RuleRegistry;
use crate::shared_types::Receiver;

/// Orchestrates the per-event flow: resolve receivers, upsert per receiver,
/// render, push.
///
/// `handle_event` is infallible by contract; every downstream failure is
/// isolated to the affected receiver and logged. Nothing that happens here
/// may surface as an error in the business operation that published the
/// event.
#[async_trait]
pub trait NotificationPipeline: Send + Sync {
    async fn handle_event(&self, event: &DomainEvent);

    /// Marks notifications of a receiver as seen: the listed ids, or all
    /// unread rows when `notification_ids` is `None`. Invoked by the inbox
    /// UI with the authenticated subject's identity.
    async fn mark_seen(
        &self,
        receiver: &Receiver,
        notification_ids: Option<&[Uuid]>,
    ) -> Result<usize, NotificationStoreError>;

    /// A page of the receiver's notifications, most recently updated first.
    /// The fallback read path for clients that missed pushes; `limit` is
    /// clamped to the configured page size cap.
    async fn list_notifications(
        &self,
        receiver: &Receiver,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Notification>, NotificationStoreError>;

    /// Number of unread notifications of a receiver, for the inbox badge.
    async fn unread_count(&self, receiver: &Receiver) -> Result<u64, NotificationStoreError>;

    /// Subscribes to pipeline observability events.
    fn subscribe(&self) -> broadcast::Receiver<PipelineEvent>;
}

/// Default pipeline over the rule registry, notification store, and
/// connection registry.
pub struct DefaultNotificationPipeline {
    registry: Arc<RuleRegistry>,
    store: Arc<dyn NotificationStore>,
    connections: Arc<ConnectionRegistry>,
    event_publisher: broadcast::Sender<PipelineEvent>,
    inbox_page_size_cap: usize,
}

impl DefaultNotificationPipeline {
    pub fn new(
        registry: Arc<RuleRegistry>,
        store: Arc<dyn NotificationStore>,
        connections: Arc<ConnectionRegistry>,
        config: &NotificationConfig,
    ) -> Self {
        let (event_publisher, _) = broadcast::channel(config.pipeline_event_capacity.max(1));
        Self {
            registry,
            store,
            connections,
            event_publisher,
            inbox_page_size_cap: config.inbox_page_size_cap.max(1),
        }
    }

    fn publish_event(&self, event: PipelineEvent) {
        // A send error only means no subscriber is currently listening.
        if self.event_publisher.send(event).is_err() {
            debug!("pipeline event dropped, no subscribers");
        }
    }
}

#[async_trait]
impl NotificationPipeline for DefaultNotificationPipeline {
    async fn handle_event(&self, event: &DomainEvent) {
        let Some(rule) = self.registry.lookup(&event.event_type) else {
            debug!(event_type = %event.event_type, "no rule registered, event ignored");
            self.publish_event(PipelineEvent::EventIgnored {
                event_type: event.event_type.clone(),
            });
            return;
        };

        let receivers = rule.resolve_receivers(event).await;
        debug!(
            event_id = %event.id,
            event_type = %event.event_type,
            receiver_count = receivers.len(),
            "receivers resolved"
        );
        self.publish_event(PipelineEvent::ReceiversResolved {
            event_id: event.id,
            receiver_count: receivers.len(),
        });

        for receiver in receivers {
            let key = rule.aggregation_key(event, &receiver);
            let notification = match self.store.upsert(event, &receiver, &key).await {
                Ok(notification) => notification,
                Err(e) => {
                    // One receiver's storage failure must not block the rest
                    // of the fan-out.
                    error!(
                        event_id = %event.id,
                        receiver = %receiver,
                        aggregation_key = %key,
                        "notification upsert failed, delivery skipped: {}",
                        e
                    );
                    continue;
                }
            };

            let message = render(&notification);
            let delivered = self
                .connections
                .push(
                    receiver.kind,
                    &receiver.id,
                    PushPayload {
                        notification: notification.clone(),
                        message,
                    },
                )
                .await;
            debug!(
                event_id = %event.id,
                receiver = %receiver,
                notification_id = %notification.id,
                count = notification.count,
                delivered,
                "notification merged and pushed"
            );
            self.publish_event(PipelineEvent::NotificationStored { notification });
        }
    }

    async fn mark_seen(
        &self,
        receiver: &Receiver,
        notification_ids: Option<&[Uuid]>,
    ) -> Result<usize, NotificationStoreError> {
        self.store.mark_seen(receiver, notification_ids).await
    }

    async fn list_notifications(
        &self,
        receiver: &Receiver,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Notification>, NotificationStoreError> {
        self.store
            .list_for_receiver(receiver, limit.min(self.inbox_page_size_cap), offset)
            .await
    }

    async fn unread_count(&self, receiver: &Receiver) -> Result<u64, NotificationStoreError> {
        self.store.unread_count(receiver).await
    }

    fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.event_publisher.subscribe()
    }
}
