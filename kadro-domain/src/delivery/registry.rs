//! The live-connection registry.
//!
//! An explicit object owned by the composition root, with injected
//! register/deregister lifecycle; there is no ambient global socket map.
//! Connection lifecycle is independent of notification lifecycle: closing a
//! connection never deletes or mutates a notification row.

use std::collections::HashMap;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use super::types::PushPayload;
use crate::shared_types::{SubjectId, SubjectKind};

struct ConnectionEntry {
    id: Uuid,
    sender: mpsc::Sender<PushPayload>,
}

/// One live connection of a subject, e.g. one open browser tab.
///
/// Receives pushed payloads through [`ConnectionHandle::recv`]. Dropping the
/// handle closes the channel; the registry prunes the dead entry on the next
/// reap pass or explicit deregistration.
pub struct ConnectionHandle {
    id: Uuid,
    subject_kind: SubjectKind,
    subject_id: SubjectId,
    receiver: mpsc::Receiver<PushPayload>,
}

impl ConnectionHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn subject_kind(&self) -> SubjectKind {
        self.subject_kind
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    /// Next pushed payload, `None` once the connection is deregistered and
    /// drained.
    pub async fn recv(&mut self) -> Option<PushPayload> {
        self.receiver.recv().await
    }

    /// Non-blocking variant of [`recv`](Self::recv).
    pub fn try_recv(&mut self) -> Option<PushPayload> {
        self.receiver.try_recv().ok()
    }
}

/// Registry of live push connections keyed by `(subject kind, subject id)`.
///
/// One subject may hold multiple simultaneous connections; `push` fans out
/// to all of them. The registry is mutated only by connect/disconnect (and
/// the reaper); `push` takes the read path.
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<(SubjectKind, SubjectId), Vec<ConnectionEntry>>>,
    buffer_size: usize,
}

impl ConnectionRegistry {
    /// `buffer_size` payloads are buffered per connection; a full buffer
    /// drops further payloads for that connection until it drains.
    pub fn new(buffer_size: usize) -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
            buffer_size: buffer_size.max(1),
        }
    }

    /// Registers a live connection for an authenticated subject.
    pub async fn register(&self, kind: SubjectKind, id: SubjectId) -> ConnectionHandle {
        let (sender, receiver) = mpsc::channel(self.buffer_size);
        let handle_id = Uuid::new_v4();
        self.connections
            .write()
            .await
            .entry((kind, id.clone()))
            .or_default()
            .push(ConnectionEntry {
                id: handle_id,
                sender,
            });
        debug!(subject = %id, %kind, connection = %handle_id, "connection registered");
        ConnectionHandle {
            id: handle_id,
            subject_kind: kind,
            subject_id: id,
            receiver,
        }
    }

    /// Removes a connection. Safe to call for an already-removed handle.
    pub async fn deregister(&self, handle: &ConnectionHandle) {
        let mut connections = self.connections.write().await;
        let key = (handle.subject_kind, handle.subject_id.clone());
        if let Some(entries) = connections.get_mut(&key) {
            entries.retain(|entry| entry.id != handle.id);
            if entries.is_empty() {
                connections.remove(&key);
            }
        }
        debug!(connection = %handle.id, "connection deregistered");
    }

    /// Fans a payload out to every live connection of the subject.
    ///
    /// Non-blocking: a connection with a full buffer misses this payload, a
    /// closed one is skipped. A subject with zero connections is a silent
    /// no-op; the persisted row is the fallback source of truth. Returns
    /// the number of connections that accepted the payload.
    pub async fn push(&self, kind: SubjectKind, id: &SubjectId, payload: PushPayload) -> usize {
        let connections = self.connections.read().await;
        let Some(entries) = connections.get(&(kind, id.clone())) else {
            return 0;
        };
        let mut delivered = 0;
        for entry in entries {
            match entry.sender.try_send(payload.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    debug!(subject = %id, connection = %entry.id, "push buffer full, payload dropped");
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(subject = %id, connection = %entry.id, "push to closed connection skipped");
                }
            }
        }
        delivered
    }

    /// Prunes entries whose receiving side is gone. Invoked by the
    /// heartbeat task of the transport layer.
    pub async fn reap_closed(&self) -> usize {
        let mut connections = self.connections.write().await;
        let mut reaped = 0;
        connections.retain(|_, entries| {
            entries.retain(|entry| {
                if entry.sender.is_closed() {
                    reaped += 1;
                    false
                } else {
                    true
                }
            });
            !entries.is_empty()
        });
        if reaped > 0 {
            debug!(reaped, "reaped closed connections");
        }
        reaped
    }

    /// Number of live connections currently held by a subject.
    pub async fn connection_count(&self, kind: SubjectKind, id: &SubjectId) -> usize {
        self.connections
            .read()
            .await
            .get(&(kind, id.clone()))
            .map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::types::{event_types, DomainEventInput};
    use crate::events::DomainEvent;
    use crate::notifications::Notification;
    use crate::rules::AggregationKey;
    use crate::shared_types::Receiver;
    use chrono::Utc;
    use std::collections::HashMap as StdHashMap;

    fn payload(message: &str) -> PushPayload {
        let event = DomainEvent::new(
            DomainEventInput {
                event_type: event_types::LEAVE_REQUESTED.to_string(),
                actor_id: "e1".to_string(),
                target_id: "77".to_string(),
                target_type: "leave".to_string(),
                metadata: StdHashMap::new(),
                created_at: None,
            },
            Uuid::new_v4(),
            Utc::now(),
        );
        let receiver = Receiver::staff("a1");
        let key = AggregationKey::compute(&event, &receiver);
        PushPayload {
            notification: Notification::from_event(&event, &receiver, key, Utc::now()),
            message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn push_fans_out_to_all_connections_of_a_subject() {
        let registry = ConnectionRegistry::new(8);
        let subject = SubjectId::new("a1");
        let mut tab1 = registry.register(SubjectKind::Staff, subject.clone()).await;
        let mut tab2 = registry.register(SubjectKind::Staff, subject.clone()).await;
        assert_ne!(tab1.id(), tab2.id());

        let delivered = registry
            .push(SubjectKind::Staff, &subject, payload("hello"))
            .await;
        assert_eq!(delivered, 2);
        assert_eq!(tab1.recv().await.unwrap().message, "hello");
        assert_eq!(tab2.recv().await.unwrap().message, "hello");
    }

    #[tokio::test]
    async fn push_without_connections_is_a_silent_noop() {
        let registry = ConnectionRegistry::new(8);
        let delivered = registry
            .push(SubjectKind::Employee, &SubjectId::new("42"), payload("x"))
            .await;
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn push_does_not_cross_subjects_or_kinds() {
        let registry = ConnectionRegistry::new(8);
        let mut staff = registry
            .register(SubjectKind::Staff, SubjectId::new("1"))
            .await;
        let mut employee = registry
            .register(SubjectKind::Employee, SubjectId::new("1"))
            .await;

        registry
            .push(SubjectKind::Staff, &SubjectId::new("1"), payload("staff only"))
            .await;

        assert_eq!(staff.try_recv().unwrap().message, "staff only");
        assert!(employee.try_recv().is_none());
    }

    #[tokio::test]
    async fn full_buffer_drops_payload_without_blocking() {
        let registry = ConnectionRegistry::new(1);
        let subject = SubjectId::new("a1");
        let mut handle = registry.register(SubjectKind::Staff, subject.clone()).await;

        assert_eq!(
            registry
                .push(SubjectKind::Staff, &subject, payload("first"))
                .await,
            1
        );
        assert_eq!(
            registry
                .push(SubjectKind::Staff, &subject, payload("overflow"))
                .await,
            0
        );
        assert_eq!(handle.recv().await.unwrap().message, "first");
        assert!(handle.try_recv().is_none());
    }

    #[tokio::test]
    async fn deregister_stops_delivery() {
        let registry = ConnectionRegistry::new(8);
        let subject = SubjectId::new("a1");
        let handle = registry.register(SubjectKind::Staff, subject.clone()).await;
        assert_eq!(handle.subject_kind(), SubjectKind::Staff);
        assert_eq!(handle.subject_id(), &subject);
        assert_eq!(
            registry.connection_count(SubjectKind::Staff, &subject).await,
            1
        );

        registry.deregister(&handle).await;
        assert_eq!(
            registry.connection_count(SubjectKind::Staff, &subject).await,
            0
        );
        assert_eq!(
            registry
                .push(SubjectKind::Staff, &subject, payload("late"))
                .await,
            0
        );
    }

    #[tokio::test]
    async fn reaper_prunes_dropped_handles() {
        let registry = ConnectionRegistry::new(8);
        let subject = SubjectId::new("a1");
        let handle = registry.register(SubjectKind::Staff, subject.clone()).await;
        drop(handle);

        assert_eq!(
            registry.connection_count(SubjectKind::Staff, &subject).await,
            1
        );
        assert_eq!(registry.reap_closed().await, 1);
        assert_eq!(
            registry.connection_count(SubjectKind::Staff, &subject).await,
            0
        );
    }
}
