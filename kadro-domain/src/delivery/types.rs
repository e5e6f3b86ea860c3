//! Wire payload pushed to live connections.

use serde::{Deserialize, Serialize};

use crate::notifications::Notification;

/// What a connected client receives on push: the current state of the
/// aggregated row plus the rendered message. The row is authoritative; the
/// message is presentation only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PushPayload {
    pub notification: Notification,
    pub message: String,
}
