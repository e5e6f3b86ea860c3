//! Rendering of notification rows into human-readable messages.
//!
//! Runs on the push hot path, so [`render`] is total: every input produces a
//! string, unknown event types included. Rendering happens only when pushing;
//! persisted rows never store a message.

use crate::events::types::event_types;
use crate::notifications::Notification;

/// Renders a notification into the message pushed to live connections.
///
/// Keyed off the event type and the repeat counter: a single event with a
/// known actor name gets specific phrasing, a single anonymous event generic
/// phrasing, repeats an aggregate plural. Unknown tags fall back to a
/// humanized form of the tag itself.
pub fn render(notification: &Notification) -> String {
    let count = notification.count;
    match notification.event_type.as_str() {
        event_types::LEAVE_REQUESTED => match (count, first_actor_name(notification)) {
            (1, Some(name)) => format!("{} requested leave", name),
            (1, None) => "New leave request submitted".to_string(),
            _ => format!("{} new leave requests submitted", count),
        },
        event_types::TICKET_CREATED => match (count, first_actor_name(notification)) {
            (1, Some(name)) => format!("{} created a ticket", name),
            (1, None) => "New ticket created".to_string(),
            _ => format!("{} new tickets created", count),
        },
        event_types::ATTENDANCE_MISSED => match (count, first_actor_name(notification)) {
            (1, Some(name)) => format!("{} missed attendance", name),
            (1, None) => "Attendance entry missed".to_string(),
            _ => format!("{} attendance entries missed", count),
        },
        event_types::LEAVE_APPROVED => "Your leave request has been approved".to_string(),
        event_types::LEAVE_REJECTED => "Your leave request has been rejected".to_string(),
        event_types::TICKET_APPROVED => "Your ticket has been approved".to_string(),
        event_types::TICKET_REJECTED => "Your ticket has been rejected".to_string(),
        other => humanize_tag(other),
    }
}

fn first_actor_name(notification: &Notification) -> Option<&str> {
    notification
        .actors
        .first()
        .and_then(|actor| actor.display_name.as_deref())
        .filter(|name| !name.is_empty())
}

/// Fallback phrasing for tags this layer does not know: underscores to
/// spaces, lowercased.
fn humanize_tag(tag: &str) -> String {
    tag.replace('_', " ").to_lowercase()
}
