//! The notification aggregation store: idempotent upsert-and-merge of
//! notification rows, mark-as-seen, and the inbox read path.

pub mod errors;
pub mod store;
pub mod types;

pub use errors::NotificationStoreError;
pub use store::{InMemoryNotificationStore, NotificationStore};
pub use types::{Notification, NotificationState};
