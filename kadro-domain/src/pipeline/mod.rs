//! The orchestrator: wires rules, store, renderer, and delivery together
//! for each incoming event.

pub mod events;
pub mod service;

pub use events::PipelineEvent;
pub use service::{DefaultNotificationPipeline, NotificationPipeline};
