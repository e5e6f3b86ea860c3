//! Domain events: the immutable records business operations emit, their
//! durable audit trail, and the publish boundary.

pub mod audit;
pub mod bus;
pub mod errors;
pub mod types;

pub use audit::{EventAuditProvider, InMemoryEventAudit};
pub use bus::{DefaultEventBus, EventBus};
pub use errors::EventBusError;
pub use types::{event_types, metadata_keys, DomainEvent, DomainEventInput};
