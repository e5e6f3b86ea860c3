//! Real-time push delivery: the process-local registry of live connections
//! and the payload shape pushed over them.

pub mod registry;
pub mod types;

pub use registry::{ConnectionHandle, ConnectionRegistry};
pub use types::PushPayload;
