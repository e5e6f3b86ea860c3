//! Receiver-resolution rules: who is told about an event, and which
//! notification row absorbs it.

pub mod directory;
pub mod errors;
pub mod registry;
pub mod types;

pub use directory::{InMemoryStaffDirectory, StaffAccount, StaffDirectory};
pub use errors::RuleError;
pub use registry::{DecisionRule, NotificationRule, RuleRegistry, SubmissionRule};
pub use types::AggregationKey;
