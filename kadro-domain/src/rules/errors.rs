//! Errors of receiver resolution.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    /// The staff/employee directory could not be queried. Rules degrade this
    /// to an empty receiver list; it never crosses the orchestrator.
    #[error("Staff directory unavailable: {0}")]
    DirectoryUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_display() {
        assert_eq!(
            format!("{}", RuleError::DirectoryUnavailable("timeout".to_string())),
            "Staff directory unavailable: timeout"
        );
    }
}
