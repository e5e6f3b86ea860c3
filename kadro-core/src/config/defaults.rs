//! Default configuration values, referenced by the serde `default`
//! attributes of the schema structs.

use std::path::PathBuf;

/// Default log level: `"info"`.
pub(super) fn default_log_level() -> String {
    "info".to_string()
}

/// Default log file path: none (file logging disabled).
pub(super) fn default_log_file_path() -> Option<PathBuf> {
    None
}

/// Default file log format: `"text"`.
pub(super) fn default_log_format() -> String {
    "text".to_string()
}

/// Default pipeline event broadcast capacity.
pub(super) fn default_pipeline_event_capacity() -> usize {
    64
}

/// Default per-connection push buffer size.
pub(super) fn default_push_buffer_size() -> usize {
    32
}

/// Default cap on inbox listing page size.
pub(super) fn default_inbox_page_size_cap() -> usize {
    100
}
