//! Queue and line-length limits configuration.

use serde::Deserialize;

use super::defaults::{default_command_queue, default_max_line_length, default_outbound_queue};

/// Queue and line-length limits.
///
/// Both queues are bounded. A full command queue makes the submitting
/// session wait; a full outbound queue drops the line for that recipient.
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Dispatcher mailbox capacity shared by all sessions (default: 1024).
    #[serde(default = "default_command_queue")]
    pub command_queue: usize,
    /// Per-session outbound line queue capacity (default: 256).
    #[serde(default = "default_outbound_queue")]
    pub outbound_queue: usize,
    /// Maximum accepted input line in bytes, terminator included (default: 4096).
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            command_queue: default_command_queue(),
            outbound_queue: default_outbound_queue(),
            max_line_length: default_max_line_length(),
        }
    }
}
