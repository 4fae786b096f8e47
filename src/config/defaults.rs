//! Default value functions for configuration.
//!
//! Separated into its own module for clarity and reuse.

use std::net::{Ipv4Addr, SocketAddr};

// =============================================================================
// Server Defaults
// =============================================================================

pub fn default_server_name() -> String {
    "relayd".to_string()
}

pub fn default_listen_address() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8888))
}

// =============================================================================
// Limit Defaults
// =============================================================================

pub fn default_command_queue() -> usize {
    1024
}

pub fn default_outbound_queue() -> usize {
    256
}

pub fn default_max_line_length() -> usize {
    relay_proto::line::DEFAULT_MAX_LINE_LENGTH
}
