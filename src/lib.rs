//! relayd - multi-room line chat relay.
//!
//! Clients connect over TCP and speak a newline-delimited protocol
//! (`/nick`, `/join`, `/rooms`, `/msg`, `/quit`). Every state change goes
//! through one dispatcher task that owns the room registry, so the many
//! per-connection tasks never share mutable state.
//!
//! - [`network`]: listener and per-connection tasks
//! - [`state`]: dispatcher, rooms, sessions
//! - [`handlers`]: one handler per command
//! - [`config`]: TOML configuration

pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;
