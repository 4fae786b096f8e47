//! Session identifier generation.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Stable handle for one live connection, used as the membership key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out unique session ids, shared by every listener task.
///
/// Ids are never reused within a process, so a late command from a closed
/// connection can never be mistaken for a newer session.
pub struct SessionIdGenerator {
    counter: AtomicU64,
}

/// Start at 1 so that 0 never appears in logs as a real session.
const SESSION_COUNTER_START: u64 = 1;

impl SessionIdGenerator {
    pub fn new() -> Self {
        Self {
            counter: AtomicU64::new(SESSION_COUNTER_START),
        }
    }

    /// Generate the next unique id.
    pub fn next(&self) -> SessionId {
        SessionId(self.counter.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for SessionIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
