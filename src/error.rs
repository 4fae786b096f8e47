//! Unified error handling for relayd.
//!
//! Command handlers report usage and precondition failures through
//! [`HandlerError`]; the dispatcher turns them into a line for the
//! originating session. [`DispatchError`] is what sessions see when the
//! dispatcher itself is gone.

use crate::state::SessionId;
use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("nick is required. usage: /nick NAME")]
    MissingNick,

    #[error("room name is required. usage: /join ROOM_NAME")]
    MissingRoom,

    #[error("you must join the room first")]
    NotInRoom,

    /// The session already quit; a late command from its read loop.
    #[error("session {0} is not attached")]
    Detached(SessionId),

    #[error("internal error: {0}")]
    Internal(String),
}

/// How an error is surfaced to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing argument: the usage hint is sent as a plain line.
    Usage,
    /// Command not valid in the session's current state: sent as `err: ...`.
    Precondition,
    /// Not client-visible; logged only.
    Internal,
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingNick => "missing_nick",
            Self::MissingRoom => "missing_room",
            Self::NotInRoom => "not_in_room",
            Self::Detached(_) => "detached",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Classify the error for reply formatting.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingNick | Self::MissingRoom => ErrorClass::Usage,
            Self::NotInRoom => ErrorClass::Precondition,
            Self::Detached(_) | Self::Internal(_) => ErrorClass::Internal,
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Dispatch Errors (session -> dispatcher)
// ============================================================================

/// The dispatcher task is no longer receiving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("dispatcher has shut down")]
    Closed,

    #[error("dispatcher dropped the reply")]
    NoReply,
}
