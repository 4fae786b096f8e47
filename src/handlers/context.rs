//! Handler context and trait.

use crate::error::{HandlerError, HandlerResult};
use crate::state::{ChatState, SessionEntry, SessionId};

/// Everything a handler may touch while executing one command.
pub struct Context<'a> {
    /// Session that submitted the command.
    pub origin: SessionId,
    /// Tokens following the command word.
    pub args: &'a [String],
    /// Exclusive access to the chat state.
    pub state: &'a mut ChatState,
}

impl<'a> Context<'a> {
    pub fn new(origin: SessionId, args: &'a [String], state: &'a mut ChatState) -> Self {
        Self {
            origin,
            args,
            state,
        }
    }

    /// The originating session, if it is still attached.
    pub fn session(&self) -> Result<&SessionEntry, HandlerError> {
        self.state
            .session(self.origin)
            .ok_or(HandlerError::Detached(self.origin))
    }

    pub fn session_mut(&mut self) -> Result<&mut SessionEntry, HandlerError> {
        self.state
            .session_mut(self.origin)
            .ok_or(HandlerError::Detached(self.origin))
    }

    /// First argument, or `err` when the command was sent bare.
    pub fn required_arg(&self, err: HandlerError) -> Result<&'a str, HandlerError> {
        self.args.first().map(String::as_str).ok_or(err)
    }
}

/// A command handler.
pub trait Handler: Send + Sync {
    fn handle(&self, ctx: &mut Context<'_>) -> HandlerResult;
}
