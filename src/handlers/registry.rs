//! Command handler registry and dispatch.
//!
//! The `Registry` maps each command kind to its handler and keeps per-kind
//! execution counts for the dispatcher snapshot.

use super::{
    Context, Handler, HandlerError, HandlerResult, JoinHandler, MessageHandler, NickHandler,
    QuitHandler, RoomsHandler,
};
use relay_proto::CommandKind;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, debug_span};

/// Registry of command handlers.
pub struct Registry {
    handlers: HashMap<CommandKind, Box<dyn Handler>>,
    /// Executions per command kind; only the dispatcher task touches these.
    command_counts: HashMap<CommandKind, u64>,
}

impl Registry {
    /// Create a new registry with all handlers registered.
    pub fn new() -> Self {
        let mut handlers: HashMap<CommandKind, Box<dyn Handler>> = HashMap::new();

        handlers.insert(CommandKind::SetNick, Box::new(NickHandler));
        handlers.insert(CommandKind::Join, Box::new(JoinHandler));
        handlers.insert(CommandKind::ListRooms, Box::new(RoomsHandler));
        handlers.insert(CommandKind::Message, Box::new(MessageHandler));
        handlers.insert(CommandKind::Quit, Box::new(QuitHandler));

        Self {
            handlers,
            command_counts: HashMap::new(),
        }
    }

    /// Run the handler for `kind` to completion.
    pub fn dispatch(&mut self, kind: CommandKind, ctx: &mut Context<'_>) -> HandlerResult {
        let Some(handler) = self.handlers.get(&kind) else {
            return Err(HandlerError::Internal(format!("no handler for /{kind}")));
        };

        *self.command_counts.entry(kind).or_insert(0) += 1;

        let _span = debug_span!("command", name = %kind, session = %ctx.origin).entered();
        let result = handler.handle(ctx);
        if let Err(ref e) = result {
            debug!(error = %e, code = e.error_code(), "Command failed");
        }
        result
    }

    /// Execution counts keyed by command word.
    pub fn command_counts(&self) -> BTreeMap<&'static str, u64> {
        self.command_counts
            .iter()
            .map(|(kind, count)| (kind.word(), *count))
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
