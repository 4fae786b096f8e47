//! The dispatch core.
//!
//! One task owns the [`ChatState`] and the handler [`Registry`]. Sessions
//! reach it only through a [`Dispatcher`] handle that pushes
//! [`DispatchEvent`]s onto a single bounded queue. The task takes one event
//! at a time and runs it to completion before taking the next, so state
//! mutation never overlaps with itself and no lock is needed.
//!
//! Because every session submits through the same queue, events from one
//! session are processed in the order that session submitted them.

use super::{ChatSnapshot, ChatState, SessionHandle, SessionId};
use crate::config::Config;
use crate::error::{DispatchError, ErrorClass, HandlerError};
use crate::handlers::{Context, Registry};
use relay_proto::{CommandKind, ParsedLine};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A parsed command bound to the session that sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    pub args: Vec<String>,
    pub origin: SessionId,
}

impl Command {
    pub fn new(kind: CommandKind, args: Vec<String>, origin: SessionId) -> Self {
        Self { kind, args, origin }
    }

    /// Bind a parsed line to its session.
    pub fn from_parsed(parsed: ParsedLine, origin: SessionId) -> Self {
        Self::new(parsed.kind, parsed.args, origin)
    }

    /// A bare `/quit` for `origin`.
    pub fn quit(origin: SessionId) -> Self {
        Self::new(CommandKind::Quit, Vec::new(), origin)
    }
}

/// Events processed by the dispatch task.
#[derive(Debug)]
pub enum DispatchEvent {
    /// A new connection, sent before any of its commands.
    Attach(SessionHandle),
    /// A client command.
    Command(Command),
    /// Request a copy of the state.
    Snapshot {
        reply_tx: oneshot::Sender<ChatSnapshot>,
    },
}

/// Dispatcher settings.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Mailbox capacity shared by all sessions.
    pub queue_capacity: usize,
    /// Remove rooms once their last member leaves.
    pub prune_empty_rooms: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            queue_capacity: 1024,
            prune_empty_rooms: false,
        }
    }
}

impl From<&Config> for DispatchConfig {
    fn from(config: &Config) -> Self {
        Self {
            queue_capacity: config.limits.command_queue,
            prune_empty_rooms: config.rooms.prune_empty,
        }
    }
}

/// Submission side of the dispatch core. Cheap to clone; one per session.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<DispatchEvent>,
}

impl Dispatcher {
    /// Spawn the dispatch task.
    ///
    /// The task stops once every `Dispatcher` clone has been dropped and the
    /// queue is drained.
    pub fn spawn(config: DispatchConfig) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let core = DispatchCore::new(ChatState::new(config.prune_empty_rooms));
        let task = tokio::spawn(core.run(rx));
        (Self { tx }, task)
    }

    /// Register a session. Must precede its first [`Self::submit`].
    pub async fn attach(&self, handle: SessionHandle) -> Result<(), DispatchError> {
        self.send(DispatchEvent::Attach(handle)).await
    }

    /// Queue a command. Waits while the queue is full.
    pub async fn submit(&self, command: Command) -> Result<(), DispatchError> {
        self.send(DispatchEvent::Command(command)).await
    }

    /// Copy of the state after every event queued before this call.
    pub async fn snapshot(&self) -> Result<ChatSnapshot, DispatchError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(DispatchEvent::Snapshot { reply_tx }).await?;
        reply_rx.await.map_err(|_| DispatchError::NoReply)
    }

    async fn send(&self, event: DispatchEvent) -> Result<(), DispatchError> {
        self.tx.send(event).await.map_err(|_| DispatchError::Closed)
    }
}

/// The task-side half: sole owner of all chat state.
struct DispatchCore {
    state: ChatState,
    registry: Registry,
}

impl DispatchCore {
    fn new(state: ChatState) -> Self {
        Self {
            state,
            registry: Registry::new(),
        }
    }

    async fn run(mut self, mut rx: mpsc::Receiver<DispatchEvent>) {
        info!("Dispatcher started");
        while let Some(event) = rx.recv().await {
            self.handle_event(event);
        }
        info!(
            sessions = self.state.session_count(),
            rooms = self.state.rooms.len(),
            "Dispatcher stopped"
        );
    }

    fn handle_event(&mut self, event: DispatchEvent) {
        match event {
            DispatchEvent::Attach(handle) => {
                debug!(session = %handle.id(), addr = %handle.addr(), "Session attached");
                self.state.attach(handle);
            }
            DispatchEvent::Command(command) => self.execute(command),
            DispatchEvent::Snapshot { reply_tx } => {
                let mut snapshot = self.state.snapshot();
                snapshot.command_counts = self.registry.command_counts();
                let _ = reply_tx.send(snapshot);
            }
        }
    }

    fn execute(&mut self, command: Command) {
        let Command { kind, args, origin } = command;
        let mut ctx = Context::new(origin, &args, &mut self.state);

        if let Err(err) = self.registry.dispatch(kind, &mut ctx) {
            self.report(origin, &err);
        }
    }

    /// Tell the originating session what went wrong.
    fn report(&self, origin: SessionId, err: &HandlerError) {
        let Some(session) = self.state.session(origin) else {
            debug!(session = %origin, error = %err, "Dropping error for detached session");
            return;
        };

        match err.class() {
            ErrorClass::Usage => {
                session.handle.deliver(err.to_string());
            }
            ErrorClass::Precondition => {
                session.handle.deliver_error(err);
            }
            ErrorClass::Internal => {
                debug!(session = %origin, error = %err, "Internal command error");
            }
        }
    }
}
