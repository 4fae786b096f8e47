//! Per-connection session state.
//!
//! A session is split in two. The connection task owns the socket and the
//! receiving end of the outbound queue. Everything else about the session
//! (nick, current room) lives in a [`SessionEntry`] owned by the dispatcher,
//! which reaches the socket only through the cloneable [`SessionHandle`].

use super::SessionId;
use std::fmt;
use std::net::SocketAddr;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// Nick given to every session until it issues `/nick`.
pub const DEFAULT_NICK: &str = "anonymous";

/// Item queued for a connection's writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Write one line to the client.
    Line(String),
    /// Flush what is queued and close the connection.
    Close,
}

/// Sending half of a session, held by the dispatcher and by room
/// memberships.
///
/// All delivery is non-blocking: a full or closed queue is logged and
/// reported through the return value, never raised, so one stuck client
/// cannot stall the dispatcher or abort a broadcast.
#[derive(Clone)]
pub struct SessionHandle {
    id: SessionId,
    addr: SocketAddr,
    tx: mpsc::Sender<Outbound>,
}

impl SessionHandle {
    pub fn new(id: SessionId, addr: SocketAddr, tx: mpsc::Sender<Outbound>) -> Self {
        Self { id, addr, tx }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Queue one line for the client. Returns `false` if it was dropped.
    pub fn deliver(&self, text: impl Into<String>) -> bool {
        self.push(Outbound::Line(text.into()))
    }

    /// Queue an `err: `-prefixed line for the client.
    pub fn deliver_error(&self, err: &dyn fmt::Display) -> bool {
        self.deliver(format!("err: {err}"))
    }

    /// Ask the connection task to flush and hang up.
    pub fn close(&self) -> bool {
        self.push(Outbound::Close)
    }

    /// Whether the connection task has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn push(&self, item: Outbound) -> bool {
        match self.tx.try_send(item) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                warn!(session = %self.id, addr = %self.addr, "Outbound queue full, dropping line");
                false
            }
            Err(TrySendError::Closed(_)) => {
                debug!(session = %self.id, addr = %self.addr, "Session gone, dropping line");
                false
            }
        }
    }
}

impl fmt::Debug for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionHandle")
            .field("id", &self.id)
            .field("addr", &self.addr)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Dispatcher-owned record for one attached session.
#[derive(Debug)]
pub struct SessionEntry {
    pub handle: SessionHandle,
    pub nick: String,
    /// Name of the room the session is in; the room registry is the source
    /// of truth for membership.
    pub room: Option<String>,
}

impl SessionEntry {
    pub fn new(handle: SessionHandle) -> Self {
        Self {
            handle,
            nick: DEFAULT_NICK.to_string(),
            room: None,
        }
    }
}
