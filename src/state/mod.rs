//! State management module.
//!
//! Contains the dispatch core and the state it exclusively owns: the room
//! registry, rooms, and per-session records.

mod chat;
mod dispatcher;
mod registry;
mod room;
pub(crate) mod session;
mod session_id;

pub use chat::{ChatSnapshot, ChatState, SessionSnapshot};
pub use dispatcher::{Command, DispatchConfig, DispatchEvent, Dispatcher};
pub use registry::RoomRegistry;
pub use room::Room;
pub use session::{DEFAULT_NICK, Outbound, SessionEntry, SessionHandle};
pub use session_id::{SessionId, SessionIdGenerator};
