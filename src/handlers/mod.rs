//! Command handlers.
//!
//! Each [`CommandKind`](relay_proto::CommandKind) has one [`Handler`]
//! registered in the [`Registry`]. Handlers run inside the dispatcher task
//! with exclusive access to the chat state, so they are plain synchronous
//! functions: all client output goes through non-blocking session queues.

mod context;
mod join;
mod message;
mod nick;
mod quit;
mod registry;
mod rooms;

pub use context::{Context, Handler};
pub use join::JoinHandler;
pub use message::MessageHandler;
pub use nick::NickHandler;
pub use quit::QuitHandler;
pub use registry::Registry;
pub use rooms::RoomsHandler;

pub use crate::error::{HandlerError, HandlerResult};
