//! # relay-proto
//!
//! Wire format for the relayd chat relay.
//!
//! The protocol is deliberately small: every frame is one newline-terminated
//! UTF-8 line. Client lines are either slash commands (`/nick`, `/join`,
//! `/rooms`, `/msg`, `/quit`) or free text, which is treated as a message to
//! the current room. Server lines are plain text.
//!
//! ```rust
//! use relay_proto::{CommandKind, parse_line};
//!
//! let parsed = parse_line("/join lobby").expect("recognized command");
//! assert_eq!(parsed.kind, CommandKind::Join);
//! assert_eq!(parsed.args, vec!["lobby".to_string()]);
//!
//! // Free text is an implicit message.
//! let parsed = parse_line("hello there").expect("implicit message");
//! assert_eq!(parsed.kind, CommandKind::Message);
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
#[cfg(feature = "tokio")]
pub mod line;

pub use self::command::{COMMAND_MARKER, CommandKind, ParsedLine, parse_line};
pub use self::error::ProtocolError;
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
