//! Command grammar.
//!
//! A line starting with [`COMMAND_MARKER`] names a command; everything after
//! the command word is split on whitespace into arguments. A line without
//! the marker is an implicit [`CommandKind::Message`] whose arguments are all
//! of its tokens.

use std::fmt;

/// Leading character that introduces a command word.
pub const COMMAND_MARKER: char = '/';

/// The commands a client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// `/nick NAME`
    SetNick,
    /// `/join ROOM`
    Join,
    /// `/rooms`
    ListRooms,
    /// `/msg TEXT...` or any unmarked line.
    Message,
    /// `/quit`
    Quit,
}

impl CommandKind {
    /// Every command kind, in protocol order.
    pub const ALL: [CommandKind; 5] = [
        CommandKind::SetNick,
        CommandKind::Join,
        CommandKind::ListRooms,
        CommandKind::Message,
        CommandKind::Quit,
    ];

    /// Look up a command word (without the marker), ignoring ASCII case.
    pub fn from_word(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.word().eq_ignore_ascii_case(word))
    }

    /// The command word as typed by clients.
    pub fn word(&self) -> &'static str {
        match self {
            Self::SetNick => "nick",
            Self::Join => "join",
            Self::ListRooms => "rooms",
            Self::Message => "msg",
            Self::Quit => "quit",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// A line split into a command kind and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    /// Which command the line names.
    pub kind: CommandKind,
    /// Whitespace-separated tokens following the command word.
    pub args: Vec<String>,
}

/// Parse one line of client input.
///
/// Returns `None` for blank lines and for unrecognized command words; both
/// are dropped without a reply.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?;

    let kind = match first.strip_prefix(COMMAND_MARKER) {
        Some(word) => CommandKind::from_word(word)?,
        None => {
            return Some(ParsedLine {
                kind: CommandKind::Message,
                args: line.split_whitespace().map(str::to_owned).collect(),
            });
        }
    };

    Some(ParsedLine {
        kind,
        args: tokens.map(str::to_owned).collect(),
    })
}
