//! Classification of transport read errors.

use relay_proto::ProtocolError;

/// What the connection does after a failed read.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum ReadErrorAction {
    /// The client sent something unacceptable: tell it why, then quit.
    RejectInput { error_msg: String },
    /// The socket is broken: quit without writing.
    IoError,
}

/// Classify a transport read error into an actionable category.
pub(super) fn classify_read_error(e: &ProtocolError) -> ReadErrorAction {
    match e {
        ProtocolError::LineTooLong { limit, .. } => ReadErrorAction::RejectInput {
            error_msg: format!("line too long (limit: {limit} bytes)"),
        },
        ProtocolError::InvalidUtf8 { byte_pos, .. } => ReadErrorAction::RejectInput {
            error_msg: format!("invalid UTF-8 at byte {byte_pos}"),
        },
        ProtocolError::Io(_) => ReadErrorAction::IoError,
        // Handle other variants that might be added in the future
        other if other.is_input_error() => ReadErrorAction::RejectInput {
            error_msg: other.to_string(),
        },
        _ => ReadErrorAction::IoError,
    }
}
