//! Error types for the line protocol.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Errors raised while framing lines off the wire.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The line is not valid UTF-8.
    #[error("invalid UTF-8 in line at byte {byte_pos}: {details}")]
    InvalidUtf8 {
        /// Byte position where UTF-8 validation failed.
        byte_pos: usize,
        /// Detailed error message from the UTF-8 decoder.
        details: String,
    },

    /// Line exceeded the maximum allowed length.
    #[error("line too long: {actual} bytes (limit: {limit})")]
    LineTooLong {
        /// Bytes buffered when the limit was hit.
        actual: usize,
        /// Maximum allowed length.
        limit: usize,
    },
}

impl ProtocolError {
    /// Whether the error came from the peer's input rather than the socket.
    ///
    /// Input errors deserve a reply before the connection is closed; socket
    /// errors mean nobody is listening anymore.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_too_long_display() {
        let err = ProtocolError::LineTooLong {
            actual: 1024,
            limit: 512,
        };
        assert_eq!(err.to_string(), "line too long: 1024 bytes (limit: 512)");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_io_error_is_not_input_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "broken pipe");
        let err: ProtocolError = io_err.into();
        assert!(!err.is_input_error());
        assert_eq!(err.to_string(), "io error: broken pipe");
    }
}
