//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Smallest line limit that still fits a command word and an argument.
const MIN_LINE_LENGTH: usize = 16;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("limits.command_queue must be at least 1")]
    ZeroCommandQueue,
    #[error("limits.outbound_queue must be at least 1")]
    ZeroOutboundQueue,
    #[error("limits.max_line_length must be at least 16, got {0}")]
    LineLengthTooSmall(usize),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.name.trim().is_empty() {
        errors.push(ValidationError::MissingServerName);
    }

    // tokio's bounded channels panic on zero capacity
    if config.limits.command_queue == 0 {
        errors.push(ValidationError::ZeroCommandQueue);
    }
    if config.limits.outbound_queue == 0 {
        errors.push(ValidationError::ZeroOutboundQueue);
    }

    if config.limits.max_line_length < MIN_LINE_LENGTH {
        errors.push(ValidationError::LineLengthTooSmall(
            config.limits.max_line_length,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
