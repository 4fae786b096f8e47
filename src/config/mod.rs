//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, RoomsConfig)
//! - [`listen`]: Network listener configuration (ListenConfig)
//! - [`limits`]: Queue and line-length limits (LimitsConfig)
//! - [`validation`]: Startup validation of loaded values

mod defaults;
mod limits;
mod listen;
mod types;
mod validation;

pub use limits::LimitsConfig;
pub use listen::ListenConfig;
pub use types::{Config, ConfigError, RoomsConfig, ServerConfig};
pub use validation::{ValidationError, validate};
