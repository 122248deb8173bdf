//! Configuration for the arbor navigation core.
//!
//! Runtime-tunable settings persisted to disk as RON, with CLI overrides
//! via clap. Unknown fields are ignored and missing sections fall back to
//! defaults, so config files stay forward/backward compatible.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CameraConfig, Config, DebugConfig, NavigationConfig};
pub use error::ConfigError;
