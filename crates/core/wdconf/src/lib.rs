pub use cli::*;
pub mod apply;
pub mod cli;
pub mod command;
pub mod error;
pub mod render;

pub type ConfigError = crate::error::WdconfError;

/// Name used to pick the log level in the `[log]` section of `system.toml`
pub const BINARY_NAME: &str = "wdconf";
