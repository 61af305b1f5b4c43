//! The two configuration files read by `wdconf`, both located in the configuration directory.
//!
//! * `wdconf.toml` describes what the watchdog daemon has to monitor
//!   and where the generated files are written.
//! * `system.toml` describes how to drive the host: init system, package manager,
//!   kernel module loader and log levels.

pub mod cli;
mod error;
pub mod system_toml;
pub mod wdconf_toml;

pub use self::error::*;
pub use self::system_toml::*;
pub use self::wdconf_toml::*;

pub const DEFAULT_CONFIG_DIR: &str = "/etc/wdconf";
