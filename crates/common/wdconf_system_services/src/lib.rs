//! Common interface to the host facilities `wdconf` relies on.
//!
//! * the _service management facility_ to start, restart, enable
//!   or query the status of the watchdog daemon
//! * the package manager installing the daemon
//! * the kernel module loader
//!
//! All of them run the commands configured in `system.toml`,
//! with a `{}` placeholder standing for the service, package or module name.

mod command;
mod error;
mod manager;
mod managers;
mod modules;
mod package;
mod services;

pub use self::command::*;
pub use self::error::*;
pub use self::manager::*;
pub use self::managers::*;
pub use self::modules::*;
pub use self::package::*;
pub use self::services::*;
