//! Decision logic for configuring a Linux watchdog daemon.
//!
//! Everything in this crate is a pure function of its inputs:
//!
//! * [select] maps the requested [WatchdogType] and the [HostFacts] to the kernel watchdog driver
//!   to load, and tells whether the Intel TCO driver has to be blacklisted;
//! * [min_free_pages] converts a percentage of the total memory into a number of memory pages;
//! * [assemble] combines both with the user-provided [MonitoringThresholds]
//!   into the [WatchdogConfiguration] handed over to the renderers.
//!
//! Gathering the facts and applying the result on the host are done by other crates.

mod assemble;
mod error;
mod facts;
mod memory;
mod module;
mod selector;
mod thresholds;
mod watchdog_type;

pub use self::assemble::*;
pub use self::error::*;
pub use self::facts::*;
pub use self::memory::*;
pub use self::module::*;
pub use self::selector::*;
pub use self::thresholds::*;
pub use self::watchdog_type::*;
