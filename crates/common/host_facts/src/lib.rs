//! Sources of [HostFacts].
//!
//! * [LinuxFactProvider] reads the kernel interfaces of the running host.
//! * [StaticFactProvider] loads the facts from a TOML file, to plan the configuration of another host.
//!
//! [FactOverrides] let the user correct a detected fact, e.g. when the IPMI device is not exposed.

mod error;
mod linux;
mod overrides;
mod static_facts;

pub use self::error::*;
pub use self::linux::*;
pub use self::overrides::*;
pub use self::static_facts::*;
pub use wdconf_api::HostFacts;

/// A source of host facts.
pub trait FactProvider {
    /// Returns a short description of where the facts come from, for log messages.
    fn source(&self) -> String;

    /// Gathers a fresh snapshot of the host facts.
    fn host_facts(&self) -> Result<HostFacts, FactsError>;
}
