use crate::WatchdogConfigError;
use serde::Deserialize;
use serde::Serialize;
use std::str::FromStr;

/// The kind of watchdog requested by the user.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(try_from = "String", into = "&'static str")]
pub enum WatchdogType {
    /// Leave the kernel driver selection to the system
    Auto,
    /// Pick the most reliable driver available: IPMI, then Intel TCO, then softdog
    #[default]
    Best,
    /// Intel TCO hardware timer
    Tco,
    /// Kernel software watchdog
    Soft,
    /// IPMI baseboard management controller watchdog
    Ipmi,
}

impl WatchdogType {
    pub const VALUES: [WatchdogType; 5] = [
        WatchdogType::Auto,
        WatchdogType::Best,
        WatchdogType::Tco,
        WatchdogType::Soft,
        WatchdogType::Ipmi,
    ];

    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

impl FromStr for WatchdogType {
    type Err = WatchdogConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        WatchdogType::VALUES
            .into_iter()
            .find(|watchdog_type| watchdog_type.as_str() == value)
            .ok_or_else(|| {
                WatchdogConfigError::unsupported(format!(
                    "unrecognized watchdog type {value:?}, expected one of auto, best, tco, soft or ipmi"
                ))
            })
    }
}

impl TryFrom<String> for WatchdogType {
    type Error = WatchdogConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
