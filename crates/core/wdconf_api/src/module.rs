use serde::Serialize;

/// Linux kernel watchdog drivers this tool can select.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, strum_macros::Display, strum_macros::IntoStaticStr,
)]
#[serde(into = "&'static str")]
pub enum KernelModule {
    /// IPMI baseboard management controller watchdog
    #[strum(serialize = "ipmi_watchdog")]
    IpmiWatchdog,
    /// Intel TCO timer
    #[strum(serialize = "iTCO_wdt")]
    IntelTco,
    /// Software watchdog
    #[strum(serialize = "softdog")]
    Softdog,
}

impl KernelModule {
    /// The module name as given to `modprobe`.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(KernelModule::IpmiWatchdog, "ipmi_watchdog")]
    #[test_case(KernelModule::IntelTco, "iTCO_wdt")]
    #[test_case(KernelModule::Softdog, "softdog")]
    fn module_names(module: KernelModule, name: &str) {
        assert_eq!(module.name(), name);
        assert_eq!(module.to_string(), name);
    }
}
