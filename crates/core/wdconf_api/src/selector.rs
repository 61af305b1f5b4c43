use crate::HostFacts;
use crate::KernelModule;
use crate::WatchdogConfigError;
use crate::WatchdogType;
use serde::Serialize;

/// Which kernel watchdog driver to load, and whether the Intel TCO driver must be kept away.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct WatchdogDecision {
    /// The driver to load, `None` when the kernel driver configuration is left untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<KernelModule>,

    /// Prevent the kernel from binding `iTCO_wdt` to `/dev/watchdog`
    pub blacklist_intel_tco: bool,
}

impl WatchdogDecision {
    /// Leave the kernel driver configuration untouched.
    pub const NO_ACTION: WatchdogDecision = WatchdogDecision {
        module: None,
        blacklist_intel_tco: false,
    };

    const fn load(module: KernelModule, blacklist_intel_tco: bool) -> Self {
        WatchdogDecision {
            module: Some(module),
            blacklist_intel_tco,
        }
    }
}

/// Select the kernel watchdog driver for the requested watchdog type on the given host.
///
/// Hardware watchdogs are preferred: out-of-band IPMI over the in-band Intel TCO timer over `softdog`.
/// When IPMI is used on Intel hardware, `iTCO_wdt` is blacklisted
/// so the kernel doesn't bind the wrong driver to `/dev/watchdog`.
pub fn select(
    watchdog_type: WatchdogType,
    facts: &HostFacts,
) -> Result<WatchdogDecision, WatchdogConfigError> {
    let intel = facts.is_intel();

    let decision = match watchdog_type {
        WatchdogType::Auto => WatchdogDecision::NO_ACTION,

        WatchdogType::Best if facts.has_ipmi_support => {
            WatchdogDecision::load(KernelModule::IpmiWatchdog, intel)
        }
        WatchdogType::Best if !facts.is_virtual && intel => {
            WatchdogDecision::load(KernelModule::IntelTco, false)
        }
        WatchdogType::Best => WatchdogDecision::load(KernelModule::Softdog, false),

        WatchdogType::Tco if facts.is_virtual => {
            return Err(WatchdogConfigError::unsupported(
                "TCO unsupported on virtual machines",
            ))
        }
        WatchdogType::Tco if !intel => {
            return Err(WatchdogConfigError::unsupported(
                "TCO unsupported on non-Intel CPU",
            ))
        }
        WatchdogType::Tco => WatchdogDecision::load(KernelModule::IntelTco, false),

        WatchdogType::Soft => {
            WatchdogDecision::load(KernelModule::Softdog, !facts.is_virtual && intel)
        }

        WatchdogType::Ipmi if !facts.has_ipmi_support => {
            return Err(WatchdogConfigError::unsupported(
                "IPMI unsupported on this host",
            ))
        }
        WatchdogType::Ipmi => WatchdogDecision::load(KernelModule::IpmiWatchdog, intel),
    };

    debug_assert!(
        !(decision.blacklist_intel_tco && decision.module == Some(KernelModule::IntelTco)),
        "iTCO_wdt cannot be both loaded and blacklisted"
    );

    Ok(decision)
}
