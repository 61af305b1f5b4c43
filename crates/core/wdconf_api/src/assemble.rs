use crate::min_free_pages;
use crate::select;
use crate::FileChangeWatch;
use crate::HostFacts;
use crate::LoadAverages;
use crate::MonitoringThresholds;
use crate::RepairCommand;
use crate::WatchdogConfigError;
use crate::WatchdogDecision;
use crate::WatchdogType;
use serde::Serialize;

/// Everything needed to configure the kernel driver and the watchdog daemon of a host.
///
/// Field order matters for the TOML output: plain values first, then tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchdogConfiguration {
    pub watchdog_type: WatchdogType,

    pub watchdog_timeout_seconds: u32,

    /// Minimum number of free memory pages, `None` when memory is not monitored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_free_pages: Option<u64>,

    pub decision: WatchdogDecision,

    pub load_per_core: LoadAverages,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repair: Option<RepairCommand>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file_changes: Vec<FileChangeWatch>,
}

/// Build the watchdog configuration of a host.
///
/// Fails when the host reports no processor, or when the driver selection
/// or the memory conversion fails.
pub fn assemble(
    watchdog_type: WatchdogType,
    facts: &HostFacts,
    thresholds: &MonitoringThresholds,
) -> Result<WatchdogConfiguration, WatchdogConfigError> {
    if facts.processor_count == 0 {
        return Err(WatchdogConfigError::invalid(
            "the processor count must be at least 1",
        ));
    }

    let decision = select(watchdog_type, facts)?;
    let min_free_pages = min_free_pages(
        facts.total_memory_bytes,
        facts.page_size_bytes,
        thresholds.min_memory_percent,
    )?;

    Ok(WatchdogConfiguration {
        watchdog_type,
        watchdog_timeout_seconds: thresholds.watchdog_timeout_seconds,
        min_free_pages,
        decision,
        load_per_core: thresholds.load_per_core,
        repair: thresholds.repair.clone(),
        file_changes: thresholds.file_changes.clone(),
    })
}
