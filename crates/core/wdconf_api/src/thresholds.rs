use crate::WatchdogConfigError;
use camino::Utf8PathBuf;
use serde::Serialize;

pub const DEFAULT_WATCHDOG_TIMEOUT_SECONDS: u32 = 300;

/// Maximum load averages, per logical processor.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadAverages {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_minute: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub five_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fifteen_minutes: Option<u32>,
}

impl LoadAverages {
    /// The thresholds paired with their averaging period in minutes.
    pub fn by_period(&self) -> [(u8, Option<u32>); 3] {
        [
            (1, self.one_minute),
            (5, self.five_minutes),
            (15, self.fifteen_minutes),
        ]
    }

    /// Scale the per-processor thresholds to the whole host.
    pub fn for_processors(&self, processor_count: u32) -> LoadAverages {
        let scale = |load: Option<u32>| load.map(|load| load.saturating_mul(processor_count));
        LoadAverages {
            one_minute: scale(self.one_minute),
            five_minutes: scale(self.five_minutes),
            fifteen_minutes: scale(self.fifteen_minutes),
        }
    }
}

/// Reboot if a file has not been modified for some time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChangeWatch {
    pub path: Utf8PathBuf,
    pub max_unchanged_seconds: u32,
}

/// A binary run by the daemon before rebooting, trying to fix the problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepairCommand {
    pub binary: Utf8PathBuf,

    /// `Some(0)` means no limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u32>,

    /// `Some(0)` means no limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_attempts: Option<u32>,
}

/// The user-provided conditions under which the watchdog daemon reboots the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoringThresholds {
    pub load_per_core: LoadAverages,
    pub min_memory_percent: Option<u8>,
    pub file_changes: Vec<FileChangeWatch>,
    pub watchdog_timeout_seconds: u32,
    pub repair: Option<RepairCommand>,
}

impl Default for MonitoringThresholds {
    fn default() -> Self {
        MonitoringThresholds {
            load_per_core: LoadAverages::default(),
            min_memory_percent: None,
            file_changes: Vec::new(),
            watchdog_timeout_seconds: DEFAULT_WATCHDOG_TIMEOUT_SECONDS,
            repair: None,
        }
    }
}

impl MonitoringThresholds {
    /// Check the ranges the daemon accepts.
    pub fn validate(&self) -> Result<(), WatchdogConfigError> {
        for (period, load) in self.load_per_core.by_period() {
            if load == Some(0) {
                return Err(WatchdogConfigError::invalid(format!(
                    "the {period} minute load average per core must be a positive integer"
                )));
            }
        }

        if let Some(percent @ 101..) = self.min_memory_percent {
            return Err(WatchdogConfigError::invalid(format!(
                "the minimum free memory must be a percentage between 0 and 100, not {percent}"
            )));
        }

        for watch in &self.file_changes {
            if !watch.path.is_absolute() {
                return Err(WatchdogConfigError::invalid(format!(
                    "the watched file {:?} must be an absolute path",
                    watch.path
                )));
            }
            if watch.max_unchanged_seconds == 0 {
                return Err(WatchdogConfigError::invalid(format!(
                    "the change interval of {:?} must be a positive number of seconds",
                    watch.path
                )));
            }
        }

        if self.watchdog_timeout_seconds == 0 {
            return Err(WatchdogConfigError::invalid(
                "the watchdog timeout must be a positive number of seconds",
            ));
        }

        if let Some(repair) = &self.repair {
            if !repair.binary.is_absolute() {
                return Err(WatchdogConfigError::invalid(format!(
                    "the repair binary {:?} must be an absolute path",
                    repair.binary
                )));
            }
        }

        Ok(())
    }
}
