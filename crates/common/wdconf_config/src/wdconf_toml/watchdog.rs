use camino::Utf8PathBuf;
use serde::Deserialize;
use wdconf_api::FileChangeWatch;
use wdconf_api::LoadAverages;
use wdconf_api::MonitoringThresholds;
use wdconf_api::RepairCommand;
use wdconf_api::WatchdogConfigError;
use wdconf_api::WatchdogType;
use wdconf_api::DEFAULT_WATCHDOG_TIMEOUT_SECONDS;

/// `[watchdog]`: the driver to use and the conditions under which the host is rebooted.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WatchdogSection {
    #[serde(rename = "type")]
    pub watchdog_type: WatchdogType,

    pub load_per_core_1m: Option<u32>,
    pub load_per_core_5m: Option<u32>,
    pub load_per_core_15m: Option<u32>,

    pub min_memory_percent: Option<u8>,

    pub file_change: Vec<FileChangeEntry>,

    pub watchdog_timeout: u32,

    pub repair_binary: Option<Utf8PathBuf>,
    pub repair_timeout: Option<u32>,
    pub repair_maximum: Option<u32>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FileChangeEntry {
    pub path: Utf8PathBuf,
    pub max_unchanged_seconds: u32,
}

impl Default for WatchdogSection {
    fn default() -> Self {
        WatchdogSection {
            watchdog_type: WatchdogType::default(),
            load_per_core_1m: None,
            load_per_core_5m: None,
            load_per_core_15m: None,
            min_memory_percent: None,
            file_change: Vec::new(),
            watchdog_timeout: DEFAULT_WATCHDOG_TIMEOUT_SECONDS,
            repair_binary: None,
            repair_timeout: None,
            repair_maximum: None,
        }
    }
}

impl WatchdogSection {
    /// The validated thresholds described by this section.
    pub fn thresholds(&self) -> Result<MonitoringThresholds, WatchdogConfigError> {
        let repair = match (&self.repair_binary, self.repair_timeout, self.repair_maximum) {
            (Some(binary), timeout_seconds, maximum_attempts) => Some(RepairCommand {
                binary: binary.clone(),
                timeout_seconds,
                maximum_attempts,
            }),
            (None, None, None) => None,
            (None, _, _) => {
                return Err(WatchdogConfigError::InvalidInput(
                    "repair_timeout and repair_maximum require a repair_binary".to_string(),
                ))
            }
        };

        let thresholds = MonitoringThresholds {
            load_per_core: LoadAverages {
                one_minute: self.load_per_core_1m,
                five_minutes: self.load_per_core_5m,
                fifteen_minutes: self.load_per_core_15m,
            },
            min_memory_percent: self.min_memory_percent,
            file_changes: self
                .file_change
                .iter()
                .map(|entry| FileChangeWatch {
                    path: entry.path.clone(),
                    max_unchanged_seconds: entry.max_unchanged_seconds,
                })
                .collect(),
            watchdog_timeout_seconds: self.watchdog_timeout,
            repair,
        };

        thresholds.validate()?;
        Ok(thresholds)
    }
}
