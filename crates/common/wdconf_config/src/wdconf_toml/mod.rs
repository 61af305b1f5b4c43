mod loader;
mod paths;
mod watchdog;

pub use self::loader::*;
pub use self::paths::*;
pub use self::watchdog::*;
use crate::WdconfConfigError;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use host_facts::FactOverrides;
use serde::Deserialize;
use wdconf_api::MonitoringThresholds;
use wdconf_api::WatchdogType;

pub const WDCONF_CONFIG_FILE: &str = "wdconf.toml";

/// The content of `wdconf.toml`, merged with the `WDCONF_` environment variables.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WdconfToml {
    pub watchdog: WatchdogSection,
    pub paths: PathsSection,
    pub service: ServiceSection,
    pub facts: FactOverrides,
}

/// The settings of a `wdconf` run, with validated thresholds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WdconfConfig {
    pub config_file: Utf8PathBuf,
    pub watchdog_type: WatchdogType,
    pub thresholds: MonitoringThresholds,
    pub paths: PathsSection,
    pub service: ServiceSection,
    pub facts: FactOverrides,
}

impl WdconfConfig {
    /// Load `wdconf.toml` from the configuration directory.
    ///
    /// Unknown settings are logged as warnings.
    pub fn load(config_dir: &Utf8Path) -> Result<Self, WdconfConfigError> {
        let config_file = config_dir.join(WDCONF_CONFIG_FILE);
        let (dto, warnings) = extract_data::<WdconfToml>(&config_file)?;
        warnings.emit();

        let thresholds = dto.watchdog.thresholds().map_err(|source| {
            WdconfConfigError::InvalidWatchdogSettings {
                path: config_file.clone(),
                source,
            }
        })?;

        Ok(WdconfConfig {
            config_file,
            watchdog_type: dto.watchdog.watchdog_type,
            thresholds,
            paths: dto.paths,
            service: dto.service,
            facts: dto.facts,
        })
    }
}
