use std::collections::HashMap;

use serde::Deserialize;

mod commands;
mod log_level;

pub use self::commands::*;
pub use self::log_level::*;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::fs;

pub const SYSTEM_CONFIG_FILE: &str = "system.toml";

#[derive(thiserror::Error, Debug)]
pub enum SystemTomlError {
    #[error("Toml syntax error in the system config file '{path}': {reason}")]
    InvalidSyntax { path: Utf8PathBuf, reason: String },

    #[error("Invalid log level: {name:?}, supported levels are info, warn, error and debug")]
    InvalidLogLevel { name: String },
}

/// The content of `system.toml`.
///
/// Every section is optional and defaults to the commands of a Debian-like systemd host.
#[derive(Deserialize, Debug, Default, Eq, PartialEq)]
pub struct SystemConfig {
    #[serde(default)]
    pub init: InitConfig,
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub modules: ModulesConfig,
    #[serde(default)]
    pub system: SystemSpecificCommands,
    #[serde(default)]
    pub log: HashMap<String, String>,
}

impl SystemConfig {
    /// Read `system.toml` from the configuration directory, using the defaults if the file is missing.
    pub fn try_new(config_root: &Utf8Path) -> Result<Self, SystemTomlError> {
        let config_path = config_root.join(SYSTEM_CONFIG_FILE);

        match fs::read_to_string(&config_path) {
            Ok(contents) => {
                toml::from_str(contents.as_str()).map_err(|e| SystemTomlError::InvalidSyntax {
                    path: config_path,
                    reason: e.message().to_string(),
                })
            }
            Err(err) => {
                tracing::debug!("Using the default system commands, {config_path}: {err}");
                Ok(Self::default())
            }
        }
    }
}
