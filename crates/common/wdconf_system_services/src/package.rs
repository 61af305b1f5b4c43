use crate::ExecCommand;
use crate::SystemServiceError;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::fmt::Debug;
use wdconf_config::PackageConfig;
use wdconf_config::SystemConfig;
use wdconf_config::SystemTomlError;
use wdconf_config::SYSTEM_CONFIG_FILE;

/// Abstraction over the package manager of the host.
pub trait PackageManager: Debug {
    fn is_installed(&self, package: &str) -> Result<bool, SystemServiceError>;

    fn install(&self, package: &str) -> Result<(), SystemServiceError>;

    /// Install the package unless already installed.
    ///
    /// Returns true if the package has been installed by this call.
    fn ensure_installed(&self, package: &str) -> Result<bool, SystemServiceError> {
        if self.is_installed(package)? {
            tracing::debug!("Package {package} is already installed");
            return Ok(false);
        }
        self.install(package)?;
        Ok(true)
    }
}

/// A package manager running the `[package]` commands of `system.toml`.
#[derive(Debug)]
pub struct GeneralPackageManager {
    config: PackageConfig,
    config_path: Utf8PathBuf,
}

impl GeneralPackageManager {
    pub fn try_new(config_root: &Utf8Path) -> Result<Self, SystemTomlError> {
        Ok(GeneralPackageManager {
            config: SystemConfig::try_new(config_root)?.package,
            config_path: config_root.join(SYSTEM_CONFIG_FILE),
        })
    }
}

impl PackageManager for GeneralPackageManager {
    fn is_installed(&self, package: &str) -> Result<bool, SystemServiceError> {
        let command = ExecCommand::try_new_with_placeholder(
            &self.config.is_installed,
            "is_installed",
            &self.config_path,
            package,
        )?;
        tracing::debug!("Running {command}");
        Ok(command.run(&self.config_path)?.success())
    }

    fn install(&self, package: &str) -> Result<(), SystemServiceError> {
        let command = ExecCommand::try_new_with_placeholder(
            &self.config.install,
            "install",
            &self.config_path,
            package,
        )?;
        tracing::info!("Installing {package} with {command}");
        command.run(&self.config_path)?.must_succeed()
    }
}
