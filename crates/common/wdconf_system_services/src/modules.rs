use crate::ExecCommand;
use crate::SystemServiceError;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::fmt::Debug;
use wdconf_api::KernelModule;
use wdconf_config::ModulesConfig;
use wdconf_config::SystemConfig;
use wdconf_config::SystemTomlError;
use wdconf_config::SYSTEM_CONFIG_FILE;

/// Abstraction over the kernel module loader.
pub trait KernelModuleLoader: Debug {
    fn load(&self, module: KernelModule) -> Result<(), SystemServiceError>;

    fn unload(&self, module: KernelModule) -> Result<(), SystemServiceError>;
}

/// A module loader running the `[modules]` commands of `system.toml`.
#[derive(Debug)]
pub struct GeneralModuleLoader {
    config: ModulesConfig,
    config_path: Utf8PathBuf,
}

impl GeneralModuleLoader {
    pub fn try_new(config_root: &Utf8Path) -> Result<Self, SystemTomlError> {
        Ok(GeneralModuleLoader {
            config: SystemConfig::try_new(config_root)?.modules,
            config_path: config_root.join(SYSTEM_CONFIG_FILE),
        })
    }

    fn run(
        &self,
        config: &[String],
        cmd: &str,
        module: KernelModule,
    ) -> Result<(), SystemServiceError> {
        let command =
            ExecCommand::try_new_with_placeholder(config, cmd, &self.config_path, module.name())?;
        tracing::info!("Running {command}");
        command.run(&self.config_path)?.must_succeed()
    }
}

impl KernelModuleLoader for GeneralModuleLoader {
    fn load(&self, module: KernelModule) -> Result<(), SystemServiceError> {
        self.run(&self.config.load, "load", module)
    }

    fn unload(&self, module: KernelModule) -> Result<(), SystemServiceError> {
        self.run(&self.config.unload, "unload", module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wdconf_test_utils::fs::TempConfigDir;

    #[test]
    fn load_and_unload() {
        let config_dir = TempConfigDir::new();
        config_dir.file(SYSTEM_CONFIG_FILE).with_raw_content(
            r#"
            [modules]
            load = ["true", "{}"]
            unload = ["false", "{}"]
        "#,
        );
        let loader = GeneralModuleLoader::try_new(config_dir.path()).unwrap();

        loader.load(KernelModule::Softdog).unwrap();
        assert_matches!(
            loader.unload(KernelModule::IntelTco),
            Err(SystemServiceError::CommandFailedWithCode { command, code: 1, .. }) if command == "false iTCO_wdt"
        );
    }

    #[test]
    fn default_commands_use_modprobe() {
        let config_dir = TempConfigDir::new();
        let loader = GeneralModuleLoader::try_new(config_dir.path()).unwrap();

        assert_eq!(loader.config.load, vec!["/sbin/modprobe", "{}"]);
        assert_eq!(loader.config.unload, vec!["/sbin/modprobe", "--remove", "{}"]);
    }
}
