use crate::CommandExitStatus;
use crate::ExecCommand;
use crate::SystemService;
use crate::SystemServiceError;
use crate::SystemServiceManager;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::fmt;
use wdconf_config::InitConfig;
use wdconf_config::SystemConfig;
use wdconf_config::SystemTomlError;
use wdconf_config::SYSTEM_CONFIG_FILE;

/// A service manager running the `[init]` commands of `system.toml`.
#[derive(Debug)]
pub struct GeneralServiceManager {
    init_config: InitConfig,
    reload_manager: Vec<String>,
    config_path: Utf8PathBuf,
}

impl GeneralServiceManager {
    pub fn try_new(config_root: &Utf8Path) -> Result<Self, SystemTomlError> {
        let system_config = SystemConfig::try_new(config_root)?;
        let config_path = config_root.join(SYSTEM_CONFIG_FILE);

        Ok(Self {
            init_config: system_config.init,
            reload_manager: system_config.system.reload_manager,
            config_path,
        })
    }

    fn run(&self, command: ServiceCommand<'_>) -> Result<CommandExitStatus, SystemServiceError> {
        let exec_command = command.try_exec_command(self)?;
        tracing::debug!("Running {exec_command}");
        exec_command.run(&self.config_path)
    }
}

impl SystemServiceManager for GeneralServiceManager {
    fn name(&self) -> &str {
        &self.init_config.name
    }

    fn check_operational(&self) -> Result<(), SystemServiceError> {
        let exec_command = ServiceCommand::CheckManager.try_exec_command(self)?;

        match exec_command.run(&self.config_path) {
            Ok(status) if status.success() => Ok(()),
            _ => Err(SystemServiceError::ServiceManagerUnavailable {
                cmd: exec_command.to_string(),
                name: self.name().to_string(),
            }),
        }
    }

    fn start_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
        tracing::info!("Starting {service}");
        self.run(ServiceCommand::Start(service))?.must_succeed()
    }

    fn restart_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
        tracing::info!("Restarting {service}");
        self.run(ServiceCommand::Restart(service))?.must_succeed()
    }

    fn enable_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
        tracing::info!("Enabling {service}");
        self.run(ServiceCommand::Enable(service))?.must_succeed()
    }

    fn is_service_running(&self, service: SystemService<'_>) -> Result<bool, SystemServiceError> {
        self.run(ServiceCommand::IsActive(service))
            .map(|status| status.success())
    }

    fn reload_manager(&self) -> Result<(), SystemServiceError> {
        if self.reload_manager.is_empty() {
            tracing::debug!("No reload_manager command configured, skipping the {} reload", self.name());
            return Ok(());
        }
        tracing::info!("Reloading {}", self.name());
        self.run(ServiceCommand::ReloadManager)?.must_succeed()
    }
}

#[derive(Debug, Copy, Clone)]
enum ServiceCommand<'a> {
    CheckManager,
    ReloadManager,
    Start(SystemService<'a>),
    Restart(SystemService<'a>),
    Enable(SystemService<'a>),
    IsActive(SystemService<'a>),
}

impl ServiceCommand<'_> {
    fn try_exec_command(
        self,
        service_manager: &GeneralServiceManager,
    ) -> Result<ExecCommand, SystemServiceError> {
        let config_path = &service_manager.config_path;
        let init = &service_manager.init_config;
        match self {
            Self::CheckManager => ExecCommand::try_new(&init.is_available, self, config_path),
            Self::ReloadManager => {
                ExecCommand::try_new(&service_manager.reload_manager, self, config_path)
            }
            Self::Start(service) => {
                ExecCommand::try_new_with_placeholder(&init.start, self, config_path, service.name)
            }
            Self::Restart(service) => ExecCommand::try_new_with_placeholder(
                &init.restart,
                self,
                config_path,
                service.name,
            ),
            Self::Enable(service) => {
                ExecCommand::try_new_with_placeholder(&init.enable, self, config_path, service.name)
            }
            Self::IsActive(service) => ExecCommand::try_new_with_placeholder(
                &init.is_active,
                self,
                config_path,
                service.name,
            ),
        }
    }
}

impl fmt::Display for ServiceCommand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::CheckManager => write!(f, "is_available"),
            Self::ReloadManager => write!(f, "reload_manager"),
            Self::Start(_service) => write!(f, "start"),
            Self::Restart(_service) => write!(f, "restart"),
            Self::Enable(_service) => write!(f, "enable"),
            Self::IsActive(_service) => write!(f, "is_active"),
        }
    }
}
