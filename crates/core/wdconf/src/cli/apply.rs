use super::FactsArgs;
use super::WatchdogPlan;
use crate::apply::ApplyReport;
use crate::apply::HostApplier;
use crate::apply::ServiceAction;
use crate::command::BuildCommand;
use crate::command::BuildContext;
use crate::command::Command;
use crate::ConfigError;
use wdconf_config::WdconfConfig;
use wdconf_system_services::GeneralModuleLoader;
use wdconf_system_services::GeneralPackageManager;
use wdconf_system_services::GeneralServiceManager;
use wdconf_system_services::SystemServiceManager;
use yansi::Paint as _;

#[derive(clap::Args, Debug)]
pub struct ApplyCmd {
    /// Do not install the watchdog package, assuming it is already there
    #[clap(long)]
    skip_package: bool,

    #[command(flatten)]
    facts: FactsArgs,
}

impl BuildCommand for ApplyCmd {
    fn build_command(self, context: &BuildContext) -> Result<Box<dyn Command>, ConfigError> {
        let config = WdconfConfig::load(&context.config_dir)?;
        Ok(ApplyCommand {
            install_package: !self.skip_package,
            facts: self.facts,
            config,
            service_manager: GeneralServiceManager::try_new(&context.config_dir)?,
            package_manager: GeneralPackageManager::try_new(&context.config_dir)?,
            module_loader: GeneralModuleLoader::try_new(&context.config_dir)?,
        }
        .into_boxed())
    }
}

/// Configure the watchdog of this host
pub struct ApplyCommand {
    install_package: bool,
    facts: FactsArgs,
    config: WdconfConfig,
    service_manager: GeneralServiceManager,
    package_manager: GeneralPackageManager,
    module_loader: GeneralModuleLoader,
}

impl Command for ApplyCommand {
    fn description(&self) -> String {
        format!(
            "apply a {} watchdog configuration",
            self.config.watchdog_type
        )
    }

    fn execute(&self) -> anyhow::Result<()> {
        self.service_manager.check_operational()?;

        let facts = self.facts.host_facts(&self.config.facts)?;
        let plan = WatchdogPlan::new(&self.config, facts)?;

        let applier = HostApplier {
            service_manager: &self.service_manager,
            package_manager: &self.package_manager,
            module_loader: &self.module_loader,
        };
        let report = applier.apply(
            plan.configuration.decision,
            &plan.files,
            &self.config.service,
            self.install_package,
        )?;

        self.print_report(&report);
        Ok(())
    }
}

impl ApplyCommand {
    fn print_report(&self, report: &ApplyReport) {
        let service = &self.config.service;
        if report.package_installed {
            println!("Installed {}", service.package);
        }
        for path in &report.changed_files {
            println!("Updated {path}");
        }
        match report.service {
            ServiceAction::Started => println!("{} {}", "Started".green(), service.name),
            ServiceAction::Restarted => println!("{} {}", "Restarted".green(), service.name),
            ServiceAction::Unchanged => println!("{} is up to date", service.name),
        }
    }
}
