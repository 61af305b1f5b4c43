use super::FactsArgs;
use super::WatchdogPlan;
use crate::command::BuildCommand;
use crate::command::BuildContext;
use crate::command::Command;
use crate::ConfigError;
use wdconf_config::WdconfConfig;
use yansi::Paint as _;

#[derive(clap::Args, Debug)]
pub struct PlanCmd {
    #[command(flatten)]
    facts: FactsArgs,
}

impl BuildCommand for PlanCmd {
    fn build_command(self, context: &BuildContext) -> Result<Box<dyn Command>, ConfigError> {
        let config = WdconfConfig::load(&context.config_dir)?;
        Ok(PlanCommand {
            facts: self.facts,
            config,
        }
        .into_boxed())
    }
}

/// Print what `apply` would do, without touching the host
pub struct PlanCommand {
    facts: FactsArgs,
    config: WdconfConfig,
}

impl Command for PlanCommand {
    fn description(&self) -> String {
        format!(
            "plan a {} watchdog configuration",
            self.config.watchdog_type
        )
    }

    fn execute(&self) -> anyhow::Result<()> {
        let facts = self.facts.host_facts(&self.config.facts)?;
        let plan = WatchdogPlan::new(&self.config, facts)?;

        println!("{}", "# Host facts".bold());
        println!("{}", toml::to_string(&plan.facts)?);
        println!("{}", "# Watchdog configuration".bold());
        println!("{}", toml::to_string(&plan.configuration)?);
        println!("{}", "# Files".bold());
        for file in plan.files.files() {
            print!("{file}");
        }
        Ok(())
    }
}
