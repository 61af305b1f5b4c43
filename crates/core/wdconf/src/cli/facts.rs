use super::FactsArgs;
use crate::command::BuildCommand;
use crate::command::BuildContext;
use crate::command::Command;
use crate::ConfigError;
use host_facts::FactOverrides;
use wdconf_config::WdconfConfig;

#[derive(clap::Args, Debug)]
pub struct FactsCmd {
    #[command(flatten)]
    facts: FactsArgs,
}

impl BuildCommand for FactsCmd {
    fn build_command(self, context: &BuildContext) -> Result<Box<dyn Command>, ConfigError> {
        let config = WdconfConfig::load(&context.config_dir)?;
        Ok(FactsCommand {
            facts: self.facts,
            overrides: config.facts,
        }
        .into_boxed())
    }
}

/// Print the host facts, overrides included, as TOML
pub struct FactsCommand {
    facts: FactsArgs,
    overrides: FactOverrides,
}

impl Command for FactsCommand {
    fn description(&self) -> String {
        "gather the host facts".into()
    }

    fn execute(&self) -> anyhow::Result<()> {
        let facts = self.facts.host_facts(&self.overrides)?;
        print!("{}", toml::to_string(&facts)?);
        Ok(())
    }
}
