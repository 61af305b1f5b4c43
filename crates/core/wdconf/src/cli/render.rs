use super::FactsArgs;
use super::WatchdogPlan;
use crate::command::BuildCommand;
use crate::command::BuildContext;
use crate::command::Command;
use crate::error::WdconfError;
use crate::render::FileContent;
use crate::ConfigError;
use camino::Utf8PathBuf;
use wdconf_config::WdconfConfig;
use wdconf_utils::fs::remove_file_if_exists;
use wdconf_utils::fs::write_file_if_changed;

#[derive(clap::Args, Debug)]
pub struct RenderCmd {
    /// Directory standing for `/` on the target host
    #[clap(long, value_name = "DIR")]
    root: Utf8PathBuf,

    #[command(flatten)]
    facts: FactsArgs,
}

impl BuildCommand for RenderCmd {
    fn build_command(self, context: &BuildContext) -> Result<Box<dyn Command>, ConfigError> {
        let config = WdconfConfig::load(&context.config_dir)?;
        Ok(RenderCommand {
            root: self.root,
            facts: self.facts,
            config,
        }
        .into_boxed())
    }
}

/// Write the configuration files below a root directory, with no other effect on the host
pub struct RenderCommand {
    root: Utf8PathBuf,
    facts: FactsArgs,
    config: WdconfConfig,
}

impl Command for RenderCommand {
    fn description(&self) -> String {
        format!("render the watchdog configuration below {}", self.root)
    }

    fn execute(&self) -> anyhow::Result<()> {
        let facts = self.facts.host_facts(&self.config.facts)?;
        let plan = WatchdogPlan::new(&self.config, facts)?;

        for file in plan.files.relocate(&self.root).files() {
            let to_io_error = |source| WdconfError::FromIo {
                path: file.path.clone(),
                source,
            };
            match &file.content {
                FileContent::Write(content) => {
                    let update = write_file_if_changed(&file.path, content).map_err(to_io_error)?;
                    if update.is_changed() {
                        println!("{}", file.path);
                    }
                }
                FileContent::Remove => {
                    if remove_file_if_exists(&file.path).map_err(to_io_error)? {
                        println!("{} (removed)", file.path);
                    }
                }
            }
        }
        Ok(())
    }
}
