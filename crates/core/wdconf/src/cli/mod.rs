use crate::command::BuildCommand;
use crate::command::BuildContext;
use crate::command::Command;
use wdconf_config::cli::CommonArgs;

mod apply;
mod common;
mod facts;
mod plan;
mod render;

pub use self::common::*;

#[derive(clap::Parser, Debug)]
#[clap(
    name = clap::crate_name!(),
    version = clap::crate_version!(),
    about = clap::crate_description!(),
    arg_required_else_help(true)
)]
pub struct WdconfCli {
    #[command(flatten)]
    pub common: CommonArgs,

    #[clap(subcommand)]
    pub cmd: WdconfOpt,
}

#[derive(clap::Subcommand, Debug)]
pub enum WdconfOpt {
    /// Print the host facts the watchdog configuration depends on
    Facts(facts::FactsCmd),

    /// Print the watchdog configuration and the files it is made of, without touching the host
    Plan(plan::PlanCmd),

    /// Write the watchdog configuration files below another root directory
    Render(render::RenderCmd),

    /// Configure the kernel watchdog driver and the watchdog daemon of this host
    Apply(apply::ApplyCmd),
}

impl BuildCommand for WdconfOpt {
    fn build_command(self, context: &BuildContext) -> Result<Box<dyn Command>, crate::ConfigError> {
        match self {
            WdconfOpt::Facts(opt) => opt.build_command(context),
            WdconfOpt::Plan(opt) => opt.build_command(context),
            WdconfOpt::Render(opt) => opt.build_command(context),
            WdconfOpt::Apply(opt) => opt.build_command(context),
        }
    }
}
