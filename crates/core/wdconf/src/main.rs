#![forbid(unsafe_code)]
#![deny(clippy::mem_forget)]

use anyhow::Context;
use clap::Parser;
use wdconf::command::BuildCommand;
use wdconf::command::BuildContext;
use wdconf::WdconfCli;
use wdconf::BINARY_NAME;
use wdconf_config::log_init;

fn main() -> anyhow::Result<()> {
    let opt = WdconfCli::parse();
    yansi::whenever(yansi::Condition::TTY_AND_COLOR);
    log_init(BINARY_NAME, &opt.common.log_args, &opt.common.config_dir)?;

    let build_context = BuildContext {
        config_dir: opt.common.config_dir,
    };

    let cmd = opt
        .cmd
        .build_command(&build_context)
        .context("failed to read the configuration")?;

    cmd.execute()
        .with_context(|| format!("failed to {}", cmd.description()))
}
