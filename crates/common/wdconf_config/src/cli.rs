use crate::DEFAULT_CONFIG_DIR;
use camino::Utf8PathBuf;

/// Arguments shared by all the `wdconf` sub-commands.
#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct CommonArgs {
    /// Directory holding `wdconf.toml` and `system.toml`
    #[clap(
        long = "config-dir",
        default_value = DEFAULT_CONFIG_DIR,
        env = "WDCONF_CONFIG_DIR",
        hide_env_values = true,
        hide_default_value = true,
        global = true
    )]
    pub config_dir: Utf8PathBuf,

    #[command(flatten)]
    pub log_args: LogConfigArgs,
}

#[derive(clap::Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogConfigArgs {
    /// Turn-on the DEBUG log level.
    ///
    /// If off only reports ERROR, WARN, and INFO, if on also reports DEBUG
    #[clap(long, global = true)]
    pub debug: bool,

    /// Configures the logging level.
    ///
    /// One of error/warn/info/debug/trace.
    /// Logs with verbosity lower or equal to the selected level will be printed,
    /// i.e. warn prints ERROR and WARN logs and trace prints logs of all levels.
    ///
    /// Overrides `--debug`
    #[clap(long, global = true)]
    pub log_level: Option<tracing::Level>,
}
