use crate::ConfigError;
use camino::Utf8PathBuf;

/// A trait to be implemented by all wdconf sub-commands.
///
/// A command is built from the command line arguments by [BuildCommand],
/// reading along the way the configuration files it depends on.
/// Its execution is then free of any parsing error.
pub trait Command {
    /// Display that command to the user, telling what will be done.
    ///
    /// This description is displayed to the end user in case of an error, to give the context of that error.
    fn description(&self) -> String;

    /// Execute this command.
    ///
    /// The errors of the lower layers are `thiserror` types,
    /// converted into an `anyhow::Error` with the `?` operator.
    fn execute(&self) -> anyhow::Result<()>;

    fn into_boxed(self) -> Box<dyn Command>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

pub trait BuildCommand {
    fn build_command(self, context: &BuildContext) -> Result<Box<dyn Command>, ConfigError>;
}

#[derive(Debug, Clone)]
pub struct BuildContext {
    pub config_dir: Utf8PathBuf,
}
