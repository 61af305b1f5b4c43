use camino::Utf8PathBuf;
use wdconf_api::WatchdogConfigError;

#[derive(thiserror::Error, Debug)]
pub enum WdconfConfigError {
    #[error("Failed to read the configuration from {path}")]
    Figment {
        path: Utf8PathBuf,
        #[source]
        source: Box<figment::Error>,
    },

    #[error("Invalid [watchdog] settings in {path}")]
    InvalidWatchdogSettings {
        path: Utf8PathBuf,
        #[source]
        source: WatchdogConfigError,
    },
}
