use camino::Utf8PathBuf;

#[derive(thiserror::Error, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum WdconfError {
    #[error("TOML serialization error")]
    FromInvalidToml(#[from] toml::ser::Error),

    #[error("Failed to update {path}")]
    FromIo {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    FromWdconfConfig(#[from] wdconf_config::WdconfConfigError),

    #[error(transparent)]
    FromSystemToml(#[from] wdconf_config::SystemTomlError),

    #[error(transparent)]
    FromFacts(#[from] host_facts::FactsError),

    #[error(transparent)]
    FromWatchdogConfig(#[from] wdconf_api::WatchdogConfigError),

    #[error(transparent)]
    FromSystemServiceError(#[from] wdconf_system_services::SystemServiceError),
}
