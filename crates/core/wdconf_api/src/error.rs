/// Errors raised while computing a watchdog configuration.
///
/// Both kinds are fatal: a configuration run stops before touching the host.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WatchdogConfigError {
    /// The requested watchdog type cannot be used on this host.
    #[error("Unsupported watchdog configuration: {0}")]
    UnsupportedConfiguration(String),

    /// A numeric or path input is out of range.
    #[error("Invalid watchdog input: {0}")]
    InvalidInput(String),
}

impl WatchdogConfigError {
    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::UnsupportedConfiguration(reason.into())
    }

    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }
}
