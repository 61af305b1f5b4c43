use camino::Utf8PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum FactsError {
    #[error("Failed to read {path}")]
    ReadFailed {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No '{field}' entry found in {path}")]
    MissingField {
        path: Utf8PathBuf,
        field: &'static str,
    },

    #[error("Invalid '{field}' entry in {path}: {value:?}")]
    InvalidField {
        path: Utf8PathBuf,
        field: &'static str,
        value: String,
    },

    #[error("Cannot query the memory page size: {reason}")]
    PageSizeUnavailable { reason: String },

    #[error("Toml syntax error in the host facts file '{path}': {reason}")]
    InvalidFactsFile { path: Utf8PathBuf, reason: String },
}
