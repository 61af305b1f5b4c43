use camino::Utf8PathBuf;
use wdconf_config::SystemTomlError;

#[derive(thiserror::Error, Debug)]
pub enum SystemServiceError {
    #[error("Command <{command:?}> failed with code: {code:?}.{}", stderr_suffix(.stderr))]
    CommandFailedWithCode {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Command <{command:?}> terminated by a signal.")]
    CommandFailedBySignal { command: String },

    #[error(
        "Command <{command:?}> not found.\n\
    Check '{path}' file."
    )]
    CommandNotFound { command: String, path: Utf8PathBuf },

    #[error("Failed to execute '{cmd}' to check the service manager availability.\n\
     Service manager '{name}' is not available on the system or elevated permissions have not been granted.")]
    ServiceManagerUnavailable { cmd: String, name: String },

    #[error(
        "Syntax error in the system config file for '{cmd}': {reason}\n\
    Check '{path}' file."
    )]
    SystemConfigInvalidSyntax {
        reason: String,
        cmd: String,
        path: Utf8PathBuf,
    },

    #[error(transparent)]
    SystemConfig(#[from] SystemTomlError),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{stderr}")
    }
}
