use crate::SystemServiceError;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::fmt;
use std::process::ExitStatus;
use std::process::Stdio;
use wdconf_config::NAME_PLACEHOLDER;

/// A command line read from `system.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCommand {
    exec: String,
    args: Vec<String>,
}

impl ExecCommand {
    /// Split a configured command line into the executable and its arguments.
    ///
    /// `cmd` names the setting in error messages.
    pub fn try_new(
        config: &[String],
        cmd: impl fmt::Display,
        config_path: &Utf8Path,
    ) -> Result<Self, SystemServiceError> {
        match config.split_first() {
            Some((exec, args)) => Ok(Self {
                exec: exec.to_string(),
                args: args.to_vec(),
            }),
            None => Err(SystemServiceError::SystemConfigInvalidSyntax {
                reason: "Requires 1 or more arguments.".to_string(),
                cmd: cmd.to_string(),
                path: config_path.to_owned(),
            }),
        }
    }

    /// Same as [ExecCommand::try_new], replacing every `{}` argument with `name`.
    pub fn try_new_with_placeholder(
        config: &[String],
        cmd: impl fmt::Display,
        config_path: &Utf8Path,
        name: &str,
    ) -> Result<Self, SystemServiceError> {
        let replaced = replace_placeholder(config, &cmd, config_path, name)?;
        Self::try_new(&replaced, cmd, config_path)
    }

    fn to_command(&self) -> std::process::Command {
        let mut cmd = std::process::Command::new(&self.exec);
        cmd.args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run the command to completion.
    ///
    /// `config_path` is the file to fix when the executable is not found.
    pub fn run(&self, config_path: &Utf8Path) -> Result<CommandExitStatus, SystemServiceError> {
        match self.to_command().output() {
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                if !output.status.success() {
                    tracing::debug!("{self} exited with {}: {stderr}", output.status);
                }
                Ok(CommandExitStatus {
                    status: output.status,
                    command: self.to_string(),
                    stderr,
                })
            }
            Err(err) => {
                tracing::debug!("Cannot run {self}: {err}");
                Err(SystemServiceError::CommandNotFound {
                    command: self.to_string(),
                    path: config_path.to_owned(),
                })
            }
        }
    }
}

impl fmt::Display for ExecCommand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "{}", self.exec)
        } else {
            write!(f, "{} {}", self.exec, self.args.join(" "))
        }
    }
}

fn replace_placeholder(
    input_args: &[String],
    cmd: &impl fmt::Display,
    config_path: &Utf8Path,
    name: &str,
) -> Result<Vec<String>, SystemServiceError> {
    if !input_args.iter().any(|s| s == NAME_PLACEHOLDER) {
        return Err(SystemServiceError::SystemConfigInvalidSyntax {
            reason: format!("A placeholder '{NAME_PLACEHOLDER}' is missing."),
            cmd: cmd.to_string(),
            path: Utf8PathBuf::from(config_path),
        });
    }

    Ok(input_args
        .iter()
        .map(|arg| {
            if arg == NAME_PLACEHOLDER {
                name.to_string()
            } else {
                arg.clone()
            }
        })
        .collect())
}

#[derive(Debug)]
pub struct CommandExitStatus {
    status: ExitStatus,
    command: String,
    stderr: String,
}

impl CommandExitStatus {
    pub fn must_succeed(self) -> Result<(), SystemServiceError> {
        if self.status.success() {
            Ok(())
        } else {
            match self.status.code() {
                Some(code) => Err(SystemServiceError::CommandFailedWithCode {
                    command: self.command,
                    code,
                    stderr: self.stderr,
                }),
                None => Err(SystemServiceError::CommandFailedBySignal {
                    command: self.command,
                }),
            }
        }
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }
}
