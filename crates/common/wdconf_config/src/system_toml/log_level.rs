use super::SystemConfig;
use super::SystemTomlError;
use crate::cli::LogConfigArgs;
use camino::Utf8Path;
use std::io::IsTerminal;
use std::str::FromStr;
use tracing_subscriber::util::SubscriberInitExt;

#[macro_export]
/// The basic subscriber
macro_rules! subscriber_builder {
    () => {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal() && yansi::Condition::no_color())
            .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
    };
}

const DEFAULT_MAX_LEVEL: tracing::Level = tracing::Level::INFO;

/// Configures and enables logging taking into account flags, env variables and file config.
///
/// 1. `--log-level` or `--debug` flags win
/// 2. then the `RUST_LOG` variable
/// 3. then the level set for `sname` in the `[log]` section of `system.toml`
/// 4. INFO otherwise
///
/// An invalid level in `system.toml` is an error, so the user notices the typo.
pub fn log_init(
    sname: &str,
    flags: &LogConfigArgs,
    config_dir: &Utf8Path,
) -> Result<(), SystemTomlError> {
    let subscriber = subscriber_builder!();

    let log_level = flags
        .log_level
        .or(flags.debug.then_some(tracing::Level::DEBUG));

    if let Some(log_level) = log_level {
        subscriber.with_max_level(log_level).finish().try_init().ok();
        return Ok(());
    }

    if std::env::var("RUST_LOG").is_ok() {
        subscriber
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_file(true)
            .with_line_number(true)
            .finish()
            .try_init()
            .ok();
        return Ok(());
    }

    let log_level = get_log_level_from_config_file(sname, config_dir)?.unwrap_or(DEFAULT_MAX_LEVEL);
    subscriber.with_max_level(log_level).finish().try_init().ok();
    Ok(())
}

/// Return the log level for a given binary, if it's defined in the config file. Otherwise return `None`.
pub fn get_log_level_from_config_file(
    sname: &str,
    config_dir: &Utf8Path,
) -> Result<Option<tracing::Level>, SystemTomlError> {
    let loglevel = SystemConfig::try_new(config_dir)?.log;
    match loglevel.get(sname) {
        Some(ll) => {
            let ll = tracing::Level::from_str(&ll.to_uppercase()).map_err(|_| {
                SystemTomlError::InvalidLogLevel {
                    name: ll.to_string(),
                }
            })?;
            Ok(Some(ll))
        }
        None => Ok(None),
    }
}
