use std::fmt::Display;

use camino::Utf8Path;
use camino::Utf8PathBuf;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Toml;
use figment::Figment;
use figment::Metadata;
use serde::de::DeserializeOwned;

use crate::WdconfConfigError;

const ENV_PREFIX: &str = "WDCONF_";
const ENV_SEPARATOR: &str = "__";

/// Variables with the configuration prefix that are not configuration settings
const IGNORED_VARIABLES: &[&str] = &["CONFIG_DIR"];

#[derive(Default, Debug, PartialEq, Eq)]
#[must_use]
pub struct UnusedValueWarnings(Vec<String>);

impl UnusedValueWarnings {
    pub fn emit(self) {
        for warning in self.0 {
            tracing::warn!("{warning}");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Extract the configuration from the TOML file and the `WDCONF_` prefixed environment variables.
///
/// Nested keys are separated by a double underscore: `WDCONF_WATCHDOG__TYPE=soft`.
/// A missing file is not an error.
pub fn extract_data<T: DeserializeOwned>(
    path: &Utf8Path,
) -> Result<(T, UnusedValueWarnings), WdconfConfigError> {
    let figment = Figment::new()
        .merge(Toml::file(path.as_std_path()))
        .merge(env_provider());

    let data = figment
        .extract()
        .map_err(|error| WdconfConfigError::Figment {
            path: path.to_owned(),
            source: Box::new(error),
        });

    let warnings = unused_value_warnings::<T>(&figment)
        .map(UnusedValueWarnings)
        .unwrap_or_default();

    match data {
        Ok(data) => Ok((data, warnings)),
        Err(e) => {
            warnings.emit();
            Err(e)
        }
    }
}

fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .ignore(IGNORED_VARIABLES)
        .split(ENV_SEPARATOR)
}

fn unused_value_warnings<T: DeserializeOwned>(figment: &Figment) -> Option<Vec<String>> {
    let mut warnings = Vec::new();

    let value: figment::value::Value = figment.extract().ok()?;

    let _: T = serde_ignored::deserialize(&value, |path| {
        let serde_path = path.to_string();

        let source = figment
            .find_metadata(&serde_path)
            .map(|metadata| ConfigurationSource::infer(&serde_path, metadata));

        match source {
            Some(source) => warnings.push(format!(
                "Unknown configuration field {serde_path:?} from {source}"
            )),
            None => warnings.push(format!("Unknown configuration field {serde_path:?}")),
        }
    })
    .ok()?;

    Some(warnings)
}

enum ConfigurationSource {
    TomlFile(Utf8PathBuf),
    EnvVariable(String),
    Unknown(String),
}

impl ConfigurationSource {
    fn infer(path: &str, m: &Metadata) -> Self {
        m.source
            .as_ref()
            .and_then(|source| source.file_path())
            .and_then(Utf8Path::from_path)
            .map(|file| Self::TomlFile(file.to_owned()))
            .or_else(|| variable_name(path).map(Self::EnvVariable))
            .unwrap_or_else(|| Self::Unknown(m.name.clone().into_owned()))
    }
}

impl Display for ConfigurationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TomlFile(path) => write!(f, "TOML file {path}"),
            Self::EnvVariable(variable) => write!(f, "environment variable {variable}"),
            Self::Unknown(name) => write!(f, "{name}"),
        }
    }
}

fn variable_name(key: &str) -> Option<String> {
    let desired_key = key.replace('.', ENV_SEPARATOR);
    std::env::vars_os().find_map(|(k, _)| {
        k.to_str()?
            .strip_prefix(ENV_PREFIX)
            .filter(|key| key.eq_ignore_ascii_case(&desired_key))
            .map(|name| format!("{ENV_PREFIX}{name}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, Default)]
    #[serde(default)]
    struct Config {
        section: Section,
    }

    #[derive(Deserialize, Debug, Default)]
    #[serde(default)]
    struct Section {
        value: u32,
        name: String,
    }

    #[test]
    fn missing_file_is_not_an_error() {
        figment::Jail::expect_with(|_jail| {
            let (config, warnings) = extract_data::<Config>(Utf8Path::new("missing.toml")).unwrap();
            assert_eq!(config.section.value, 0);
            assert!(warnings.is_empty());
            Ok(())
        })
    }

    #[test]
    fn environment_variables_override_the_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "wdconf.toml",
                r#"
                [section]
                value = 12
                name = "from-file"
            "#,
            )?;
            jail.set_env("WDCONF_SECTION__VALUE", "1234");

            let (config, _) = extract_data::<Config>(Utf8Path::new("wdconf.toml")).unwrap();

            assert_eq!(config.section.value, 1234);
            assert_eq!(config.section.name, "from-file");
            Ok(())
        })
    }

    #[test]
    fn config_dir_environment_variable_does_not_generate_a_warning() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WDCONF_CONFIG_DIR", "/etc/moved-wdconf");

            let (_, warnings) = extract_data::<Config>(Utf8Path::new("wdconf.toml")).unwrap();

            assert_eq!(warnings, UnusedValueWarnings::default());
            Ok(())
        })
    }

    #[test]
    fn unknown_fields_generate_warnings() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "wdconf.toml",
                r#"
                [section]
                valeu = 12
            "#,
            )?;
            jail.set_env("WDCONF_SECTION__NAMES", "watchdog");

            let (_, warnings) = extract_data::<Config>(Utf8Path::new("wdconf.toml")).unwrap();

            let mut warnings = warnings.0;
            warnings.sort();
            assert_eq!(warnings.len(), 2, "{warnings:?}");
            assert!(
                warnings[0].contains("\"section.names\"")
                    && warnings[0].contains("environment variable WDCONF_SECTION__NAMES"),
                "{warnings:?}"
            );
            assert!(
                warnings[1].contains("\"section.valeu\"") && warnings[1].contains("wdconf.toml"),
                "{warnings:?}"
            );
            Ok(())
        })
    }

    #[test]
    fn invalid_values_are_reported_with_the_file_path() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "wdconf.toml",
                r#"
                [section]
                value = "twelve"
            "#,
            )?;

            let err = extract_data::<Config>(Utf8Path::new("wdconf.toml")).unwrap_err();

            assert_eq!(
                err.to_string(),
                "Failed to read the configuration from wdconf.toml"
            );
            Ok(())
        })
    }
}
