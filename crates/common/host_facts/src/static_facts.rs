use crate::FactProvider;
use crate::FactsError;
use crate::HostFacts;
use camino::Utf8Path;
use camino::Utf8PathBuf;

/// Host facts loaded from a TOML file.
///
/// ```toml
/// is_virtual = false
/// cpu_vendor = "GenuineIntel"
/// has_ipmi_support = true
/// total_memory_bytes = 8000000000
/// page_size_bytes = 4096
/// processor_count = 4
/// ```
#[derive(Debug, Clone)]
pub struct StaticFactProvider {
    path: Utf8PathBuf,
}

impl StaticFactProvider {
    pub fn from_file(path: impl AsRef<Utf8Path>) -> Self {
        StaticFactProvider {
            path: path.as_ref().to_owned(),
        }
    }
}

impl FactProvider for StaticFactProvider {
    fn source(&self) -> String {
        format!("facts file {}", self.path)
    }

    fn host_facts(&self) -> Result<HostFacts, FactsError> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|source| FactsError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        toml::from_str(&content).map_err(|err| FactsError::InvalidFactsFile {
            path: self.path.clone(),
            reason: err.message().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;
    use wdconf_test_utils::fs::TempConfigDir;

    #[test]
    fn load_facts_from_file() {
        let dir = TempConfigDir::new();
        let file = dir.file("facts.toml").with_raw_content(
            r#"
is_virtual = false
cpu_vendor = "GenuineIntel"
has_ipmi_support = true
total_memory_bytes = 8000000000
page_size_bytes = 4096
processor_count = 4
"#,
        );

        let facts = StaticFactProvider::from_file(file.path())
            .host_facts()
            .unwrap();

        assert_eq!(
            facts,
            HostFacts {
                is_virtual: false,
                cpu_vendor: "GenuineIntel".to_string(),
                has_ipmi_support: true,
                total_memory_bytes: 8_000_000_000,
                page_size_bytes: 4096,
                processor_count: 4,
            }
        );
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = TempConfigDir::new();
        let file = dir.file("facts.toml").with_raw_content(
            r#"
is_virtual = false
cpu_vendor = "GenuineIntel"
has_ipmi_support = true
total_memory_bytes = 8000000000
page_size_bytes = 4096
memory = 12
"#,
        );

        let err = StaticFactProvider::from_file(file.path())
            .host_facts()
            .unwrap_err();

        assert_matches!(err, FactsError::InvalidFactsFile { reason, .. } if reason.contains("memory"));
    }

    #[test]
    fn missing_file() {
        let dir = TempConfigDir::new();
        let path = dir.path().join("facts.toml");

        let err = StaticFactProvider::from_file(&path).host_facts().unwrap_err();

        assert_matches!(err, FactsError::ReadFailed { path: p, .. } if p == path);
    }
}
