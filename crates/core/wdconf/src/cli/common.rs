use crate::error::WdconfError;
use crate::render::RenderedFiles;
use camino::Utf8PathBuf;
use host_facts::FactOverrides;
use host_facts::FactProvider;
use host_facts::FactsError;
use host_facts::LinuxFactProvider;
use host_facts::StaticFactProvider;
use wdconf_api::assemble;
use wdconf_api::HostFacts;
use wdconf_api::WatchdogConfiguration;
use wdconf_config::WdconfConfig;

#[derive(clap::Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FactsArgs {
    /// Read the host facts from a TOML file instead of the running host
    #[clap(long, value_name = "FILE")]
    pub facts: Option<Utf8PathBuf>,
}

impl FactsArgs {
    /// Gather the host facts once, then apply the user overrides.
    pub fn host_facts(&self, overrides: &FactOverrides) -> Result<HostFacts, FactsError> {
        let provider: Box<dyn FactProvider> = match &self.facts {
            Some(path) => Box::new(StaticFactProvider::from_file(path)),
            None => Box::new(LinuxFactProvider::default()),
        };

        tracing::info!("Gathering the host facts from the {}", provider.source());
        let facts = provider.host_facts()?;
        if overrides.is_empty() {
            return Ok(facts);
        }
        Ok(overrides.apply_to(facts))
    }
}

/// The watchdog configuration of a host, ready to be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogPlan {
    pub facts: HostFacts,
    pub configuration: WatchdogConfiguration,
    pub files: RenderedFiles,
}

impl WatchdogPlan {
    pub fn new(config: &WdconfConfig, facts: HostFacts) -> Result<Self, WdconfError> {
        let configuration = assemble(config.watchdog_type, &facts, &config.thresholds)?;

        match configuration.decision.module {
            Some(module) => tracing::info!(
                "Selected {module} for a {} watchdog{}",
                config.watchdog_type,
                if configuration.decision.blacklist_intel_tco {
                    ", blacklisting iTCO_wdt"
                } else {
                    ""
                }
            ),
            None => tracing::info!("No kernel watchdog driver selection requested"),
        }

        let files = RenderedFiles::new(&configuration, &facts, &config.paths, &config.service);
        Ok(WatchdogPlan {
            facts,
            configuration,
            files,
        })
    }
}
