//! Turn a [WatchdogConfiguration] into the content of the files it is made of.

mod modules;
mod watchdog_conf;

pub use self::modules::*;
pub use self::watchdog_conf::*;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use std::fmt;
use wdconf_api::HostFacts;
use wdconf_api::WatchdogConfiguration;
use wdconf_config::PathsSection;
use wdconf_config::ServiceSection;

const GENERATED_HEADER: &str = "# Generated by wdconf, local changes are overwritten\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Write(String),
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub path: Utf8PathBuf,
    pub content: FileContent,
}

impl RenderedFile {
    fn write(path: &Utf8Path, content: String) -> Self {
        RenderedFile {
            path: path.to_owned(),
            content: FileContent::Write(content),
        }
    }

    fn remove(path: &Utf8Path) -> Self {
        RenderedFile {
            path: path.to_owned(),
            content: FileContent::Remove,
        }
    }

    /// The same file, relocated below another root directory.
    pub fn relocate(&self, root: &Utf8Path) -> RenderedFile {
        let relative = self.path.strip_prefix("/").unwrap_or(self.path.as_path());
        RenderedFile {
            path: root.join(relative),
            content: self.content.clone(),
        }
    }
}

impl fmt::Display for RenderedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.content {
            FileContent::Write(content) => write!(f, "--- {}\n{content}", self.path),
            FileContent::Remove => writeln!(f, "--- {} (removed)", self.path),
        }
    }
}

/// The kernel driver files of a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelModuleFiles {
    pub modprobe_blacklist: RenderedFile,
    pub modules_load: RenderedFile,
}

/// All the files of a watchdog configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFiles {
    /// `None` when the kernel driver configuration is left untouched
    pub kernel_modules: Option<KernelModuleFiles>,
    pub systemd_drop_in: RenderedFile,
    pub watchdog_conf: RenderedFile,
}

impl RenderedFiles {
    pub fn new(
        config: &WatchdogConfiguration,
        facts: &HostFacts,
        paths: &PathsSection,
        service: &ServiceSection,
    ) -> Self {
        let kernel_modules = config.decision.module.map(|module| KernelModuleFiles {
            modprobe_blacklist: if config.decision.blacklist_intel_tco {
                RenderedFile::write(&paths.modprobe_blacklist, render_intel_tco_blacklist())
            } else {
                RenderedFile::remove(&paths.modprobe_blacklist)
            },
            modules_load: RenderedFile::write(&paths.modules_load, render_modules_load(module)),
        });

        RenderedFiles {
            kernel_modules,
            systemd_drop_in: RenderedFile::write(&paths.systemd_drop_in, render_systemd_drop_in()),
            watchdog_conf: RenderedFile::write(
                &paths.watchdog_conf,
                render_watchdog_conf(config, facts.processor_count, &service.device),
            ),
        }
    }

    /// The files in the order they have to be applied.
    pub fn files(&self) -> Vec<&RenderedFile> {
        let mut files = Vec::new();
        if let Some(kernel_modules) = &self.kernel_modules {
            files.push(&kernel_modules.modprobe_blacklist);
            files.push(&kernel_modules.modules_load);
        }
        files.push(&self.systemd_drop_in);
        files.push(&self.watchdog_conf);
        files
    }

    /// The same files, relocated below another root directory.
    pub fn relocate(&self, root: &Utf8Path) -> RenderedFiles {
        RenderedFiles {
            kernel_modules: self.kernel_modules.as_ref().map(|files| KernelModuleFiles {
                modprobe_blacklist: files.modprobe_blacklist.relocate(root),
                modules_load: files.modules_load.relocate(root),
            }),
            systemd_drop_in: self.systemd_drop_in.relocate(root),
            watchdog_conf: self.watchdog_conf.relocate(root),
        }
    }
}
