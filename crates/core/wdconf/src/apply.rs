use crate::error::WdconfError;
use crate::render::FileContent;
use crate::render::RenderedFile;
use crate::render::RenderedFiles;
use camino::Utf8PathBuf;
use wdconf_api::KernelModule;
use wdconf_api::WatchdogDecision;
use wdconf_config::ServiceSection;
use wdconf_system_services::KernelModuleLoader;
use wdconf_system_services::PackageManager;
use wdconf_system_services::SystemService;
use wdconf_system_services::SystemServiceManager;
use wdconf_utils::fs::remove_file_if_exists;
use wdconf_utils::fs::write_file_if_changed;

/// What has been done to the watchdog service.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ServiceAction {
    Started,
    Restarted,
    #[default]
    Unchanged,
}

/// The changes made on the host by [HostApplier::apply].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    pub package_installed: bool,
    pub changed_files: Vec<Utf8PathBuf>,
    pub service: ServiceAction,
}

/// Applies a rendered watchdog configuration on the host.
///
/// The steps are run in this order, stopping on the first error:
/// 1. install the watchdog package
/// 2. write or remove the `iTCO_wdt` blacklist, then unload `iTCO_wdt` if blacklisted
/// 3. write the modules-load file and load the selected driver
/// 4. disable the systemd watchdog, reloading systemd if the drop-in changed
/// 5. write `watchdog.conf`
/// 6. enable the service, then start it or restart it if anything changed
///
/// Files with the expected content are not rewritten,
/// so applying the same configuration twice leaves the service running untouched.
#[derive(Debug)]
pub struct HostApplier<'a> {
    pub service_manager: &'a dyn SystemServiceManager,
    pub package_manager: &'a dyn PackageManager,
    pub module_loader: &'a dyn KernelModuleLoader,
}

impl HostApplier<'_> {
    pub fn apply(
        &self,
        decision: WatchdogDecision,
        files: &RenderedFiles,
        service: &ServiceSection,
        install_package: bool,
    ) -> Result<ApplyReport, WdconfError> {
        let mut report = ApplyReport::default();

        if install_package {
            report.package_installed = self.package_manager.ensure_installed(&service.package)?;
        } else {
            tracing::debug!("Skipping the installation of {}", service.package);
        }

        let mut driver_changed = false;
        match (decision.module, &files.kernel_modules) {
            (Some(module), Some(kernel_files)) => {
                driver_changed |= self.update(&kernel_files.modprobe_blacklist, &mut report)?;
                if decision.blacklist_intel_tco {
                    self.unload_intel_tco();
                }

                driver_changed |= self.update(&kernel_files.modules_load, &mut report)?;
                self.module_loader.load(module)?;
            }
            _ => tracing::info!("Leaving the kernel watchdog driver configuration untouched"),
        }

        if self.update(&files.systemd_drop_in, &mut report)? {
            self.service_manager.reload_manager()?;
        }

        let conf_changed = self.update(&files.watchdog_conf, &mut report)?;

        let service = SystemService::new(&service.name);
        self.service_manager.enable_service(service)?;
        report.service = if !self.service_manager.is_service_running(service)? {
            self.service_manager.start_service(service)?;
            ServiceAction::Started
        } else if conf_changed || driver_changed || report.package_installed {
            self.service_manager.restart_service(service)?;
            ServiceAction::Restarted
        } else {
            tracing::info!("{service} is running with an up to date configuration");
            ServiceAction::Unchanged
        };

        Ok(report)
    }

    fn unload_intel_tco(&self) {
        if let Err(err) = self.module_loader.unload(KernelModule::IntelTco) {
            tracing::warn!(
                "Failed to unload {}, a reboot is required: {err}",
                KernelModule::IntelTco
            );
        }
    }

    /// Returns true if the file has been changed
    fn update(&self, file: &RenderedFile, report: &mut ApplyReport) -> Result<bool, WdconfError> {
        let to_io_error = |source| WdconfError::FromIo {
            path: file.path.clone(),
            source,
        };
        let changed = match &file.content {
            FileContent::Write(content) => write_file_if_changed(&file.path, content)
                .map_err(to_io_error)?
                .is_changed(),
            FileContent::Remove => remove_file_if_exists(&file.path).map_err(to_io_error)?,
        };
        if changed {
            report.changed_files.push(file.path.clone());
        }
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use camino::Utf8Path;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::cell::RefCell;
    use wdconf_api::assemble;
    use wdconf_api::HostFacts;
    use wdconf_api::MonitoringThresholds;
    use wdconf_api::WatchdogConfiguration;
    use wdconf_api::WatchdogType;
    use wdconf_config::PathsSection;
    use wdconf_system_services::SystemServiceError;
    use wdconf_test_utils::fs::TempConfigDir;

    /// Records the commands run on the host
    #[derive(Debug, Default)]
    struct FakeHost {
        events: RefCell<Vec<String>>,
        installed: Cell<bool>,
        running: Cell<bool>,
        failing_unload: bool,
        watched_files: Vec<Utf8PathBuf>,
    }

    impl FakeHost {
        fn record(&self, event: impl Into<String>) {
            self.events.borrow_mut().push(event.into());
        }

        fn record_with_files(&self, event: &str) {
            let existing: Vec<&str> = self
                .watched_files
                .iter()
                .filter(|path| path.exists())
                .filter_map(|path| path.file_name())
                .collect();
            self.record(format!("{event} [{}]", existing.join(", ")));
        }

        fn take_events(&self) -> Vec<String> {
            self.events.take()
        }
    }

    impl SystemServiceManager for FakeHost {
        fn name(&self) -> &str {
            "fake"
        }

        fn check_operational(&self) -> Result<(), SystemServiceError> {
            Ok(())
        }

        fn start_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
            self.running.set(true);
            self.record_with_files(&format!("start {service}"));
            Ok(())
        }

        fn restart_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
            self.running.set(true);
            self.record_with_files(&format!("restart {service}"));
            Ok(())
        }

        fn enable_service(&self, service: SystemService<'_>) -> Result<(), SystemServiceError> {
            self.record(format!("enable {service}"));
            Ok(())
        }

        fn is_service_running(
            &self,
            _service: SystemService<'_>,
        ) -> Result<bool, SystemServiceError> {
            Ok(self.running.get())
        }

        fn reload_manager(&self) -> Result<(), SystemServiceError> {
            self.record("reload");
            Ok(())
        }
    }

    impl PackageManager for FakeHost {
        fn is_installed(&self, _package: &str) -> Result<bool, SystemServiceError> {
            Ok(self.installed.get())
        }

        fn install(&self, package: &str) -> Result<(), SystemServiceError> {
            self.installed.set(true);
            self.record(format!("install {package}"));
            Ok(())
        }
    }

    impl KernelModuleLoader for FakeHost {
        fn load(&self, module: KernelModule) -> Result<(), SystemServiceError> {
            self.record(format!("load {module}"));
            Ok(())
        }

        fn unload(&self, module: KernelModule) -> Result<(), SystemServiceError> {
            self.record_with_files(&format!("unload {module}"));
            if self.failing_unload {
                return Err(SystemServiceError::CommandFailedWithCode {
                    command: format!("modprobe --remove {module}"),
                    code: 1,
                    stderr: format!("modprobe: FATAL: Module {module} is in use."),
                });
            }
            Ok(())
        }
    }

    struct TestHost {
        root: TempConfigDir,
        paths: PathsSection,
        host: FakeHost,
    }

    impl TestHost {
        fn new() -> Self {
            let root = TempConfigDir::new();
            let paths = PathsSection::default();
            let paths = PathsSection {
                watchdog_conf: under(root.path(), &paths.watchdog_conf),
                modules_load: under(root.path(), &paths.modules_load),
                modprobe_blacklist: under(root.path(), &paths.modprobe_blacklist),
                systemd_drop_in: under(root.path(), &paths.systemd_drop_in),
            };
            let host = FakeHost {
                watched_files: vec![
                    paths.modprobe_blacklist.clone(),
                    paths.watchdog_conf.clone(),
                ],
                ..FakeHost::default()
            };
            TestHost { root, paths, host }
        }

        fn apply(&self, config: &WatchdogConfiguration, facts: &HostFacts) -> ApplyReport {
            self.try_apply(config, facts).unwrap()
        }

        fn try_apply(
            &self,
            config: &WatchdogConfiguration,
            facts: &HostFacts,
        ) -> Result<ApplyReport, WdconfError> {
            let service = ServiceSection::default();
            let files = RenderedFiles::new(config, facts, &self.paths, &service);
            let applier = HostApplier {
                service_manager: &self.host,
                package_manager: &self.host,
                module_loader: &self.host,
            };
            applier.apply(config.decision, &files, &service, true)
        }
    }

    fn under(root: &Utf8Path, path: &Utf8Path) -> Utf8PathBuf {
        root.join(path.strip_prefix("/").unwrap())
    }

    fn ipmi_intel_host() -> HostFacts {
        HostFacts {
            is_virtual: false,
            cpu_vendor: "GenuineIntel".to_string(),
            has_ipmi_support: true,
            total_memory_bytes: 8_000_000_000,
            page_size_bytes: 4096,
            processor_count: 2,
        }
    }

    fn configuration(watchdog_type: WatchdogType, facts: &HostFacts) -> WatchdogConfiguration {
        let thresholds = MonitoringThresholds {
            min_memory_percent: Some(10),
            ..MonitoringThresholds::default()
        };
        assemble(watchdog_type, facts, &thresholds).unwrap()
    }

    #[test]
    fn first_run_on_an_ipmi_intel_host() {
        let test = TestHost::new();
        let facts = ipmi_intel_host();
        let config = configuration(WatchdogType::Best, &facts);

        let report = test.apply(&config, &facts);

        assert_eq!(
            test.host.take_events(),
            vec![
                "install watchdog",
                "unload iTCO_wdt [watchdog-blacklist.conf]",
                "load ipmi_watchdog",
                "reload",
                "enable watchdog",
                "start watchdog [watchdog-blacklist.conf, watchdog.conf]",
            ]
        );
        assert!(report.package_installed);
        assert_eq!(report.changed_files.len(), 4);
        assert_eq!(report.service, ServiceAction::Started);
        assert_eq!(
            test.root.read("etc/modprobe.d/watchdog-blacklist.conf").unwrap(),
            "# Generated by wdconf, local changes are overwritten\nblacklist iTCO_wdt\n"
        );
        assert!(test
            .root
            .read("etc/modules-load.d/watchdog.conf")
            .unwrap()
            .ends_with("\nipmi_watchdog\n"));
        assert!(test
            .root
            .read("etc/watchdog.conf")
            .unwrap()
            .contains("\nmin-memory = 195312\n"));
    }

    #[test]
    fn applying_twice_changes_nothing() {
        let test = TestHost::new();
        let facts = ipmi_intel_host();
        let config = configuration(WatchdogType::Best, &facts);
        test.apply(&config, &facts);
        test.host.take_events();

        let report = test.apply(&config, &facts);

        assert_eq!(
            report,
            ApplyReport {
                package_installed: false,
                changed_files: vec![],
                service: ServiceAction::Unchanged,
            }
        );
        let events = test.host.take_events();
        assert!(!events.iter().any(|event| event.starts_with("restart")
            || event.starts_with("start")
            || event == "reload"));
    }

    #[test]
    fn changed_thresholds_restart_the_running_service() {
        let test = TestHost::new();
        let facts = ipmi_intel_host();
        test.apply(&configuration(WatchdogType::Best, &facts), &facts);
        test.host.take_events();

        let config = WatchdogConfiguration {
            watchdog_timeout_seconds: 60,
            ..configuration(WatchdogType::Best, &facts)
        };
        let report = test.apply(&config, &facts);

        assert_eq!(report.changed_files, vec![test.paths.watchdog_conf.clone()]);
        assert_eq!(report.service, ServiceAction::Restarted);
        assert_eq!(
            test.host.take_events().last().unwrap(),
            "restart watchdog [watchdog-blacklist.conf, watchdog.conf]"
        );
    }

    #[test]
    fn switching_to_softdog_on_amd_removes_the_blacklist() {
        let test = TestHost::new();
        let intel = ipmi_intel_host();
        test.apply(&configuration(WatchdogType::Best, &intel), &intel);
        test.host.take_events();

        let amd = HostFacts {
            cpu_vendor: "AuthenticAMD".to_string(),
            has_ipmi_support: false,
            ..ipmi_intel_host()
        };
        let report = test.apply(&configuration(WatchdogType::Best, &amd), &amd);

        assert!(test.root.read("etc/modprobe.d/watchdog-blacklist.conf").is_none());
        assert!(report
            .changed_files
            .contains(&test.paths.modprobe_blacklist));
        assert_eq!(report.service, ServiceAction::Restarted);
        let events = test.host.take_events();
        assert!(events.contains(&"load softdog".to_string()), "{events:?}");
        assert!(!events.iter().any(|event| event.starts_with("unload")));
    }

    #[test]
    fn auto_leaves_kernel_modules_untouched() {
        let test = TestHost::new();
        let facts = ipmi_intel_host();

        let report = test.apply(&configuration(WatchdogType::Auto, &facts), &facts);

        assert!(test.root.read("etc/modules-load.d/watchdog.conf").is_none());
        assert!(test.root.read("etc/modprobe.d/watchdog-blacklist.conf").is_none());
        assert_eq!(report.changed_files.len(), 2);
        let events = test.host.take_events();
        assert!(!events
            .iter()
            .any(|event| event.starts_with("load") || event.starts_with("unload")));
    }

    #[test]
    fn failing_unload_is_not_fatal() {
        let mut test = TestHost::new();
        test.host.failing_unload = true;
        let facts = ipmi_intel_host();

        let report = test.apply(&configuration(WatchdogType::Soft, &facts), &facts);

        assert_eq!(report.service, ServiceAction::Started);
    }

    #[test]
    fn unwritable_file_aborts_before_the_service_is_started() {
        let mut test = TestHost::new();
        test.paths.watchdog_conf = test.root.dir("etc/watchdog.conf").to_path_buf();
        let facts = ipmi_intel_host();

        let err = test
            .try_apply(&configuration(WatchdogType::Best, &facts), &facts)
            .unwrap_err();

        assert_matches!(err, WdconfError::FromIo { path, .. } if path == test.paths.watchdog_conf);
        assert!(!test.host.running.get());
    }
}
