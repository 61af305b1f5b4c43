use wdconf_api::KernelModule;

/// `modules-load.d` entry: the module loaded at boot.
pub fn render_modules_load(module: KernelModule) -> String {
    format!("{}{module}\n", super::GENERATED_HEADER)
}

/// `modprobe.d` entry preventing the Intel TCO driver to grab the watchdog device.
pub fn render_intel_tco_blacklist() -> String {
    format!(
        "{}blacklist {}\n",
        super::GENERATED_HEADER,
        KernelModule::IntelTco
    )
}

/// systemd `system.conf.d` drop-in, leaving the watchdog device to the daemon.
pub fn render_systemd_drop_in() -> String {
    format!(
        "{}[Manager]\nRuntimeWatchdogSec=0\nRebootWatchdogSec=0\n",
        super::GENERATED_HEADER
    )
}
