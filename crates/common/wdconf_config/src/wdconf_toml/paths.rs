use camino::Utf8PathBuf;
use serde::Deserialize;

/// `[paths]`: where the generated files are written.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PathsSection {
    /// Configuration of the watchdog daemon
    pub watchdog_conf: Utf8PathBuf,

    /// Kernel modules loaded at boot
    pub modules_load: Utf8PathBuf,

    /// Kernel modules never loaded automatically
    pub modprobe_blacklist: Utf8PathBuf,

    /// Drop-in disabling the watchdog of systemd itself
    pub systemd_drop_in: Utf8PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        PathsSection {
            watchdog_conf: "/etc/watchdog.conf".into(),
            modules_load: "/etc/modules-load.d/watchdog.conf".into(),
            modprobe_blacklist: "/etc/modprobe.d/watchdog-blacklist.conf".into(),
            systemd_drop_in: "/etc/systemd/system.conf.d/watchdog.conf".into(),
        }
    }
}

/// `[service]`: the watchdog daemon.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceSection {
    /// Package providing the daemon
    pub package: String,

    /// Init system service running the daemon
    pub name: String,

    /// Device opened by the daemon
    pub device: Utf8PathBuf,
}

impl Default for ServiceSection {
    fn default() -> Self {
        ServiceSection {
            package: "watchdog".to_string(),
            name: "watchdog".to_string(),
            device: "/dev/watchdog".into(),
        }
    }
}
