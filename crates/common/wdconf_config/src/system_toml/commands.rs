use serde::Deserialize;

/// The placeholder replaced by the service, package or kernel module name in a command line.
pub const NAME_PLACEHOLDER: &str = "{}";

fn command_line(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

/// `[init]`: how to drive the init system.
#[derive(Deserialize, Debug, Eq, PartialEq)]
#[serde(from = "InitConfigToml")]
pub struct InitConfig {
    pub name: String,
    pub is_available: Vec<String>,
    pub restart: Vec<String>,
    pub start: Vec<String>,
    pub enable: Vec<String>,
    pub is_active: Vec<String>,
}

#[derive(Deserialize, Debug, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
struct InitConfigToml {
    name: String,
    is_available: Vec<String>,
    restart: Vec<String>,
    start: Option<Vec<String>>,
    enable: Vec<String>,
    is_active: Vec<String>,
}

impl From<InitConfigToml> for InitConfig {
    fn from(value: InitConfigToml) -> Self {
        Self {
            name: value.name,
            is_available: value.is_available,
            start: value.start.unwrap_or_else(|| value.restart.clone()),
            restart: value.restart,
            enable: value.enable,
            is_active: value.is_active,
        }
    }
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            name: "systemd".to_string(),
            is_available: command_line(&["/bin/systemctl", "--version"]),
            restart: command_line(&["/bin/systemctl", "restart", NAME_PLACEHOLDER]),
            start: command_line(&["/bin/systemctl", "start", NAME_PLACEHOLDER]),
            enable: command_line(&["/bin/systemctl", "enable", NAME_PLACEHOLDER]),
            is_active: command_line(&["/bin/systemctl", "is-active", NAME_PLACEHOLDER]),
        }
    }
}

/// `[package]`: how to check and install a package.
#[derive(Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PackageConfig {
    /// Exits with 0 when the package is installed
    pub is_installed: Vec<String>,
    pub install: Vec<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            is_installed: command_line(&["/usr/bin/dpkg", "--status", NAME_PLACEHOLDER]),
            install: command_line(&[
                "/usr/bin/apt-get",
                "install",
                "--quiet",
                "--yes",
                NAME_PLACEHOLDER,
            ]),
        }
    }
}

/// `[modules]`: how to load and unload a kernel module.
#[derive(Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModulesConfig {
    pub load: Vec<String>,
    pub unload: Vec<String>,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            load: command_line(&["/sbin/modprobe", NAME_PLACEHOLDER]),
            unload: command_line(&["/sbin/modprobe", "--remove", NAME_PLACEHOLDER]),
        }
    }
}

/// `[system]`: host wide commands.
#[derive(Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SystemSpecificCommands {
    /// Makes the init system re-read its own configuration.
    ///
    /// An empty command disables the reload.
    pub reload_manager: Vec<String>,
}

impl Default for SystemSpecificCommands {
    fn default() -> Self {
        Self {
            reload_manager: command_line(&["/bin/systemctl", "daemon-reexec"]),
        }
    }
}
