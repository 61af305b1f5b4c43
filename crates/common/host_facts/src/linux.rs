use crate::FactProvider;
use crate::FactsError;
use crate::HostFacts;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use nix::unistd::sysconf;
use nix::unistd::SysconfVar;
use std::process::Command;
use std::process::Stdio;

const CPUINFO: &str = "proc/cpuinfo";
const MEMINFO: &str = "proc/meminfo";

/// Files and directories that only exist when an IPMI controller is present.
///
/// * SMBIOS structure type 38 describes the IPMI device
/// * the `ipmi_si` driver exposes the controller under `/sys/class/ipmi`
/// * `ipmi_devintf` creates the `/dev/ipmi0` character device
const IPMI_DMI_ENTRY: &str = "sys/firmware/dmi/entries/38-0";
const IPMI_SYSFS_CLASS: &str = "sys/class/ipmi";
const IPMI_DEVICES: &[&str] = &["dev/ipmi0", "dev/ipmi/0", "dev/ipmidev/0"];

/// Read the facts of the running Linux host from `/proc`, `/sys` and `/dev`.
///
/// The virtualization is detected with `systemd-detect-virt`,
/// falling back to the `hypervisor` CPU flag when the command is not available.
#[derive(Debug, Clone)]
pub struct LinuxFactProvider {
    root: Utf8PathBuf,
    detect_virt: Option<Vec<String>>,
}

impl Default for LinuxFactProvider {
    fn default() -> Self {
        LinuxFactProvider {
            root: Utf8PathBuf::from("/"),
            detect_virt: Some(vec!["systemd-detect-virt".to_string()]),
        }
    }
}

impl LinuxFactProvider {
    /// Read the kernel interfaces below another root directory.
    pub fn with_root(self, root: impl Into<Utf8PathBuf>) -> Self {
        LinuxFactProvider {
            root: root.into(),
            ..self
        }
    }

    /// Use another command to detect virtualization, or none to rely only on the CPU flags.
    pub fn with_detect_virt_command(self, command: Option<Vec<String>>) -> Self {
        LinuxFactProvider {
            detect_virt: command,
            ..self
        }
    }

    fn path(&self, relative_path: &str) -> Utf8PathBuf {
        self.root.join(relative_path)
    }

    fn read(&self, relative_path: &str) -> Result<(Utf8PathBuf, String), FactsError> {
        let path = self.path(relative_path);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok((path, content)),
            Err(source) => Err(FactsError::ReadFailed { path, source }),
        }
    }

    fn cpu_info(&self) -> Result<CpuInfo, FactsError> {
        let (path, content) = self.read(CPUINFO)?;
        let cpu_info = CpuInfo::parse(&content);
        if cpu_info.vendor.is_none() {
            tracing::debug!("No vendor_id in {path}, the CPU is considered as non-Intel");
        }
        Ok(cpu_info)
    }

    fn total_memory_bytes(&self) -> Result<u64, FactsError> {
        let (path, content) = self.read(MEMINFO)?;
        parse_mem_total(&path, &content)
    }

    fn is_virtual(&self, cpu_info: &CpuInfo) -> bool {
        if let Some((exec, args)) = self.detect_virt.as_ref().and_then(|cmd| cmd.split_first()) {
            match Command::new(exec)
                .args(args)
                .stdin(Stdio::null())
                .stderr(Stdio::null())
                .output()
            {
                Ok(output) => {
                    let virtualization = String::from_utf8_lossy(&output.stdout);
                    tracing::debug!("{exec} reported {:?}", virtualization.trim());
                    return output.status.success() && virtualization.trim() != "none";
                }
                Err(err) => {
                    tracing::debug!("Cannot run {exec} ({err}), checking the CPU flags instead");
                }
            }
        }

        cpu_info.hypervisor
    }

    fn has_ipmi_support(&self) -> bool {
        let has_dmi_entry = self.path(IPMI_DMI_ENTRY).exists();
        let has_sysfs_entry = std::fs::read_dir(self.path(IPMI_SYSFS_CLASS))
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        let has_device = IPMI_DEVICES
            .iter()
            .any(|device| self.path(device).exists());

        has_dmi_entry || has_sysfs_entry || has_device
    }
}

impl FactProvider for LinuxFactProvider {
    fn source(&self) -> String {
        format!("kernel interfaces under {}", self.root)
    }

    fn host_facts(&self) -> Result<HostFacts, FactsError> {
        let cpu_info = self.cpu_info()?;
        let facts = HostFacts {
            is_virtual: self.is_virtual(&cpu_info),
            has_ipmi_support: self.has_ipmi_support(),
            total_memory_bytes: self.total_memory_bytes()?,
            page_size_bytes: page_size_bytes()?,
            processor_count: cpu_info.processor_count(),
            cpu_vendor: cpu_info.vendor.unwrap_or_default(),
        };
        Ok(facts)
    }
}

fn page_size_bytes() -> Result<u64, FactsError> {
    match sysconf(SysconfVar::PAGE_SIZE) {
        Ok(Some(size)) if size > 0 => Ok(size as u64),
        Ok(_) => Err(FactsError::PageSizeUnavailable {
            reason: "sysconf returned no value".to_string(),
        }),
        Err(errno) => Err(FactsError::PageSizeUnavailable {
            reason: errno.to_string(),
        }),
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CpuInfo {
    vendor: Option<String>,
    processors: u32,
    hypervisor: bool,
}

impl CpuInfo {
    fn parse(content: &str) -> Self {
        let mut cpu_info = CpuInfo::default();

        for (key, value) in content.lines().filter_map(|line| line.split_once(':')) {
            match key.trim() {
                "processor" => cpu_info.processors += 1,
                "vendor_id" if cpu_info.vendor.is_none() => {
                    cpu_info.vendor = Some(value.trim().to_string())
                }
                "flags" => {
                    cpu_info.hypervisor |= value.split_whitespace().any(|flag| flag == "hypervisor")
                }
                _ => (),
            }
        }

        cpu_info
    }

    fn processor_count(&self) -> u32 {
        if self.processors > 0 {
            return self.processors;
        }
        std::thread::available_parallelism()
            .map(|count| count.get() as u32)
            .unwrap_or(1)
    }
}

fn parse_mem_total(path: &Utf8Path, content: &str) -> Result<u64, FactsError> {
    // Format: "MemTotal:       16384000 kB"
    let line = content
        .lines()
        .find_map(|line| line.strip_prefix("MemTotal:"))
        .ok_or_else(|| FactsError::MissingField {
            path: path.to_owned(),
            field: "MemTotal",
        })?;

    let invalid = || FactsError::InvalidField {
        path: path.to_owned(),
        field: "MemTotal",
        value: line.trim().to_string(),
    };

    let mut parts = line.split_whitespace();
    let kilobytes: u64 = parts
        .next()
        .and_then(|value| value.parse().ok())
        .ok_or_else(invalid)?;
    match parts.next() {
        Some("kB") | None => kilobytes.checked_mul(1024).ok_or_else(invalid),
        Some(_) => Err(invalid()),
    }
}
