use serde::Deserialize;
use serde::Serialize;

const INTEL_VENDOR_PREFIX: &[u8] = b"intel";

/// Prefix of the CPUID vendor identifiers, as in `GenuineIntel`.
const CPUID_VENDOR_PREFIX: &[u8] = b"genuine";

/// A snapshot of the host properties the watchdog configuration depends on.
///
/// The snapshot is gathered once per run and passed explicitly to the decision functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostFacts {
    /// Is the host a virtual machine or a container?
    pub is_virtual: bool,

    /// CPU vendor string as reported by the kernel, e.g. `GenuineIntel` or `AuthenticAMD`
    pub cpu_vendor: String,

    /// Does the host provide an IPMI baseboard management controller?
    pub has_ipmi_support: bool,

    pub total_memory_bytes: u64,

    pub page_size_bytes: u64,

    /// Number of logical processors, used to scale the per-core load thresholds
    #[serde(default = "HostFacts::default_processor_count")]
    pub processor_count: u32,
}

impl HostFacts {
    fn default_processor_count() -> u32 {
        1
    }

    /// Returns true when the CPU vendor starts with `intel`, ignoring ASCII case.
    ///
    /// The CPUID form of the vendor (`GenuineIntel`, as found in `/proc/cpuinfo`)
    /// is matched after its `Genuine` prefix.
    pub fn is_intel(&self) -> bool {
        let vendor = self.cpu_vendor.as_bytes();
        let vendor = strip_prefix_ignore_ascii_case(vendor, CPUID_VENDOR_PREFIX).unwrap_or(vendor);
        strip_prefix_ignore_ascii_case(vendor, INTEL_VENDOR_PREFIX).is_some()
    }
}

fn strip_prefix_ignore_ascii_case<'a>(value: &'a [u8], prefix: &[u8]) -> Option<&'a [u8]> {
    let (head, tail) = value.split_at_checked(prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then_some(tail)
}
