use crate::HostFacts;
use serde::Deserialize;

/// Host facts set by the user, superseding the detected ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactOverrides {
    pub is_virtual: Option<bool>,
    pub cpu_vendor: Option<String>,
    pub has_ipmi_support: Option<bool>,
    pub total_memory_bytes: Option<u64>,
    pub page_size_bytes: Option<u64>,
    pub processor_count: Option<u32>,
}

impl FactOverrides {
    pub fn is_empty(&self) -> bool {
        self == &FactOverrides::default()
    }

    pub fn apply_to(&self, mut facts: HostFacts) -> HostFacts {
        fn set<T: Clone + std::fmt::Debug>(name: &str, target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                tracing::info!("Overriding host fact {name}: {target:?} -> {value:?}");
                *target = value.clone();
            }
        }

        set("is_virtual", &mut facts.is_virtual, &self.is_virtual);
        set("cpu_vendor", &mut facts.cpu_vendor, &self.cpu_vendor);
        set(
            "has_ipmi_support",
            &mut facts.has_ipmi_support,
            &self.has_ipmi_support,
        );
        set(
            "total_memory_bytes",
            &mut facts.total_memory_bytes,
            &self.total_memory_bytes,
        );
        set(
            "page_size_bytes",
            &mut facts.page_size_bytes,
            &self.page_size_bytes,
        );
        set(
            "processor_count",
            &mut facts.processor_count,
            &self.processor_count,
        );

        facts
    }
}
