use camino::Utf8Path;
use wdconf_api::WatchdogConfiguration;

/// Render the `key = value` configuration of the watchdog daemon.
///
/// The load thresholds are given per processor and scaled to the host.
pub fn render_watchdog_conf(
    config: &WatchdogConfiguration,
    processor_count: u32,
    device: &Utf8Path,
) -> String {
    let mut lines = Vec::new();

    for (period, load) in config.load_per_core.for_processors(processor_count).by_period() {
        if let Some(load) = load {
            lines.push(format!("max-load-{period} = {load}"));
        }
    }

    if let Some(pages) = config.min_free_pages {
        lines.push(format!("min-memory = {pages}"));
    }

    for watch in &config.file_changes {
        lines.push(format!("file = {}", watch.path));
        lines.push(format!("change = {}", watch.max_unchanged_seconds));
    }

    lines.push(format!("watchdog-device = {device}"));
    lines.push(format!(
        "watchdog-timeout = {}",
        config.watchdog_timeout_seconds
    ));

    if let Some(repair) = &config.repair {
        lines.push(format!("repair-binary = {}", repair.binary));
        if let Some(timeout) = repair.timeout_seconds {
            lines.push(format!("repair-timeout = {timeout}"));
        }
        if let Some(maximum) = repair.maximum_attempts {
            lines.push(format!("repair-maximum = {maximum}"));
        }
    }

    let mut conf = String::from(super::GENERATED_HEADER);
    for line in lines {
        conf.push_str(&line);
        conf.push('\n');
    }
    conf
}
