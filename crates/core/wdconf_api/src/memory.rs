use crate::WatchdogConfigError;

/// Convert a minimum free memory threshold from a percentage of the total memory to memory pages.
///
/// Returns `Ok(None)` when no percentage is given, whatever the memory and page sizes.
/// Both divisions round down: first to whole bytes, then to whole pages.
/// The product is computed on 128 bits, so any `u64` memory size is accepted without rounding loss.
///
/// A 0% threshold is returned as `Some(0)`, not as `None`.
pub fn min_free_pages(
    total_memory_bytes: u64,
    page_size_bytes: u64,
    min_memory_percent: Option<u8>,
) -> Result<Option<u64>, WatchdogConfigError> {
    let Some(percent) = min_memory_percent else {
        return Ok(None);
    };

    if page_size_bytes == 0 {
        return Err(WatchdogConfigError::invalid(
            "the memory page size must be greater than zero",
        ));
    }
    if percent > 100 {
        return Err(WatchdogConfigError::invalid(format!(
            "the minimum free memory must be a percentage between 0 and 100, not {percent}"
        )));
    }

    let min_free_bytes = u128::from(total_memory_bytes) * u128::from(percent) / 100;
    let min_free_pages = min_free_bytes / u128::from(page_size_bytes);

    // percent <= 100, hence min_free_pages <= total_memory_bytes
    Ok(Some(min_free_pages as u64))
}
