//! Eviction Policy
//!
//! Oldest-first trimming of the namespace to a capacity bound. Ordering is by
//! write timestamp, so eviction is FIFO on writes rather than LRU on reads.

// == Select For Eviction ==
/// Returns the keys to remove so that at most `capacity` entries remain.
///
/// Entries are ordered by timestamp ascending, missing timestamps counting as
/// 0, with ties broken by key. The first `len - capacity` keys are selected.
pub fn select_for_eviction(entries: &[(String, Option<u64>)], capacity: usize) -> Vec<String> {
    if entries.len() <= capacity {
        return Vec::new();
    }

    let mut ordered: Vec<(u64, &str)> = entries
        .iter()
        .map(|(key, timestamp)| (timestamp.unwrap_or(0), key.as_str()))
        .collect();
    ordered.sort_unstable();

    ordered
        .into_iter()
        .take(entries.len() - capacity)
        .map(|(_, key)| key.to_string())
        .collect()
}
