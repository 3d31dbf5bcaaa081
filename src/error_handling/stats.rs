//! Worklist resolution statistics.
//!
//! Thread-safe counters shared by every concurrent branch of a resolution run.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::SkipReason;

/// Thread-safe skip counters, one per `SkipReason`.
///
/// All reasons are initialized to zero on creation so that increments never
/// allocate. Share across branches with `Arc`.
pub struct ResolutionStats {
    skips: HashMap<SkipReason, AtomicUsize>,
}

impl ResolutionStats {
    pub fn new() -> Self {
        let mut skips = HashMap::new();
        for reason in SkipReason::iter() {
            skips.insert(reason, AtomicUsize::new(0));
        }
        ResolutionStats { skips }
    }

    pub fn increment(&self, reason: SkipReason) {
        if let Some(counter) = self.skips.get(&reason) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment skip counter for {:?} which is not in the map",
                reason
            );
        }
    }

    pub fn count(&self, reason: SkipReason) -> usize {
        self.skips
            .get(&reason)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    #[allow(dead_code)] // Used in tests
    pub fn total(&self) -> usize {
        self.skips.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Non-zero counts, for reporting.
    pub fn snapshot(&self) -> HashMap<SkipReason, usize> {
        SkipReason::iter()
            .map(|reason| (reason, self.count(reason)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

impl Default for ResolutionStats {
    fn default() -> Self {
        Self::new()
    }
}
