//! Store Statistics Module
//!
//! Point-in-time snapshot of the store's contents.

use serde::Serialize;

// == Store Stats ==
/// Entry counts captured under a single read lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of entries in the map, expired or not
    pub total_entries: usize,
    /// Number of entries whose TTL has elapsed but that have not been cleaned up
    pub expired_entries: usize,
}

impl StoreStats {
    // == Live Entries ==
    /// Returns the number of entries that are still readable through `get`.
    pub fn live_entries(&self) -> usize {
        self.total_entries.saturating_sub(self.expired_entries)
    }

    // == Expired Ratio ==
    /// Share of entries waiting for a cleanup sweep.
    ///
    /// Returns 0.0 for an empty store.
    pub fn expired_ratio(&self) -> f64 {
        if self.total_entries == 0 {
            0.0
        } else {
            self.expired_entries as f64 / self.total_entries as f64
        }
    }
}
