//! When a query change should trigger its fetch.

use std::time::Duration;

use super::QueryChange;

/// Quiet period applied to search-box edits.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Scheduling policy for query changes.
///
/// Search edits wait for the quiet period; everything else fires at once.
/// A newer change replaces the pending one, which the controller gets for
/// free by aborting the pending task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    search_delay: Duration,
}

impl Debouncer {
    pub fn new(search_delay: Duration) -> Self {
        Self { search_delay }
    }

    /// Delay before the fetch for `change` is issued.
    ///
    /// Clearing the search box fires immediately.
    pub fn delay_for(&self, change: &QueryChange) -> Duration {
        match change {
            QueryChange::Search(text) if !text.trim().is_empty() => self.search_delay,
            _ => Duration::ZERO,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}
