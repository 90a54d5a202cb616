//! Sentinel-driven prefetching for the venue carousel.

use tracing::trace;

/// Prefetch state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefetchState {
    /// Waiting for the sentinel to enter the viewport.
    #[default]
    Idle,
    /// A page bump was issued and has not settled.
    Fetching,
    /// The sentinel stayed visible across a settle; it must leave the
    /// viewport before it can fire again.
    AwaitingNextVisibility,
}

/// What a visibility event produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefetchDecision {
    /// Request this page.
    Fire(u32),
    /// Nothing to do.
    Ignore,
}

/// Edge-triggered prefetch trigger.
///
/// The sentinel is the item `offset` positions before the last rendered
/// item. A page bump fires only when the sentinel goes from hidden to
/// visible, no fetch is outstanding, and more pages exist.
#[derive(Debug, Clone)]
pub struct PrefetchTrigger {
    offset: usize,
    state: PrefetchState,
    visible: bool,
    sentinel: Option<usize>,
}

impl PrefetchTrigger {
    pub fn new(offset: usize) -> Self {
        Self {
            offset,
            state: PrefetchState::Idle,
            visible: false,
            sentinel: None,
        }
    }

    pub fn state(&self) -> PrefetchState {
        self.state
    }

    /// Index of the observed item, if any items are rendered.
    pub fn sentinel(&self) -> Option<usize> {
        self.sentinel
    }

    /// Handle a viewport intersection change of the sentinel.
    ///
    /// `busy` is true while any fetch of the list is outstanding.
    pub fn on_visibility(
        &mut self,
        visible: bool,
        page: u32,
        total_pages: u32,
        busy: bool,
    ) -> PrefetchDecision {
        let entered = visible && !self.visible;
        self.visible = visible;

        if !visible {
            if self.state == PrefetchState::AwaitingNextVisibility {
                self.state = PrefetchState::Idle;
            }
            return PrefetchDecision::Ignore;
        }

        if !entered || self.sentinel.is_none() {
            return PrefetchDecision::Ignore;
        }
        if self.state != PrefetchState::Idle || busy {
            trace!(state = ?self.state, busy, "prefetch rejected");
            return PrefetchDecision::Ignore;
        }
        if page >= total_pages {
            trace!(page, total_pages, "last page reached, no prefetch");
            return PrefetchDecision::Ignore;
        }

        self.state = PrefetchState::Fetching;
        PrefetchDecision::Fire(page + 1)
    }

    /// A fetch settled (successfully or not) and `item_count` items are
    /// rendered now. Recomputes the sentinel.
    pub fn on_settled(&mut self, item_count: usize) {
        let sentinel = sentinel_index(item_count, self.offset);
        if sentinel != self.sentinel {
            // A different element is observed now; it starts out hidden.
            self.sentinel = sentinel;
            self.visible = false;
            self.state = PrefetchState::Idle;
        } else if self.visible {
            self.state = PrefetchState::AwaitingNextVisibility;
        } else {
            self.state = PrefetchState::Idle;
        }
    }

    /// Forget visibility and state, e.g. after the query changed.
    pub fn reset(&mut self) {
        self.state = PrefetchState::Idle;
        self.visible = false;
        self.sentinel = None;
    }
}

/// Index of the item `offset` positions before the last one.
///
/// Short lists observe their first item.
pub fn sentinel_index(item_count: usize, offset: usize) -> Option<usize> {
    if item_count == 0 {
        None
    } else {
        Some(item_count.saturating_sub(offset + 1))
    }
}
