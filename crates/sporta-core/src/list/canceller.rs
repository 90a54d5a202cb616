//! Superseding in-flight requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::AbortHandle;
use tracing::trace;

/// Ownership handle over one in-flight fetch.
///
/// Only the most recently started token of a [`RequestCanceller`] is
/// current. Completion handlers must check [`RequestToken::is_current`]
/// before touching shared state.
#[derive(Debug, Clone)]
pub struct RequestToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns false once a newer request started or the owner cancelled.
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

/// Tracks the current request of one list controller.
#[derive(Debug, Default)]
pub struct RequestCanceller {
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<AbortHandle>>,
}

impl RequestCanceller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, invalidating and aborting the previous one.
    pub fn start_request(&self) -> RequestToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.abort_in_flight();
        RequestToken {
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// Attach the task running `token`'s request so it can be aborted.
    ///
    /// A token that is already superseded has its task aborted at once.
    pub fn attach(&self, token: &RequestToken, handle: AbortHandle) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if token.is_current() {
            *in_flight = Some(handle);
        } else {
            handle.abort();
        }
    }

    /// Mark `token`'s request as finished.
    pub fn finish(&self, token: &RequestToken) {
        if token.is_current() {
            self.in_flight
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
        }
    }

    /// Invalidate the current request without starting a new one.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.abort_in_flight();
    }

    fn abort_in_flight(&self) {
        let handle = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            trace!("aborting superseded request");
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn newer_request_supersedes_older() {
        let canceller = RequestCanceller::new();
        let first = canceller.start_request();
        assert!(first.is_current());

        let second = canceller.start_request();
        assert!(!first.is_current());
        assert!(second.is_current());
    }

    #[test]
    fn cancel_invalidates_without_replacement() {
        let canceller = RequestCanceller::new();
        let token = canceller.start_request();
        canceller.cancel();
        assert!(!token.is_current());
    }

    #[tokio::test]
    async fn starting_a_request_aborts_the_previous_task() {
        let canceller = RequestCanceller::new();
        let first = canceller.start_request();
        let task = tokio::spawn(tokio::time::sleep(Duration::from_secs(60)));
        canceller.attach(&first, task.abort_handle());

        let _second = canceller.start_request();
        let err = task.await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn attaching_a_stale_token_aborts_immediately() {
        let canceller = RequestCanceller::new();
        let stale = canceller.start_request();
        let _fresh = canceller.start_request();

        let task = tokio::spawn(tokio::time::sleep(Duration::from_secs(60)));
        canceller.attach(&stale, task.abort_handle());
        assert!(task.await.unwrap_err().is_cancelled());
    }
}
