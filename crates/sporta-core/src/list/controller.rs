//! The generic list controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, instrument, warn};

use crate::error::DEFAULT_FAILURE_MESSAGE;
use crate::traits::ListSource;
use crate::{Error, Result};

use super::{
    ControllerOptions, Debouncer, Envelope, ListQuery, ListResult, PrefetchDecision,
    PrefetchTrigger, QueryChange, RequestCanceller, RequestToken, merge,
};

/// What a list screen renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ListSnapshot<T> {
    pub query: ListQuery,
    pub items: Vec<T>,
    pub page: u32,
    pub total_pages: u32,
    /// A fetch is pending or in flight.
    pub loading: bool,
    /// Banner text of the last failure, cleared by the next fetch.
    pub error: Option<String>,
}

/// Drives one list screen against a [`ListSource`].
///
/// Every query change schedules a fetch in a spawned task; scheduling a
/// new fetch aborts the previous task, and a completing fetch applies its
/// result only if its [`RequestToken`] is still current. Dropping the
/// controller cancels the outstanding fetch.
///
/// Must be used from within a Tokio runtime.
pub struct ListController<S: ListSource> {
    inner: Arc<Inner<S>>,
}

struct Inner<S: ListSource> {
    source: S,
    options: ControllerOptions,
    debouncer: Debouncer,
    canceller: RequestCanceller,
    state: Mutex<State<S::Item>>,
    updates: watch::Sender<ListSnapshot<S::Item>>,
}

struct State<T> {
    query: ListQuery,
    items: Vec<T>,
    total_pages: u32,
    loading: bool,
    error: Option<String>,
    mounted: bool,
    prefetch: PrefetchTrigger,
}

impl<T: Clone> State<T> {
    fn snapshot(&self) -> ListSnapshot<T> {
        ListSnapshot {
            query: self.query.clone(),
            items: self.items.clone(),
            page: self.query.page(),
            total_pages: self.total_pages,
            loading: self.loading,
            error: self.error.clone(),
        }
    }
}

impl<S: ListSource> ListController<S> {
    /// Create a controller with an empty first-page query.
    pub fn new(source: S, options: ControllerOptions) -> Self {
        let query = ListQuery::new(options.page_size);
        Self::with_query(source, options, query)
    }

    /// Create a controller with initial search text or filters.
    pub fn with_query(source: S, options: ControllerOptions, query: ListQuery) -> Self {
        let state = State {
            query,
            items: Vec::new(),
            total_pages: 1,
            loading: false,
            error: None,
            mounted: false,
            prefetch: PrefetchTrigger::new(options.sentinel_offset),
        };
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            inner: Arc::new(Inner {
                source,
                debouncer: Debouncer::new(options.debounce),
                options,
                canceller: RequestCanceller::new(),
                state: Mutex::new(state),
                updates,
            }),
        }
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.inner.options
    }

    pub fn source(&self) -> &S {
        &self.inner.source
    }

    /// Issue the initial fetch. Later calls do nothing.
    #[instrument(skip(self))]
    pub fn mount(&self) {
        let mut state = self.inner.lock();
        if state.mounted {
            return;
        }
        state.mounted = true;
        debug!(page = state.query.page(), "mounting list");
        self.inner.schedule(&mut state, Duration::ZERO);
    }

    /// Update the search text. Fetches after the debounce period.
    pub fn set_search(&self, text: impl Into<String>) -> bool {
        self.change(QueryChange::Search(text.into()))
    }

    /// Set a filter; `All` or an empty value clears it.
    pub fn set_filter(&self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.change(QueryChange::filter(key, value))
    }

    pub fn clear_filter(&self, key: impl Into<String>) -> bool {
        self.change(QueryChange::ClearFilter(key.into()))
    }

    /// Jump to a page without clamping.
    pub fn set_page(&self, page: u32) -> bool {
        self.change(QueryChange::Page(page))
    }

    /// Jump to a page clamped to `[1, total_pages]`.
    pub fn go_to_page(&self, page: u32) -> bool {
        let total_pages = self.inner.lock().total_pages;
        self.set_page(page.clamp(1, total_pages.max(1)))
    }

    pub fn next_page(&self) -> bool {
        let page = self.inner.lock().query.page();
        self.go_to_page(page.saturating_add(1))
    }

    pub fn prev_page(&self) -> bool {
        let page = self.inner.lock().query.page();
        self.go_to_page(page.saturating_sub(1))
    }

    /// Apply a query change and schedule its fetch.
    ///
    /// Returns false when the change leaves the query as it was.
    #[instrument(skip(self))]
    pub fn change(&self, change: QueryChange) -> bool {
        let mut state = self.inner.lock();
        if !state.query.apply(&change) {
            return false;
        }
        if change.resets_page() {
            state.prefetch.reset();
        }
        if !state.mounted {
            // The mount fetch will pick the query up.
            return true;
        }
        let delay = self.inner.debouncer.delay_for(&change);
        self.inner.schedule(&mut state, delay);
        true
    }

    /// Refetch the current page, e.g. after a mutation.
    pub fn refresh(&self) {
        let mut state = self.inner.lock();
        state.mounted = true;
        self.inner.schedule(&mut state, Duration::ZERO);
    }

    /// A row of the current page was deleted on the server.
    ///
    /// When it was the only row of a later page, step back one page;
    /// otherwise refetch the current page.
    pub fn item_removed(&self) {
        let step_back = {
            let state = self.inner.lock();
            let page = state.query.page();
            (!self.inner.options.accumulate && state.items.len() <= 1 && page > 1).then(|| page - 1)
        };
        match step_back {
            Some(page) => {
                self.set_page(page);
            }
            None => self.refresh(),
        }
    }

    /// Report a viewport intersection change of the sentinel row.
    ///
    /// Returns true if this fired a page bump. Ignored unless the
    /// controller prefetches.
    #[instrument(skip(self))]
    pub fn sentinel_visibility(&self, visible: bool) -> bool {
        if !self.inner.options.prefetch {
            return false;
        }
        let mut state = self.inner.lock();
        let page = state.query.page();
        let total_pages = state.total_pages;
        let busy = state.loading;

        match state.prefetch.on_visibility(visible, page, total_pages, busy) {
            PrefetchDecision::Fire(next) => {
                debug!(next, "sentinel visible, prefetching");
                state.query.apply(&QueryChange::Page(next));
                self.inner.schedule(&mut state, Duration::ZERO);
                true
            }
            PrefetchDecision::Ignore => false,
        }
    }

    /// Index of the row that should be observed for prefetching.
    pub fn sentinel(&self) -> Option<usize> {
        self.inner.lock().prefetch.sentinel()
    }

    /// Current render state.
    pub fn snapshot(&self) -> ListSnapshot<S::Item> {
        self.inner.lock().snapshot()
    }

    /// Receive a new snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<ListSnapshot<S::Item>> {
        self.inner.updates.subscribe()
    }

    /// Wait until no fetch is pending or in flight.
    pub async fn settled(&self) -> ListSnapshot<S::Item> {
        let mut updates = self.subscribe();
        match updates.wait_for(|snapshot| !snapshot.loading).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        }
    }

    /// Cancel the outstanding fetch, as when the screen goes away.
    pub fn close(&self) {
        self.inner.canceller.cancel();
        let mut state = self.inner.lock();
        if state.loading {
            state.loading = false;
            self.inner.publish(&state);
        }
    }
}

impl<S: ListSource> Drop for ListController<S> {
    fn drop(&mut self) {
        self.inner.canceller.cancel();
    }
}

impl<S: ListSource> Inner<S> {
    fn lock(&self) -> MutexGuard<'_, State<S::Item>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: &State<S::Item>) {
        self.updates.send_replace(state.snapshot());
    }

    /// Supersede the current request with a fetch of `state.query`.
    fn schedule(self: &Arc<Self>, state: &mut State<S::Item>, delay: Duration) {
        let token = self.canceller.start_request();
        let query = state.query.clone();
        state.loading = true;
        state.error = None;
        self.publish(state);

        debug!(
            generation = token.generation(),
            page = query.page(),
            delay_ms = delay.as_millis() as u64,
            "scheduling fetch"
        );

        let inner = Arc::clone(self);
        let task_token = token.clone();
        let task = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let outcome = inner.source.fetch(&query).await;
            inner.complete(&task_token, &query, outcome);
        });
        self.canceller.attach(&token, task.abort_handle());
    }

    fn complete(self: &Arc<Self>, token: &RequestToken, query: &ListQuery, outcome: Result<Envelope>) {
        let mut state = self.lock();
        if !token.is_current() {
            debug!(generation = token.generation(), "discarding superseded response");
            return;
        }
        self.canceller.finish(token);

        let result = outcome.and_then(|envelope| {
            envelope
                .normalize(query.page_size())
                .into_result::<S::Item>()
        });

        match result {
            Ok(page) => {
                if self.clamp_past_end(&mut state, query, &page) {
                    return;
                }
                self.apply_page(&mut state, query, page);
            }
            Err(Error::Cancelled) => {
                debug!("fetch cancelled by the source");
                state.loading = false;
            }
            Err(err) => {
                warn!(error = %err, page = query.page(), "list fetch failed");
                let message = err.user_message();
                state.error = Some(if message.is_empty() {
                    DEFAULT_FAILURE_MESSAGE.to_string()
                } else {
                    message
                });
                state.items.clear();
                state.total_pages = 1;
                state.loading = false;
            }
        }

        if self.options.prefetch {
            let count = state.items.len();
            state.prefetch.on_settled(count);
        }
        self.publish(&state);
    }

    /// Replace mode: a page past the end is moved back to the last page.
    fn clamp_past_end(
        self: &Arc<Self>,
        state: &mut State<S::Item>,
        query: &ListQuery,
        page: &ListResult<S::Item>,
    ) -> bool {
        if self.options.accumulate || query.page() <= page.total_pages {
            return false;
        }
        debug!(
            page = query.page(),
            total_pages = page.total_pages,
            "page past the end, clamping"
        );
        state.total_pages = page.total_pages;
        state.query.apply(&QueryChange::Page(page.total_pages));
        self.schedule(state, Duration::ZERO);
        true
    }

    fn apply_page(&self, state: &mut State<S::Item>, query: &ListQuery, page: ListResult<S::Item>) {
        state.total_pages = page.total_pages.max(1);
        state.items = if self.options.accumulate {
            let existing = std::mem::take(&mut state.items);
            merge(existing, page.items, query.page() == 1)
        } else {
            page.items
        };
        state.loading = false;
        state.error = None;
    }
}
