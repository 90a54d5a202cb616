//! Behaviour of the list controller against in-memory sources.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use sporta_core::error::ApiError;
use sporta_core::list::SEARCH_DEBOUNCE;
use sporta_core::{
    ControllerOptions, Envelope, Error, Identified, ListController, ListQuery, ListSource, Result,
};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Row {
    id: u64,
}

impl Identified for Row {
    type Id = u64;

    fn id(&self) -> u64 {
        self.id
    }
}

fn ids(rows: &[Row]) -> Vec<u64> {
    rows.iter().map(|r| r.id).collect()
}

fn page_of(page: u32, page_size: u32, total_items: u64, ids: &[u64]) -> Envelope {
    let results: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
    Envelope::ok(json!({
        "page": page,
        "page_size": page_size,
        "total_items": total_items,
        "results": results,
    }))
}

type Responder = dyn Fn(&ListQuery) -> Result<Envelope> + Send + Sync;

/// Answers every fetch immediately and records the queries.
struct Scripted {
    calls: Arc<Mutex<Vec<ListQuery>>>,
    respond: Box<Responder>,
}

impl Scripted {
    fn new(respond: impl Fn(&ListQuery) -> Result<Envelope> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::default(),
            respond: Box::new(respond),
        }
    }

    /// Fifty rows, ten per page, ids `page * 100 + n`.
    fn paged() -> Self {
        Self::new(|query| {
            let page = query.page();
            let first = u64::from(page) * 100;
            Ok(page_of(page, 10, 50, &[first + 1, first + 2]))
        })
    }

    fn calls(&self) -> Vec<ListQuery> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListSource for Scripted {
    type Item = Row;

    async fn fetch(&self, query: &ListQuery) -> Result<Envelope> {
        self.calls.lock().unwrap().push(query.clone());
        (self.respond)(query)
    }
}

type Reply = oneshot::Sender<Result<Envelope>>;

/// Holds every fetch until the test answers it.
#[derive(Default)]
struct Gated {
    pending: Arc<Mutex<Vec<(ListQuery, Option<Reply>)>>>,
}

impl Gated {
    fn len(&self) -> usize {
        self.pending.lock().unwrap().len()
    }

    fn query(&self, index: usize) -> ListQuery {
        self.pending.lock().unwrap()[index].0.clone()
    }

    /// Answer fetch `index`. Returns false if it was already abandoned.
    fn reply(&self, index: usize, outcome: Result<Envelope>) -> bool {
        let reply = self.pending.lock().unwrap()[index].1.take();
        reply.is_some_and(|tx| tx.send(outcome).is_ok())
    }
}

#[async_trait]
impl ListSource for Gated {
    type Item = Row;

    async fn fetch(&self, query: &ListQuery) -> Result<Envelope> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().push((query.clone(), Some(tx)));
        rx.await.unwrap_or(Err(Error::Cancelled))
    }
}

async fn wait_for_fetches(source: &Gated, count: usize) {
    for _ in 0..1000 {
        if source.len() >= count {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("expected {count} fetches, saw {}", source.len());
}

async fn spin() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn mount_fetches_first_page_once() {
    let controller = ListController::new(Scripted::paged(), ControllerOptions::admin_table(10));
    controller.mount();
    controller.mount();

    let snapshot = controller.settled().await;
    assert_eq!(ids(&snapshot.items), vec![101, 102]);
    assert_eq!(snapshot.total_pages, 5);
    assert_eq!(snapshot.page, 1);
    assert!(snapshot.error.is_none());
    assert_eq!(controller.source().calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn filter_change_returns_to_first_page() {
    let controller = ListController::new(Scripted::paged(), ControllerOptions::admin_table(10));
    controller.mount();
    controller.settled().await;

    assert!(controller.go_to_page(3));
    assert_eq!(controller.settled().await.page, 3);

    assert!(controller.set_filter("sport", "Football"));
    assert_eq!(controller.snapshot().page, 1);

    let snapshot = controller.settled().await;
    assert_eq!(ids(&snapshot.items), vec![101, 102]);

    let last = controller.source().calls().pop().unwrap();
    assert_eq!(last.page(), 1);
    assert_eq!(last.filter("sport"), Some("Football"));
}

#[tokio::test(start_paused = true)]
async fn search_from_later_page_fetches_page_one() {
    let controller = ListController::new(Scripted::paged(), ControllerOptions::admin_table(10));
    controller.mount();
    controller.settled().await;
    controller.go_to_page(3);
    controller.settled().await;

    controller.set_search("arena");
    controller.settled().await;

    let last = controller.source().calls().pop().unwrap();
    assert_eq!(last.page(), 1);
    assert_eq!(last.search(), "arena");
}

#[tokio::test(start_paused = true)]
async fn all_filter_is_omitted() {
    let controller = ListController::new(Scripted::paged(), ControllerOptions::admin_table(10));
    controller.mount();
    controller.settled().await;

    controller.set_filter("city", "Tehran");
    controller.settled().await;
    controller.set_filter("city", "All");
    controller.settled().await;

    let last = controller.source().calls().pop().unwrap();
    assert!(last.params().iter().all(|(key, _)| key != "city"));
}

#[tokio::test(start_paused = true)]
async fn search_is_debounced_to_the_last_edit() {
    let controller = ListController::new(Scripted::paged(), ControllerOptions::admin_table(10));
    controller.mount();
    controller.settled().await;

    controller.set_search("a");
    controller.set_search("ar");
    controller.set_search("are");

    tokio::time::advance(SEARCH_DEBOUNCE - Duration::from_millis(1)).await;
    spin().await;
    assert_eq!(controller.source().calls().len(), 1);
    assert!(controller.snapshot().loading);

    controller.settled().await;
    let calls = controller.source().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].search(), "are");
}

#[tokio::test(start_paused = true)]
async fn clearing_search_fetches_without_delay() {
    let controller = ListController::new(Scripted::paged(), ControllerOptions::admin_table(10));
    controller.mount();
    controller.settled().await;

    controller.set_search("foo");
    controller.set_search("");
    spin().await;

    let calls = controller.source().calls();
    assert_eq!(calls.len(), 2, "the pending search must never be sent");
    assert_eq!(calls[1].search(), "");
    assert_eq!(calls[1].page(), 1);
    assert!(!controller.snapshot().loading);
}

#[tokio::test(start_paused = true)]
async fn clearing_search_on_later_page_returns_to_first_page() {
    let source = Scripted::new(|query| match query.search() {
        "arena" => Ok(page_of(query.page(), 10, 30, &[21, 22])),
        _ => Ok(page_of(1, 10, 2, &[1, 2])),
    });
    let query = ListQuery::new(10).with_search("arena").with_page(2);
    let controller = ListController::with_query(source, ControllerOptions::admin_table(10), query);
    controller.mount();

    let snapshot = controller.settled().await;
    assert_eq!(snapshot.page, 2);
    assert_eq!(ids(&snapshot.items), vec![21, 22]);

    controller.set_search("");
    let snapshot = controller.settled().await;

    let calls = controller.source().calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1].page(), 1);
    assert_eq!(calls[1].search(), "");
    assert_eq!(ids(&snapshot.items), vec![1, 2]);
    assert_eq!(snapshot.total_pages, 1);
    assert_eq!(snapshot.page, 1);
}

#[tokio::test(start_paused = true)]
async fn mount_starts_on_requested_page() {
    let query = ListQuery::new(10).with_page(3);
    let controller =
        ListController::with_query(Scripted::paged(), ControllerOptions::admin_table(10), query);
    controller.mount();

    let snapshot = controller.settled().await;
    let calls = controller.source().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].page(), 3);
    assert_eq!(ids(&snapshot.items), vec![301, 302]);
}

#[tokio::test(start_paused = true)]
async fn only_latest_response_is_applied() {
    let controller = ListController::new(Gated::default(), ControllerOptions::admin_table(10));
    controller.mount();
    wait_for_fetches(controller.source(), 1).await;

    controller.set_filter("status", "pending");
    wait_for_fetches(controller.source(), 2).await;
    assert_eq!(controller.source().query(1).filter("status"), Some("pending"));

    controller.source().reply(1, Ok(page_of(1, 10, 1, &[20])));
    controller.source().reply(0, Ok(page_of(1, 10, 1, &[10])));

    let snapshot = controller.settled().await;
    spin().await;
    assert_eq!(ids(&controller.snapshot().items), vec![20]);
    assert_eq!(ids(&snapshot.items), vec![20]);
}

#[tokio::test(start_paused = true)]
async fn late_reply_of_superseded_request_is_dropped() {
    let controller = ListController::new(Gated::default(), ControllerOptions::admin_table(10));
    controller.mount();
    wait_for_fetches(controller.source(), 1).await;

    controller.set_page(2);
    wait_for_fetches(controller.source(), 2).await;
    spin().await;

    // The first request was aborted when the second started.
    assert!(!controller.source().reply(0, Ok(page_of(1, 10, 30, &[1, 2, 3]))));
    spin().await;
    assert!(controller.snapshot().items.is_empty());
    assert!(controller.snapshot().loading);

    assert!(controller.source().reply(1, Ok(page_of(2, 10, 30, &[11, 12]))));
    let snapshot = controller.settled().await;
    assert_eq!(ids(&snapshot.items), vec![11, 12]);
    assert_eq!(snapshot.page, 2);
}

#[tokio::test(start_paused = true)]
async fn failure_clears_rows_and_sets_banner() {
    let failing = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&failing);
    let source = Scripted::new(move |_| {
        if *flag.lock().unwrap() {
            Err(ApiError::new(Some(500), Some("Server exploded".into())).into())
        } else {
            Ok(page_of(1, 10, 30, &[1, 2]))
        }
    });

    let controller = ListController::new(source, ControllerOptions::admin_table(10));
    controller.mount();
    assert_eq!(controller.settled().await.total_pages, 3);

    *failing.lock().unwrap() = true;
    controller.refresh();
    let snapshot = controller.settled().await;
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total_pages, 1);
    assert_eq!(snapshot.error.as_deref(), Some("Server exploded"));

    *failing.lock().unwrap() = false;
    controller.refresh();
    assert!(controller.snapshot().error.is_none());
    assert_eq!(controller.settled().await.items.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_envelope_uses_its_message_or_fallback() {
    let controller = ListController::new(
        Scripted::new(|_| Ok(Envelope::failure("Access denied."))),
        ControllerOptions::admin_table(10),
    );
    controller.mount();
    assert_eq!(controller.settled().await.error.as_deref(), Some("Access denied."));

    let controller = ListController::new(
        Scripted::new(|_| Ok(Envelope::failure(""))),
        ControllerOptions::admin_table(10),
    );
    controller.mount();
    assert_eq!(controller.settled().await.error.as_deref(), Some("Request failed."));
}

#[tokio::test(start_paused = true)]
async fn cancelled_fetch_is_not_reported() {
    let controller = ListController::new(
        Scripted::new(|_| Err(Error::Cancelled)),
        ControllerOptions::admin_table(10),
    );
    controller.mount();
    let snapshot = controller.settled().await;
    assert!(snapshot.error.is_none());
    assert!(!snapshot.loading);
}

#[tokio::test(start_paused = true)]
async fn page_past_the_end_is_clamped() {
    let controller = ListController::new(
        Scripted::new(|query| Ok(page_of(query.page(), 10, 12, &[u64::from(query.page())]))),
        ControllerOptions::admin_table(10),
    );
    controller.mount();
    controller.settled().await;

    controller.set_page(5);
    let snapshot = controller.settled().await;
    assert_eq!(snapshot.page, 2);
    assert_eq!(snapshot.total_pages, 2);
    assert_eq!(ids(&snapshot.items), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn deleting_last_row_steps_back_a_page() {
    let controller = ListController::new(
        Scripted::new(|query| match query.page() {
            1 => Ok(page_of(1, 10, 11, &[1, 2, 3])),
            _ => Ok(page_of(2, 10, 11, &[11])),
        }),
        ControllerOptions::admin_table(10),
    );
    controller.mount();
    controller.settled().await;
    controller.go_to_page(2);
    assert_eq!(ids(&controller.settled().await.items), vec![11]);

    controller.item_removed();
    let snapshot = controller.settled().await;
    assert_eq!(snapshot.page, 1);
    assert_eq!(ids(&snapshot.items), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn carousel_accumulates_without_duplicates() {
    let source = Scripted::new(|query| match query.page() {
        1 => Ok(page_of(1, 3, 8, &[1, 2, 3])),
        2 => Ok(page_of(2, 3, 8, &[3, 4, 5])),
        _ => Ok(page_of(3, 3, 8, &[5, 6])),
    });
    let controller = ListController::new(source, ControllerOptions::carousel().with_page_size(3));
    controller.mount();
    controller.settled().await;
    assert_eq!(controller.sentinel(), Some(0));

    assert!(controller.sentinel_visibility(true));
    assert_eq!(ids(&controller.settled().await.items), vec![1, 2, 3, 4, 5]);
    assert_eq!(controller.sentinel(), Some(2));

    assert!(controller.sentinel_visibility(true));
    let snapshot = controller.settled().await;
    assert_eq!(ids(&snapshot.items), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(snapshot.page, 3);

    // Last page: the sentinel no longer fires.
    controller.sentinel_visibility(false);
    assert!(!controller.sentinel_visibility(true));
    assert_eq!(controller.source().calls().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn prefetch_fires_once_while_busy() {
    let controller = ListController::new(Gated::default(), ControllerOptions::carousel());
    controller.mount();
    wait_for_fetches(controller.source(), 1).await;
    controller
        .source()
        .reply(0, Ok(page_of(1, 6, 18, &[1, 2, 3, 4, 5, 6])));
    controller.settled().await;

    assert!(controller.sentinel_visibility(true));
    assert!(!controller.sentinel_visibility(false));
    assert!(!controller.sentinel_visibility(true));
    wait_for_fetches(controller.source(), 2).await;
    spin().await;
    assert_eq!(controller.source().len(), 2);
    assert_eq!(controller.source().query(1).page(), 2);
}

#[tokio::test(start_paused = true)]
async fn search_resets_carousel() {
    let source = Scripted::new(|query| {
        if query.search().is_empty() {
            Ok(page_of(query.page(), 3, 9, &[u64::from(query.page()) * 10]))
        } else {
            Ok(page_of(1, 3, 1, &[99]))
        }
    });
    let controller = ListController::new(source, ControllerOptions::carousel().with_page_size(3));
    controller.mount();
    controller.settled().await;
    controller.sentinel_visibility(true);
    assert_eq!(ids(&controller.settled().await.items), vec![10, 20]);

    controller.set_search("pulse");
    let snapshot = controller.settled().await;
    assert_eq!(ids(&snapshot.items), vec![99]);
    assert_eq!(snapshot.page, 1);
}

#[tokio::test(start_paused = true)]
async fn close_abandons_outstanding_fetch() {
    let controller = ListController::new(Gated::default(), ControllerOptions::admin_table(10));
    controller.mount();
    wait_for_fetches(controller.source(), 1).await;

    controller.close();
    assert!(!controller.snapshot().loading);
    spin().await;

    controller.source().reply(0, Ok(page_of(1, 10, 1, &[1])));
    spin().await;
    assert!(controller.snapshot().items.is_empty());
}

#[tokio::test(start_paused = true)]
async fn drop_cancels_outstanding_fetch() {
    let controller = ListController::new(Gated::default(), ControllerOptions::admin_table(10));
    controller.mount();
    wait_for_fetches(controller.source(), 1).await;

    let mut updates = controller.subscribe();
    drop(controller);

    let closed = tokio::time::timeout(Duration::from_secs(1), updates.changed()).await;
    assert!(matches!(closed, Ok(Err(_))), "the fetch task must release the controller");
}

#[tokio::test(start_paused = true)]
async fn unmounted_changes_only_update_the_query() {
    let controller = ListController::with_query(
        Scripted::paged(),
        ControllerOptions::admin_table(10),
        ListQuery::new(10).with_filter("role", "venue-manager"),
    );
    controller.set_search("sara");
    spin().await;
    assert!(controller.source().calls().is_empty());

    controller.mount();
    controller.settled().await;
    let calls = controller.source().calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].search(), "sara");
    assert_eq!(calls[0].filter("role"), Some("venue-manager"));
}
