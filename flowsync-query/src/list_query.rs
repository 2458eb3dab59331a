//! Paginated list queries
//!
//! A [`ListQuery`] owns the state of one board: the decoded collection, its
//! pagination metadata, a loading flag and the last error message. It fetches
//! through a [`ListFetcher`], picks the collection out of the response
//! envelope by key, and reports failures to its [`NotificationSink`].
//!
//! Every fetch is tagged with a request id taken from a monotonically
//! increasing counter. Only the completion carrying the latest id is applied;
//! an older response that arrives late is discarded without touching the
//! state or notifying anyone.

use crate::message::{resolve_message, LIST_FALLBACK_MESSAGE};
use crate::notify::{Notification, NotificationSink};
use async_trait::async_trait;
use flowsync_core::PaginationInfo;
use flowsync_sdk::{ListEnvelope, SdkResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Fetches one page of a list endpoint.
#[async_trait]
pub trait ListFetcher<P>: Send + Sync {
    async fn fetch(&self, params: P) -> SdkResult<ListEnvelope>;
}

#[async_trait]
impl<P, F, Fut> ListFetcher<P> for F
where
    P: Send + 'static,
    F: Fn(P) -> Fut + Send + Sync,
    Fut: Future<Output = SdkResult<ListEnvelope>> + Send + 'static,
{
    async fn fetch(&self, params: P) -> SdkResult<ListEnvelope> {
        (self)(params).await
    }
}

/// Observable state of a list query.
///
/// `data` stays `None` until the first successful fetch. A failed fetch
/// keeps whatever `data` and `pagination` were already there.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryState<T> {
    pub data: Option<Vec<T>>,
    pub pagination: Option<PaginationInfo>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QueryState<T> {
    fn default() -> Self {
        Self {
            data: None,
            pagination: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> QueryState<T> {
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// The loaded items, or an empty slice before the first success.
    pub fn items(&self) -> &[T] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// A paginated, filtered collection request bound to one endpoint.
///
/// Cloning yields another handle to the same query.
pub struct ListQuery<T, P> {
    inner: Arc<Inner<T, P>>,
}

struct Inner<T, P> {
    key: String,
    fetcher: Arc<dyn ListFetcher<P>>,
    sink: Arc<dyn NotificationSink>,
    state: watch::Sender<QueryState<T>>,
    params: watch::Sender<P>,
    latest_request: AtomicU64,
    disposed: AtomicBool,
}

impl<T, P> Clone for ListQuery<T, P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, P> ListQuery<T, P>
where
    T: DeserializeOwned + Send + Sync + 'static,
    P: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create a query that has not fetched anything yet.
    ///
    /// `key` names the collection inside the response's `data` object.
    pub fn new(
        fetcher: impl ListFetcher<P> + 'static,
        key: impl Into<String>,
        params: P,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (state, _) = watch::channel(QueryState::default());
        let (params, _) = watch::channel(params);

        Self {
            inner: Arc::new(Inner {
                key: key.into(),
                fetcher: Arc::new(fetcher),
                sink,
                state,
                params,
                latest_request: AtomicU64::new(0),
                disposed: AtomicBool::new(false),
            }),
        }
    }

    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> QueryState<T>
    where
        T: Clone,
    {
        self.inner.state.borrow().clone()
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<QueryState<T>> {
        self.inner.state.subscribe()
    }

    /// The parameters the next fetch will use.
    pub fn params(&self) -> P {
        self.inner.params.borrow().clone()
    }

    /// Fetch again with the current parameters.
    pub async fn refetch(&self) {
        let params = self.params();
        self.run(params).await;
    }

    /// Replace the parameters, fetching when they differ by value or when
    /// nothing has been loaded yet.
    ///
    /// Returns whether a fetch was issued.
    pub async fn set_params(&self, params: P) -> bool {
        let changed = self.inner.params.send_if_modified(|current| {
            if *current == params {
                false
            } else {
                *current = params.clone();
                true
            }
        });
        let never_loaded = self.inner.state.borrow().data.is_none();

        if !changed && !never_loaded {
            debug!(key = %self.inner.key, "parameters unchanged, skipping fetch");
            return false;
        }

        self.run(params).await;
        true
    }

    /// Stop fetching and applying results. Later `refetch`/`set_params` calls
    /// issue no request; responses still in flight are dropped when they
    /// arrive.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.load(Ordering::SeqCst)
    }

    async fn run(&self, params: P) {
        let inner = &self.inner;
        if self.is_disposed() {
            debug!(key = %inner.key, "query disposed, not fetching");
            return;
        }
        let request_id = inner.latest_request.fetch_add(1, Ordering::SeqCst) + 1;

        inner.state.send_modify(|state| state.loading = true);
        debug!(key = %inner.key, request_id, "fetching list");

        let result = inner
            .fetcher
            .fetch(params)
            .await
            .and_then(|envelope| envelope.select::<T>(&inner.key));

        if self.is_disposed() {
            debug!(key = %inner.key, request_id, "query disposed, dropping response");
            return;
        }
        if inner.latest_request.load(Ordering::SeqCst) != request_id {
            debug!(key = %inner.key, request_id, "response superseded, dropping");
            return;
        }

        match result {
            Ok(page) => {
                debug!(
                    key = %inner.key,
                    request_id,
                    items = page.collection.len(),
                    "list loaded"
                );
                inner.state.send_modify(|state| {
                    state.data = Some(page.collection);
                    state.pagination = page.pagination;
                    state.error = None;
                    state.loading = false;
                });
            }
            Err(err) => {
                let message = resolve_message(&err, LIST_FALLBACK_MESSAGE);
                warn!(
                    key = %inner.key,
                    request_id,
                    status = ?err.status_code(),
                    server_request_id = ?err.request_id(),
                    error = %err,
                    "list request failed"
                );

                inner.state.send_modify(|state| {
                    state.error = Some(message.clone());
                    state.loading = false;
                });
                inner.sink.show(Notification::error(message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;
    use flowsync_sdk::SdkError;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: u32,
    }

    fn page_of(ids: &[u32], current_page: u32) -> ListEnvelope {
        let items: Vec<_> = ids.iter().map(|id| json!({ "id": id })).collect();
        serde_json::from_value(json!({
            "data": {
                "items": items,
                "meta": {
                    "currentPage": current_page,
                    "pageSize": 10,
                    "totalPages": 3,
                    "totalCount": 25
                }
            }
        }))
        .unwrap()
    }

    fn counting_fetcher(
        calls: Arc<AtomicUsize>,
    ) -> impl Fn(u32) -> std::future::Ready<SdkResult<ListEnvelope>> + Send + Sync {
        move |page| {
            calls.fetch_add(1, Ordering::SeqCst);
            std::future::ready(Ok(page_of(&[page * 10, page * 10 + 1], page)))
        }
    }

    #[tokio::test]
    async fn test_initial_state_is_empty() {
        let sink = Arc::new(RecordingSink::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let query: ListQuery<Item, u32> =
            ListQuery::new(counting_fetcher(calls.clone()), "items", 1, sink);

        let state = query.state();
        assert_eq!(state, QueryState::default());
        assert!(!state.is_loaded());
        assert!(state.items().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_refetch_applies_collection_and_meta() {
        let sink = Arc::new(RecordingSink::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let query: ListQuery<Item, u32> =
            ListQuery::new(counting_fetcher(calls.clone()), "items", 2, sink.clone());

        query.refetch().await;

        let state = query.state();
        assert_eq!(state.data, Some(vec![Item { id: 20 }, Item { id: 21 }]));
        assert_eq!(state.pagination.map(|p| p.current_page), Some(2));
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_set_params_skips_equal_values_once_loaded() {
        let sink = Arc::new(RecordingSink::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let query: ListQuery<Item, u32> =
            ListQuery::new(counting_fetcher(calls.clone()), "items", 1, sink);

        assert!(query.set_params(1).await);
        assert!(!query.set_params(1).await);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(query.set_params(3).await);
        assert_eq!(query.params(), 3);
        assert_eq!(query.state().items()[0], Item { id: 30 });
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let sink = Arc::new(RecordingSink::new());
        let fail = Arc::new(AtomicBool::new(false));
        let fetcher = {
            let fail = fail.clone();
            move |page: u32| {
                let result = if fail.load(Ordering::SeqCst) {
                    Err(SdkError::from_response(
                        500,
                        r#"{"message": "Database unavailable."}"#,
                        None,
                    ))
                } else {
                    Ok(page_of(&[1], page))
                };
                std::future::ready(result)
            }
        };
        let query: ListQuery<Item, u32> = ListQuery::new(fetcher, "items", 1, sink.clone());

        query.refetch().await;
        let loaded = query.state();

        fail.store(true, Ordering::SeqCst);
        query.refetch().await;
        let failed = query.state();

        assert_eq!(failed.data, loaded.data);
        assert_eq!(failed.pagination, loaded.pagination);
        assert_eq!(failed.error.as_deref(), Some("Database unavailable."));
        assert!(!failed.loading);

        let notification = sink.last().unwrap();
        assert_eq!(notification.title, "Request failed");
        assert_eq!(notification.error.as_deref(), Some("Database unavailable."));
    }

    #[tokio::test]
    async fn test_missing_collection_key_is_a_failure() {
        let sink = Arc::new(RecordingSink::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let query: ListQuery<Item, u32> =
            ListQuery::new(counting_fetcher(calls), "members", 1, sink.clone());

        query.refetch().await;

        let state = query.state();
        assert!(state.data.is_none());
        assert_eq!(
            state.error.as_deref(),
            Some("Response has no collection named 'members'")
        );
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let sink = Arc::new(RecordingSink::new());
        let fail = Arc::new(AtomicBool::new(true));
        let fetcher = {
            let fail = fail.clone();
            move |page: u32| {
                let result = if fail.load(Ordering::SeqCst) {
                    Err(SdkError::Timeout(30))
                } else {
                    Ok(page_of(&[7], page))
                };
                std::future::ready(result)
            }
        };
        let query: ListQuery<Item, u32> = ListQuery::new(fetcher, "items", 1, sink);

        query.refetch().await;
        assert!(query.state().error.is_some());

        fail.store(false, Ordering::SeqCst);
        query.refetch().await;
        let state = query.state();
        assert!(state.error.is_none());
        assert_eq!(state.items(), &[Item { id: 7 }]);
    }

    #[tokio::test]
    async fn test_disposed_query_ignores_results() {
        let sink = Arc::new(RecordingSink::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let query: ListQuery<Item, u32> =
            ListQuery::new(counting_fetcher(calls.clone()), "items", 1, sink);

        query.refetch().await;
        let loaded = query.state();
        query.dispose();
        query.refetch().await;
        query.set_params(2).await;

        assert!(query.is_disposed());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let state = query.state();
        assert!(!state.loading);
        assert_eq!(state, loaded);
    }

    #[tokio::test]
    async fn test_disposed_before_first_fetch_never_requests() {
        let sink = Arc::new(RecordingSink::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let query: ListQuery<Item, u32> =
            ListQuery::new(counting_fetcher(calls.clone()), "items", 1, sink);

        query.dispose();
        query.refetch().await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(!query.state().loading);
        assert!(query.state().data.is_none());
    }

    #[tokio::test]
    async fn test_previous_page_stays_visible_while_loading() {
        let sink = Arc::new(RecordingSink::new());
        let gate = Arc::new(tokio::sync::Notify::new());
        let fetcher = {
            let gate = gate.clone();
            move |page: u32| {
                let gate = gate.clone();
                async move {
                    if page == 2 {
                        gate.notified().await;
                    }
                    Ok(page_of(&[page], page))
                }
            }
        };
        let query: ListQuery<Item, u32> = ListQuery::new(fetcher, "items", 1, sink.clone());
        query.refetch().await;

        let pending = tokio::spawn({
            let query = query.clone();
            async move { query.set_params(2).await }
        });
        let mut receiver = query.subscribe();
        let in_flight = receiver.wait_for(|state| state.loading).await.unwrap().clone();

        assert_eq!(in_flight.data, Some(vec![Item { id: 1 }]));
        assert_eq!(in_flight.pagination.map(|p| p.current_page), Some(1));

        gate.notify_one();
        assert!(pending.await.unwrap());
        let state = query.state();
        assert!(!state.loading);
        assert_eq!(state.items(), &[Item { id: 2 }]);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_see_loading_then_result() {
        let sink = Arc::new(RecordingSink::new());
        let calls = Arc::new(AtomicUsize::new(0));
        let query: ListQuery<Item, u32> =
            ListQuery::new(counting_fetcher(calls), "items", 1, sink);
        let receiver = query.subscribe();

        query.refetch().await;

        assert!(receiver.has_changed().unwrap());
        assert!(receiver.borrow().is_loaded());
    }
}
