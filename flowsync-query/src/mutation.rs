//! Create, update and delete commands
//!
//! A [`MutationCommand`] wraps one mutating API call. Invoking it never
//! fails: success yields `Some(response)` and a success notification when the
//! server sent a message, failure yields `None` after recording the error and
//! notifying the sink.

use crate::list_query::ListQuery;
use crate::message::{resolve_message, MUTATION_FALLBACK_MESSAGE};
use crate::notify::{Notification, NotificationSink};
use async_trait::async_trait;
use flowsync_sdk::{ApiResponse, SdkResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Performs one mutating request.
#[async_trait]
pub trait MutationFn<A, R>: Send + Sync {
    async fn call(&self, args: A) -> SdkResult<ApiResponse<R>>;
}

#[async_trait]
impl<A, R, F, Fut> MutationFn<A, R> for F
where
    A: Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> Fut + Send + Sync,
    Fut: Future<Output = SdkResult<ApiResponse<R>>> + Send + 'static,
{
    async fn call(&self, args: A) -> SdkResult<ApiResponse<R>> {
        (self)(args).await
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<String>,
}

/// A reusable mutation bound to one API operation.
///
/// Cloning yields another handle sharing the same state.
pub struct MutationCommand<A, R> {
    inner: Arc<Inner<A, R>>,
}

struct Inner<A, R> {
    mutation: Arc<dyn MutationFn<A, R>>,
    sink: Arc<dyn NotificationSink>,
    state: watch::Sender<MutationState>,
    in_flight: AtomicUsize,
}

impl<A, R> Clone for MutationCommand<A, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Counts one pending invocation; the last one out clears `loading`.
struct InFlight<'a> {
    count: &'a AtomicUsize,
    state: &'a watch::Sender<MutationState>,
}

impl<'a> InFlight<'a> {
    fn enter(count: &'a AtomicUsize, state: &'a watch::Sender<MutationState>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        state.send_modify(|state| state.loading = true);
        Self { count, state }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.state.send_modify(|state| state.loading = false);
        }
    }
}

impl<A, R> MutationCommand<A, R>
where
    A: Send + 'static,
    R: Send + 'static,
{
    pub fn new(
        mutation: impl MutationFn<A, R> + 'static,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        let (state, _) = watch::channel(MutationState::default());

        Self {
            inner: Arc::new(Inner {
                mutation: Arc::new(mutation),
                sink,
                state,
                in_flight: AtomicUsize::new(0),
            }),
        }
    }

    pub fn state(&self) -> MutationState {
        self.inner.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.inner.state.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    /// Run the mutation.
    ///
    /// Returns `None` on failure. A successful response with neither data
    /// nor message is still `Some`.
    pub async fn invoke(&self, args: A) -> Option<ApiResponse<R>> {
        let inner = &self.inner;
        let guard = InFlight::enter(&inner.in_flight, &inner.state);

        let result = inner.mutation.call(args).await;

        match result {
            Ok(response) => {
                inner.state.send_modify(|state| state.error = None);
                drop(guard);

                match response.message() {
                    Some(message) => inner.sink.show(Notification::success(message)),
                    None => debug!("mutation succeeded without a message"),
                }
                Some(response)
            }
            Err(err) => {
                let message = resolve_message(&err, MUTATION_FALLBACK_MESSAGE);
                warn!(
                    status = ?err.status_code(),
                    request_id = ?err.request_id(),
                    error = %err,
                    "mutation failed"
                );

                inner
                    .state
                    .send_modify(|state| state.error = Some(message.clone()));
                drop(guard);

                inner.sink.show(Notification::error(message));
                None
            }
        }
    }
}

/// Invoke `command` and refetch `query` once it succeeds.
///
/// The query is left alone when the mutation fails.
pub async fn refetch_on_success<A, R, T, P>(
    command: &MutationCommand<A, R>,
    args: A,
    query: &ListQuery<T, P>,
) -> Option<ApiResponse<R>>
where
    A: Send + 'static,
    R: Send + 'static,
    T: DeserializeOwned + Send + Sync + 'static,
    P: Clone + PartialEq + Send + Sync + 'static,
{
    let response = command.invoke(args).await?;
    query.refetch().await;
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotificationKind, RecordingSink};
    use flowsync_sdk::SdkError;
    use pretty_assertions::assert_eq;
    use std::future::{ready, Ready};

    fn respond(
        message: Option<&'static str>,
    ) -> impl Fn(u64) -> Ready<SdkResult<ApiResponse<u64>>> + Send + Sync {
        move |id| {
            ready(Ok(ApiResponse {
                data: Some(id),
                message: message.map(str::to_string),
            }))
        }
    }

    #[tokio::test]
    async fn test_success_with_message_notifies() {
        let sink = Arc::new(RecordingSink::new());
        let command = MutationCommand::new(respond(Some("Notice deleted.")), sink.clone());

        let response = command.invoke(7).await;

        assert_eq!(response.and_then(|r| r.data), Some(7));
        assert_eq!(command.state(), MutationState::default());
        let notification = sink.last().unwrap();
        assert_eq!(notification.kind, NotificationKind::Success);
        assert_eq!(notification.description, "Notice deleted.");
    }

    #[tokio::test]
    async fn test_success_without_message_is_silent() {
        let sink = Arc::new(RecordingSink::new());
        let command = MutationCommand::new(respond(None), sink.clone());

        assert!(command.invoke(1).await.is_some());
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_is_still_some() {
        let sink = Arc::new(RecordingSink::new());
        let command: MutationCommand<(), ()> =
            MutationCommand::new(|_: ()| ready(Ok(ApiResponse::empty())), sink.clone());

        let response = command.invoke(()).await;

        assert_eq!(response, Some(ApiResponse::empty()));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_failure_returns_none_and_records_error() {
        let sink = Arc::new(RecordingSink::new());
        let command: MutationCommand<u64, ()> = MutationCommand::new(
            |_: u64| {
                ready(Err(SdkError::from_response(
                    409,
                    r#"{"message": "Organization still has members."}"#,
                    None,
                )))
            },
            sink.clone(),
        );

        let response = command.invoke(4).await;

        assert!(response.is_none());
        let state = command.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Organization still has members."));

        let notification = sink.last().unwrap();
        assert_eq!(notification.title, "Request failed");
        assert_eq!(notification.error, state.error);
    }

    #[tokio::test]
    async fn test_success_clears_error() {
        let sink = Arc::new(RecordingSink::new());
        let command: MutationCommand<bool, ()> = MutationCommand::new(
            |fail: bool| {
                ready(if fail {
                    Err(SdkError::Timeout(30))
                } else {
                    Ok(ApiResponse::empty())
                })
            },
            sink,
        );

        assert!(command.invoke(true).await.is_none());
        assert!(command.state().error.is_some());

        assert!(command.invoke(false).await.is_some());
        assert!(command.state().error.is_none());
    }

    #[tokio::test]
    async fn test_loading_is_set_while_in_flight() {
        let sink = Arc::new(RecordingSink::new());
        let (release, gate) = tokio::sync::oneshot::channel::<()>();
        let gate = Arc::new(tokio::sync::Mutex::new(Some(gate)));
        let command: MutationCommand<(), ()> = MutationCommand::new(
            move |_: ()| {
                let gate = gate.clone();
                async move {
                    if let Some(gate) = gate.lock().await.take() {
                        let _ = gate.await;
                    }
                    Ok(ApiResponse::empty())
                }
            },
            sink,
        );

        let pending = tokio::spawn({
            let command = command.clone();
            async move { command.invoke(()).await }
        });
        let mut receiver = command.subscribe();
        receiver.wait_for(|state| state.loading).await.unwrap();
        assert!(command.is_loading());

        release.send(()).unwrap();
        assert!(pending.await.unwrap().is_some());
        assert!(!command.is_loading());
    }
}
