//! FlowSync query layer
//!
//! Generic engines that sit between the API client and whatever renders the
//! admin dashboard:
//!
//! - [`ListQuery`] loads a paginated, filtered board and keeps its state.
//! - [`MutationCommand`] runs a create/update/delete call.
//! - [`LinkEditor`] edits the link list attached to posts.
//!
//! All three report to an injected [`NotificationSink`]. [`Queries`] builds
//! the concrete instance for each board and action.
//!
//! ```rust,no_run
//! use flowsync_core::{ListFilters, DEFAULT_PROJECT_PAGE_SIZE};
//! use flowsync_query::{Queries, TracingSink};
//! use flowsync_sdk::{FlowSyncClient, SdkConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), flowsync_sdk::SdkError> {
//! let client = FlowSyncClient::new(SdkConfig::new("https://api.flowsync.example.com"))?;
//! let queries = Queries::new(client, Arc::new(TracingSink));
//!
//! let board = queries.projects(ListFilters::new(DEFAULT_PROJECT_PAGE_SIZE));
//! board.refetch().await;
//!
//! let delete = queries.delete_project();
//! if delete.invoke(42).await.is_some() {
//!     board.refetch().await;
//! }
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod error;
pub mod links;
pub mod list_query;
pub mod message;
pub mod mutation;
pub mod notify;
pub mod queries;

pub use error::LinkError;
pub use links::LinkEditor;
pub use list_query::{ListFetcher, ListQuery, QueryState};
pub use message::{resolve_message, LIST_FALLBACK_MESSAGE, MUTATION_FALLBACK_MESSAGE};
pub use mutation::{refetch_on_success, MutationCommand, MutationFn, MutationState};
pub use notify::{
    ChannelSink, Notification, NotificationKind, NotificationSink, RecordingSink, TracingSink,
    NOTIFICATION_DURATION,
};
pub use queries::{Queries, ScopedFilters};
