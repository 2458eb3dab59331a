//! Notices resource client

use crate::client::HttpClient;
use crate::envelope::{ApiResponse, ListEnvelope, ResultEnvelope};
use crate::error::SdkResult;
use flowsync_core::{ListFilters, Notice, NoticeInput};
use std::sync::Arc;
use validator::Validate;

/// Collection key of `GET /notices`.
pub const NOTICES_KEY: &str = "notices";

/// Client for notice operations
#[derive(Debug, Clone)]
pub struct NoticesClient {
    client: Arc<HttpClient>,
}

impl NoticesClient {
    /// Create a new notices client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List notices (`keyword`, `category`, `isDeleted`, paging)
    pub async fn list(&self, filters: &ListFilters) -> SdkResult<ListEnvelope> {
        self.client.list("/notices", filters).await
    }

    /// List notices and decode the page
    pub async fn list_page(&self, filters: &ListFilters) -> SdkResult<ResultEnvelope<Notice>> {
        self.list(filters).await?.select(NOTICES_KEY)
    }

    /// Read one notice
    pub async fn get(&self, id: u64) -> SdkResult<ApiResponse<Notice>> {
        self.client.get(&format!("/notices/{}", id)).await
    }

    /// Publish a notice
    pub async fn create(&self, input: NoticeInput) -> SdkResult<ApiResponse<()>> {
        input.validate()?;
        self.client.post("/notices", input).await
    }

    /// Replace a notice's content
    pub async fn edit(&self, id: u64, input: NoticeInput) -> SdkResult<ApiResponse<()>> {
        input.validate()?;
        self.client.put(&format!("/notices/{}", id), input).await
    }

    /// Delete a notice
    pub async fn delete(&self, id: u64) -> SdkResult<ApiResponse<()>> {
        self.client.delete(&format!("/notices/{}", id)).await
    }
}
