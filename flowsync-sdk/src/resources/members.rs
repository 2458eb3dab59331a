//! Members resource client

use super::DeletionReason;
use crate::client::HttpClient;
use crate::envelope::{ApiResponse, ListEnvelope, ResultEnvelope};
use crate::error::SdkResult;
use flowsync_core::{
    ListFilters, Member, MemberInput, MemberPatch, ParticipatingProject, ResourceRef,
};
use std::sync::Arc;
use validator::Validate;

/// Collection key of `GET /members`.
pub const MEMBERS_KEY: &str = "members";
/// Collection key of `GET /members/{id}/projects`.
pub const MEMBER_PROJECTS_KEY: &str = "dtoList";

/// Client for member operations
#[derive(Debug, Clone)]
pub struct MembersClient {
    client: Arc<HttpClient>,
}

impl MembersClient {
    /// Create a new members client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List members (`keyword`, `role`, `status`, paging)
    pub async fn list(&self, filters: &ListFilters) -> SdkResult<ListEnvelope> {
        self.client.list("/members", filters).await
    }

    /// List members and decode the page
    pub async fn list_page(&self, filters: &ListFilters) -> SdkResult<ResultEnvelope<Member>> {
        self.list(filters).await?.select(MEMBERS_KEY)
    }

    /// List projects a member takes part in (`keyword`, `managementStep`, paging)
    pub async fn projects(&self, member_id: u64, filters: &ListFilters) -> SdkResult<ListEnvelope> {
        self.client
            .list(&format!("/members/{}/projects", member_id), filters)
            .await
    }

    /// List a member's projects and decode the page
    pub async fn projects_page(
        &self,
        member_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ResultEnvelope<ParticipatingProject>> {
        self.projects(member_id, filters)
            .await?
            .select(MEMBER_PROJECTS_KEY)
    }

    /// Register a member
    pub async fn create(&self, input: MemberInput) -> SdkResult<ApiResponse<ResourceRef>> {
        input.validate()?;
        self.client.post("/members", input).await
    }

    /// Update some of a member's fields
    pub async fn update(&self, id: u64, patch: MemberPatch) -> SdkResult<ApiResponse<()>> {
        self.client
            .patch(&format!("/members/{}", id), Some(patch))
            .await
    }

    /// Withdraw a member, recording why
    pub async fn delete(
        &self,
        id: u64,
        reason: impl Into<String>,
    ) -> SdkResult<ApiResponse<ResourceRef>> {
        self.client
            .delete_with_body(&format!("/members/{}", id), DeletionReason::new(reason))
            .await
    }
}
