//! Organizations resource client
//!
//! Customer and developer organizations, plus the projects they take part in
//! and the members that belong to them.

use super::DeletionReason;
use crate::client::HttpClient;
use crate::envelope::{ApiResponse, ListEnvelope, ResultEnvelope};
use crate::error::SdkResult;
use flowsync_core::{
    ListFilters, Member, Organization, OrganizationInput, OrganizationPatch, ParticipatingProject,
    ResourceRef,
};
use std::sync::Arc;
use validator::Validate;

/// Collection key of `GET /organizations`.
pub const ORGANIZATIONS_KEY: &str = "dtoList";
/// Collection key of `GET /organizations/{id}/projects`.
pub const ORGANIZATION_PROJECTS_KEY: &str = "dtoList";
/// Collection key of `GET /organizations/{id}/members`.
pub const ORGANIZATION_MEMBERS_KEY: &str = "members";

/// Client for organization operations
#[derive(Debug, Clone)]
pub struct OrganizationsClient {
    client: Arc<HttpClient>,
}

impl OrganizationsClient {
    /// Create a new organizations client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List organizations (`keyword`, `type`, `status`, paging)
    pub async fn list(&self, filters: &ListFilters) -> SdkResult<ListEnvelope> {
        self.client.list("/organizations", filters).await
    }

    /// List organizations and decode the page
    pub async fn list_page(
        &self,
        filters: &ListFilters,
    ) -> SdkResult<ResultEnvelope<Organization>> {
        self.list(filters).await?.select(ORGANIZATIONS_KEY)
    }

    /// Get one organization
    pub async fn get(&self, id: u64) -> SdkResult<ApiResponse<Organization>> {
        self.client.get(&format!("/organizations/{}", id)).await
    }

    /// List projects an organization takes part in (`keyword`, `managementStep`, paging)
    pub async fn projects(
        &self,
        organization_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ListEnvelope> {
        self.client
            .list(&format!("/organizations/{}/projects", organization_id), filters)
            .await
    }

    /// List an organization's projects and decode the page
    pub async fn projects_page(
        &self,
        organization_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ResultEnvelope<ParticipatingProject>> {
        self.projects(organization_id, filters)
            .await?
            .select(ORGANIZATION_PROJECTS_KEY)
    }

    /// List an organization's members (`keyword`, `role`, `status`, paging)
    pub async fn members(
        &self,
        organization_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ListEnvelope> {
        self.client
            .list(&format!("/organizations/{}/members", organization_id), filters)
            .await
    }

    /// List an organization's members and decode the page
    pub async fn members_page(
        &self,
        organization_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ResultEnvelope<Member>> {
        self.members(organization_id, filters)
            .await?
            .select(ORGANIZATION_MEMBERS_KEY)
    }

    /// Register an organization
    pub async fn create(&self, input: OrganizationInput) -> SdkResult<ApiResponse<ResourceRef>> {
        input.validate()?;
        self.client.post("/organizations", input).await
    }

    /// Update some of an organization's fields
    pub async fn update(&self, id: u64, patch: OrganizationPatch) -> SdkResult<ApiResponse<()>> {
        self.client
            .patch(&format!("/organizations/{}", id), Some(patch))
            .await
    }

    /// Delete an organization, recording why
    pub async fn delete(
        &self,
        id: u64,
        reason: impl Into<String>,
    ) -> SdkResult<ApiResponse<ResourceRef>> {
        self.client
            .delete_with_body(
                &format!("/organizations/{}", id),
                DeletionReason::new(reason),
            )
            .await
    }

    /// Flip an organization between active and inactive
    pub async fn toggle_status(&self, id: u64) -> SdkResult<ApiResponse<Organization>> {
        self.client
            .patch::<Organization, ()>(&format!("/organizations/{}/status", id), None)
            .await
    }
}
