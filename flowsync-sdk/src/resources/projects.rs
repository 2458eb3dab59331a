//! Projects resource client
//!
//! Projects, their progress steps, and the question / approval / completion
//! boards hanging off each project.

use crate::client::HttpClient;
use crate::envelope::{ApiResponse, ListEnvelope, ResultEnvelope};
use crate::error::SdkResult;
use flowsync_core::{
    CompletionHistory, ListFilters, ProgressStep, ProgressStepInput, ProgressStepOrder, Project,
    ProjectApproval, ProjectInput, ProjectQuestion, ProjectStatus, QuestionInput, ResourceRef,
    StepSchedule,
};
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

/// Collection key of `GET /projects`.
pub const PROJECTS_KEY: &str = "projects";
/// Collection key of `GET /projects/{id}/questions`.
pub const QUESTIONS_KEY: &str = "projectQuestions";
/// Collection key of `GET /projects/{id}/approvals`.
pub const APPROVALS_KEY: &str = "projectApprovals";
/// Collection key of `GET /projects/{id}/completion-requests`.
pub const COMPLETION_HISTORIES_KEY: &str = "completionHistories";

/// Client for project operations
#[derive(Debug, Clone)]
pub struct ProjectsClient {
    client: Arc<HttpClient>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ManagementStepChange {
    management_step: ProjectStatus,
}

impl ProjectsClient {
    /// Create a new projects client
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }

    /// List projects (`keyword`, `status`, paging)
    pub async fn list(&self, filters: &ListFilters) -> SdkResult<ListEnvelope> {
        self.client.list("/projects", filters).await
    }

    /// List projects and decode the page
    pub async fn list_page(&self, filters: &ListFilters) -> SdkResult<ResultEnvelope<Project>> {
        self.list(filters).await?.select(PROJECTS_KEY)
    }

    /// List a project's questions (`keyword`, `progressStepId`, `status`, paging)
    pub async fn questions(
        &self,
        project_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ListEnvelope> {
        self.client
            .list(&format!("/projects/{}/questions", project_id), filters)
            .await
    }

    /// List a project's questions and decode the page
    pub async fn questions_page(
        &self,
        project_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ResultEnvelope<ProjectQuestion>> {
        self.questions(project_id, filters)
            .await?
            .select(QUESTIONS_KEY)
    }

    /// List a project's approvals (`keyword`, `progressStepId`, `status`, paging)
    pub async fn approvals(
        &self,
        project_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ListEnvelope> {
        self.client
            .list(&format!("/projects/{}/approvals", project_id), filters)
            .await
    }

    /// List a project's approvals and decode the page
    pub async fn approvals_page(
        &self,
        project_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ResultEnvelope<ProjectApproval>> {
        self.approvals(project_id, filters)
            .await?
            .select(APPROVALS_KEY)
    }

    /// List completion requests of a progress step (`progressStepId`, paging)
    pub async fn completion_requests(
        &self,
        project_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ListEnvelope> {
        self.client
            .list(
                &format!("/projects/{}/completion-requests", project_id),
                filters,
            )
            .await
    }

    /// List completion requests and decode the page
    pub async fn completion_requests_page(
        &self,
        project_id: u64,
        filters: &ListFilters,
    ) -> SdkResult<ResultEnvelope<CompletionHistory>> {
        self.completion_requests(project_id, filters)
            .await?
            .select(COMPLETION_HISTORIES_KEY)
    }

    /// Create a project
    pub async fn create(&self, input: ProjectInput) -> SdkResult<ApiResponse<ResourceRef>> {
        input.validate()?;
        self.client.post("/projects", input).await
    }

    /// Replace a project's details
    pub async fn update(
        &self,
        id: u64,
        input: ProjectInput,
    ) -> SdkResult<ApiResponse<ResourceRef>> {
        input.validate()?;
        self.client.put(&format!("/projects/{}", id), input).await
    }

    /// Delete a project
    pub async fn delete(&self, id: u64) -> SdkResult<ApiResponse<()>> {
        self.client.delete(&format!("/projects/{}", id)).await
    }

    /// Move a project to another management step
    pub async fn change_management_step(
        &self,
        id: u64,
        step: ProjectStatus,
    ) -> SdkResult<ApiResponse<()>> {
        self.client
            .patch(
                &format!("/projects/{}/management-step", id),
                Some(ManagementStepChange {
                    management_step: step,
                }),
            )
            .await
    }

    /// Post a question to a project
    pub async fn create_question(
        &self,
        project_id: u64,
        input: QuestionInput,
    ) -> SdkResult<ApiResponse<ResourceRef>> {
        input.validate()?;
        self.client
            .post(&format!("/projects/{}/questions", project_id), input)
            .await
    }

    /// Add a progress step
    pub async fn create_progress_step(
        &self,
        project_id: u64,
        input: ProgressStepInput,
    ) -> SdkResult<ApiResponse<()>> {
        input.validate()?;
        self.client
            .post(&format!("/projects/{}/progress", project_id), input)
            .await
    }

    /// Edit a progress step
    pub async fn update_progress_step(
        &self,
        project_id: u64,
        step_id: u64,
        input: ProgressStepInput,
    ) -> SdkResult<ApiResponse<()>> {
        input.validate()?;
        self.client
            .put(
                &format!("/projects/{}/progress/{}", project_id, step_id),
                input,
            )
            .await
    }

    /// Remove a progress step
    pub async fn delete_progress_step(
        &self,
        project_id: u64,
        step_id: u64,
    ) -> SdkResult<ApiResponse<()>> {
        self.client
            .delete(&format!("/projects/{}/progress/{}", project_id, step_id))
            .await
    }

    /// Reorder all progress steps at once
    pub async fn reorder_progress_steps(
        &self,
        project_id: u64,
        order: Vec<ProgressStepOrder>,
    ) -> SdkResult<ApiResponse<()>> {
        self.client
            .put(&format!("/projects/{}/progress/order", project_id), order)
            .await
    }

    /// Change a progress step's start and deadline dates
    pub async fn reschedule_progress_step(
        &self,
        project_id: u64,
        step_id: u64,
        schedule: StepSchedule,
    ) -> SdkResult<ApiResponse<ProgressStep>> {
        self.client
            .patch(
                &format!("/projects/{}/progress/{}/schedule", project_id, step_id),
                Some(schedule),
            )
            .await
    }
}
