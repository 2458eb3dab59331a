//! Ready-made queries and commands for every dashboard board and action
//!
//! [`Queries`] binds a [`FlowSyncClient`] and a [`NotificationSink`] once and
//! hands out one [`ListQuery`] per board and one [`MutationCommand`] per
//! action. Boards scoped to a parent resource take `(parent_id, filters)` as
//! their parameters.

use crate::list_query::ListQuery;
use crate::mutation::MutationCommand;
use crate::notify::NotificationSink;
use flowsync_core::{
    CompletionHistory, ListFilters, Member, MemberInput, MemberPatch, Notice, NoticeInput,
    Organization, OrganizationInput, OrganizationPatch, ParticipatingProject, ProgressStep,
    ProgressStepInput, ProgressStepOrder, Project, ProjectApproval, ProjectInput,
    ProjectQuestion, ProjectStatus, QuestionInput, ResourceRef, StepSchedule,
};
use flowsync_sdk::resources::members::{MEMBERS_KEY, MEMBER_PROJECTS_KEY};
use flowsync_sdk::resources::notices::NOTICES_KEY;
use flowsync_sdk::resources::organizations::{
    ORGANIZATIONS_KEY, ORGANIZATION_MEMBERS_KEY, ORGANIZATION_PROJECTS_KEY,
};
use flowsync_sdk::resources::projects::{
    APPROVALS_KEY, COMPLETION_HISTORIES_KEY, PROJECTS_KEY, QUESTIONS_KEY,
};
use flowsync_sdk::FlowSyncClient;
use std::sync::Arc;

/// Filters of a board that belongs to one parent resource.
pub type ScopedFilters = (u64, ListFilters);

/// Factory for the queries and commands of the admin dashboard.
#[derive(Clone)]
pub struct Queries {
    client: FlowSyncClient,
    sink: Arc<dyn NotificationSink>,
}

impl Queries {
    pub fn new(client: FlowSyncClient, sink: Arc<dyn NotificationSink>) -> Self {
        Self { client, sink }
    }

    pub fn client(&self) -> &FlowSyncClient {
        &self.client
    }

    pub fn sink(&self) -> Arc<dyn NotificationSink> {
        Arc::clone(&self.sink)
    }

    // ===== Boards =====

    pub fn projects(&self, filters: ListFilters) -> ListQuery<Project, ListFilters> {
        let projects = self.client.projects().clone();
        ListQuery::new(
            move |filters: ListFilters| {
                let projects = projects.clone();
                async move { projects.list(&filters).await }
            },
            PROJECTS_KEY,
            filters,
            self.sink(),
        )
    }

    pub fn project_questions(
        &self,
        project_id: u64,
        filters: ListFilters,
    ) -> ListQuery<ProjectQuestion, ScopedFilters> {
        let projects = self.client.projects().clone();
        ListQuery::new(
            move |(id, filters): ScopedFilters| {
                let projects = projects.clone();
                async move { projects.questions(id, &filters).await }
            },
            QUESTIONS_KEY,
            (project_id, filters),
            self.sink(),
        )
    }

    pub fn project_approvals(
        &self,
        project_id: u64,
        filters: ListFilters,
    ) -> ListQuery<ProjectApproval, ScopedFilters> {
        let projects = self.client.projects().clone();
        ListQuery::new(
            move |(id, filters): ScopedFilters| {
                let projects = projects.clone();
                async move { projects.approvals(id, &filters).await }
            },
            APPROVALS_KEY,
            (project_id, filters),
            self.sink(),
        )
    }

    /// Approval log of completion requests, filtered by `progressStepId`.
    pub fn completion_requests(
        &self,
        project_id: u64,
        filters: ListFilters,
    ) -> ListQuery<CompletionHistory, ScopedFilters> {
        let projects = self.client.projects().clone();
        ListQuery::new(
            move |(id, filters): ScopedFilters| {
                let projects = projects.clone();
                async move { projects.completion_requests(id, &filters).await }
            },
            COMPLETION_HISTORIES_KEY,
            (project_id, filters),
            self.sink(),
        )
    }

    pub fn organizations(&self, filters: ListFilters) -> ListQuery<Organization, ListFilters> {
        let organizations = self.client.organizations().clone();
        ListQuery::new(
            move |filters: ListFilters| {
                let organizations = organizations.clone();
                async move { organizations.list(&filters).await }
            },
            ORGANIZATIONS_KEY,
            filters,
            self.sink(),
        )
    }

    /// Projects an organization takes part in.
    pub fn organization_projects(
        &self,
        organization_id: u64,
        filters: ListFilters,
    ) -> ListQuery<ParticipatingProject, ScopedFilters> {
        let organizations = self.client.organizations().clone();
        ListQuery::new(
            move |(id, filters): ScopedFilters| {
                let organizations = organizations.clone();
                async move { organizations.projects(id, &filters).await }
            },
            ORGANIZATION_PROJECTS_KEY,
            (organization_id, filters),
            self.sink(),
        )
    }

    pub fn organization_members(
        &self,
        organization_id: u64,
        filters: ListFilters,
    ) -> ListQuery<Member, ScopedFilters> {
        let organizations = self.client.organizations().clone();
        ListQuery::new(
            move |(id, filters): ScopedFilters| {
                let organizations = organizations.clone();
                async move { organizations.members(id, &filters).await }
            },
            ORGANIZATION_MEMBERS_KEY,
            (organization_id, filters),
            self.sink(),
        )
    }

    pub fn members(&self, filters: ListFilters) -> ListQuery<Member, ListFilters> {
        let members = self.client.members().clone();
        ListQuery::new(
            move |filters: ListFilters| {
                let members = members.clone();
                async move { members.list(&filters).await }
            },
            MEMBERS_KEY,
            filters,
            self.sink(),
        )
    }

    /// Projects a member takes part in.
    pub fn member_projects(
        &self,
        member_id: u64,
        filters: ListFilters,
    ) -> ListQuery<ParticipatingProject, ScopedFilters> {
        let members = self.client.members().clone();
        ListQuery::new(
            move |(id, filters): ScopedFilters| {
                let members = members.clone();
                async move { members.projects(id, &filters).await }
            },
            MEMBER_PROJECTS_KEY,
            (member_id, filters),
            self.sink(),
        )
    }

    pub fn notices(&self, filters: ListFilters) -> ListQuery<Notice, ListFilters> {
        let notices = self.client.notices().clone();
        ListQuery::new(
            move |filters: ListFilters| {
                let notices = notices.clone();
                async move { notices.list(&filters).await }
            },
            NOTICES_KEY,
            filters,
            self.sink(),
        )
    }

    // ===== Project commands =====

    pub fn create_project(&self) -> MutationCommand<ProjectInput, ResourceRef> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |input: ProjectInput| {
                let projects = projects.clone();
                async move { projects.create(input).await }
            },
            self.sink(),
        )
    }

    pub fn update_project(&self) -> MutationCommand<(u64, ProjectInput), ResourceRef> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |(id, input): (u64, ProjectInput)| {
                let projects = projects.clone();
                async move { projects.update(id, input).await }
            },
            self.sink(),
        )
    }

    pub fn delete_project(&self) -> MutationCommand<u64, ()> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |id: u64| {
                let projects = projects.clone();
                async move { projects.delete(id).await }
            },
            self.sink(),
        )
    }

    pub fn change_management_step(&self) -> MutationCommand<(u64, ProjectStatus), ()> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |(id, step): (u64, ProjectStatus)| {
                let projects = projects.clone();
                async move { projects.change_management_step(id, step).await }
            },
            self.sink(),
        )
    }

    pub fn create_question(&self) -> MutationCommand<(u64, QuestionInput), ResourceRef> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |(project_id, input): (u64, QuestionInput)| {
                let projects = projects.clone();
                async move { projects.create_question(project_id, input).await }
            },
            self.sink(),
        )
    }

    pub fn create_progress_step(&self) -> MutationCommand<(u64, ProgressStepInput), ()> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |(project_id, input): (u64, ProgressStepInput)| {
                let projects = projects.clone();
                async move { projects.create_progress_step(project_id, input).await }
            },
            self.sink(),
        )
    }

    pub fn update_progress_step(&self) -> MutationCommand<(u64, u64, ProgressStepInput), ()> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |(project_id, step_id, input): (u64, u64, ProgressStepInput)| {
                let projects = projects.clone();
                async move {
                    projects
                        .update_progress_step(project_id, step_id, input)
                        .await
                }
            },
            self.sink(),
        )
    }

    pub fn delete_progress_step(&self) -> MutationCommand<(u64, u64), ()> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |(project_id, step_id): (u64, u64)| {
                let projects = projects.clone();
                async move { projects.delete_progress_step(project_id, step_id).await }
            },
            self.sink(),
        )
    }

    pub fn reorder_progress_steps(&self) -> MutationCommand<(u64, Vec<ProgressStepOrder>), ()> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |(project_id, order): (u64, Vec<ProgressStepOrder>)| {
                let projects = projects.clone();
                async move { projects.reorder_progress_steps(project_id, order).await }
            },
            self.sink(),
        )
    }

    pub fn reschedule_progress_step(
        &self,
    ) -> MutationCommand<(u64, u64, StepSchedule), ProgressStep> {
        let projects = self.client.projects().clone();
        MutationCommand::new(
            move |(project_id, step_id, schedule): (u64, u64, StepSchedule)| {
                let projects = projects.clone();
                async move {
                    projects
                        .reschedule_progress_step(project_id, step_id, schedule)
                        .await
                }
            },
            self.sink(),
        )
    }

    // ===== Organization commands =====

    pub fn create_organization(&self) -> MutationCommand<OrganizationInput, ResourceRef> {
        let organizations = self.client.organizations().clone();
        MutationCommand::new(
            move |input: OrganizationInput| {
                let organizations = organizations.clone();
                async move { organizations.create(input).await }
            },
            self.sink(),
        )
    }

    pub fn update_organization(&self) -> MutationCommand<(u64, OrganizationPatch), ()> {
        let organizations = self.client.organizations().clone();
        MutationCommand::new(
            move |(id, patch): (u64, OrganizationPatch)| {
                let organizations = organizations.clone();
                async move { organizations.update(id, patch).await }
            },
            self.sink(),
        )
    }

    /// Arguments are the organization id and the deletion reason.
    pub fn delete_organization(&self) -> MutationCommand<(u64, String), ResourceRef> {
        let organizations = self.client.organizations().clone();
        MutationCommand::new(
            move |(id, reason): (u64, String)| {
                let organizations = organizations.clone();
                async move { organizations.delete(id, reason).await }
            },
            self.sink(),
        )
    }

    pub fn toggle_organization_status(&self) -> MutationCommand<u64, Organization> {
        let organizations = self.client.organizations().clone();
        MutationCommand::new(
            move |id: u64| {
                let organizations = organizations.clone();
                async move { organizations.toggle_status(id).await }
            },
            self.sink(),
        )
    }

    // ===== Member commands =====

    pub fn create_member(&self) -> MutationCommand<MemberInput, ResourceRef> {
        let members = self.client.members().clone();
        MutationCommand::new(
            move |input: MemberInput| {
                let members = members.clone();
                async move { members.create(input).await }
            },
            self.sink(),
        )
    }

    pub fn update_member(&self) -> MutationCommand<(u64, MemberPatch), ()> {
        let members = self.client.members().clone();
        MutationCommand::new(
            move |(id, patch): (u64, MemberPatch)| {
                let members = members.clone();
                async move { members.update(id, patch).await }
            },
            self.sink(),
        )
    }

    /// Arguments are the member id and the withdrawal reason.
    pub fn delete_member(&self) -> MutationCommand<(u64, String), ResourceRef> {
        let members = self.client.members().clone();
        MutationCommand::new(
            move |(id, reason): (u64, String)| {
                let members = members.clone();
                async move { members.delete(id, reason).await }
            },
            self.sink(),
        )
    }

    // ===== Notice commands =====

    pub fn create_notice(&self) -> MutationCommand<NoticeInput, ()> {
        let notices = self.client.notices().clone();
        MutationCommand::new(
            move |input: NoticeInput| {
                let notices = notices.clone();
                async move { notices.create(input).await }
            },
            self.sink(),
        )
    }

    pub fn edit_notice(&self) -> MutationCommand<(u64, NoticeInput), ()> {
        let notices = self.client.notices().clone();
        MutationCommand::new(
            move |(id, input): (u64, NoticeInput)| {
                let notices = notices.clone();
                async move { notices.edit(id, input).await }
            },
            self.sink(),
        )
    }

    pub fn delete_notice(&self) -> MutationCommand<u64, ()> {
        let notices = self.client.notices().clone();
        MutationCommand::new(
            move |id: u64| {
                let notices = notices.clone();
                async move { notices.delete(id).await }
            },
            self.sink(),
        )
    }
}
