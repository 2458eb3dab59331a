use serde::{Deserialize, Serialize};
use validator::Validate;

/// Contract stage of a project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    Contract,
    InProgress,
    Completed,
    Maintenance,
    Paused,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Contract => "CONTRACT",
            ProjectStatus::InProgress => "IN_PROGRESS",
            ProjectStatus::Completed => "COMPLETED",
            ProjectStatus::Maintenance => "MAINTENANCE",
            ProjectStatus::Paused => "PAUSED",
            ProjectStatus::Deleted => "DELETED",
            ProjectStatus::Unknown => "UNKNOWN",
        }
    }

    /// Human-readable label used by board views.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Contract => "Contract",
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Completed => "Delivered",
            ProjectStatus::Maintenance => "Maintenance",
            ProjectStatus::Paused => "Paused",
            ProjectStatus::Deleted => "Deleted",
            ProjectStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub close_at: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub developer_name: Option<String>,
}

/// A project as seen from an organization's or member's participation list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParticipatingProject {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub management_step: Option<ProjectStatus>,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub close_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub customer_id: u64,
    pub developer_id: u64,
    #[validate(length(min = 1))]
    pub start_at: String,
    #[validate(length(min = 1))]
    pub close_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
}

impl ProjectInput {
    pub fn new(
        name: impl Into<String>,
        customer_id: u64,
        developer_id: u64,
        start_at: impl Into<String>,
        close_at: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: None,
            detail: None,
            customer_id,
            developer_id,
            start_at: start_at.into(),
            close_at: close_at.into(),
            status: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = Some(status);
        self
    }
}
