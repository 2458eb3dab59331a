use serde::{Deserialize, Serialize};
use validator::Validate;

use super::link::Link;

/// Review state of a question, approval or completion request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    Waiting,
    Completed,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStep {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub step_order: Option<u32>,
    #[serde(default)]
    pub start_at: Option<String>,
    #[serde(default)]
    pub deadline_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStepInput {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStepOrder {
    pub id: u64,
    pub step_order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StepSchedule {
    pub start_at: String,
    pub deadline_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectQuestion {
    pub id: u64,
    pub title: String,
    pub status: WorkflowStatus,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub progress_step_name: Option<String>,
    #[serde(default)]
    pub reg_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectApproval {
    pub id: u64,
    pub title: String,
    pub status: WorkflowStatus,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub progress_step_name: Option<String>,
    #[serde(default)]
    pub reg_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionHistory {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    pub status: WorkflowStatus,
    #[serde(default)]
    pub requester_name: Option<String>,
    #[serde(default)]
    pub reg_at: Option<String>,
}

/// Body of a new question post.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuestionInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_step_id: Option<u64>,
    #[serde(default)]
    pub link_list: Vec<Link>,
}

impl QuestionInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            progress_step_id: None,
            link_list: Vec::new(),
        }
    }

    pub fn with_progress_step(mut self, progress_step_id: u64) -> Self {
        self.progress_step_id = Some(progress_step_id);
        self
    }

    pub fn with_links(mut self, links: Vec<Link>) -> Self {
        self.link_list = links;
        self
    }
}
