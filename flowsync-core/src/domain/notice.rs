use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub category: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default)]
    pub reg_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NoticeInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl NoticeInput {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: category.into(),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }
}
