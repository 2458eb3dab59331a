use serde::{Deserialize, Serialize};
use validator::Validate;

use super::phone::validate_phone_number;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Admin,
    Member,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberStatus {
    Active,
    Inactive,
    Deleted,
    #[serde(other)]
    Unknown,
}

impl MemberRole {
    pub fn label(&self) -> &'static str {
        match self {
            MemberRole::Admin => "Admin",
            MemberRole::Member => "Member",
            MemberRole::Unknown => "Unknown",
        }
    }
}

impl MemberStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MemberStatus::Active => "Active",
            MemberStatus::Inactive => "Inactive",
            MemberStatus::Deleted => "Withdrawn",
            MemberStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: MemberRole,
    #[serde(default)]
    pub status: Option<MemberStatus>,
    #[serde(default)]
    pub organization_name: Option<String>,
    #[serde(default)]
    pub phone_num: Option<String>,
    #[serde(default)]
    pub job_role: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub reg_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub role: MemberRole,
    pub organization_id: u64,
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 64))]
    pub password: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_num: String,
    #[validate(length(min = 1, max = 50))]
    pub job_role: String,
    #[validate(length(min = 1, max = 50))]
    pub job_title: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub remark: String,
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MemberPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_num: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl MemberPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_job(mut self, job_role: impl Into<String>, job_title: impl Into<String>) -> Self {
        self.job_role = Some(job_role.into());
        self.job_title = Some(job_title.into());
        self
    }

    pub fn with_phone_num(mut self, phone_num: impl Into<String>) -> Self {
        self.phone_num = Some(phone_num.into());
        self
    }
}
