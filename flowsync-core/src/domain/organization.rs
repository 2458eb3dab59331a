use serde::{Deserialize, Serialize};
use validator::Validate;

use super::phone::validate_phone_number;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationType {
    Customer,
    Developer,
    #[serde(other)]
    Unknown,
}

impl OrganizationType {
    pub fn label(&self) -> &'static str {
        match self {
            OrganizationType::Customer => "Customer",
            OrganizationType::Developer => "Developer",
            OrganizationType::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrganizationStatus {
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

impl OrganizationStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, OrganizationStatus::Active)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrganizationStatus::Active => "Active",
            OrganizationStatus::Inactive => "Inactive",
            OrganizationStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: OrganizationType,
    pub name: String,
    #[serde(default)]
    pub br_number: Option<String>,
    #[serde(default)]
    pub br_certificate_url: Option<String>,
    #[serde(default)]
    pub street_address: Option<String>,
    #[serde(default)]
    pub detail_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    pub status: OrganizationStatus,
    #[serde(default)]
    pub reg_at: Option<String>,
}

impl Organization {
    /// Street and detail address joined for display.
    pub fn full_address(&self) -> String {
        [self.street_address.as_deref(), self.detail_address.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationInput {
    #[serde(rename = "type")]
    pub kind: OrganizationType,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 10, max = 12))]
    pub br_number: String,
    #[validate(length(min = 1))]
    pub street_address: String,
    #[serde(default)]
    pub detail_address: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
}

/// Partial update; only the fields that are set are sent.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<OrganizationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub br_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl OrganizationPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn with_address(
        mut self,
        street_address: impl Into<String>,
        detail_address: impl Into<String>,
    ) -> Self {
        self.street_address = Some(street_address.into());
        self.detail_address = Some(detail_address.into());
        self
    }
}
