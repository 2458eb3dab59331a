//! SDK resource modules
//!
//! One client per API resource. List methods return the raw
//! [`ListEnvelope`](crate::envelope::ListEnvelope) together with the key its
//! collection lives under, and a typed `*_page` helper that decodes it.

pub mod projects;
pub mod organizations;
pub mod members;
pub mod notices;

pub use projects::ProjectsClient;
pub use organizations::OrganizationsClient;
pub use members::MembersClient;
pub use notices::NoticesClient;

use serde::Serialize;

/// Body for deletions that record a reason.
#[derive(Debug, Clone, Serialize)]
pub struct DeletionReason {
    pub reason: String,
}

impl DeletionReason {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
