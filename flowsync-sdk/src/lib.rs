//! FlowSync SDK
//!
//! This crate provides a Rust client for the FlowSync project-management
//! API: projects and their workflow boards, organizations, members and
//! notices, plus a best-effort link reachability probe.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use flowsync_sdk::{FlowSyncClient, SdkConfig};
//! use flowsync_core::{ListFilters, DEFAULT_PROJECT_PAGE_SIZE};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SdkConfig::new("https://api.flowsync.example.com")
//!         .with_bearer_token("access-token");
//!     let client = FlowSyncClient::new(config)?;
//!
//!     let filters = ListFilters::from_query_str("?status=IN_PROGRESS", DEFAULT_PROJECT_PAGE_SIZE);
//!     let page = client.projects().list_page(&filters).await?;
//!     println!("Found {} projects", page.collection.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Every call returns [`SdkResult`]. [`SdkError::server_message`] exposes the
//! message the API put in an error body, and [`SdkError::kind`] sorts
//! failures into validation, transport and server errors.

#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod probe;
pub mod resources;

pub use client::HttpClient;
pub use config::{AuthConfig, SdkConfig, SdkConfigBuilder};
pub use envelope::{ApiResponse, ListEnvelope, ResultEnvelope};
pub use error::{ErrorKind, SdkError, SdkResult};
pub use probe::{normalize_url, HttpProbe, ProbeMode, ProbeResponse, ReachabilityProbe};
pub use resources::{MembersClient, NoticesClient, OrganizationsClient, ProjectsClient};

use std::sync::Arc;

/// The main client for the FlowSync API.
///
/// Resource clients share one underlying [`HttpClient`].
///
/// ```rust,no_run
/// use flowsync_sdk::{FlowSyncClient, SdkConfig};
///
/// let client = FlowSyncClient::new(SdkConfig::new("https://api.example.com"))?;
/// let projects = client.projects();
/// let organizations = client.organizations();
/// # Ok::<(), flowsync_sdk::SdkError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FlowSyncClient {
    http_client: Arc<HttpClient>,
    projects: ProjectsClient,
    organizations: OrganizationsClient,
    members: MembersClient,
    notices: NoticesClient,
    probe: HttpProbe,
}

impl FlowSyncClient {
    /// Create a new client with the given configuration.
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        let probe = HttpProbe::new(config.probe_timeout)?;
        let http_client = Arc::new(HttpClient::new(config)?);

        Ok(Self {
            projects: ProjectsClient::new(Arc::clone(&http_client)),
            organizations: OrganizationsClient::new(Arc::clone(&http_client)),
            members: MembersClient::new(Arc::clone(&http_client)),
            notices: NoticesClient::new(Arc::clone(&http_client)),
            probe,
            http_client,
        })
    }

    /// Start a fluent configuration for the given base URL.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub fn projects(&self) -> &ProjectsClient {
        &self.projects
    }

    pub fn organizations(&self) -> &OrganizationsClient {
        &self.organizations
    }

    pub fn members(&self) -> &MembersClient {
        &self.members
    }

    pub fn notices(&self) -> &NoticesClient {
        &self.notices
    }

    /// The link reachability probe.
    pub fn probe(&self) -> &HttpProbe {
        &self.probe
    }

    /// The underlying HTTP client, for requests not covered by a resource client.
    pub fn http_client(&self) -> &HttpClient {
        &self.http_client
    }

    /// The base URL of the API.
    pub fn base_url(&self) -> &str {
        &self.http_client.config().base_url
    }
}

/// Builder for creating a [`FlowSyncClient`] with fluent configuration.
#[derive(Debug)]
pub struct ClientBuilder {
    config_builder: SdkConfigBuilder,
}

impl ClientBuilder {
    /// Create a new client builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config_builder: SdkConfig::builder(base_url),
        }
    }

    /// Set the authentication configuration.
    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.config_builder = self.config_builder.with_auth(auth);
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config_builder = self.config_builder.with_timeout(timeout);
        self
    }

    /// Set the maximum number of retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.config_builder = self.config_builder.with_max_retries(max_retries);
        self
    }

    /// Enable or disable request/response logging.
    pub fn with_logging(mut self, enable: bool) -> Self {
        self.config_builder = self.config_builder.with_logging(enable);
        self
    }

    /// Add a custom header to all requests.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.with_header(name, value);
        self
    }

    /// Build the client.
    pub fn build(self) -> SdkResult<FlowSyncClient> {
        FlowSyncClient::new(self.config_builder.build())
    }
}
