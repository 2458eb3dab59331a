//! CLI execution context

use anyhow::{Context as _, Result};
use flowsync_query::Queries;
use flowsync_sdk::{AuthConfig, FlowSyncClient, HttpProbe, ProbeMode, SdkConfig};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::cli::Cli;
use crate::config::CliConfig;
use crate::output::{ConsoleSink, OutputFormat, OutputWriter};

/// A failure that has already been shown to the user by a notification.
///
/// `main` exits non-zero without printing it a second time.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct Reported(pub String);

/// Execution context for CLI commands
pub struct Context {
    /// Layered configuration
    pub config: CliConfig,

    /// Output writer
    pub output: OutputWriter,

    /// Verbose mode
    pub verbose: bool,

    api_url_override: Option<String>,
    token_override: Option<String>,
}

impl Context {
    /// Create a new context from CLI arguments
    pub fn new(cli: &Cli) -> Result<Self> {
        let config = CliConfig::load(cli.config.as_deref())?;

        let output_format = match cli.output {
            Some(format) => format,
            None => config
                .output_format
                .parse::<OutputFormat>()
                .map_err(|e| anyhow::anyhow!("Invalid output_format in configuration: {}", e))?,
        };
        let output = OutputWriter::new(output_format, config.color && !cli.no_color);

        Ok(Self {
            config,
            output,
            verbose: cli.verbose > 0,
            api_url_override: cli.api_url.clone(),
            token_override: cli.token.clone(),
        })
    }

    /// Get the effective API URL
    pub fn api_url(&self) -> &str {
        self.api_url_override
            .as_deref()
            .unwrap_or(&self.config.api_url)
    }

    /// Get the SDK authentication configuration
    pub fn auth_config(&self) -> AuthConfig {
        match self.token_override.as_ref().or(self.config.token.as_ref()) {
            Some(token) => AuthConfig::BearerToken(token.clone()),
            None => AuthConfig::None,
        }
    }

    /// Build the SDK configuration from flags and config sources
    pub fn sdk_config(&self) -> SdkConfig {
        let mut config = SdkConfig::new(self.api_url())
            .with_auth(self.auth_config())
            .with_timeout(Duration::from_secs(self.config.timeout_secs))
            .with_probe_timeout(Duration::from_secs(self.config.probe_timeout_secs))
            .with_max_retries(self.config.max_retries)
            .with_logging(self.verbose);

        for (name, value) in &self.config.headers {
            config = config.with_header(name.clone(), value.clone());
        }
        config
    }

    /// Create an SDK client
    pub fn create_client(&self) -> Result<FlowSyncClient> {
        FlowSyncClient::new(self.sdk_config()).context("Failed to create API client")
    }

    /// Queries and commands reporting to the terminal
    pub fn queries(&self) -> Result<Queries> {
        Ok(Queries::new(self.create_client()?, Arc::new(ConsoleSink)))
    }

    /// The link probe, in strict mode when requested here or in the configuration
    pub fn probe(&self, strict: bool) -> Result<HttpProbe> {
        let mode = if strict || self.config.strict_probe {
            ProbeMode::Strict
        } else {
            ProbeMode::NoCors
        };
        let sdk_config = self.sdk_config();
        sdk_config.validate().context("Invalid configuration")?;

        let probe =
            HttpProbe::new(sdk_config.probe_timeout).context("Failed to create link probe")?;
        Ok(probe.with_mode(mode))
    }
}
