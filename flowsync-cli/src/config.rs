//! CLI configuration management
//!
//! Settings are layered with the `config` crate, later sources winning:
//!
//! 1. `config.toml` in the platform config directory
//!    (e.g. `~/.config/flowsync/config.toml`)
//! 2. `flowsync.{toml,yaml,json}` in the working directory
//! 3. the file passed with `--config`
//! 4. `FLOWSYNC_*` environment variables (`FLOWSYNC_API_URL`, `FLOWSYNC_TIMEOUT_SECS`, ...)
//!
//! Command-line flags are applied last, in [`crate::context::Context`].

use anyhow::{Context as _, Result};
use config::{Config as ConfigLoader, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Default API URL
pub const DEFAULT_API_URL: &str = "https://api.flowsync.example.com";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,

    /// Default output format
    #[serde(default = "default_output_format")]
    pub output_format: String,

    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries for failed idempotent requests
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Timeout of a single link probe in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Judge links by their real status code instead of any response
    #[serde(default)]
    pub strict_probe: bool,

    /// Additional headers
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            output_format: default_output_format(),
            color: true,
            timeout_secs: default_timeout(),
            max_retries: default_max_retries(),
            probe_timeout_secs: default_probe_timeout(),
            strict_probe: false,
            headers: HashMap::new(),
        }
    }
}

impl CliConfig {
    /// Load configuration from every source, with `explicit` layered above the files
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut builder = ConfigLoader::builder();

        if let Some(path) = Self::config_path() {
            builder = builder.add_source(File::from(path).required(false));
        }
        builder = builder.add_source(File::with_name("flowsync").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix("FLOWSYNC").try_parsing(true))
            .build()
            .context("Failed to load configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Get the configuration file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "flowsync", "flowsync")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_output_format() -> String {
    "table".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_probe_timeout() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CliConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.output_format, "table");
        assert!(config.color);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.max_retries, 3);
        assert!(!config.strict_probe);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
api_url = "https://staging.flowsync.example.com"
timeout_secs = 5
strict_probe = true

[headers]
x-tenant = "acme"
"#
        )
        .unwrap();

        let config = CliConfig::load(Some(file.path())).unwrap();

        assert_eq!(config.api_url, "https://staging.flowsync.example.com");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.strict_probe);
        assert_eq!(config.headers.get("x-tenant").map(String::as_str), Some("acme"));
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = CliConfig::load(Some(Path::new("/nonexistent/flowsync.toml")));
        assert!(result.is_err());
    }
}
