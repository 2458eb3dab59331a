//! URL reachability probe
//!
//! A best-effort "does this link exist" check. Input is normalized to an
//! absolute `https://` URL when it carries no scheme, parsed, and probed with
//! a single `HEAD` request whose body is never read.
//!
//! The browser dashboard could only issue the probe as a `no-cors` request,
//! which yields an opaque response whose status cannot be inspected. Such a
//! result counts as "exists". [`ProbeMode::NoCors`] reproduces that verdict
//! (every response obtained is treated as opaque); [`ProbeMode::Strict`]
//! trusts the real status code instead. Any transport failure, including a
//! URL that does not parse, means "does not exist". There is no retry.

use crate::error::{SdkError, SdkResult};
use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// How a probe response is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProbeMode {
    /// Treat every response as opaque, so any response means "exists".
    #[default]
    NoCors,
    /// Only a 2xx status means "exists".
    Strict,
}

/// What a probe observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeResponse {
    /// A response arrived but its status is not readable.
    Opaque,
    /// A response arrived with a readable status.
    Status(StatusCode),
}

impl ProbeResponse {
    /// The exists/does-not-exist verdict for this observation.
    pub fn exists(&self) -> bool {
        match self {
            ProbeResponse::Opaque => true,
            ProbeResponse::Status(status) => status.is_success(),
        }
    }
}

/// Anything that can decide whether a user-supplied link exists.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns `true` when the link is believed to exist.
    async fn exists(&self, url: &str) -> bool;
}

/// Prefix `https://` unless the input already starts with `http://` or `https://`.
pub fn normalize_url(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    }
}

/// Normalize and parse a user-supplied link.
pub fn parse_link(input: &str) -> SdkResult<Url> {
    let url = Url::parse(&normalize_url(input))?;
    if url.host_str().map_or(true, str::is_empty) {
        return Err(SdkError::UrlError(url::ParseError::EmptyHost));
    }
    Ok(url)
}

/// Reachability probe backed by a `HEAD` request.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
    mode: ProbeMode,
}

impl HttpProbe {
    /// Create a probe with the given per-request timeout.
    pub fn new(timeout: Duration) -> SdkResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SdkError::NetworkError)?;

        Ok(Self {
            client,
            mode: ProbeMode::default(),
        })
    }

    /// Choose how responses are interpreted.
    pub fn with_mode(mut self, mode: ProbeMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ProbeMode {
        self.mode
    }

    /// Issue the `HEAD` request and classify what came back.
    pub async fn probe(&self, url: &Url) -> SdkResult<ProbeResponse> {
        let response = self
            .client
            .request(Method::HEAD, url.clone())
            .send()
            .await?;

        Ok(match self.mode {
            ProbeMode::NoCors => ProbeResponse::Opaque,
            ProbeMode::Strict => ProbeResponse::Status(response.status()),
        })
    }
}

#[async_trait]
impl ReachabilityProbe for HttpProbe {
    async fn exists(&self, input: &str) -> bool {
        let url = match parse_link(input) {
            Ok(url) => url,
            Err(e) => {
                debug!("Not probing malformed link {:?}: {}", input, e);
                return false;
            }
        };

        match self.probe(&url).await {
            Ok(response) => {
                debug!("Probe {} -> {:?}", url, response);
                response.exists()
            }
            Err(e) => {
                debug!("Probe {} failed: {}", url, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_https() {
        assert_eq!(normalize_url("example.com"), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("https://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn test_normalize_ignores_surrounding_whitespace() {
        assert_eq!(normalize_url("  example.com "), "https://example.com");
        assert_eq!(normalize_url(" http://example.com"), "http://example.com");
    }

    #[test]
    fn test_opaque_means_exists() {
        assert!(ProbeResponse::Opaque.exists());
        assert!(ProbeResponse::Status(StatusCode::OK).exists());
        assert!(!ProbeResponse::Status(StatusCode::NOT_FOUND).exists());
    }

    #[test]
    fn test_parse_link_rejects_garbage() {
        assert!(parse_link("exa mple.com").is_err());
        assert!(parse_link("https://").is_err());
        assert_eq!(
            parse_link("example.com").unwrap().as_str(),
            "https://example.com/"
        );
    }

    #[tokio::test]
    async fn test_malformed_link_does_not_exist() {
        let probe = HttpProbe::new(Duration::from_secs(1)).unwrap();
        assert!(!probe.exists("exa mple.com").await);
    }
}
