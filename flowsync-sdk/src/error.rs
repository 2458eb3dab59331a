//! SDK error types and handling
//!
//! Every failure the client can produce is an [`SdkError`]. The engines in
//! `flowsync-query` only need two things from an error: the message the
//! server supplied (if any) and its [`ErrorKind`].

use flowsync_core::CoreError;
use thiserror::Error;

/// Broad classification of a failure, independent of the HTTP details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input was missing or malformed; no request was issued.
    Validation,
    /// The request failed before any response was obtained.
    Transport,
    /// A response was obtained but reports failure.
    Server,
    /// A reachability probe could not confirm the resource exists.
    UnreachableResource,
}

/// The main error type for the SDK
#[derive(Error, Debug)]
pub enum SdkError {
    /// API returned a non-success response
    #[error("API error: {status}{}", .message.as_deref().map(|m| format!(" - {m}")).unwrap_or_default())]
    ApiError {
        status: u16,
        message: Option<String>,
        error_code: Option<String>,
        request_id: Option<String>,
    },

    /// Rate limit exceeded and retries are exhausted
    #[error("Rate limit exceeded. Retry after {retry_after} seconds")]
    RateLimited {
        retry_after: u64,
        message: Option<String>,
    },

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Request timed out
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Input rejected before sending
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// A list envelope did not carry the requested collection
    #[error("Response has no collection named '{key}'")]
    MissingCollection { key: String },

    /// Unknown error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

/// Result type alias for SDK operations
pub type SdkResult<T> = Result<T, SdkError>;

/// Error body returned by the API: `{ "message": "...", "code": "..." }`.
#[derive(Debug, Default, serde::Deserialize)]
pub struct ApiErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl SdkError {
    /// Create an API error from a response status and body
    pub fn from_response(status: u16, body: &str, request_id: Option<String>) -> Self {
        let parsed = serde_json::from_str::<ApiErrorResponse>(body).unwrap_or_default();
        let message = parsed.message.filter(|m| !m.trim().is_empty());

        SdkError::ApiError {
            status,
            message,
            error_code: parsed.code,
            request_id,
        }
    }

    /// The human-readable message the server put in the error body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            SdkError::ApiError { message, .. } | SdkError::RateLimited { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SdkError::ApiError { .. }
            | SdkError::RateLimited { .. }
            | SdkError::SerializationError(_)
            | SdkError::MissingCollection { .. } => ErrorKind::Server,
            SdkError::NetworkError(_)
            | SdkError::Timeout(_)
            | SdkError::UrlError(_)
            | SdkError::Unknown(_) => ErrorKind::Transport,
            SdkError::ValidationError(_) | SdkError::ConfigurationError(_) => {
                ErrorKind::Validation
            }
        }
    }

    /// Check if the error is retryable
    ///
    /// Connection failures, timeouts, rate limiting and 5xx responses are
    /// worth another attempt; anything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            SdkError::NetworkError(e) => e.is_connect() || e.is_request() || e.is_timeout(),
            SdkError::Timeout(_) | SdkError::RateLimited { .. } => true,
            SdkError::ApiError { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get the HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::ApiError { status, .. } => Some(*status),
            SdkError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Get the request ID if available
    pub fn request_id(&self) -> Option<&str> {
        match self {
            SdkError::ApiError { request_id, .. } => request_id.as_deref(),
            _ => None,
        }
    }
}

impl From<validator::ValidationErrors> for SdkError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SdkError::ValidationError(errors.to_string())
    }
}

impl From<CoreError> for SdkError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(msg) => SdkError::ValidationError(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_error_from_json_response() {
        let body = r#"{"message": "Organization name already in use", "code": "DUPLICATE"}"#;
        let error = SdkError::from_response(409, body, Some("req-123".to_string()));

        assert_eq!(error.server_message(), Some("Organization name already in use"));
        assert_eq!(error.status_code(), Some(409));
        assert_eq!(error.request_id(), Some("req-123"));
        assert_eq!(error.kind(), ErrorKind::Server);
    }

    #[test]
    fn test_error_from_plain_body_has_no_server_message() {
        let error = SdkError::from_response(502, "<html>Bad Gateway</html>", None);
        assert_eq!(error.server_message(), None);
        assert_eq!(error.to_string(), "API error: 502");
        assert!(error.is_retryable());
    }

    #[test]
    fn test_blank_server_message_is_ignored() {
        let error = SdkError::from_response(400, r#"{"message": "  "}"#, None);
        assert_eq!(error.server_message(), None);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(SdkError::Timeout(30).kind(), ErrorKind::Transport);
        assert_eq!(
            SdkError::ValidationError("name".into()).kind(),
            ErrorKind::Validation
        );
        assert!(!SdkError::ValidationError("name".into()).is_retryable());
    }

    #[rstest]
    #[case(400, false)]
    #[case(404, false)]
    #[case(409, false)]
    #[case(500, true)]
    #[case(503, true)]
    fn test_api_error_retryability(#[case] status: u16, #[case] retryable: bool) {
        let error = SdkError::from_response(status, "", None);
        assert_eq!(error.is_retryable(), retryable);
        assert_eq!(error.status_code(), Some(status));
        assert_eq!(error.kind(), ErrorKind::Server);
    }
}
