//! HTTP client implementation
//!
//! This module provides the core HTTP client for the SDK with
//! retry logic, rate limiting handling, and request/response logging.

use crate::config::{AuthConfig, SdkConfig};
use crate::envelope::{ApiResponse, ListEnvelope};
use crate::error::{SdkError, SdkResult};
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const REQUEST_ID_HEADER: &str = "x-request-id";

/// The HTTP client for making API requests
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<SdkConfig>,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: SdkConfig) -> SdkResult<Self> {
        config.validate()?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        for (name, value) in &config.custom_headers {
            match (
                header::HeaderName::try_from(name.as_str()),
                header::HeaderValue::try_from(value.as_str()),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!("Skipping invalid custom header {}", name),
            }
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(SdkError::NetworkError)?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    /// Build the full URL for an endpoint
    pub fn url(&self, path: &str) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> SdkResult<T> {
        self.request_with_query::<T, (), ()>(Method::GET, path, None, None)
            .await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize>(
        &self,
        path: &str,
        query: &Q,
    ) -> SdkResult<T> {
        self.request_with_query::<T, (), Q>(Method::GET, path, None, Some(query))
            .await
    }

    /// Fetch a list envelope with filter query parameters
    pub async fn list<Q: Serialize>(&self, path: &str, query: &Q) -> SdkResult<ListEnvelope> {
        self.get_with_query(path, query).await
    }

    /// Make a POST request
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: B,
    ) -> SdkResult<ApiResponse<T>> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Make a PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: B,
    ) -> SdkResult<ApiResponse<T>> {
        self.send(Method::PUT, path, Some(body)).await
    }

    /// Make a PATCH request
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: Option<B>,
    ) -> SdkResult<ApiResponse<T>> {
        self.send(Method::PATCH, path, body).await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> SdkResult<ApiResponse<T>> {
        self.send::<T, ()>(Method::DELETE, path, None).await
    }

    /// Make a DELETE request carrying a body (e.g. a withdrawal reason)
    pub async fn delete_with_body<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: B,
    ) -> SdkResult<ApiResponse<T>> {
        self.send(Method::DELETE, path, Some(body)).await
    }

    /// Make a mutation request; an empty success body decodes as an empty envelope
    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
    ) -> SdkResult<ApiResponse<T>> {
        let text = self
            .execute::<B, ()>(method, path, body, None)
            .await?;

        if text.trim().is_empty() {
            return Ok(ApiResponse::empty());
        }
        serde_json::from_str(&text).map_err(SdkError::SerializationError)
    }

    /// Make a request with optional body and query parameters
    async fn request_with_query<T: DeserializeOwned, B: Serialize, Q: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
        query: Option<&Q>,
    ) -> SdkResult<T> {
        let text = self.execute(method, path, body, query).await?;
        serde_json::from_str(&text).map_err(SdkError::SerializationError)
    }

    /// Execute a request and return the body of a successful response
    async fn execute<B: Serialize, Q: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
        query: Option<&Q>,
    ) -> SdkResult<String> {
        let response = self.execute_with_retry(method, path, body, query).await?;

        let status = response.status();
        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await.map_err(SdkError::NetworkError)?;

        if self.config.enable_logging {
            debug!("Response {}: {}", status, text);
        }

        if status.is_success() {
            Ok(text)
        } else {
            Err(self.handle_error_response(status, &text, request_id))
        }
    }

    /// Execute a request with retry logic
    ///
    /// Only idempotent methods are retried; a failed POST is reported at once.
    async fn execute_with_retry<B: Serialize, Q: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<B>,
        query: Option<&Q>,
    ) -> SdkResult<Response> {
        let url = self.url(path);
        let body_json = body.as_ref().map(serde_json::to_string).transpose()?;
        let max_retries = if method.is_idempotent() {
            self.config.max_retries
        } else {
            0
        };

        let mut attempts = 0;
        let mut last_error: Option<SdkError> = None;
        let mut backoff = self.config.retry_initial_backoff;

        while attempts <= max_retries {
            if attempts > 0 {
                info!(
                    "Retrying request (attempt {}/{}), waiting {:?}",
                    attempts, max_retries, backoff
                );
                tokio::time::sleep(backoff).await;
                backoff = std::cmp::min(backoff * 2, self.config.retry_max_backoff);
            }

            let mut request = self.add_auth(self.client.request(method.clone(), &url));

            if let Some(q) = query {
                request = request.query(q);
            }

            if let Some(ref body_str) = body_json {
                request = request.body(body_str.clone());
            }

            if self.config.enable_logging {
                debug!("Request: {} {}", method, url);
                if let Some(ref body_str) = body_json {
                    debug!("Request body: {}", body_str);
                }
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() || attempts >= max_retries {
                        return Ok(response);
                    }

                    let failure = if status == StatusCode::TOO_MANY_REQUESTS {
                        let retry_after = response
                            .headers()
                            .get(header::RETRY_AFTER)
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        SdkError::RateLimited {
                            retry_after,
                            message: None,
                        }
                    } else {
                        SdkError::ApiError {
                            status: status.as_u16(),
                            message: None,
                            error_code: None,
                            request_id: None,
                        }
                    };

                    if !failure.is_retryable() {
                        return Ok(response);
                    }

                    if let SdkError::RateLimited { retry_after, .. } = &failure {
                        warn!("Rate limited, retry after {} seconds", retry_after);
                        backoff = Duration::from_secs(*retry_after);
                    } else {
                        warn!("Server error {}, will retry", status);
                    }
                    last_error = Some(failure);
                    attempts += 1;
                }
                Err(e) => {
                    error!("Request failed: {}", e);

                    let failure = if e.is_timeout() {
                        SdkError::Timeout(self.config.timeout.as_secs())
                    } else {
                        SdkError::NetworkError(e)
                    };
                    if !failure.is_retryable() {
                        return Err(failure);
                    }

                    last_error = Some(failure);
                    attempts += 1;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| SdkError::Unknown("Request failed".to_string())))
    }

    /// Add authentication to a request
    fn add_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.auth {
            AuthConfig::None => request,
            AuthConfig::BearerToken(token) => {
                request.header(header::AUTHORIZATION, format!("Bearer {}", token))
            }
        }
    }

    /// Handle an error response
    fn handle_error_response(
        &self,
        status: StatusCode,
        body: &str,
        request_id: Option<String>,
    ) -> SdkError {
        let error = SdkError::from_response(status.as_u16(), body, request_id);

        if status == StatusCode::TOO_MANY_REQUESTS {
            return SdkError::RateLimited {
                retry_after: 60,
                message: error.server_message().map(str::to_string),
            };
        }

        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let config = SdkConfig::new("https://api.example.com/");
        let client = HttpClient::new(config).unwrap();

        assert_eq!(client.url("/projects"), "https://api.example.com/projects");
        assert_eq!(client.url("projects"), "https://api.example.com/projects");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(HttpClient::new(SdkConfig::new("")).is_err());
    }
}
