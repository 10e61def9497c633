//! Resilient request executor.

use reqwest::{Client, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use t212_core::error::{
    ApiError, DataError, ErrorBody, NetworkError, RequestContext, Result, T212Error,
};
use tracing::{Instrument, debug, info_span, warn};

use super::config::RestConfig;
use super::credentials::Credentials;
use super::rate_limiter::{RateLimitGate, RateLimitState};

/// Authenticated REST client that honours the server's rate-limit quota.
///
/// Every call goes through the same sequence: wait on the shared
/// [`RateLimitGate`], send with the `Authorization` header, record the
/// quota headers of whatever came back, retry a bounded number of times
/// on 429, and either decode the success body or return a normalized
/// [`ApiError`].
///
/// The client is cheap to share behind an `Arc`; concurrent calls see one
/// quota window.
///
/// # Example
///
/// ```ignore
/// use t212_gateway::rest::{RestClient, RestConfig};
///
/// let config = RestConfig::builder()
///     .base_url("https://demo.trading212.com/api/v0")
///     .credentials("key-id", "key-secret")
///     .build();
///
/// let client = RestClient::new(config)?;
/// let cash = client.fetch("equity/account/cash").await?;
/// ```
pub struct RestClient {
    config: RestConfig,
    http_client: Client,
    credentials: Credentials,
    gate: Arc<RateLimitGate>,
}

/// Status and body of a completed success response.
struct Completed {
    status: u16,
    text: String,
}

impl RestClient {
    /// Creates a new REST client with its own rate-limit gate.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the headers are not valid header values or
    /// the HTTP client cannot be created.
    pub fn new(config: RestConfig) -> Result<Self> {
        let gate = RateLimitGate::new(config.rate_limit_buffer())
            .with_max_wait(config.max_rate_limit_wait());
        Self::with_gate(config, Arc::new(gate))
    }

    /// Creates a REST client that shares an existing rate-limit gate.
    ///
    /// # Errors
    ///
    /// Same as [`RestClient::new`].
    pub fn with_gate(config: RestConfig, gate: Arc<RateLimitGate>) -> Result<Self> {
        let credentials = Credentials::new(config.api_key_id.as_str(), &config.api_key_secret);

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| NetworkError::InvalidRequest {
                    reason: "Invalid user agent".to_string(),
                })?,
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let mut authorization = header::HeaderValue::from_str(credentials.authorization())
            .map_err(|_| NetworkError::InvalidRequest {
                reason: "Invalid API key".to_string(),
            })?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);

        let http_client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| NetworkError::Tls {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        debug!(
            base_url = %config.resolved_base_url(),
            timeout_ms = config.timeout_ms,
            max_rate_limit_retries = config.max_rate_limit_retries,
            "REST client created"
        );

        Ok(Self {
            config,
            http_client,
            credentials,
            gate,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Returns the credentials used for every call.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the shared rate-limit gate.
    #[must_use]
    pub fn rate_limit_gate(&self) -> &Arc<RateLimitGate> {
        &self.gate
    }

    /// Returns the last observed quota window.
    pub async fn rate_limit_state(&self) -> RateLimitState {
        self.gate.snapshot().await
    }

    /// Builds the full URL for a path relative to the base URL.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.resolved_base_url().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Issues a GET and returns the decoded JSON payload.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Api` on a non-success status,
    /// `Data` if the success body is not JSON.
    pub async fn fetch(&self, path: &str) -> Result<Value> {
        self.fetch_as(path).await
    }

    /// Issues a GET and deserializes the payload into `T`.
    ///
    /// # Errors
    ///
    /// As [`RestClient::fetch`]; a payload of the wrong shape is a `Data`
    /// error.
    pub async fn fetch_as<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let context = RequestContext::new(Method::GET.as_str(), path);
        let completed = self.execute(Method::GET, &context).await?;
        decode(&context, completed)
    }

    /// Issues a POST with a JSON body and returns the decoded payload.
    ///
    /// # Errors
    ///
    /// As [`RestClient::fetch`]; the error carries the request body.
    pub async fn submit(&self, path: &str, body: Value) -> Result<Value> {
        let context = RequestContext::new(Method::POST.as_str(), path).with_body(body);
        let completed = self.execute(Method::POST, &context).await?;
        decode(&context, completed)
    }

    /// Issues a POST with a serializable body and deserializes the payload
    /// into `T`.
    ///
    /// # Errors
    ///
    /// As [`RestClient::submit`]; a body that cannot be represented as JSON
    /// is an `InvalidRequest` network error.
    pub async fn submit_as<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| NetworkError::InvalidRequest {
            reason: format!("Failed to encode request body: {e}"),
        })?;
        let context = RequestContext::new(Method::POST.as_str(), path).with_body(body);
        let completed = self.execute(Method::POST, &context).await?;
        decode(&context, completed)
    }

    /// Issues a DELETE. Any success status means the resource is gone.
    ///
    /// # Errors
    ///
    /// `Network` on transport failure, `Api` on a non-success status.
    pub async fn remove(&self, path: &str) -> Result<bool> {
        let context = RequestContext::new(Method::DELETE.as_str(), path);
        self.execute(Method::DELETE, &context).await?;
        Ok(true)
    }

    async fn execute(&self, method: Method, context: &RequestContext) -> Result<Completed> {
        let span = info_span!("t212_request", method = %method, path = %context.path());
        self.execute_with_retry(method, context).instrument(span).await
    }

    async fn execute_with_retry(
        &self,
        method: Method,
        context: &RequestContext,
    ) -> Result<Completed> {
        let url = self.build_url(context.path());
        let mut attempt = 0u32;

        loop {
            self.gate.admit().await?;

            debug!(url = %url, attempt, "Sending request");
            let mut request = self.http_client.request(method.clone(), &url);
            if let Some(body) = context.body() {
                request = request.json(body);
            }

            let response = request
                .send()
                .await
                .map_err(|e| self.transport_error(&e))?;

            self.gate
                .observe(RateLimitState::from_headers(response.headers()))
                .await;

            let status = response.status();
            if status == StatusCode::TOO_MANY_REQUESTS && self.config.should_retry(attempt) {
                attempt += 1;
                let window = self.gate.snapshot().await;
                warn!(
                    status = status.as_u16(),
                    attempt,
                    max_retries = self.config.max_rate_limit_retries,
                    remaining = window.remaining,
                    reset = window.reset,
                    "Rate limited, retrying"
                );
                continue;
            }

            let text = response.text().await.map_err(|e| NetworkError::Body {
                reason: e.to_string(),
            })?;

            if !status.is_success() {
                let error = normalize_error(context, status.as_u16(), &text);
                debug!(status = status.as_u16(), code = ?error.error_code(), "Request rejected");
                return Err(error.into());
            }

            debug!(status = status.as_u16(), bytes = text.len(), "Request completed");
            return Ok(Completed {
                status: status.as_u16(),
                text,
            });
        }
    }

    fn transport_error(&self, error: &reqwest::Error) -> NetworkError {
        if error.is_timeout() {
            NetworkError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else if error.is_connect() {
            NetworkError::ConnectionFailed {
                reason: error.to_string(),
            }
        } else if error.is_builder() {
            NetworkError::InvalidRequest {
                reason: error.to_string(),
            }
        } else {
            NetworkError::Request {
                reason: error.to_string(),
            }
        }
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.config.resolved_base_url())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

fn decode<T: DeserializeOwned>(context: &RequestContext, completed: Completed) -> Result<T> {
    serde_json::from_str(&completed.text).map_err(|e| {
        T212Error::from(DataError::Decode {
            method: context.method().to_string(),
            path: context.path().to_string(),
            status: completed.status,
            reason: e.to_string(),
            raw: completed.text,
        })
    })
}

/// Folds a non-success response into the normalized error shape.
///
/// The body is kept as JSON when it parses, otherwise as raw text. The
/// request body from `context` is attached unchanged.
///
/// # Example
///
/// ```
/// use t212_core::error::{ErrorBody, RequestContext};
/// use t212_gateway::rest::normalize_error;
///
/// let context = RequestContext::new("GET", "equity/account/cash");
/// let error = normalize_error(&context, 502, "Bad Gateway");
///
/// assert_eq!(error.status, 502);
/// assert_eq!(error.body, ErrorBody::Text("Bad Gateway".to_string()));
/// ```
#[must_use]
pub fn normalize_error(context: &RequestContext, status: u16, text: &str) -> ApiError {
    ApiError::new(context, status, ErrorBody::parse(text))
}
