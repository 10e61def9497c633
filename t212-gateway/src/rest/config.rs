//! REST client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use t212_core::config::{Configurable, Validatable};
use t212_core::error::ConfigError;
use t212_core::types::Environment;

use super::rate_limiter::MIN_RESET_BUFFER;

/// Configuration for the REST client.
///
/// The key secret is accepted from files and the environment but is never
/// written back out.
#[derive(Clone, Serialize, Deserialize)]
pub struct RestConfig {
    /// Base URL for API requests. Empty means the environment default.
    #[serde(default)]
    pub base_url: String,

    /// API key identifier.
    #[serde(default)]
    pub api_key_id: String,

    /// API key secret.
    #[serde(default, skip_serializing)]
    pub api_key_secret: String,

    /// Endpoint used when `base_url` is empty.
    #[serde(default)]
    pub environment: Environment,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Extra attempts allowed after a 429 response.
    #[serde(default = "default_max_rate_limit_retries")]
    pub max_rate_limit_retries: u32,

    /// Margin added after a window reset, in milliseconds.
    #[serde(default = "default_rate_limit_buffer_ms")]
    pub rate_limit_buffer_ms: u64,

    /// Longest throttle wait to accept before failing, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rate_limit_wait_ms: Option<u64>,

    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_max_rate_limit_retries() -> u32 {
    3
}

#[allow(clippy::cast_possible_truncation)]
fn default_rate_limit_buffer_ms() -> u64 {
    MIN_RESET_BUFFER.as_millis() as u64
}

fn default_user_agent() -> String {
    format!("t212/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key_id: String::new(),
            api_key_secret: String::new(),
            environment: Environment::default(),
            timeout_ms: default_timeout_ms(),
            max_rate_limit_retries: default_max_rate_limit_retries(),
            rate_limit_buffer_ms: default_rate_limit_buffer_ms(),
            max_rate_limit_wait_ms: None,
            user_agent: default_user_agent(),
        }
    }
}

impl std::fmt::Debug for RestConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestConfig")
            .field("base_url", &self.base_url)
            .field("api_key_id", &self.api_key_id)
            .field("api_key_secret", &"[REDACTED]")
            .field("environment", &self.environment)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_rate_limit_retries", &self.max_rate_limit_retries)
            .field("rate_limit_buffer_ms", &self.rate_limit_buffer_ms)
            .field("max_rate_limit_wait_ms", &self.max_rate_limit_wait_ms)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl RestConfig {
    /// Creates a new builder for `RestConfig`.
    #[must_use]
    pub fn builder() -> RestConfigBuilder {
        RestConfigBuilder::default()
    }

    /// Returns the base URL, falling back to the environment default.
    #[must_use]
    pub fn resolved_base_url(&self) -> &str {
        if self.base_url.trim().is_empty() {
            self.environment.base_url()
        } else {
            &self.base_url
        }
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Returns the reset buffer, never below one second.
    #[must_use]
    pub fn rate_limit_buffer(&self) -> Duration {
        Duration::from_millis(self.rate_limit_buffer_ms).max(MIN_RESET_BUFFER)
    }

    /// Returns the throttle wait ceiling, if any.
    #[must_use]
    pub fn max_rate_limit_wait(&self) -> Option<Duration> {
        self.max_rate_limit_wait_ms.map(Duration::from_millis)
    }

    /// Returns whether a 429 on the given attempt may be retried.
    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_rate_limit_retries
    }

    /// Returns whether both key fields are set.
    #[must_use]
    pub fn has_auth(&self) -> bool {
        !self.api_key_id.is_empty() && !self.api_key_secret.is_empty()
    }
}

impl Validatable for RestConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.resolved_base_url();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::invalid_value(
                "base_url",
                format!("'{base_url}' must start with http:// or https://"),
            ));
        }
        if self.api_key_id.is_empty() {
            return Err(ConfigError::missing_field("api_key_id"));
        }
        if self.api_key_secret.is_empty() {
            return Err(ConfigError::missing_field("api_key_secret"));
        }
        if self.timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "timeout_ms",
                "Timeout must be positive",
            ));
        }
        Ok(())
    }
}

impl Configurable for RestConfig {
    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        if let Ok(key_id) = std::env::var(format!("{prefix}_API_KEY_ID")) {
            self.api_key_id = key_id;
        }
        if let Ok(key_secret) = std::env::var(format!("{prefix}_API_KEY_SECRET")) {
            self.api_key_secret = key_secret;
        }
        if let Ok(base_url) = std::env::var(format!("{prefix}_API_BASE_URL")) {
            self.base_url = base_url;
        }
        let name = format!("{prefix}_ENVIRONMENT");
        if let Ok(environment) = std::env::var(&name) {
            self.environment = environment
                .parse()
                .map_err(|e: t212_core::error::DataError| ConfigError::invalid_env_var(name, e))?;
        }
        Ok(())
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        ["API_KEY_ID", "API_KEY_SECRET", "API_BASE_URL", "ENVIRONMENT"]
            .iter()
            .map(|suffix| format!("{prefix}_{suffix}"))
            .collect()
    }
}

/// Builder for `RestConfig`.
#[derive(Debug, Default)]
pub struct RestConfigBuilder {
    base_url: Option<String>,
    api_key_id: Option<String>,
    api_key_secret: Option<String>,
    environment: Option<Environment>,
    timeout_ms: Option<u64>,
    max_rate_limit_retries: Option<u32>,
    rate_limit_buffer_ms: Option<u64>,
    max_rate_limit_wait_ms: Option<u64>,
    user_agent: Option<String>,
}

impl RestConfigBuilder {
    /// Sets the base URL.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the key id and secret.
    #[must_use]
    pub fn credentials(mut self, key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        self.api_key_id = Some(key_id.into());
        self.api_key_secret = Some(key_secret.into());
        self
    }

    /// Sets the environment.
    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Sets the request timeout.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Sets how many times a 429 response is retried.
    #[must_use]
    pub fn max_rate_limit_retries(mut self, retries: u32) -> Self {
        self.max_rate_limit_retries = Some(retries);
        self
    }

    /// Sets the margin added after a window reset.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rate_limit_buffer(mut self, buffer: Duration) -> Self {
        self.rate_limit_buffer_ms = Some(buffer.as_millis() as u64);
        self
    }

    /// Sets the longest acceptable throttle wait.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn max_rate_limit_wait(mut self, max_wait: Duration) -> Self {
        self.max_rate_limit_wait_ms = Some(max_wait.as_millis() as u64);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the `RestConfig`.
    #[must_use]
    pub fn build(self) -> RestConfig {
        RestConfig {
            base_url: self.base_url.unwrap_or_default(),
            api_key_id: self.api_key_id.unwrap_or_default(),
            api_key_secret: self.api_key_secret.unwrap_or_default(),
            environment: self.environment.unwrap_or_default(),
            timeout_ms: self.timeout_ms.unwrap_or_else(default_timeout_ms),
            max_rate_limit_retries: self
                .max_rate_limit_retries
                .unwrap_or_else(default_max_rate_limit_retries),
            rate_limit_buffer_ms: self
                .rate_limit_buffer_ms
                .unwrap_or_else(default_rate_limit_buffer_ms)
                .max(default_rate_limit_buffer_ms()),
            max_rate_limit_wait_ms: self.max_rate_limit_wait_ms,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        }
    }
}
