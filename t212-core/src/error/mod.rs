//! Error types and handling framework.
//!
//! Every failure surfaced by the brokerage client is a [`T212Error`]:
//! - `Network` - the call could not complete (connect, timeout, TLS)
//! - `Api` - the server answered with a non-success status; carries the
//!   normalized [`ApiError`]
//! - `Data` - a success response that could not be decoded, or a value
//!   outside a closed category
//! - `RateLimit` - a throttle wait that exceeds the configured ceiling
//! - `Config` - configuration loading or validation
//!
//! # Example
//!
//! ```
//! use t212_core::error::{NetworkError, T212Error};
//!
//! let error: T212Error = NetworkError::Timeout { timeout_ms: 5000 }.into();
//! assert_eq!(error.category(), "network");
//! assert!(error.is_network_error());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error severity levels for categorizing errors.
///
/// - `Fatal`: the caller cannot proceed without changing its input or setup
/// - `Recoverable`: the same call may succeed later
/// - `Warning`: the server rejected the request; worth surfacing, not fatal
/// - `Info`: an expected condition such as a missing resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Unrecoverable error.
    Fatal,

    /// Error that may go away on a later attempt.
    #[default]
    Recoverable,

    /// Rejected request that does not affect other calls.
    Warning,

    /// Informational condition.
    Info,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fatal => "FATAL",
            Self::Recoverable => "RECOVERABLE",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        })
    }
}

mod api;
mod config;
mod context;
mod data;
mod network;
mod rate_limit;

pub use api::{ApiError, ErrorBody};
pub use config::ConfigError;
pub use context::RequestContext;
pub use data::DataError;
pub use network::NetworkError;
pub use rate_limit::RateLimitError;

/// Top-level error type for the brokerage client.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum T212Error {
    /// Transport failure.
    #[error("{0}")]
    Network(#[from] NetworkError),

    /// Normalized non-success HTTP response.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Decoding or validation failure.
    #[error("{0}")]
    Data(#[from] DataError),

    /// Throttle wait refused.
    #[error("{0}")]
    RateLimit(#[from] RateLimitError),

    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl T212Error {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network(e) => e.severity(),
            Self::Api(e) => e.severity(),
            Self::Data(e) => e.severity(),
            Self::RateLimit(e) => e.severity(),
            Self::Config(e) => e.severity(),
        }
    }

    /// False only for fatal errors.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity() != ErrorSeverity::Fatal
    }

    /// Returns the error category as a string.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Api(_) => "api",
            Self::Data(_) => "data",
            Self::RateLimit(_) => "rate_limit",
            Self::Config(_) => "config",
        }
    }

    /// Returns true if this is a transport error.
    #[must_use]
    pub fn is_network_error(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Returns true if this is a normalized HTTP error.
    #[must_use]
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    /// Returns the HTTP status code, if the server answered.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(e) => Some(e.status),
            Self::Data(DataError::Decode { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// Returns the inner normalized error, if this is an API error.
    #[must_use]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized Result type for brokerage client operations.
pub type Result<T> = std::result::Result<T, T212Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_network_error_conversion() {
        let network_err = NetworkError::Timeout { timeout_ms: 5000 };
        let err: T212Error = network_err.clone().into();
        assert!(err.is_network_error());
        assert_eq!(err.category(), "network");
        assert_eq!(err.to_string(), network_err.to_string());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_api_error_conversion() {
        let context = RequestContext::new("POST", "equity/orders/market")
            .with_body(json!({"quantity": 1.5, "ticker": "X"}));
        let api_err = ApiError::new(
            &context,
            400,
            ErrorBody::Json(json!({"code": "InvalidTicker"})),
        );
        let err: T212Error = api_err.clone().into();
        assert!(err.is_api_error());
        assert_eq!(err.category(), "api");
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.as_api_error(), Some(&api_err));
    }

    #[test]
    fn test_decode_error_reports_status() {
        let err: T212Error = DataError::Decode {
            method: "GET".to_string(),
            path: "equity/portfolio".to_string(),
            status: 200,
            reason: "expected value".to_string(),
            raw: "<html>".to_string(),
        }
        .into();
        assert_eq!(err.category(), "data");
        assert_eq!(err.status(), Some(200));
    }

    #[test]
    fn test_is_recoverable_delegates() {
        let recoverable = T212Error::Network(NetworkError::Timeout { timeout_ms: 5000 });
        assert!(recoverable.is_recoverable());

        let fatal = T212Error::Config(ConfigError::missing_field("api_key_id"));
        assert!(!fatal.is_recoverable());
    }

    #[test]
    fn test_rate_limit_severity_is_recoverable() {
        let err = T212Error::RateLimit(RateLimitError::WaitExceeded {
            wait_ms: 90_000,
            max_wait_ms: 10_000,
        });
        assert_eq!(err.category(), "rate_limit");
        assert!(err.is_recoverable());
        assert!(err.as_api_error().is_none());
    }
}
