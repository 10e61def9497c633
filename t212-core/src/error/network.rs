//! Network-related error types.
//!
//! Transport failures: the call never produced an HTTP response. These are
//! surfaced as-is and never retried by the executor, since order placement
//! is not idempotent.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network error type covering connection failures, timeouts and TLS errors.
///
/// # Examples
///
/// ```
/// use t212_core::error::NetworkError;
///
/// let error = NetworkError::ConnectionFailed {
///     reason: "Connection refused".to_string(),
/// };
/// assert!(error.to_string().contains("Connection refused"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkError {
    /// Connection to remote host failed.
    #[error("[Network] Connection failed: {reason}")]
    ConnectionFailed {
        /// Reason for the connection failure.
        reason: String,
    },

    /// Request timed out.
    #[error("[Network] Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// TLS/SSL error occurred.
    #[error("[Network] TLS error: {reason}")]
    Tls {
        /// Reason for the TLS error.
        reason: String,
    },

    /// The request could not be built (bad URL, bad header value).
    #[error("[Network] Invalid request: {reason}")]
    InvalidRequest {
        /// Reason the request is invalid.
        reason: String,
    },

    /// The response body could not be read off the wire.
    #[error("[Network] Failed to read response body: {reason}")]
    Body {
        /// Reason for the read failure.
        reason: String,
    },

    /// Any other transport failure.
    #[error("[Network] Request failed: {reason}")]
    Request {
        /// Reason for the failure.
        reason: String,
    },
}

impl NetworkError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self {
            Self::Tls { .. } | Self::InvalidRequest { .. } => ErrorSeverity::Fatal,
            Self::ConnectionFailed { .. }
            | Self::Timeout { .. }
            | Self::Body { .. }
            | Self::Request { .. } => ErrorSeverity::Recoverable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorSeverity;

    #[test]
    fn test_connection_failed() {
        let error = NetworkError::ConnectionFailed {
            reason: "Connection refused".to_string(),
        };
        assert!(error.to_string().contains("Connection refused"));
        assert_eq!(error.severity(), ErrorSeverity::Recoverable);
    }

    #[test]
    fn test_timeout() {
        let error = NetworkError::Timeout { timeout_ms: 5000 };
        assert!(error.to_string().contains("5000ms"));
    }

    #[test]
    fn test_invalid_request_is_fatal() {
        let error = NetworkError::InvalidRequest {
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Fatal);
    }

    #[test]
    fn test_serde_roundtrip() {
        let error = NetworkError::Timeout { timeout_ms: 3000 };
        let json = serde_json::to_string(&error).unwrap();
        let parsed: NetworkError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, parsed);
    }
}
