//! Rate limit errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when honouring the server's quota would mean waiting longer than
/// the caller allows.
///
/// # Examples
///
/// ```
/// use t212_core::error::RateLimitError;
///
/// let error = RateLimitError::WaitExceeded { wait_ms: 61_000, max_wait_ms: 5_000 };
/// assert!(error.to_string().contains("61000ms"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateLimitError {
    /// The quota window resets later than the configured ceiling.
    #[error("[RateLimit] Quota exhausted, reset in {wait_ms}ms exceeds the {max_wait_ms}ms wait limit")]
    WaitExceeded {
        /// Required wait in milliseconds.
        wait_ms: u64,
        /// Configured ceiling in milliseconds.
        max_wait_ms: u64,
    },
}

impl RateLimitError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        super::ErrorSeverity::Recoverable
    }

    /// Returns a suggested retry delay in milliseconds.
    #[must_use]
    pub fn suggested_retry_delay_ms(&self) -> u64 {
        match self {
            Self::WaitExceeded { wait_ms, .. } => *wait_ms,
        }
    }
}
