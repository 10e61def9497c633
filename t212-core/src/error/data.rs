//! Data decoding and validation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Data error type covering undecodable success bodies and values outside
/// a closed category.
///
/// # Examples
///
/// ```
/// use t212_core::error::DataError;
///
/// let error = DataError::InvalidValue {
///     field: "timeValidity".to_string(),
///     value: "FOREVER".to_string(),
///     expected: "one of: DAY, GOOD_TILL_CANCEL".to_string(),
/// };
/// assert!(error.to_string().contains("FOREVER"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataError {
    /// A success response whose body is not the expected JSON.
    #[error("[Data] {method} {path} returned status {status} with an undecodable body: {reason}")]
    Decode {
        /// HTTP verb of the call.
        method: String,
        /// Request path.
        path: String,
        /// HTTP status code of the response.
        status: u16,
        /// Decoder message.
        reason: String,
        /// Raw response text.
        raw: String,
    },

    /// A value outside a closed category.
    #[error("[Data] Invalid value '{value}' for {field}, expected {expected}")]
    InvalidValue {
        /// Field being validated.
        field: String,
        /// Rejected value.
        value: String,
        /// Accepted values.
        expected: String,
    },
}

impl DataError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self {
            Self::Decode { .. } => ErrorSeverity::Warning,
            Self::InvalidValue { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Creates an invalid value error listing the accepted values.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, value: impl Into<String>, expected: &[&str]) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: format!("one of: {}", expected.join(", ")),
        }
    }
}
