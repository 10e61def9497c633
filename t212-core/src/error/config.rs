//! Errors raised while loading or validating configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A configuration file, section or override that could not be used.
///
/// ```
/// use t212_core::error::ConfigError;
///
/// let error = ConfigError::missing_field_in_section("api_key_id", "rest");
/// assert_eq!(error.to_string(), "[Config] rest.api_key_id is required");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    /// A required key has no value.
    #[error("[Config] {}{field} is required", section.as_ref().map(|s| format!("{s}.")).unwrap_or_default())]
    MissingField {
        /// Key name.
        field: String,
        /// Enclosing section, when the key is nested.
        section: Option<String>,
    },

    /// A key has a value outside its accepted range.
    #[error("[Config] {field}: {reason}")]
    InvalidValue {
        /// Key name.
        field: String,
        /// What is wrong with the value.
        reason: String,
    },

    /// The file could not be opened or read.
    #[error("[Config] cannot read {path}: {reason}")]
    FileReadError {
        /// File path.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// The file extension is unknown or the content does not parse.
    #[error("[Config] cannot parse {path}: {reason}")]
    InvalidFormat {
        /// File path, or `<inline>` for in-memory content.
        path: String,
        /// Parser error.
        reason: String,
    },

    /// An override variable is set to an unusable value.
    #[error("[Config] ${name}: {reason}")]
    InvalidEnvVar {
        /// Variable name, including the prefix.
        name: String,
        /// What is wrong with the value.
        reason: String,
    },
}

impl ConfigError {
    /// Missing or malformed files stop startup; the rest can be corrected
    /// by the caller.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        match self {
            Self::MissingField { .. } | Self::InvalidFormat { .. } => super::ErrorSeverity::Fatal,
            _ => super::ErrorSeverity::Warning,
        }
    }

    /// A top-level key is missing.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            section: None,
        }
    }

    /// A key inside `section` is missing.
    #[must_use]
    pub fn missing_field_in_section(field: impl Into<String>, section: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
            section: Some(section.into()),
        }
    }

    /// A key has an unusable value.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// An override variable has an unusable value.
    #[must_use]
    pub fn invalid_env_var(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}
