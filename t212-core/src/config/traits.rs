//! Configuration traits for validation and loading.

use crate::error::ConfigError;

/// Trait for types that can be validated.
///
/// # Example
///
/// ```rust
/// use t212_core::config::Validatable;
/// use t212_core::error::ConfigError;
///
/// struct Endpoint {
///     base_url: String,
/// }
///
/// impl Validatable for Endpoint {
///     fn validate(&self) -> Result<(), ConfigError> {
///         if self.base_url.is_empty() {
///             return Err(ConfigError::missing_field("base_url"));
///         }
///         Ok(())
///     }
/// }
///
/// assert!(Endpoint { base_url: String::new() }.validate().is_err());
/// ```
pub trait Validatable {
    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Trait for types that support environment variable overrides.
///
/// Variables are named `{prefix}_{FIELD}`; an unset variable leaves the
/// field alone, a malformed one is reported as
/// [`ConfigError::InvalidEnvVar`].
pub trait Configurable: Sized {
    /// Applies environment variable overrides to the configuration.
    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError>;

    /// Returns the environment variable names that can override this configuration.
    fn env_var_names(prefix: &str) -> Vec<String>;
}
