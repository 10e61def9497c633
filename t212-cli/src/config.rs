//! Configuration file layout for the CLI.

use serde::{Deserialize, Serialize};
use t212_core::config::{Configurable, Validatable};
use t212_core::error::ConfigError;
use t212_gateway::rest::RestConfig;
use t212_telemetry::logging::LogConfig;

/// Prefix of the environment variables that override the file.
pub const ENV_PREFIX: &str = "T212";

/// Top-level configuration file.
///
/// ```yaml
/// rest:
///   environment: demo
///   timeout_ms: 10000
/// logging:
///   level: info
///   format: json
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Brokerage connection settings.
    #[serde(default)]
    pub rest: RestConfig,

    /// Log output settings.
    #[serde(default)]
    pub logging: LogConfig,
}

impl Configurable for CliConfig {
    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        self.rest.apply_env_overrides(prefix)
    }

    fn env_var_names(prefix: &str) -> Vec<String> {
        RestConfig::env_var_names(prefix)
    }
}

impl Validatable for CliConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.rest
            .validate()
            .map_err(|e| match e {
                ConfigError::MissingField { field, .. } => {
                    ConfigError::missing_field_in_section(field, "rest")
                }
                other => other,
            })
    }
}
