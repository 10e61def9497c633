//! File loading for YAML, TOML and JSON configuration.
//!
//! Environment overrides and validation run after parsing, through the
//! [`Configurable`] and [`Validatable`] traits.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

use super::{Configurable, Validatable};

/// Origin reported for content parsed from memory.
const INLINE: &str = "<inline>";

/// Configuration file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// `.yaml` or `.yml`
    #[default]
    Yaml,
    /// `.toml`
    Toml,
    /// `.json`
    Json,
}

impl ConfigFormat {
    /// Detects the format from the extension of `path`, ignoring case.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn parse<T: DeserializeOwned>(self, content: &str, origin: &str) -> Result<T, ConfigError> {
        let parsed = match self {
            Self::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(content).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|reason| ConfigError::InvalidFormat {
            path: origin.to_string(),
            reason: format!("{self:?}: {reason}"),
        })
    }
}

/// Reads a configuration, then applies overrides and validation.
///
/// ```rust,ignore
/// use t212_core::config::ConfigLoader;
///
/// let config: RestConfig = ConfigLoader::new()
///     .with_env_prefix("T212")
///     .load("t212.yaml")?;
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    env_prefix: Option<String>,
    validate: bool,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// A loader that validates and applies no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self {
            env_prefix: None,
            validate: true,
        }
    }

    /// Reads `{prefix}_*` variables after parsing.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Turns validation on or off. Callers that adjust the config after
    /// loading turn it off and call [`Validatable::validate`] themselves.
    #[must_use]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Parses `path`, then runs [`finish`](Self::finish).
    pub fn load<T, P>(&self, path: P) -> Result<T, ConfigError>
    where
        T: DeserializeOwned + Configurable + Validatable,
        P: AsRef<Path>,
    {
        let config = self.load_file(path)?;
        self.finish(config)
    }

    /// Applies environment overrides and validation to a config built in
    /// memory, such as the defaults used when no file is given.
    pub fn finish<T>(&self, mut config: T) -> Result<T, ConfigError>
    where
        T: Configurable + Validatable,
    {
        if let Some(prefix) = &self.env_prefix {
            config.apply_env_overrides(prefix)?;
        }
        if self.validate {
            config.validate()?;
        }
        Ok(config)
    }

    /// Parses a file without overrides or validation.
    pub fn load_file<T, P>(&self, path: P) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::InvalidFormat {
            path: origin.clone(),
            reason: "expected a .yaml, .yml, .toml or .json file".to_string(),
        })?;
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: origin.clone(),
            reason: e.to_string(),
        })?;
        format.parse(&content, &origin)
    }

    /// Parses in-memory content without overrides or validation.
    pub fn load_str<T>(&self, content: &str, format: ConfigFormat) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        format.parse(content, INLINE)
    }
}
