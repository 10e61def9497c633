//! Logging configuration types.

use serde::{Deserialize, Serialize};

/// Configuration for the logging system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter directive (e.g., "info", "t212_gateway=debug")
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// Output targets
    #[serde(default = "default_outputs")]
    pub outputs: Vec<LogOutput>,

    /// Include thread IDs in log output
    #[serde(default)]
    pub include_thread_id: bool,

    /// Include file and line information
    #[serde(default)]
    pub include_file_info: bool,

    /// Include span enter/exit events
    #[serde(default)]
    pub include_span_events: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            outputs: default_outputs(),
            include_thread_id: false,
            include_file_info: false,
            include_span_events: false,
        }
    }
}

impl LogConfig {
    /// Returns a copy with a different filter directive.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Returns a copy with a different output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

fn default_level() -> String {
    "warn".to_string()
}

// Console output goes to stderr so stdout stays free for command results
fn default_outputs() -> Vec<LogOutput> {
    vec![LogOutput::Stderr]
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format for log aggregation systems
    Json,
    /// Human-readable format for development
    #[default]
    Pretty,
}

/// Log output target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LogOutput {
    /// Output to stdout
    Stdout,
    /// Output to stderr
    Stderr,
    /// Output to file with optional rotation
    File {
        /// Directory path for log files
        path: String,
        /// Rotation configuration
        rotation: Option<RotationConfig>,
    },
}

/// Log rotation configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationConfig {
    /// Rotate logs hourly
    Hourly,
    /// Rotate logs daily
    Daily,
    /// Never rotate (single file)
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.outputs, vec![LogOutput::Stderr]);
    }

    #[test]
    fn test_builder_helpers() {
        let config = LogConfig::default()
            .with_level("t212_gateway=debug")
            .with_format(LogFormat::Json);
        assert_eq!(config.level, "t212_gateway=debug");
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn test_config_serialization() {
        let config = LogConfig {
            level: "debug".to_string(),
            format: LogFormat::Json,
            outputs: vec![
                LogOutput::Stdout,
                LogOutput::File {
                    path: "/var/log/t212".to_string(),
                    rotation: Some(RotationConfig::Daily),
                },
            ],
            include_thread_id: true,
            include_file_info: true,
            include_span_events: true,
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: LogConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_output_tagging() {
        let parsed: Vec<LogOutput> =
            serde_json::from_str(r#"[{"type": "stderr"}, {"type": "file", "path": "logs", "rotation": "never"}]"#)
                .unwrap();
        assert_eq!(
            parsed,
            vec![
                LogOutput::Stderr,
                LogOutput::File {
                    path: "logs".to_string(),
                    rotation: Some(RotationConfig::Never),
                },
            ]
        );
    }
}
