//! # T212 Telemetry
//!
//! Logging for the 212 brokerage client.
//!
//! This crate provides:
//! - Structured logging with JSON and pretty formats
//! - Output to stdout, stderr or rolling files
//! - Masking of credentials before anything is written
//!
//! ## Features
//!
//! - **Structured Logging**: Uses `tracing` for structured, contextual logging
//! - **Multiple Outputs**: Any combination of console and file targets
//! - **Log Rotation**: Hourly, daily or no rotation for file output
//! - **Data Masking**: `Basic` tokens, key ids and secrets never reach a sink

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Logging configuration and initialization
pub mod logging;

/// Sensitive data masking
pub mod masking;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::logging::{LogConfig, LogFormat, LogOutput, LoggingError, init_logging};
    pub use crate::masking::SensitiveDataMasker;
}
