//! # T212 Core
//!
//! Core types, error framework and configuration loading shared by the
//! 212 brokerage client crates.
//!
//! This crate provides:
//! - Closed enumerations for the brokerage's categorical fields
//!   (`TimeValidity`, `DividendCashAction`, `Environment`)
//! - The error hierarchy, including the normalized [`error::ApiError`]
//!   surfaced for every non-success HTTP response
//! - Configuration loading with YAML/TOML/JSON support and environment
//!   variable overrides

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Closed categorical types
pub mod types;

/// Error types and handling
pub mod error;

/// Configuration management
pub mod config;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigFormat, ConfigLoader, Configurable, Validatable};
    pub use crate::error::{ApiError, ErrorBody, RequestContext, Result, T212Error};
    pub use crate::types::*;
}
