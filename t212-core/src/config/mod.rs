//! Configuration management module.
//!
//! - YAML, TOML and JSON configuration files
//! - Environment variable overrides for credentials and endpoints
//! - Validation with descriptive error messages
//!
//! # Example
//!
//! ```rust,ignore
//! use t212_core::config::ConfigLoader;
//!
//! let config: RestConfig = ConfigLoader::new()
//!     .with_env_prefix("T212")
//!     .load("t212.yaml")?;
//! ```

mod loader;
mod traits;

pub use loader::{ConfigFormat, ConfigLoader};
pub use traits::{Configurable, Validatable};
