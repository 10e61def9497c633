//! REST client infrastructure.
//!
//! This module provides the resilient request executor:
//! - HTTP Basic credentials derived once per client
//! - Throttling driven by the server's `x-ratelimit-*` headers
//! - Bounded retry of 429 responses
//! - Normalization of every non-success response into one error shape
//!
//! # Example
//!
//! ```ignore
//! use t212_gateway::rest::{RestClient, RestConfig};
//!
//! let config = RestConfig::builder()
//!     .credentials("your_key_id", "your_key_secret")
//!     .build();
//!
//! let client = RestClient::new(config)?;
//! let positions = client.fetch("equity/portfolio").await?;
//! ```

mod client;
mod config;
mod credentials;
mod rate_limiter;

pub use client::{RestClient, normalize_error};
pub use config::{RestConfig, RestConfigBuilder};
pub use credentials::{Credentials, encode as encode_credentials};
pub use rate_limiter::{
    HEADER_LIMIT, HEADER_PERIOD, HEADER_REMAINING, HEADER_RESET, HEADER_USED, MIN_RESET_BUFFER,
    RateLimitGate, RateLimitState,
};
