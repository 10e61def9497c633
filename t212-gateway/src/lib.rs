//! # T212 Gateway
//!
//! Network communication with the 212 brokerage REST API.
//!
//! This crate provides:
//! - `rest` - an authenticated, rate-limit aware request executor
//! - `api` - typed domain operations (account, portfolio, metadata,
//!   history, orders, pies) built on top of it
//!
//! # Example
//!
//! ```ignore
//! use t212_gateway::prelude::*;
//!
//! let config = RestConfig::builder()
//!     .environment(Environment::Demo)
//!     .credentials("key-id", "key-secret")
//!     .build();
//!
//! let api = T212Api::new(RestClient::new(config)?);
//! let cash = api.account_cash().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

/// REST client infrastructure
pub mod rest;

/// Brokerage domain operations
pub mod api;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::api::{
        LimitOrderRequest, MarketOrderRequest, PieRequest, StopLimitOrderRequest,
        StopOrderRequest, T212Api,
    };
    pub use crate::rest::{
        Credentials, RateLimitGate, RateLimitState, RestClient, RestConfig, RestConfigBuilder,
    };
    pub use t212_core::prelude::*;
}
