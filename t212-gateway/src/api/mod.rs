//! Domain operations of the brokerage API.
//!
//! [`T212Api`] maps each operation to a verb, a path relative to the base
//! URL and, for writes, a JSON body. All transport concerns (credentials,
//! throttling, retries, error normalization) stay in [`RestClient`].
//!
//! Read operations return the server's JSON payload unchanged; the
//! brokerage owns those schemas.

mod account;
mod history;
mod metadata;
mod orders;
mod pies;
mod portfolio;

pub use orders::{LimitOrderRequest, MarketOrderRequest, StopLimitOrderRequest, StopOrderRequest};
pub use pies::PieRequest;

use std::sync::Arc;
use t212_core::error::Result;

use crate::rest::{RestClient, RestConfig};

/// Typed entry point to the brokerage operations.
///
/// Cloning is cheap; clones share the client and its rate-limit window.
#[derive(Debug, Clone)]
pub struct T212Api {
    client: Arc<RestClient>,
}

impl T212Api {
    /// Wraps a REST client.
    #[must_use]
    pub fn new(client: RestClient) -> Self {
        Self::from_shared(Arc::new(client))
    }

    /// Wraps a REST client that is already shared.
    #[must_use]
    pub fn from_shared(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Builds the client from configuration.
    pub fn connect(config: RestConfig) -> Result<Self> {
        Ok(Self::new(RestClient::new(config)?))
    }

    /// Returns the underlying REST client.
    #[must_use]
    pub fn client(&self) -> &RestClient {
        &self.client
    }
}
