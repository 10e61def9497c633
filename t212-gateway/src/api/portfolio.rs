use serde_json::{Value, json};
use t212_core::error::Result;
use t212_core::types::Ticker;

use super::T212Api;

impl T212Api {
    /// All open positions.
    pub async fn portfolio(&self) -> Result<Value> {
        self.client.fetch("equity/portfolio").await
    }

    /// The open position in one instrument.
    pub async fn portfolio_position(&self, ticker: &Ticker) -> Result<Value> {
        self.client.fetch(&format!("equity/portfolio/{ticker}")).await
    }

    /// Looks up a position by ticker through the search endpoint.
    ///
    /// The live service has been seen to answer 404 here for tickers that
    /// [`T212Api::portfolio_position`] resolves.
    pub async fn search_position(&self, ticker: &Ticker) -> Result<Value> {
        self.client
            .submit("equity/portfolio/ticker", json!({ "ticker": ticker }))
            .await
    }
}
