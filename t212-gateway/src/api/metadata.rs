use serde::Deserialize;
use serde_json::Value;
use t212_core::error::Result;

use super::T212Api;

const INSTRUMENTS_PATH: &str = "equity/metadata/instruments";

#[derive(Deserialize)]
struct InstrumentTicker {
    ticker: String,
}

impl T212Api {
    /// Every instrument the account can trade.
    pub async fn instruments(&self) -> Result<Value> {
        self.client.fetch(INSTRUMENTS_PATH).await
    }

    /// Tickers of every tradable instrument, in server order.
    ///
    /// A payload that is not a list of objects with a `ticker` field is a
    /// decode error.
    pub async fn instrument_tickers(&self) -> Result<Vec<String>> {
        let instruments: Vec<InstrumentTicker> = self.client.fetch_as(INSTRUMENTS_PATH).await?;
        Ok(instruments.into_iter().map(|i| i.ticker).collect())
    }

    /// Exchanges and their trading schedules.
    pub async fn exchanges(&self) -> Result<Value> {
        self.client.fetch("equity/metadata/exchanges").await
    }
}
