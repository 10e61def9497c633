//! Account and portfolio commands.

use anyhow::Result;
use clap::Args;
use t212_core::types::Ticker;
use t212_gateway::api::T212Api;

use super::render;

/// Arguments naming one instrument
#[derive(Args, Debug)]
pub struct TickerArgs {
    /// Instrument ticker, e.g. AAPL_US_EQ or RRl_EQ
    pub ticker: Ticker,
}

/// Show the open position in one instrument.
pub async fn position(api: &T212Api, args: TickerArgs) -> Result<String> {
    render(&api.portfolio_position(&args.ticker).await?)
}

/// Look up a held position through the search endpoint.
pub async fn search_position(api: &T212Api, args: TickerArgs) -> Result<String> {
    render(&api.search_position(&args.ticker).await?)
}
