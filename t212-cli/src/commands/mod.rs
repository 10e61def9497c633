//! Subcommands, one per brokerage operation.
//!
//! Each command returns the text to print: pretty JSON for data, a short
//! confirmation for deletions.

pub mod account;
pub mod orders;
pub mod pies;

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use t212_gateway::api::T212Api;

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account id and currency
    AccountInfo,

    /// Cash balance
    Balance,

    /// All open positions
    Portfolio,

    /// Open position in one instrument
    Position(account::TickerArgs),

    /// Look up a held position by ticker
    SearchPosition(account::TickerArgs),

    /// Every tradable instrument (large response)
    Instruments,

    /// Tickers of every tradable instrument
    Tickers,

    /// Exchanges and their trading schedules
    Exchanges,

    /// Dividends paid into the account
    Dividends,

    /// Active orders
    Orders,

    /// One order by id
    Order(orders::OrderIdArgs),

    /// Place a market order
    MarketOrder(orders::MarketOrderArgs),

    /// Place a limit order
    LimitOrder(orders::LimitOrderArgs),

    /// Place a stop order
    StopOrder(orders::StopOrderArgs),

    /// Place a stop-limit order
    StopLimitOrder(orders::StopLimitOrderArgs),

    /// Cancel an open order
    CancelOrder(orders::OrderIdArgs),

    /// All pies
    Pies,

    /// One pie by id
    Pie(pies::PieIdArgs),

    /// Create a pie
    CreatePie(pies::PieArgs),

    /// Replace the settings and holdings of a pie
    UpdatePie(pies::UpdatePieArgs),

    /// Delete a pie
    DeletePie(pies::PieIdArgs),
}

/// Runs one command and returns its printable output.
pub async fn execute(api: &T212Api, command: Commands) -> Result<String> {
    match command {
        Commands::AccountInfo => render(&api.account_info().await?),
        Commands::Balance => render(&api.account_cash().await?),
        Commands::Portfolio => render(&api.portfolio().await?),
        Commands::Position(args) => account::position(api, args).await,
        Commands::SearchPosition(args) => account::search_position(api, args).await,
        Commands::Instruments => render(&api.instruments().await?),
        Commands::Tickers => render(&api.instrument_tickers().await?),
        Commands::Exchanges => render(&api.exchanges().await?),
        Commands::Dividends => render(&api.paid_dividends().await?),
        Commands::Orders => render(&api.orders().await?),
        Commands::Order(args) => orders::show(api, args).await,
        Commands::MarketOrder(args) => orders::market(api, args).await,
        Commands::LimitOrder(args) => orders::limit(api, args).await,
        Commands::StopOrder(args) => orders::stop(api, args).await,
        Commands::StopLimitOrder(args) => orders::stop_limit(api, args).await,
        Commands::CancelOrder(args) => orders::cancel(api, args).await,
        Commands::Pies => render(&api.pies().await?),
        Commands::Pie(args) => pies::show(api, args).await,
        Commands::CreatePie(args) => pies::create(api, args).await,
        Commands::UpdatePie(args) => pies::update(api, args).await,
        Commands::DeletePie(args) => pies::delete(api, args).await,
    }
}

/// Pretty-prints a response.
pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
