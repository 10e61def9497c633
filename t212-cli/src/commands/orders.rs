//! Order commands.
//!
//! Quantities are signed: a negative quantity sells.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use t212_core::types::{Ticker, TimeValidity};
use t212_gateway::api::{
    LimitOrderRequest, MarketOrderRequest, StopLimitOrderRequest, StopOrderRequest, T212Api,
};
use tracing::info;

use super::render;

/// Arguments naming one order
#[derive(Args, Debug)]
pub struct OrderIdArgs {
    /// Order id
    pub id: i64,
}

/// Arguments for a market order
#[derive(Args, Debug)]
pub struct MarketOrderArgs {
    /// Instrument ticker
    #[arg(long)]
    pub ticker: Ticker,

    /// Shares to trade, negative to sell
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Decimal,

    /// Allow execution outside regular trading hours
    #[arg(long)]
    pub extended_hours: bool,
}

/// Arguments for a limit order
#[derive(Args, Debug)]
pub struct LimitOrderArgs {
    /// Instrument ticker
    #[arg(long)]
    pub ticker: Ticker,

    /// Shares to trade, negative to sell
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Decimal,

    /// Worst acceptable price
    #[arg(long)]
    pub limit_price: Decimal,

    /// DAY or GOOD_TILL_CANCEL
    #[arg(long, default_value = "DAY")]
    pub time_validity: TimeValidity,
}

/// Arguments for a stop order
#[derive(Args, Debug)]
pub struct StopOrderArgs {
    /// Instrument ticker
    #[arg(long)]
    pub ticker: Ticker,

    /// Shares to trade, negative to sell
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Decimal,

    /// Price that triggers a market order
    #[arg(long)]
    pub stop_price: Decimal,

    /// DAY or GOOD_TILL_CANCEL
    #[arg(long, default_value = "DAY")]
    pub time_validity: TimeValidity,
}

/// Arguments for a stop-limit order
#[derive(Args, Debug)]
pub struct StopLimitOrderArgs {
    /// Instrument ticker
    #[arg(long)]
    pub ticker: Ticker,

    /// Shares to trade, negative to sell
    #[arg(long, allow_negative_numbers = true)]
    pub quantity: Decimal,

    /// Price that activates the limit order
    #[arg(long)]
    pub stop_price: Decimal,

    /// Worst acceptable price once active
    #[arg(long)]
    pub limit_price: Decimal,

    /// DAY or GOOD_TILL_CANCEL
    #[arg(long, default_value = "DAY")]
    pub time_validity: TimeValidity,
}

/// Show one order.
pub async fn show(api: &T212Api, args: OrderIdArgs) -> Result<String> {
    render(&api.order(args.id).await?)
}

/// Place a market order.
pub async fn market(api: &T212Api, args: MarketOrderArgs) -> Result<String> {
    info!(ticker = %args.ticker, quantity = %args.quantity, "Placing market order");
    let request =
        MarketOrderRequest::new(args.ticker, args.quantity).extended_hours(args.extended_hours);
    render(&api.place_market_order(&request).await?)
}

/// Place a limit order.
pub async fn limit(api: &T212Api, args: LimitOrderArgs) -> Result<String> {
    info!(ticker = %args.ticker, quantity = %args.quantity, "Placing limit order");
    let request =
        LimitOrderRequest::new(args.ticker, args.quantity, args.limit_price, args.time_validity);
    render(&api.place_limit_order(&request).await?)
}

/// Place a stop order.
pub async fn stop(api: &T212Api, args: StopOrderArgs) -> Result<String> {
    info!(ticker = %args.ticker, quantity = %args.quantity, "Placing stop order");
    let request =
        StopOrderRequest::new(args.ticker, args.quantity, args.stop_price, args.time_validity);
    render(&api.place_stop_order(&request).await?)
}

/// Place a stop-limit order.
pub async fn stop_limit(api: &T212Api, args: StopLimitOrderArgs) -> Result<String> {
    info!(ticker = %args.ticker, quantity = %args.quantity, "Placing stop-limit order");
    let request = StopLimitOrderRequest::new(
        args.ticker,
        args.quantity,
        args.stop_price,
        args.limit_price,
        args.time_validity,
    );
    render(&api.place_stop_limit_order(&request).await?)
}

/// Cancel an open order.
pub async fn cancel(api: &T212Api, args: OrderIdArgs) -> Result<String> {
    api.cancel_order(args.id).await?;
    Ok(format!("Order with ID {} cancelled.", args.id))
}
