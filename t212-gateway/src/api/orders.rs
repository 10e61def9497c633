//! Order queries, placement and cancellation.
//!
//! Quantities and prices are carried as [`Decimal`] and sent as JSON
//! numbers. A negative quantity is a sell.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use t212_core::error::Result;
use t212_core::types::{Ticker, TimeValidity};

use super::T212Api;

/// Body of a market order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOrderRequest {
    /// Shares to buy, negative to sell.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Instrument to trade.
    pub ticker: Ticker,
    /// Allow execution outside regular trading hours.
    pub extended_hours: bool,
}

impl MarketOrderRequest {
    /// Creates a regular-hours market order.
    #[must_use]
    pub fn new(ticker: Ticker, quantity: Decimal) -> Self {
        Self {
            quantity,
            ticker,
            extended_hours: false,
        }
    }

    /// Allows or forbids extended-hours execution.
    #[must_use]
    pub fn extended_hours(mut self, extended_hours: bool) -> Self {
        self.extended_hours = extended_hours;
        self
    }
}

/// Body of a limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitOrderRequest {
    /// Worst acceptable price.
    #[serde(with = "rust_decimal::serde::float")]
    pub limit_price: Decimal,
    /// Shares to buy, negative to sell.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Instrument to trade.
    pub ticker: Ticker,
    /// How long the order stays open.
    pub time_validity: TimeValidity,
}

impl LimitOrderRequest {
    /// Creates a limit order.
    #[must_use]
    pub fn new(
        ticker: Ticker,
        quantity: Decimal,
        limit_price: Decimal,
        time_validity: TimeValidity,
    ) -> Self {
        Self {
            limit_price,
            quantity,
            ticker,
            time_validity,
        }
    }
}

/// Body of a stop order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopOrderRequest {
    /// Price that triggers a market order.
    #[serde(with = "rust_decimal::serde::float")]
    pub stop_price: Decimal,
    /// Shares to buy, negative to sell.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Instrument to trade.
    pub ticker: Ticker,
    /// How long the order stays open.
    pub time_validity: TimeValidity,
}

impl StopOrderRequest {
    /// Creates a stop order.
    #[must_use]
    pub fn new(
        ticker: Ticker,
        quantity: Decimal,
        stop_price: Decimal,
        time_validity: TimeValidity,
    ) -> Self {
        Self {
            stop_price,
            quantity,
            ticker,
            time_validity,
        }
    }
}

/// Body of a stop-limit order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopLimitOrderRequest {
    /// Price that activates the limit order.
    #[serde(with = "rust_decimal::serde::float")]
    pub stop_price: Decimal,
    /// Worst acceptable price once active.
    #[serde(with = "rust_decimal::serde::float")]
    pub limit_price: Decimal,
    /// Shares to buy, negative to sell.
    #[serde(with = "rust_decimal::serde::float")]
    pub quantity: Decimal,
    /// Instrument to trade.
    pub ticker: Ticker,
    /// How long the order stays open.
    pub time_validity: TimeValidity,
}

impl StopLimitOrderRequest {
    /// Creates a stop-limit order.
    #[must_use]
    pub fn new(
        ticker: Ticker,
        quantity: Decimal,
        stop_price: Decimal,
        limit_price: Decimal,
        time_validity: TimeValidity,
    ) -> Self {
        Self {
            stop_price,
            limit_price,
            quantity,
            ticker,
            time_validity,
        }
    }
}

impl T212Api {
    /// Active orders.
    pub async fn orders(&self) -> Result<Value> {
        self.client.fetch("equity/orders").await
    }

    /// One order by id.
    pub async fn order(&self, order_id: i64) -> Result<Value> {
        self.client.fetch(&format!("equity/orders/{order_id}")).await
    }

    /// Places a market order.
    pub async fn place_market_order(&self, request: &MarketOrderRequest) -> Result<Value> {
        self.client.submit_as("equity/orders/market", request).await
    }

    /// Places a limit order.
    pub async fn place_limit_order(&self, request: &LimitOrderRequest) -> Result<Value> {
        self.client.submit_as("equity/orders/limit", request).await
    }

    /// Places a stop order.
    pub async fn place_stop_order(&self, request: &StopOrderRequest) -> Result<Value> {
        self.client.submit_as("equity/orders/stop", request).await
    }

    /// Places a stop-limit order.
    pub async fn place_stop_limit_order(&self, request: &StopLimitOrderRequest) -> Result<Value> {
        self.client.submit_as("equity/orders/stop-limit", request).await
    }

    /// Cancels an open order. Returns true once the server accepts.
    pub async fn cancel_order(&self, order_id: i64) -> Result<bool> {
        self.client.remove(&format!("equity/orders/{order_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn ticker(value: &str) -> Ticker {
        Ticker::new(value).unwrap()
    }

    #[test]
    fn test_market_order_body() {
        let request = MarketOrderRequest::new(ticker("AAPL_US_EQ"), dec!(0.5));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"quantity": 0.5, "ticker": "AAPL_US_EQ", "extendedHours": false})
        );

        let request = request.extended_hours(true);
        assert_eq!(serde_json::to_value(&request).unwrap()["extendedHours"], json!(true));
    }

    #[test]
    fn test_limit_order_body() {
        let request = LimitOrderRequest::new(
            ticker("TSLA_US_EQ"),
            dec!(-2),
            dec!(250.75),
            TimeValidity::GoodTillCancel,
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "limitPrice": 250.75,
                "quantity": -2.0,
                "ticker": "TSLA_US_EQ",
                "timeValidity": "GOOD_TILL_CANCEL"
            })
        );
    }

    #[test]
    fn test_stop_order_body() {
        let request = StopOrderRequest::new(ticker("VUSA_EQ"), dec!(3), dec!(80), TimeValidity::Day);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "stopPrice": 80.0,
                "quantity": 3.0,
                "ticker": "VUSA_EQ",
                "timeValidity": "DAY"
            })
        );
    }

    #[test]
    fn test_stop_limit_order_body() {
        let request = StopLimitOrderRequest::new(
            ticker("VUSA_EQ"),
            dec!(1),
            dec!(80),
            dec!(79.5),
            TimeValidity::Day,
        );
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["stopPrice"], json!(80.0));
        assert_eq!(body["limitPrice"], json!(79.5));
        assert_eq!(body["timeValidity"], json!("DAY"));
    }
}
