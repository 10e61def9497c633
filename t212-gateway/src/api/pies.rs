//! Pies: named baskets of instruments with target weights.

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use t212_core::error::Result;
use t212_core::types::{DividendCashAction, Ticker};

use super::T212Api;

/// Body of a pie create or update.
///
/// `goal` and `endDate` are sent as `null` when unset. `endDate` is
/// rendered as RFC 3339 in UTC with a `Z` suffix.
///
/// # Example
///
/// ```
/// use rust_decimal::Decimal;
/// use t212_core::types::{DividendCashAction, Ticker};
/// use t212_gateway::api::PieRequest;
///
/// let request = PieRequest::new("Core", DividendCashAction::Reinvest)
///     .share(Ticker::new("VUSA_EQ").unwrap(), Decimal::new(6, 1))
///     .share(Ticker::new("EQQQ_EQ").unwrap(), Decimal::new(4, 1));
///
/// let body = serde_json::to_value(&request).unwrap();
/// assert_eq!(body["instrumentShares"]["VUSA_EQ"], 0.6);
/// assert!(body["goal"].is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieRequest {
    /// Display name.
    pub name: String,
    /// Target value of the pie.
    #[serde(with = "rust_decimal::serde::float_option")]
    pub goal: Option<Decimal>,
    /// Date by which the goal should be reached.
    #[serde(serialize_with = "serialize_end_date")]
    pub end_date: Option<DateTime<Utc>>,
    /// What happens to dividends paid by pie holdings.
    pub dividend_cash_action: DividendCashAction,
    /// Target weight per instrument.
    #[serde(serialize_with = "serialize_shares")]
    pub instrument_shares: BTreeMap<Ticker, Decimal>,
}

impl PieRequest {
    /// Creates a pie body with no holdings, goal or end date.
    #[must_use]
    pub fn new(name: impl Into<String>, dividend_cash_action: DividendCashAction) -> Self {
        Self {
            name: name.into(),
            goal: None,
            end_date: None,
            dividend_cash_action,
            instrument_shares: BTreeMap::new(),
        }
    }

    /// Sets the target value.
    #[must_use]
    pub fn goal(mut self, goal: Decimal) -> Self {
        self.goal = Some(goal);
        self
    }

    /// Sets the goal date.
    #[must_use]
    pub fn end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Adds or replaces the weight of one instrument.
    #[must_use]
    pub fn share(mut self, ticker: Ticker, weight: Decimal) -> Self {
        self.instrument_shares.insert(ticker, weight);
        self
    }
}

fn serialize_end_date<S: Serializer>(
    end_date: &Option<DateTime<Utc>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match end_date {
        Some(date) => serializer.serialize_str(&date.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        None => serializer.serialize_none(),
    }
}

struct Weight<'a>(&'a Decimal);

impl Serialize for Weight<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(self.0, serializer)
    }
}

fn serialize_shares<S: Serializer>(
    shares: &BTreeMap<Ticker, Decimal>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(shares.len()))?;
    for (ticker, weight) in shares {
        map.serialize_entry(ticker.as_str(), &Weight(weight))?;
    }
    map.end()
}

impl T212Api {
    /// All pies in the account.
    pub async fn pies(&self) -> Result<Value> {
        self.client.fetch("equity/pies").await
    }

    /// One pie by id.
    pub async fn pie(&self, pie_id: i64) -> Result<Value> {
        self.client.fetch(&format!("equity/pies/{pie_id}")).await
    }

    /// Creates a pie.
    pub async fn create_pie(&self, request: &PieRequest) -> Result<Value> {
        self.client.submit_as("equity/pies", request).await
    }

    /// Replaces the settings and holdings of an existing pie.
    pub async fn update_pie(&self, pie_id: i64, request: &PieRequest) -> Result<Value> {
        self.client
            .submit_as(&format!("equity/pies/{pie_id}"), request)
            .await
    }

    /// Deletes a pie. Returns true once the server accepts.
    pub async fn delete_pie(&self, pie_id: i64) -> Result<bool> {
        self.client.remove(&format!("equity/pies/{pie_id}")).await
    }
}
