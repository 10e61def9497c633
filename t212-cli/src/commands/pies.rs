//! Pie commands.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::Args;
use rust_decimal::Decimal;
use t212_core::types::{DividendCashAction, Ticker};
use t212_gateway::api::{PieRequest, T212Api};

use super::render;

/// Arguments naming one pie
#[derive(Args, Debug)]
pub struct PieIdArgs {
    /// Pie id
    pub id: i64,
}

/// Settings and holdings of a pie
#[derive(Args, Debug)]
pub struct PieArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// REINVEST or TO_ACCOUNT_CASH
    #[arg(long, default_value = "REINVEST")]
    pub dividend_cash_action: DividendCashAction,

    /// Target weight as TICKER=WEIGHT; repeat for each instrument
    #[arg(long = "share", value_parser = parse_share, required = true)]
    pub shares: Vec<(Ticker, Decimal)>,

    /// Target value of the pie
    #[arg(long)]
    pub goal: Option<Decimal>,

    /// Goal date: RFC 3339, or a date/time without offset taken as UTC
    #[arg(long, value_parser = parse_end_date)]
    pub end_date: Option<DateTime<Utc>>,
}

impl PieArgs {
    /// Converts the arguments into a request body.
    #[must_use]
    pub fn into_request(self) -> PieRequest {
        let mut request = PieRequest::new(self.name, self.dividend_cash_action);
        request.goal = self.goal;
        request.end_date = self.end_date;
        request.instrument_shares.extend(self.shares);
        request
    }
}

/// Arguments for replacing a pie
#[derive(Args, Debug)]
pub struct UpdatePieArgs {
    /// Pie id
    pub id: i64,

    #[command(flatten)]
    pub pie: PieArgs,
}

/// Parses `TICKER=WEIGHT`.
pub fn parse_share(value: &str) -> Result<(Ticker, Decimal), String> {
    let (ticker, weight) = value
        .split_once('=')
        .ok_or_else(|| format!("expected TICKER=WEIGHT, got '{value}'"))?;
    let ticker = Ticker::new(ticker.trim()).map_err(|e| e.to_string())?;
    let weight = weight
        .trim()
        .parse::<Decimal>()
        .map_err(|e| format!("invalid weight '{weight}': {e}"))?;
    Ok((ticker, weight))
}

/// Parses a goal date. Values without an offset are taken as UTC.
pub fn parse_end_date(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(date.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
        .ok_or_else(|| format!("invalid date '{value}', expected RFC 3339 or YYYY-MM-DD"))
}

/// Show one pie.
pub async fn show(api: &T212Api, args: PieIdArgs) -> Result<String> {
    render(&api.pie(args.id).await?)
}

/// Create a pie.
pub async fn create(api: &T212Api, args: PieArgs) -> Result<String> {
    render(&api.create_pie(&args.into_request()).await?)
}

/// Replace the settings and holdings of a pie.
pub async fn update(api: &T212Api, args: UpdatePieArgs) -> Result<String> {
    render(&api.update_pie(args.id, &args.pie.into_request()).await?)
}

/// Delete a pie.
pub async fn delete(api: &T212Api, args: PieIdArgs) -> Result<String> {
    api.delete_pie(args.id).await?;
    Ok(format!("Pie with ID {} deleted.", args.id))
}
