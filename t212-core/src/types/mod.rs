//! Closed categorical types and identifier wrappers.
//!
//! The brokerage encodes several closed categories as strings on the wire.
//! Each one is a Rust enum here; parsing rejects anything outside the
//! known set with a [`DataError::InvalidValue`](crate::error::DataError).
//!
//! # Types
//!
//! - [`TimeValidity`] - How long a pending order stays live
//! - [`DividendCashAction`] - What a pie does with dividends
//! - [`Environment`] - Live or demo trading endpoint
//! - [`Ticker`] - Instrument identifier such as `AAPL_US_EQ`

mod environment;
mod order;
mod pie;
mod ticker;

pub use environment::Environment;
pub use order::TimeValidity;
pub use pie::DividendCashAction;
pub use ticker::Ticker;
