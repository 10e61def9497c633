//! Ticker type for representing instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Instrument identifier, e.g. `AAPL_US_EQ` or `RRl_EQ`.
///
/// Tickers are interpolated into request paths, so they must be non-empty
/// and free of whitespace and `/`. Case is preserved: `RRl_EQ` and
/// `RRL_EQ` are different instruments.
///
/// # Examples
///
/// ```
/// use t212_core::types::Ticker;
///
/// let ticker = Ticker::new("AAPL_US_EQ").unwrap();
/// assert_eq!(ticker.as_str(), "AAPL_US_EQ");
/// assert!(Ticker::new("equity/orders").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Creates a new `Ticker`.
    ///
    /// # Errors
    ///
    /// Returns `DataError::InvalidValue` if the value is empty or contains
    /// whitespace or `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, DataError> {
        let value = value.into();
        if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(DataError::InvalidValue {
                field: "ticker".to_string(),
                value,
                expected: "a non-empty ticker without whitespace or '/'".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Returns the ticker as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
