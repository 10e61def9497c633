//! Order-related categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Validity window of a pending limit, stop or stop-limit order.
///
/// # Examples
///
/// ```
/// use t212_core::types::TimeValidity;
///
/// let validity: TimeValidity = "GOOD_TILL_CANCEL".parse().unwrap();
/// assert_eq!(validity, TimeValidity::GoodTillCancel);
/// assert!("FOREVER".parse::<TimeValidity>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimeValidity {
    /// Expires at the end of the trading day.
    #[default]
    Day,
    /// Stays live until filled or cancelled.
    GoodTillCancel,
}

impl TimeValidity {
    /// All accepted wire values.
    pub const VARIANTS: [&'static str; 2] = ["DAY", "GOOD_TILL_CANCEL"];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "DAY",
            Self::GoodTillCancel => "GOOD_TILL_CANCEL",
        }
    }
}

impl fmt::Display for TimeValidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeValidity {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DAY" => Ok(Self::Day),
            "GOOD_TILL_CANCEL" => Ok(Self::GoodTillCancel),
            _ => Err(DataError::invalid_value("timeValidity", s, &Self::VARIANTS)),
        }
    }
}
