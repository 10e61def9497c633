//! Allocation basket ("pie") categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// What a pie does with the dividends paid by its instruments.
///
/// # Examples
///
/// ```
/// use t212_core::types::DividendCashAction;
///
/// let action: DividendCashAction = "REINVEST".parse().unwrap();
/// assert_eq!(action.as_str(), "REINVEST");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DividendCashAction {
    /// Dividends buy more of the pie.
    #[default]
    Reinvest,
    /// Dividends are paid out as free cash.
    ToAccountCash,
}

impl DividendCashAction {
    /// All accepted wire values.
    pub const VARIANTS: [&'static str; 2] = ["REINVEST", "TO_ACCOUNT_CASH"];

    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Reinvest => "REINVEST",
            Self::ToAccountCash => "TO_ACCOUNT_CASH",
        }
    }
}

impl fmt::Display for DividendCashAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DividendCashAction {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "REINVEST" => Ok(Self::Reinvest),
            "TO_ACCOUNT_CASH" => Ok(Self::ToAccountCash),
            _ => Err(DataError::invalid_value(
                "dividendCashAction",
                s,
                &Self::VARIANTS,
            )),
        }
    }
}
