//! Trading environment selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataError;

/// Which brokerage endpoint a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Real-money account.
    #[default]
    Live,
    /// Paper-trading account.
    Demo,
}

impl Environment {
    /// All accepted values.
    pub const VARIANTS: [&'static str; 2] = ["live", "demo"];

    /// Returns the default API base URL for this environment.
    #[must_use]
    pub const fn base_url(&self) -> &'static str {
        match self {
            Self::Live => "https://live.trading212.com/api/v0",
            Self::Demo => "https://demo.trading212.com/api/v0",
        }
    }

    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "demo" => Ok(Self::Demo),
            _ => Err(DataError::invalid_value("environment", s, &Self::VARIANTS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_urls() {
        assert!(Environment::Live.base_url().starts_with("https://live."));
        assert!(Environment::Demo.base_url().starts_with("https://demo."));
    }

    #[test]
    fn test_parse() {
        assert_eq!("DEMO".parse::<Environment>().unwrap(), Environment::Demo);
        assert!("paper".parse::<Environment>().is_err());
    }
}
