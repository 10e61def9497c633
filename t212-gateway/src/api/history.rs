use serde_json::Value;
use t212_core::error::Result;

use super::T212Api;

impl T212Api {
    /// Dividends paid into the account.
    pub async fn paid_dividends(&self) -> Result<Value> {
        self.client.fetch("history/dividends").await
    }
}
