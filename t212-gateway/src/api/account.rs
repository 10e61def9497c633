use serde_json::Value;
use t212_core::error::Result;

use super::T212Api;

impl T212Api {
    /// Account metadata such as id and currency.
    pub async fn account_info(&self) -> Result<Value> {
        self.client.fetch("equity/account/info").await
    }

    /// Cash balance breakdown of the account.
    pub async fn account_cash(&self) -> Result<Value> {
        self.client.fetch("equity/account/cash").await
    }
}
