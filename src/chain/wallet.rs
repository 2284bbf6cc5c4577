use std::sync::Arc;

use alloy_primitives::Address;
use serde_json::{Value, json};

use crate::chain::provider::EthProvider;
use crate::error::{ChainError, Result};

/// Front door to the wallet provider: presence checks and account access.
/// Holding `None` models a host environment with no wallet installed.
pub struct WalletGateway {
    provider: Option<Arc<dyn EthProvider>>,
}

impl WalletGateway {
    pub fn new(provider: Option<Arc<dyn EthProvider>>) -> Self {
        Self { provider }
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    /// Accounts the wallet has already authorized, without prompting.
    /// Empty when no provider is present.
    pub async fn authorized_accounts(&self) -> Result<Vec<Address>> {
        let Some(provider) = &self.provider else {
            return Ok(Vec::new());
        };
        let accounts = provider.request("eth_accounts", json!([])).await?;
        parse_accounts(&accounts)
    }

    /// Prompts the user to authorize an account and returns the first one.
    pub async fn request_connection(&self) -> Result<Address> {
        let provider = self.provider.as_ref().ok_or(ChainError::NoWalletFound)?;
        let accounts = provider.request("eth_requestAccounts", json!([])).await?;
        parse_accounts(&accounts)?
            .into_iter()
            .next()
            .ok_or_else(|| ChainError::Rpc("wallet returned an empty account list".to_string()))
    }
}

fn parse_accounts(value: &Value) -> Result<Vec<Address>> {
    let entries = value
        .as_array()
        .ok_or_else(|| ChainError::Rpc("account list is not an array".to_string()))?;

    entries
        .iter()
        .map(|entry| {
            entry
                .as_str()
                .ok_or_else(|| ChainError::Rpc("account entry is not a string".to_string()))?
                .parse::<Address>()
                .map_err(|err| ChainError::Rpc(format!("invalid account address: {err}")))
        })
        .collect()
}
