use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::error::ChainError;

/// EIP-1193 "user rejected request" error code.
const CODE_USER_REJECTED: i64 = 4001;

/// Capability object brokering access to the wallet provider. Everything
/// that touches the chain goes through this single entry point, so tests
/// can substitute a scripted double.
#[async_trait]
pub trait EthProvider: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError>;
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<Value>,
    error: Option<RpcErrorBody>,
}

/// JSON-RPC 2.0 over HTTP.
pub struct HttpProvider {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpProvider {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EthProvider for HttpProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ChainError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": Uuid::new_v4().to_string(),
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| ChainError::Rpc(format!("{method} transport failed: {err}")))?;

        let payload: RpcResponse = response
            .json()
            .await
            .map_err(|err| ChainError::Rpc(format!("{method} returned malformed JSON-RPC: {err}")))?;

        if let Some(error) = payload.error {
            return Err(rpc_error(error.code, &error.message));
        }

        Ok(payload.result.unwrap_or(Value::Null))
    }
}

/// Maps a JSON-RPC error object onto the failure taxonomy.
pub(crate) fn rpc_error(code: i64, message: &str) -> ChainError {
    if code == CODE_USER_REJECTED {
        ChainError::UserRejected
    } else {
        ChainError::Rpc(format!("code {code}: {message}"))
    }
}

/// Probes the configured endpoint for a wallet provider. `None` models a
/// host environment without one, the same way the injected browser object
/// may simply be absent.
pub async fn detect_provider(config: &AppConfig) -> Option<Arc<dyn EthProvider>> {
    let provider = HttpProvider::new(config.rpc_endpoint.clone());
    match provider.request("web3_clientVersion", json!([])).await {
        Ok(version) => {
            log::info!(
                "Found wallet provider at {}: {}",
                config.rpc_endpoint,
                version.as_str().unwrap_or("unknown")
            );
            Some(Arc::new(provider))
        }
        Err(err) => {
            log::info!("No wallet provider at {}: {err}", config.rpc_endpoint);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_4001_maps_to_user_rejected() {
        assert!(matches!(
            rpc_error(4001, "User denied account authorization"),
            ChainError::UserRejected
        ));
    }

    #[test]
    fn other_codes_map_to_rpc() {
        let err = rpc_error(-32000, "header not found");
        match err {
            ChainError::Rpc(message) => assert!(message.contains("header not found")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn response_parsing_accepts_error_without_message() {
        let payload: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": "1",
            "error": { "code": 4001 }
        }))
        .unwrap();
        assert_eq!(payload.error.unwrap().code, 4001);
    }
}
