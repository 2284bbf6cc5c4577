use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, B256};
use serde_json::{Value, json};

use crate::chain::abi;
use crate::chain::provider::EthProvider;
use crate::common::Wave;
use crate::error::{ChainError, Result};

/// Gas ceiling applied to every wave submission.
const WAVE_GAS_LIMIT: u64 = 300_000;

/// Client for the deployed WavePortal contract. All calls are routed
/// through the wallet provider capability; without one, every operation
/// fails with an rpc error and leaves the caller's state alone.
pub struct WavePortal {
    provider: Option<Arc<dyn EthProvider>>,
    address: Address,
    receipt_poll: Duration,
}

impl WavePortal {
    pub fn new(
        provider: Option<Arc<dyn EthProvider>>,
        address: Address,
        receipt_poll: Duration,
    ) -> Self {
        Self {
            provider,
            address,
            receipt_poll,
        }
    }

    fn provider(&self) -> Result<&Arc<dyn EthProvider>> {
        self.provider
            .as_ref()
            .ok_or_else(|| ChainError::Rpc("no wallet provider for contract call".to_string()))
    }

    async fn call(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        let provider = self.provider()?;
        let result = provider
            .request(
                "eth_call",
                json!([
                    { "to": format!("{:#x}", self.address), "data": hex_bytes(&data) },
                    "latest",
                ]),
            )
            .await?;
        decode_hex_value(&result)
    }

    /// Read-only bulk fetch of every recorded wave.
    pub async fn get_all_waves(&self) -> Result<Vec<Wave>> {
        let raw = self.call(abi::encode_get_all_waves()).await?;
        abi::decode_get_all_waves(&raw)
    }

    /// Current on-chain wave count.
    pub async fn total_waves(&self) -> Result<u64> {
        let raw = self.call(abi::encode_get_total_waves()).await?;
        abi::decode_get_total_waves(&raw)
    }

    /// Submits a wave transaction and returns a handle to await mining.
    pub async fn send_wave(&self, from: Address, message: &str) -> Result<TransactionHandle> {
        let provider = self.provider()?;
        let data = abi::encode_wave(message);
        let result = provider
            .request(
                "eth_sendTransaction",
                json!([{
                    "from": format!("{from:#x}"),
                    "to": format!("{:#x}", self.address),
                    "gas": format!("{WAVE_GAS_LIMIT:#x}"),
                    "data": hex_bytes(&data),
                }]),
            )
            .await?;

        let hash = result
            .as_str()
            .ok_or_else(|| ChainError::Rpc("eth_sendTransaction returned no hash".to_string()))?
            .to_string();

        Ok(TransactionHandle {
            provider: provider.clone(),
            hash,
            poll: self.receipt_poll,
        })
    }

    /// Installs a NewWave log filter and polls it on a background task,
    /// handing each decoded wave to `handler`.
    pub async fn subscribe_new_waves<F>(&self, interval: Duration, handler: F) -> Result<Subscription>
    where
        F: Fn(Wave) + Send + 'static,
    {
        let provider = self.provider()?.clone();
        let filter_id = provider
            .request(
                "eth_newFilter",
                json!([{
                    "address": format!("{:#x}", self.address),
                    "topics": [format!("{:#x}", abi::new_wave_topic())],
                }]),
            )
            .await?
            .as_str()
            .ok_or_else(|| ChainError::Rpc("eth_newFilter returned no filter id".to_string()))?
            .to_string();

        log::info!("Subscribed to NewWave events (filter {filter_id})");

        let poll_provider = provider.clone();
        let poll_filter = filter_id.clone();
        let poller = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                match poll_provider
                    .request("eth_getFilterChanges", json!([poll_filter]))
                    .await
                {
                    Ok(Value::Array(logs)) => {
                        for entry in &logs {
                            match decode_log_entry(entry) {
                                Ok(wave) => handler(wave),
                                Err(err) => log::warn!("Skipping undecodable NewWave log: {err}"),
                            }
                        }
                    }
                    Ok(other) => {
                        log::warn!("Unexpected eth_getFilterChanges payload: {other}");
                    }
                    Err(err) => {
                        log::warn!("NewWave poll failed: {err}");
                    }
                }
            }
        });

        Ok(Subscription {
            provider,
            filter_id,
            poller,
        })
    }
}

/// Reference to a submitted transaction whose mining can be awaited.
pub struct TransactionHandle {
    provider: Arc<dyn EthProvider>,
    hash: String,
    poll: Duration,
}

impl TransactionHandle {
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Suspends until the transaction is mined. A receipt with status 0
    /// means the call reverted on chain.
    pub async fn wait(&self) -> Result<()> {
        loop {
            let receipt = self
                .provider
                .request("eth_getTransactionReceipt", json!([self.hash]))
                .await?;

            if receipt.is_null() {
                tokio::time::sleep(self.poll).await;
                continue;
            }

            // Pre-Byzantium receipts carry no status field; treat as mined.
            let status = receipt.get("status").and_then(Value::as_str).unwrap_or("0x1");
            if status == "0x0" {
                return Err(ChainError::TransactionReverted(self.hash.clone()));
            }
            return Ok(());
        }
    }
}

/// Live NewWave registration. Dropping it stops the poller; `cancel`
/// additionally uninstalls the remote filter.
pub struct Subscription {
    provider: Arc<dyn EthProvider>,
    filter_id: String,
    poller: tokio::task::JoinHandle<()>,
}

impl Subscription {
    pub fn cancel(&self) {
        self.poller.abort();

        let provider = self.provider.clone();
        let filter_id = self.filter_id.clone();
        tokio::spawn(async move {
            if let Err(err) = provider
                .request("eth_uninstallFilter", json!([filter_id]))
                .await
            {
                log::debug!("Failed to uninstall NewWave filter: {err}");
            }
        });

        log::info!("NewWave subscription cancelled (filter {})", self.filter_id);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.poller.abort();
    }
}

fn decode_log_entry(entry: &Value) -> Result<Wave> {
    let topics = entry
        .get("topics")
        .and_then(Value::as_array)
        .ok_or_else(|| ChainError::Rpc("log entry missing topics".to_string()))?
        .iter()
        .map(|topic| {
            topic
                .as_str()
                .ok_or_else(|| ChainError::Rpc("log topic is not a string".to_string()))?
                .parse::<B256>()
                .map_err(|err| ChainError::Rpc(format!("invalid log topic: {err}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let data = decode_hex_str(entry.get("data").and_then(Value::as_str).unwrap_or("0x"))?;
    abi::decode_new_wave(&topics, &data)
}

fn hex_bytes(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

fn decode_hex_value(value: &Value) -> Result<Vec<u8>> {
    let text = value
        .as_str()
        .ok_or_else(|| ChainError::Rpc("expected a hex string result".to_string()))?;
    decode_hex_str(text)
}

fn decode_hex_str(text: &str) -> Result<Vec<u8>> {
    hex::decode(text.trim_start_matches("0x"))
        .map_err(|err| ChainError::Rpc(format!("invalid hex payload: {err}")))
}
