use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/waveportal.json";

/// Endpoint override, loaded from the environment (or a .env file).
pub const RPC_URL_ENV: &str = "WAVE_PORTAL_RPC_URL";

const DEFAULT_RPC_ENDPOINT: &str = "http://127.0.0.1:8545";
const DEFAULT_CONTRACT_ADDRESS: &str = "0x2d3957BF09ED642e67D9EDe4ED8B421b94612DBb";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_rpc_endpoint")]
    pub rpc_endpoint: String,
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    /// How often the NewWave log filter is polled.
    #[serde(default = "default_event_poll_ms")]
    pub event_poll_ms: u64,
    /// How often a pending transaction receipt is polled.
    #[serde(default = "default_receipt_poll_ms")]
    pub receipt_poll_ms: u64,
}

fn default_rpc_endpoint() -> String {
    DEFAULT_RPC_ENDPOINT.to_string()
}

fn default_contract_address() -> String {
    DEFAULT_CONTRACT_ADDRESS.to_string()
}

fn default_event_poll_ms() -> u64 {
    2_000
}

fn default_receipt_poll_ms() -> u64 {
    1_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_endpoint: default_rpc_endpoint(),
            contract_address: default_contract_address(),
            event_poll_ms: default_event_poll_ms(),
            receipt_poll_ms: default_receipt_poll_ms(),
        }
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    let mut config = match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    };

    if let Ok(endpoint) = env::var(RPC_URL_ENV) {
        log::info!("Overriding RPC endpoint from {RPC_URL_ENV}");
        config.rpc_endpoint = endpoint;
    }

    config
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config("config/definitely-not-there.json");
        assert_eq!(config.rpc_endpoint, DEFAULT_RPC_ENDPOINT);
        assert_eq!(config.contract_address, DEFAULT_CONTRACT_ADDRESS);
        assert_eq!(config.event_poll_ms, 2_000);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"rpc_endpoint\": \"http://10.0.0.5:8545\"}}").unwrap();

        let config = load_config(file.path().to_str().unwrap());
        assert_eq!(config.rpc_endpoint, "http://10.0.0.5:8545");
        assert_eq!(config.contract_address, DEFAULT_CONTRACT_ADDRESS);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let config = load_config(file.path().to_str().unwrap());
        assert_eq!(config.rpc_endpoint, DEFAULT_RPC_ENDPOINT);
    }
}
