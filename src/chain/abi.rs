use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::{SolCall, SolEvent, sol};

use crate::common::Wave;
use crate::error::ChainError;

sol! {
    /// Wave record as laid out by the deployed contract.
    struct PortalWave {
        address waver;
        uint256 timestamp;
        string message;
    }

    function getAllWaves() external view returns (PortalWave[] memory);
    function getTotalWaves() external view returns (uint256);
    function wave(string memory message) external;

    event NewWave(address indexed from, uint256 timestamp, string message);
}

/// Topic identifying NewWave logs.
pub fn new_wave_topic() -> B256 {
    NewWave::SIGNATURE_HASH
}

pub fn encode_get_all_waves() -> Vec<u8> {
    getAllWavesCall {}.abi_encode()
}

pub fn decode_get_all_waves(data: &[u8]) -> Result<Vec<Wave>, ChainError> {
    let waves = getAllWavesCall::abi_decode_returns(data)
        .map_err(|err| ChainError::Rpc(format!("failed to decode getAllWaves return: {err}")))?;
    Ok(waves.into_iter().map(Wave::from).collect())
}

pub fn encode_get_total_waves() -> Vec<u8> {
    getTotalWavesCall {}.abi_encode()
}

pub fn decode_get_total_waves(data: &[u8]) -> Result<u64, ChainError> {
    let total = getTotalWavesCall::abi_decode_returns(data)
        .map_err(|err| ChainError::Rpc(format!("failed to decode getTotalWaves return: {err}")))?;
    u64::try_from(total).map_err(|_| ChainError::Rpc(format!("wave count out of range: {total}")))
}

pub fn encode_wave(message: &str) -> Vec<u8> {
    waveCall {
        message: message.to_string(),
    }
    .abi_encode()
}

/// Decodes one NewWave log from its raw topics and data.
pub fn decode_new_wave(topics: &[B256], data: &[u8]) -> Result<Wave, ChainError> {
    let event = NewWave::decode_raw_log(topics.iter().copied(), data)
        .map_err(|err| ChainError::Rpc(format!("failed to decode NewWave log: {err}")))?;
    Ok(Wave::from_chain(
        event.from,
        clamp_epoch(event.timestamp),
        event.message,
    ))
}

impl From<PortalWave> for Wave {
    fn from(raw: PortalWave) -> Self {
        Wave::from_chain(raw.waver, clamp_epoch(raw.timestamp), raw.message)
    }
}

fn clamp_epoch(timestamp: U256) -> i64 {
    i64::try_from(timestamp).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::SolValue;
    use chrono::DateTime;

    use super::*;

    #[test]
    fn get_all_waves_round_trips_through_the_contract_layout() {
        let sender: Address = "0x1000000000000000000000000000000000000001"
            .parse()
            .unwrap();
        let raw = vec![PortalWave {
            waver: sender,
            timestamp: U256::from(1_700_000_000u64),
            message: "hi".to_string(),
        }];
        let encoded = raw.abi_encode();

        let waves = decode_get_all_waves(&encoded).unwrap();
        assert_eq!(waves.len(), 1);
        assert_eq!(waves[0].sender, sender);
        assert_eq!(waves[0].message, "hi");
        assert_eq!(
            waves[0].timestamp,
            DateTime::from_timestamp(1_700_000_000, 0).unwrap()
        );
    }

    #[test]
    fn new_wave_log_decodes_from_raw_topics_and_data() {
        let sender: Address = "0x2000000000000000000000000000000000000002"
            .parse()
            .unwrap();
        let topics = vec![new_wave_topic(), sender.into_word()];
        let data = (U256::from(42u64), "yo".to_string()).abi_encode_params();

        let wave = decode_new_wave(&topics, &data).unwrap();
        assert_eq!(wave.sender, sender);
        assert_eq!(wave.message, "yo");
        assert_eq!(wave.timestamp.timestamp(), 42);
    }

    #[test]
    fn garbage_log_data_is_an_rpc_error() {
        let topics = vec![new_wave_topic()];
        let err = decode_new_wave(&topics, &[0x01, 0x02]).unwrap_err();
        assert!(matches!(err, ChainError::Rpc(_)));
    }

    #[test]
    fn wave_call_data_carries_the_message() {
        let data = encode_wave("hello2");
        // 4-byte selector then ABI-encoded string argument
        assert_eq!(&data[..4], &waveCall::SELECTOR[..]);
        let decoded = waveCall::abi_decode(&data).unwrap();
        assert_eq!(decoded.message, "hello2");
    }
}
