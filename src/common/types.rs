use alloy_primitives::Address;
use chrono::{DateTime, Utc};

/// Domain model for one recorded wave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wave {
    pub sender: Address,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl Wave {
    /// Builds a wave from on-chain data. The contract stores timestamps as
    /// epoch seconds; out-of-range values clamp to the epoch.
    pub fn from_chain(sender: Address, epoch_secs: i64, message: String) -> Self {
        let timestamp = DateTime::from_timestamp(epoch_secs, 0).unwrap_or(DateTime::UNIX_EPOCH);
        Self {
            sender,
            timestamp,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_is_epoch_seconds_in_millis() {
        let wave = Wave::from_chain(Address::ZERO, 1_700_000_000, "hi".to_string());
        assert_eq!(wave.timestamp.timestamp_millis(), 1_700_000_000 * 1000);
    }

    #[test]
    fn out_of_range_timestamp_clamps_to_epoch() {
        let wave = Wave::from_chain(Address::ZERO, i64::MAX, "hi".to_string());
        assert_eq!(wave.timestamp, DateTime::UNIX_EPOCH);
    }
}
