use alloy_primitives::Address;

use crate::common::types::Wave;

/// Events the chain worker pushes up to the UI.
#[derive(Debug, Clone)]
pub enum ChainEvent {
    /// An account was adopted, either pre-authorized at startup or via an
    /// explicit connect.
    AccountConnected(Address),
    /// A full read replaced the wave list.
    WavesLoaded(Vec<Wave>),
    /// The NewWave subscription delivered a single wave.
    NewWave(Wave),
    /// Fresh on-chain wave count, observed after a submission was mined.
    TotalWaves(u64),
    /// An explicit connect found no wallet provider; the UI must alert.
    WalletUnavailable,
}
