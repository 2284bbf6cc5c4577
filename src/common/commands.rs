/// Commands the UI sends down to the chain worker.
#[derive(Debug, Clone)]
pub enum ChainCommand {
    /// Prompt the wallet for account authorization.
    ConnectWallet,
    /// Submit a wave transaction with the given message.
    SendWave(String),
    /// Re-read the full wave list from the contract.
    RefreshWaves,
}
