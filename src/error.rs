use thiserror::Error;

/// Failure taxonomy for wallet and contract interaction.
#[derive(Debug, Error)]
pub enum ChainError {
    /// The host environment exposes no wallet provider.
    #[error("no wallet provider found")]
    NoWalletFound,

    /// The user declined the connection prompt (EIP-1193 code 4001).
    #[error("wallet connection rejected by user")]
    UserRejected,

    /// Transport failure, RPC-level error or an undecodable payload.
    #[error("rpc error: {0}")]
    Rpc(String),

    /// The submitted transaction was mined but reverted.
    #[error("transaction {0} reverted")]
    TransactionReverted(String),
}

pub type Result<T> = std::result::Result<T, ChainError>;
