pub mod abi;
pub mod contract;
pub mod provider;
pub mod wallet;
pub mod worker;

#[cfg(test)]
pub mod mock;

pub use worker::ChainWorker;
