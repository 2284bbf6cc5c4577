use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use tokio::sync::mpsc;

use crate::chain::contract::WavePortal;
use crate::chain::provider::EthProvider;
use crate::chain::wallet::WalletGateway;
use crate::common::{ChainCommand, ChainEvent};
use crate::config::AppConfig;
use crate::error::ChainError;

/// Background task bridging the UI to the wallet and contract. Commands
/// come down one channel, events go up another; the NewWave subscription
/// feeds the same event channel for the worker's whole lifetime.
pub struct ChainWorker {
    event_sender: mpsc::Sender<ChainEvent>,
    command_receiver: mpsc::Receiver<ChainCommand>,
    gateway: WalletGateway,
    portal: WavePortal,
    event_poll: Duration,
    account: Option<Address>,
}

impl ChainWorker {
    pub fn new(
        event_sender: mpsc::Sender<ChainEvent>,
        command_receiver: mpsc::Receiver<ChainCommand>,
        provider: Option<Arc<dyn EthProvider>>,
        config: &AppConfig,
    ) -> Result<Self, ChainError> {
        let address = config.contract_address.parse::<Address>().map_err(|err| {
            ChainError::Rpc(format!(
                "invalid contract address {}: {err}",
                config.contract_address
            ))
        })?;

        let gateway = WalletGateway::new(provider.clone());
        let portal = WavePortal::new(
            provider,
            address,
            Duration::from_millis(config.receipt_poll_ms),
        );

        Ok(Self {
            event_sender,
            command_receiver,
            gateway,
            portal,
            event_poll: Duration::from_millis(config.event_poll_ms),
            account: None,
        })
    }

    pub async fn run(mut self) -> Result<(), ChainError> {
        self.startup().await;

        let subscription = if self.gateway.is_available() {
            let sender = self.event_sender.clone();
            match self
                .portal
                .subscribe_new_waves(self.event_poll, move |wave| {
                    if let Err(err) = sender.try_send(ChainEvent::NewWave(wave)) {
                        log::warn!("Failed to forward NewWave to UI: {err}");
                    }
                })
                .await
            {
                Ok(subscription) => Some(subscription),
                Err(err) => {
                    log::warn!("NewWave subscription unavailable: {err}");
                    None
                }
            }
        } else {
            None
        };

        while let Some(command) = self.command_receiver.recv().await {
            self.handle_command(command).await;
        }

        if let Some(subscription) = subscription {
            subscription.cancel();
        }
        log::info!("Chain worker stopped");
        Ok(())
    }

    /// Mount-time flow: adopt a pre-authorized account if one exists and
    /// perform the initial full read.
    async fn startup(&mut self) {
        if !self.gateway.is_available() {
            log::info!("No wallet provider detected");
            return;
        }
        log::info!("Found wallet provider");

        match self.gateway.authorized_accounts().await {
            Ok(accounts) => {
                if let Some(account) = accounts.first().copied() {
                    log::info!("Found an authorized account: {account}");
                    self.adopt_account(account).await;
                    self.load_waves().await;
                } else {
                    log::info!("No authorized accounts found");
                }
            }
            Err(err) => log::warn!("Failed to query authorized accounts: {err}"),
        }
    }

    async fn handle_command(&mut self, command: ChainCommand) {
        match command {
            ChainCommand::ConnectWallet => self.connect_wallet().await,
            ChainCommand::SendWave(message) => self.send_wave(message).await,
            ChainCommand::RefreshWaves => self.load_waves().await,
        }
    }

    async fn connect_wallet(&mut self) {
        match self.gateway.request_connection().await {
            Ok(account) => {
                log::info!("Connected: {account}");
                self.adopt_account(account).await;
            }
            Err(ChainError::NoWalletFound) => {
                log::warn!("Connect requested but no wallet provider exists");
                self.emit(ChainEvent::WalletUnavailable).await;
            }
            Err(err) => log::warn!("Wallet connection failed: {err}"),
        }
    }

    async fn send_wave(&mut self, message: String) {
        let Some(from) = self.account else {
            log::warn!("Wave requested without a connected account");
            return;
        };
        if let Err(err) = self.submit_wave(from, &message).await {
            log::warn!("Wave submission failed: {err}");
        }
    }

    /// The view is not updated here: the subscription push is the only
    /// path that appends the mined wave.
    async fn submit_wave(&mut self, from: Address, message: &str) -> Result<(), ChainError> {
        let count = self.portal.total_waves().await?;
        log::info!("Retrieved total waves: {count}");

        let handle = self.portal.send_wave(from, message).await?;
        log::info!("Mining transaction {}", handle.hash());
        handle.wait().await?;
        log::info!("Mined transaction {}", handle.hash());

        let count = self.portal.total_waves().await?;
        log::info!("New total waves: {count}");
        self.emit(ChainEvent::TotalWaves(count)).await;
        Ok(())
    }

    async fn load_waves(&mut self) {
        log::info!("Reading all waves");
        match self.portal.get_all_waves().await {
            Ok(waves) => {
                log::info!("Loaded {} waves", waves.len());
                self.emit(ChainEvent::WavesLoaded(waves)).await;
            }
            Err(err) => log::warn!("Failed to read waves: {err}"),
        }
    }

    async fn adopt_account(&mut self, account: Address) {
        self.account = Some(account);
        self.emit(ChainEvent::AccountConnected(account)).await;
    }

    async fn emit(&self, event: ChainEvent) {
        if let Err(err) = self.event_sender.send(event).await {
            log::warn!("UI event channel closed: {err}");
        }
    }
}
