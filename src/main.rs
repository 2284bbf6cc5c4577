mod chain;
mod common;
mod config;
mod error;
mod ui;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tokio::sync::mpsc;

use chain::ChainWorker;
use chain::provider::{EthProvider, detect_provider};
use common::ChainEvent;
use config::AppConfig;
use ui::WaveApp;

#[derive(Parser)]
#[command(
    name = "wave_portal",
    version,
    about = "Desktop client for the WavePortal contract"
)]
struct Cli {
    /// Path to JSON config file
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH, value_name = "FILE")]
    config: String,
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Run headless: log loaded waves and live events, no UI
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), eframe::Error> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let app_config = config::load_config(&cli.config);
    let provider = detect_provider(&app_config).await;

    if cli.mode == Some(Mode::Watch) {
        run_watcher(provider, &app_config).await;
        return Ok(());
    }

    run_full_client(provider, &app_config).await
}

async fn run_watcher(provider: Option<Arc<dyn EthProvider>>, config: &AppConfig) {
    let (_cmd_tx, cmd_rx) = mpsc::channel(1);
    let (event_tx, mut event_rx) = mpsc::channel(100);

    let worker = match ChainWorker::new(event_tx, cmd_rx, provider, config) {
        Ok(worker) => worker,
        Err(err) => {
            log::error!("Failed to start chain worker: {err}");
            return;
        }
    };
    tokio::spawn(async move {
        if let Err(err) = worker.run().await {
            log::error!("Chain worker terminated unexpectedly: {err}");
        }
    });

    loop {
        tokio::select! {
            event = event_rx.recv() => match event {
                Some(ChainEvent::WavesLoaded(waves)) => {
                    for wave in &waves {
                        log::info!("{} at {}: {}", wave.sender, wave.timestamp, wave.message);
                    }
                }
                Some(ChainEvent::NewWave(wave)) => {
                    log::info!("NewWave from {}: {}", wave.sender, wave.message);
                }
                Some(event) => log::debug!("Ignoring event in watch mode: {event:?}"),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                log::info!("Shutting down watcher");
                break;
            }
        }
    }
}

async fn run_full_client(
    provider: Option<Arc<dyn EthProvider>>,
    config: &AppConfig,
) -> Result<(), eframe::Error> {
    // UI -> chain
    let (cmd_tx, cmd_rx) = mpsc::channel(100);
    // Chain -> UI
    let (event_tx, event_rx) = mpsc::channel(100);

    match ChainWorker::new(event_tx, cmd_rx, provider, config) {
        Ok(worker) => {
            tokio::spawn(async move {
                if let Err(err) = worker.run().await {
                    log::error!("Chain worker terminated: {err}");
                }
            });
        }
        Err(err) => log::error!("Chain worker unavailable: {err}"),
    }

    let options = eframe::NativeOptions::default();
    let mut event_rx = Some(event_rx);

    eframe::run_native(
        "Wave Portal",
        options,
        Box::new(move |cc| {
            let event_receiver = event_rx
                .take()
                .expect("WaveApp should only be initialized once");

            Ok(Box::new(WaveApp::new(cc, cmd_tx.clone(), event_receiver)))
        }),
    )
}
