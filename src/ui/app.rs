use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ChainCommand, ChainEvent};

use super::components::{status_panel, wave_list};
use super::state::AppState;

/// Payload sent with every wave.
const WAVE_MESSAGE: &str = "hello2";

pub struct WaveApp {
    state: AppState,
    command_sender: mpsc::Sender<ChainCommand>,
    event_receiver: mpsc::Receiver<ChainEvent>,
}

impl WaveApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        command_sender: mpsc::Sender<ChainCommand>,
        event_receiver: mpsc::Receiver<ChainEvent>,
    ) -> Self {
        Self {
            state: AppState::new(),
            command_sender,
            event_receiver,
        }
    }

    fn handle_chain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ChainEvent::AccountConnected(account) => self.state.set_account(account),
                ChainEvent::WavesLoaded(waves) => self.state.replace_waves(waves),
                ChainEvent::NewWave(wave) => self.state.push_wave(wave),
                ChainEvent::TotalWaves(total) => self.state.set_total(total),
                ChainEvent::WalletUnavailable => {
                    self.state.wallet_alert =
                        Some("Get MetaMask if you want to wave!".to_string());
                }
            }
        }
    }

    fn send_command(&mut self, command: ChainCommand) {
        if let Err(err) = self.command_sender.try_send(command) {
            log::warn!("Failed to send command to chain worker: {err}");
        }
    }
}

impl eframe::App for WaveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_chain_events();

        egui::SidePanel::left("status_panel").show(ctx, |ui| {
            status_panel::render(ui, &self.state);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Hey there!");
            ui.label("Connect your Ethereum wallet and wave at me!");
            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Send a wave").clicked() {
                    self.send_command(ChainCommand::SendWave(WAVE_MESSAGE.to_string()));
                }
                if self.state.connected_account.is_none()
                    && ui.button("Connect wallet").clicked()
                {
                    self.send_command(ChainCommand::ConnectWallet);
                }
                if ui.button("Refresh").clicked() {
                    self.send_command(ChainCommand::RefreshWaves);
                }
            });

            ui.separator();
            wave_list::render(ui, &self.state.waves);
        });

        if let Some(alert) = self.state.wallet_alert.clone() {
            egui::Window::new("No wallet found")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                .show(ctx, |ui| {
                    ui.label(alert);
                    if ui.button("OK").clicked() {
                        self.state.wallet_alert = None;
                    }
                });
        }

        ctx.request_repaint();
    }
}
