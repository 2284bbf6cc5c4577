use eframe::egui;

use crate::ui::state::AppState;

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    ui.heading("Session");
    ui.separator();

    match &state.connected_account {
        Some(account) => {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::GREEN, "●");
                let short = account.to_string();
                ui.label(format!("{}…{}", &short[..6], &short[short.len() - 4..]))
                    .on_hover_text(short);
            });
        }
        None => {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::GRAY, "●");
                ui.label("Not connected");
            });
        }
    }

    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Waves loaded:");
        ui.label(format!("{}", state.waves.len()));
    });

    if let Some(total) = state.total_waves {
        ui.horizontal(|ui| {
            ui.label("On-chain total:");
            ui.label(format!("{total}"));
        });
    }
}
