use eframe::egui;

use crate::common::Wave;

pub fn render(ui: &mut egui::Ui, waves: &[Wave]) {
    if waves.is_empty() {
        ui.label("No waves yet");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        // Newest last, same order the contract returns them.
        for wave in waves {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.label(format!("Address: {}", wave.sender));
                ui.label(format!(
                    "Time: {}",
                    wave.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
                ));
                ui.label(format!("Message: {}", wave.message));
            });
            ui.add_space(4.0);
        }
    });
}
