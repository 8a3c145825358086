use eframe::egui;

use super::Action;
use crate::types::ExportFormat;

pub fn ui(ui: &mut egui::Ui, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        for format in ExportFormat::ALL {
            let label = format!("Download {}", format.extension().to_uppercase());
            if ui.button(label).clicked() {
                actions.push(Action::Export(format));
            }
        }
    });
}
