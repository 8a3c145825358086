use eframe::egui;

use super::Action;
use crate::config::presets::PRESETS;
use crate::config::store::Edit;

/// Preset buttons; the active one stays highlighted until a manual styling edit
pub fn ui(ui: &mut egui::Ui, active: Option<&str>, actions: &mut Vec<Action>) {
    ui.horizontal_wrapped(|ui| {
        for preset in PRESETS {
            let selected = active == Some(preset.name);
            if ui.selectable_label(selected, preset.label).clicked() {
                actions.push(Action::Edit(Edit::ApplyPreset {
                    name: preset.name.to_string(),
                }));
            }
        }
    });
}
