use eframe::egui;

use super::{Action, from_color32, to_color32};
use crate::color::HexColor;
use crate::gui::constants::*;
use crate::gui::controls::ControlState;

pub fn ui(ui: &mut egui::Ui, controls: &mut ControlState, actions: &mut Vec<Action>) {
    if ui.checkbox(&mut controls.transparent, "Transparent").changed() {
        actions.push(Action::Edit(controls.background_edit()));
    }

    // The color is kept while transparent so toggling back restores it
    ui.add_enabled_ui(!controls.transparent, |ui| {
        ui.horizontal(|ui| {
            ui.label("Color:");
            let mut color = to_color32(controls.background);
            if ui.color_edit_button_srgba(&mut color).changed() {
                controls.background = from_color32(color);
                controls.background_hex = controls.background.to_string();
                actions.push(Action::Edit(controls.background_edit()));
            }

            let hex = egui::TextEdit::singleline(&mut controls.background_hex)
                .desired_width(HEX_FIELD_WIDTH);
            if ui.add(hex).changed() {
                if let Ok(parsed) = HexColor::parse(&controls.background_hex) {
                    controls.background = parsed;
                    actions.push(Action::Edit(controls.background_edit()));
                }
            }
        });
    });
}
