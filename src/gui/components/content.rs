use eframe::egui;

use super::Action;
use crate::config::store::Edit;
use crate::gui::controls::ControlState;

pub fn ui(ui: &mut egui::Ui, controls: &mut ControlState, actions: &mut Vec<Action>) {
    ui.label("Text or URL to encode:");
    let editor = egui::TextEdit::multiline(&mut controls.content)
        .desired_rows(3)
        .desired_width(f32::INFINITY);
    if ui.add(editor).changed() {
        actions.push(Action::Edit(Edit::SetContent {
            text: controls.content.clone(),
        }));
    }
}
