use eframe::egui;
use std::path::PathBuf;

use super::Action;
use crate::config::model::Configuration;
use crate::config::store::Edit;
use crate::constants::limits;
use crate::gui::constants::*;
use crate::gui::controls::ControlState;

pub fn ui(ui: &mut egui::Ui, config: &Configuration, controls: &mut ControlState, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        ui.label("File:");
        let field = egui::TextEdit::singleline(&mut controls.logo_path)
            .hint_text("path/to/logo.png")
            .desired_width(180.0);
        let response = ui.add(field);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let path = controls.logo_path.trim();
        if (ui.button("Load").clicked() || submitted) && !path.is_empty() {
            actions.push(Action::LoadLogo(PathBuf::from(path)));
        }
    });
    ui.label(egui::RichText::new("Or drop an image onto the window").weak());

    if !config.logo.is_attached() {
        return;
    }

    ui.add_space(ITEM_SPACING);
    if ui.button("Remove logo").clicked() {
        actions.push(Action::Edit(Edit::DetachLogo));
    }

    ui.horizontal(|ui| {
        ui.label("Size:");
        let mut ratio = config.logo.size_ratio;
        let slider = egui::Slider::new(&mut ratio, limits::LOGO_SIZE_MIN..=limits::LOGO_SIZE_MAX)
            .step_by(0.05);
        if ui.add(slider).changed() {
            actions.push(Action::Edit(Edit::SetLogoSize { ratio }));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Margin:");
        let mut margin = config.logo.margin;
        let slider = egui::Slider::new(&mut margin, 0..=limits::LOGO_MARGIN_MAX).suffix(" px");
        if ui.add(slider).changed() {
            actions.push(Action::Edit(Edit::SetLogoMargin { margin }));
        }
    });
}
