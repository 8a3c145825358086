use eframe::egui;

use super::Action;
use crate::config::model::Configuration;
use crate::config::store::Edit;
use crate::constants::limits;
use crate::types::ErrorCorrection;

/// Size, quiet-zone margin and error-correction level
pub fn ui(ui: &mut egui::Ui, config: &Configuration, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        ui.label("Size:");
        let mut size = config.geometry.size;
        let slider = egui::Slider::new(&mut size, limits::SIZE_MIN..=limits::SIZE_MAX).suffix(" px");
        if ui.add(slider).changed() {
            actions.push(Action::Edit(Edit::SetSize { size }));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Margin:");
        let mut margin = config.geometry.margin;
        let slider = egui::Slider::new(&mut margin, 0..=limits::MARGIN_MAX).suffix(" px");
        if ui.add(slider).changed() {
            actions.push(Action::Edit(Edit::SetMargin { margin }));
        }
    });

    ui.horizontal(|ui| {
        ui.label("Error correction:");
        for level in ErrorCorrection::ALL {
            let selected = config.error_correction == level;
            if ui.selectable_label(selected, level.as_str()).clicked() && !selected {
                actions.push(Action::Edit(Edit::SetErrorCorrection { level }));
            }
        }
    });

    if config.logo.is_attached() && config.error_correction != ErrorCorrection::H {
        ui.label(egui::RichText::new("A logo covers modules; H is recommended").weak());
    }
}
