//! Shape and paint controls for one element class

use eframe::egui;

use super::{Action, from_color32, to_color32};
use crate::config::model::StyleSpec;
use crate::config::store::Edit;
use crate::constants::limits;
use crate::gui::constants::*;
use crate::gui::controls::StyleControls;
use crate::types::{ColorRole, GradientKind, StyleTarget};

pub fn ui(
    ui: &mut egui::Ui,
    target: StyleTarget,
    style: &StyleSpec,
    controls: &mut StyleControls,
    actions: &mut Vec<Action>,
) {
    // Only shapes the target accepts are offered
    ui.horizontal(|ui| {
        ui.label("Style:");
        let mut shape = style.shape;
        egui::ComboBox::from_id_salt(("shape", target))
            .selected_text(shape.label())
            .show_ui(ui, |ui| {
                for &candidate in target.legal_shapes() {
                    ui.selectable_value(&mut shape, candidate, candidate.label());
                }
            });
        if shape != style.shape {
            actions.push(Action::Edit(Edit::SetShape { target, shape }));
        }
    });

    let primary = style.paint.primary_color();
    ui.horizontal(|ui| {
        ui.label(if controls.gradient_enabled { "Start:" } else { "Color:" });
        let mut color = to_color32(primary);
        if ui.color_edit_button_srgba(&mut color).changed() {
            let picked = from_color32(color);
            controls.hex = picked.to_string();
            actions.push(Action::Edit(Edit::SetFlatColor {
                target,
                role: ColorRole::Primary,
                color: picked,
            }));
        }

        let hex = egui::TextEdit::singleline(&mut controls.hex).desired_width(HEX_FIELD_WIDTH);
        if ui.add(hex).changed() {
            if let Some(edit) = controls.hex_edit(target) {
                actions.push(Action::Edit(edit));
            }
        }
    });

    if ui.checkbox(&mut controls.gradient_enabled, "Gradient").changed() {
        actions.push(Action::Edit(controls.toggle_edit(target, primary)));
    }

    if !controls.gradient_enabled {
        return;
    }

    ui.indent(("gradient", target), |ui| {
        ui.horizontal(|ui| {
            ui.label("Type:");
            for kind in [GradientKind::Linear, GradientKind::Radial] {
                if ui.radio_value(&mut controls.kind, kind, kind.label()).changed() {
                    actions.push(Action::Edit(Edit::SetGradientKind { target, kind }));
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Rotation:");
            let slider = egui::Slider::new(&mut controls.rotation_deg, 0.0..=limits::ROTATION_MAX_DEG)
                .suffix("°");
            if ui.add(slider).changed() {
                actions.push(Action::Edit(Edit::SetGradientRotation {
                    target,
                    degrees: controls.rotation_deg,
                }));
            }
        });

        ui.horizontal(|ui| {
            ui.label("End:");
            let mut end = to_color32(controls.end);
            if ui.color_edit_button_srgba(&mut end).changed() {
                controls.end = from_color32(end);
                controls.end_hex = controls.end.to_string();
                actions.push(Action::Edit(Edit::SetFlatColor {
                    target,
                    role: ColorRole::Secondary,
                    color: controls.end,
                }));
            }

            let hex = egui::TextEdit::singleline(&mut controls.end_hex).desired_width(HEX_FIELD_WIDTH);
            if ui.add(hex).changed() {
                if let Some(edit) = controls.end_hex_edit(target) {
                    actions.push(Action::Edit(edit));
                }
            }
        });
    });
}
