//! Footer links and their informational dialogs

use eframe::egui;

use super::Action;
use crate::gui::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoDialog {
    Terms,
    Privacy,
}

impl InfoDialog {
    fn title(&self) -> &'static str {
        match self {
            InfoDialog::Terms => "Terms of Use",
            InfoDialog::Privacy => "Privacy",
        }
    }

    fn paragraphs(&self) -> &'static [&'static str] {
        match self {
            InfoDialog::Terms => &[
                "QR Studio is provided as is, without warranty of any kind.",
                "You are responsible for the content you encode and for checking that exported codes scan correctly before printing or publishing them.",
                "Logos you embed remain subject to their owners' rights.",
            ],
            InfoDialog::Privacy => &[
                "Everything happens on this machine. Content, logos and exports are never uploaded.",
                "The only file QR Studio writes on its own is its settings file in your configuration directory.",
            ],
        }
    }
}

pub fn ui(ui: &mut egui::Ui, actions: &mut Vec<Action>) {
    ui.horizontal(|ui| {
        if ui.link("Terms").clicked() {
            actions.push(Action::ShowDialog(InfoDialog::Terms));
        }
        ui.label("·");
        if ui.link("Privacy").clicked() {
            actions.push(Action::ShowDialog(InfoDialog::Privacy));
        }
    });
}

/// Show the open dialog, if any, and clear it once dismissed
pub fn show_dialog(ctx: &egui::Context, dialog: &mut Option<InfoDialog>) {
    let Some(current) = *dialog else {
        return;
    };

    let mut open = true;
    let mut dismissed = false;
    egui::Window::new(current.title())
        .collapsible(false)
        .resizable(false)
        .open(&mut open)
        .show(ctx, |ui| {
            for paragraph in current.paragraphs() {
                ui.label(*paragraph);
                ui.add_space(ITEM_SPACING);
            }
            if ui.button("Close").clicked() {
                dismissed = true;
            }
        });

    if !open || dismissed {
        *dialog = None;
    }
}
