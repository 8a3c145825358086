//! Control panel sections
//!
//! Each section renders its widgets and pushes [`Action`]s; the app applies
//! them after the frame's layout is done.

pub mod background;
pub mod content;
pub mod export;
pub mod footer;
pub mod geometry;
pub mod logo;
pub mod presets;
pub mod style;

use eframe::egui;
use std::path::PathBuf;

use crate::color::HexColor;
use crate::config::store::Edit;
use crate::types::ExportFormat;

pub use footer::InfoDialog;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Edit(Edit),
    LoadLogo(PathBuf),
    Export(ExportFormat),
    ShowDialog(InfoDialog),
}

pub fn to_color32(color: HexColor) -> egui::Color32 {
    let [r, g, b] = color.rgb();
    egui::Color32::from_rgb(r, g, b)
}

pub fn from_color32(color: egui::Color32) -> HexColor {
    HexColor::from_rgb(color.r(), color.g(), color.b())
}
