//! GUI-specific constants for layout and status colors

use egui;

/// Minimum window size; the initial size comes from settings
pub const WINDOW_MIN_WIDTH: f32 = 820.0;
pub const WINDOW_MIN_HEIGHT: f32 = 560.0;

/// Left control panel
pub const PANEL_WIDTH: f32 = 380.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;
pub const PADDING: f32 = 10.0;

/// Width of hex text twins next to color pickers
pub const HEX_FIELD_WIDTH: f32 = 80.0;

/// Status colors
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 200, 0);
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const STATUS_INFO: egui::Color32 = egui::Color32::from_rgb(200, 200, 0);

/// Checkerboard drawn behind transparent previews
pub const CHECKER_LIGHT: egui::Color32 = egui::Color32::from_gray(230);
pub const CHECKER_DARK: egui::Color32 = egui::Color32::from_gray(200);
pub const CHECKER_CELL: f32 = 8.0;
