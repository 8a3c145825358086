//! UI-side buffers for values the configuration cannot hold on its own
//!
//! Hex text twins may be mid-edit and invalid, the gradient end color and
//! kind/rotation must survive while a style is flat, and the background color
//! must survive while the background is transparent. After a preset is
//! applied, [`ControlState::reconcile`] projects the configuration back into
//! these buffers. It writes the buffers directly and never produces an
//! [`Edit`], so the preset highlight cannot be cleared by it.

use crate::color::{Background, HexColor};
use crate::config::model::{Configuration, Paint};
use crate::config::store::Edit;
use crate::constants::defaults;
use crate::types::{ColorRole, GradientKind, StyleTarget};

#[derive(Debug, Clone, PartialEq)]
pub struct StyleControls {
    pub hex: String,
    pub gradient_enabled: bool,
    pub kind: GradientKind,
    pub rotation_deg: f32,
    pub end: HexColor,
    pub end_hex: String,
}

impl StyleControls {
    fn new(primary: HexColor) -> Self {
        let end = HexColor::parse(defaults::GRADIENT_END).unwrap_or(HexColor::WHITE);
        Self {
            hex: primary.to_string(),
            gradient_enabled: false,
            kind: GradientKind::Linear,
            rotation_deg: 0.0,
            end,
            end_hex: end.to_string(),
        }
    }

    fn reconcile(&mut self, paint: &Paint) {
        match paint {
            Paint::Flat(color) => {
                self.hex = color.to_string();
                self.gradient_enabled = false;
            }
            Paint::Gradient(gradient) => {
                self.hex = gradient.start.to_string();
                self.gradient_enabled = true;
                self.kind = gradient.kind;
                self.rotation_deg = gradient.rotation_degrees();
                self.end = gradient.end;
                self.end_hex = gradient.end.to_string();
            }
        }
    }

    /// Edit for the gradient toggle using the buffered end, kind and rotation
    pub fn toggle_edit(&self, target: StyleTarget, primary: HexColor) -> Edit {
        Edit::SetGradientEnabled {
            target,
            enabled: self.gradient_enabled,
            base: primary,
            end: self.end,
            kind: self.kind,
            rotation_deg: self.rotation_deg,
        }
    }

    /// Parse the primary hex twin; invalid text yields no edit
    pub fn hex_edit(&self, target: StyleTarget) -> Option<Edit> {
        let color = HexColor::parse(&self.hex).ok()?;
        Some(Edit::SetFlatColor {
            target,
            role: ColorRole::Primary,
            color,
        })
    }

    /// Parse the end-color hex twin and keep the buffer in step
    pub fn end_hex_edit(&mut self, target: StyleTarget) -> Option<Edit> {
        let color = HexColor::parse(&self.end_hex).ok()?;
        self.end = color;
        self.gradient_enabled.then_some(Edit::SetFlatColor {
            target,
            role: ColorRole::Secondary,
            color,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlState {
    pub content: String,
    pub dots: StyleControls,
    pub corner_square: StyleControls,
    pub corner_dot: StyleControls,
    pub background: HexColor,
    pub background_hex: String,
    pub transparent: bool,
    pub logo_path: String,
}

impl ControlState {
    pub fn new(config: &Configuration) -> Self {
        let mut state = Self {
            content: config.content.clone(),
            dots: StyleControls::new(config.dots.paint.primary_color()),
            corner_square: StyleControls::new(config.corner_square.paint.primary_color()),
            corner_dot: StyleControls::new(config.corner_dot.paint.primary_color()),
            background: HexColor::WHITE,
            background_hex: HexColor::WHITE.to_string(),
            transparent: false,
            logo_path: String::new(),
        };
        state.reconcile(config);
        state
    }

    pub fn style_mut(&mut self, target: StyleTarget) -> &mut StyleControls {
        match target {
            StyleTarget::Dots => &mut self.dots,
            StyleTarget::CornerSquare => &mut self.corner_square,
            StyleTarget::CornerDot => &mut self.corner_dot,
        }
    }

    /// Project the configuration's styling back onto the form
    pub fn reconcile(&mut self, config: &Configuration) {
        for target in StyleTarget::ALL {
            self.style_mut(target).reconcile(&config.style(target).paint);
        }

        match config.background {
            Background::Color(color) => {
                self.background = color;
                self.background_hex = color.to_string();
                self.transparent = false;
            }
            Background::Transparent => self.transparent = true,
        }
    }

    pub fn background_edit(&self) -> Edit {
        let background = if self.transparent {
            Background::Transparent
        } else {
            Background::Color(self.background)
        };
        Edit::SetBackground { background }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::store::{Change, ConfigStore};

    #[test]
    fn test_initial_state_matches_defaults() {
        let store = ConfigStore::new();
        let controls = ControlState::new(store.config());

        assert_eq!(controls.content, "https://example.com");
        assert_eq!(controls.dots.hex, "#000000");
        assert!(!controls.dots.gradient_enabled);
        assert_eq!(controls.dots.end_hex, "#0575E6");
        assert_eq!(controls.background_hex, "#FFFFFF");
        assert!(!controls.transparent);
    }

    #[test]
    fn test_reconcile_after_preset() {
        let mut store = ConfigStore::new();
        let mut controls = ControlState::new(store.config());

        assert_eq!(store.apply_preset("ocean"), Change::PresetApplied("ocean"));
        controls.reconcile(store.config());

        let dots = &store.config().dots;
        let gradient = dots.paint.gradient().unwrap();
        assert!(controls.dots.gradient_enabled);
        assert_eq!(controls.dots.hex, gradient.start.to_string());
        assert_eq!(controls.dots.end, gradient.end);
        assert_eq!(controls.dots.end_hex, gradient.end.to_string());
        assert_eq!(controls.dots.kind, gradient.kind);
        assert!((controls.dots.rotation_deg - gradient.rotation_degrees()).abs() < 1e-3);

        let preset = crate::config::presets::find("ocean").unwrap();
        assert_eq!(controls.background, preset.background);

        // Reconciling is not an edit: the preset stays highlighted
        assert_eq!(store.active_preset(), Some("ocean"));
    }

    #[test]
    fn test_reconcile_back_to_flat_keeps_gradient_buffers() {
        let mut store = ConfigStore::new();
        let mut controls = ControlState::new(store.config());

        store.apply_preset("neon");
        controls.reconcile(store.config());
        let end = controls.dots.end;

        store.apply_preset("classic");
        controls.reconcile(store.config());

        assert!(!controls.dots.gradient_enabled);
        assert_eq!(controls.dots.hex, "#000000");
        assert_eq!(controls.dots.end, end);
    }

    #[test]
    fn test_invalid_hex_yields_no_edit() {
        let mut controls = ControlState::new(ConfigStore::new().config());
        controls.dots.hex = "#12".to_string();
        assert_eq!(controls.dots.hex_edit(StyleTarget::Dots), None);

        controls.dots.hex = "ff0000".to_string();
        assert_eq!(
            controls.dots.hex_edit(StyleTarget::Dots),
            Some(Edit::SetFlatColor {
                target: StyleTarget::Dots,
                role: ColorRole::Primary,
                color: HexColor::from_rgb(255, 0, 0),
            })
        );
    }

    #[test]
    fn test_end_hex_edit_only_applies_to_gradients() {
        let mut controls = ControlState::new(ConfigStore::new().config());
        controls.dots.end_hex = "#00FF00".to_string();

        assert_eq!(controls.dots.end_hex_edit(StyleTarget::Dots), None);
        assert_eq!(controls.dots.end, HexColor::from_rgb(0, 255, 0));

        controls.dots.gradient_enabled = true;
        assert!(controls.dots.end_hex_edit(StyleTarget::Dots).is_some());
    }

    #[test]
    fn test_transparent_background_keeps_color_buffer() {
        let mut store = ConfigStore::new();
        let mut controls = ControlState::new(store.config());

        controls.background = HexColor::from_rgb(1, 2, 3);
        controls.transparent = true;
        store.apply(controls.background_edit()).unwrap();
        controls.reconcile(store.config());

        assert!(controls.transparent);
        assert_eq!(controls.background, HexColor::from_rgb(1, 2, 3));

        controls.transparent = false;
        store.apply(controls.background_edit()).unwrap();
        assert_eq!(store.config().background, Background::Color(HexColor::from_rgb(1, 2, 3)));
    }
}
