//! Configuration state store
//!
//! Owns the canonical `Configuration` and exposes one mutator per user
//! action. Each mutator touches only the affected sub-record and reports a
//! [`Change`] so the caller can decide whether to schedule a render and
//! whether the active preset highlight survives.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Background, HexColor};
use crate::config::model::{Configuration, Gradient, Paint};
use crate::config::presets::{self, Preset};
use crate::constants::{defaults, limits};
use crate::error::ConfigError;
use crate::types::{ColorRole, ErrorCorrection, GradientKind, ShapeType, StyleTarget};

/// Notification emitted by every mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing changed; no render needed
    Unchanged,
    /// A manual styling edit (content, shape, color, gradient, background);
    /// clears the active preset
    Styling,
    /// Logo, geometry or error-correction edit; preset stays highlighted
    Settings,
    /// A preset was copied into the configuration
    PresetApplied(&'static str),
}

impl Change {
    pub fn needs_render(&self) -> bool {
        !matches!(self, Change::Unchanged)
    }
}

/// A single store mutation as data, shared by the GUI adapter and script mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    SetContent {
        text: String,
    },
    SetShape {
        target: StyleTarget,
        shape: ShapeType,
    },
    SetFlatColor {
        target: StyleTarget,
        #[serde(default = "primary_role")]
        role: ColorRole,
        color: HexColor,
    },
    SetGradientEnabled {
        target: StyleTarget,
        enabled: bool,
        base: HexColor,
        end: HexColor,
        #[serde(default)]
        kind: GradientKind,
        #[serde(default)]
        rotation_deg: f32,
    },
    SetGradientKind {
        target: StyleTarget,
        kind: GradientKind,
    },
    SetGradientRotation {
        target: StyleTarget,
        degrees: f32,
    },
    SetBackground {
        background: Background,
    },
    AttachLogo {
        image: String,
    },
    DetachLogo,
    SetLogoSize {
        ratio: f32,
    },
    SetLogoMargin {
        margin: u32,
    },
    SetErrorCorrection {
        level: ErrorCorrection,
    },
    ApplyPreset {
        name: String,
    },
    SetSize {
        size: u32,
    },
    SetMargin {
        margin: u32,
    },
}

fn primary_role() -> ColorRole {
    ColorRole::Primary
}

fn within<T: PartialOrd + ToString>(field: &'static str, value: T, min: T, max: T) -> Result<(), ConfigError> {
    if min <= value && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        })
    }
}

impl Edit {
    /// Check ranged values against the limits the GUI and CLI flags enforce
    ///
    /// The store itself accepts anything; surfaces that take raw edits call
    /// this before applying them.
    pub fn check_range(&self) -> Result<(), ConfigError> {
        match *self {
            Edit::SetSize { size } => within("size", size, limits::SIZE_MIN, limits::SIZE_MAX),
            Edit::SetMargin { margin } => within("margin", margin, 0, limits::MARGIN_MAX),
            Edit::SetLogoSize { ratio } => {
                within("logo size", ratio, limits::LOGO_SIZE_MIN, limits::LOGO_SIZE_MAX)
            }
            Edit::SetLogoMargin { margin } => within("logo margin", margin, 0, limits::LOGO_MARGIN_MAX),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    config: Configuration,
    active_preset: Option<&'static str>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Name of the highlighted preset, if no manual styling edit happened since
    pub fn active_preset(&self) -> Option<&'static str> {
        self.active_preset
    }

    /// Dispatch an [`Edit`] to the matching mutator
    pub fn apply(&mut self, edit: Edit) -> Result<Change, ConfigError> {
        let change = match edit {
            Edit::SetContent { text } => self.set_content(&text),
            Edit::SetShape { target, shape } => self.set_shape(target, shape)?,
            Edit::SetFlatColor { target, role, color } => self.set_flat_color(target, role, color),
            Edit::SetGradientEnabled {
                target,
                enabled,
                base,
                end,
                kind,
                rotation_deg,
            } => self.set_gradient_enabled(target, enabled, base, end, kind, rotation_deg),
            Edit::SetGradientKind { target, kind } => self.set_gradient_kind(target, kind),
            Edit::SetGradientRotation { target, degrees } => self.set_gradient_rotation(target, degrees),
            Edit::SetBackground { background } => self.set_background(background),
            Edit::AttachLogo { image } => self.attach_logo(image),
            Edit::DetachLogo => self.detach_logo(),
            Edit::SetLogoSize { ratio } => self.set_logo_size(ratio),
            Edit::SetLogoMargin { margin } => self.set_logo_margin(margin),
            Edit::SetErrorCorrection { level } => self.set_error_correction(level),
            Edit::ApplyPreset { name } => self.apply_preset(&name),
            Edit::SetSize { size } => self.set_size(size),
            Edit::SetMargin { margin } => self.set_margin(margin),
        };
        Ok(change)
    }

    fn styling(&mut self) -> Change {
        if let Some(name) = self.active_preset.take() {
            debug!(preset = name, "Preset deselected by manual edit");
        }
        Change::Styling
    }

    /// Blank input falls back to the placeholder so the payload is never empty
    pub fn set_content(&mut self, text: &str) -> Change {
        self.config.content = if text.trim().is_empty() {
            defaults::CONTENT.to_string()
        } else {
            text.to_string()
        };
        debug!(len = self.config.content.len(), "Content updated");
        self.styling()
    }

    pub fn set_shape(&mut self, target: StyleTarget, shape: ShapeType) -> Result<Change, ConfigError> {
        if !target.accepts(shape) {
            return Err(ConfigError::IllegalShape { target, shape });
        }
        self.config.style_mut(target).shape = shape;
        debug!(%target, %shape, "Shape updated");
        Ok(self.styling())
    }

    /// Primary sets the flat color or, with a gradient, the start stop.
    /// Secondary only has meaning for gradients (end stop).
    pub fn set_flat_color(&mut self, target: StyleTarget, role: ColorRole, color: HexColor) -> Change {
        let style = self.config.style_mut(target);
        match (&mut style.paint, role) {
            (Paint::Flat(current), ColorRole::Primary) => *current = color,
            (Paint::Flat(_), ColorRole::Secondary) => return Change::Unchanged,
            (Paint::Gradient(gradient), ColorRole::Primary) => gradient.start = color,
            (Paint::Gradient(gradient), ColorRole::Secondary) => gradient.end = color,
        }
        debug!(%target, ?role, %color, "Color updated");
        self.styling()
    }

    /// Switch a style between flat and gradient paint, replacing the whole value
    pub fn set_gradient_enabled(
        &mut self,
        target: StyleTarget,
        enabled: bool,
        base: HexColor,
        end: HexColor,
        kind: GradientKind,
        rotation_deg: f32,
    ) -> Change {
        let paint = if enabled {
            Paint::Gradient(Gradient::from_degrees(kind, rotation_deg, base, end))
        } else {
            Paint::Flat(base)
        };
        self.config.style_mut(target).paint = paint;
        debug!(%target, enabled, "Gradient toggled");
        self.styling()
    }

    pub fn set_gradient_kind(&mut self, target: StyleTarget, kind: GradientKind) -> Change {
        match &mut self.config.style_mut(target).paint {
            Paint::Gradient(gradient) => gradient.kind = kind,
            Paint::Flat(_) => return Change::Unchanged,
        }
        self.styling()
    }

    pub fn set_gradient_rotation(&mut self, target: StyleTarget, degrees: f32) -> Change {
        match &mut self.config.style_mut(target).paint {
            Paint::Gradient(gradient) => {
                *gradient = Gradient::from_degrees(gradient.kind, degrees, gradient.start, gradient.end)
            }
            Paint::Flat(_) => return Change::Unchanged,
        }
        self.styling()
    }

    pub fn set_background(&mut self, background: Background) -> Change {
        self.config.background = background;
        debug!(%background, "Background updated");
        self.styling()
    }

    /// Attaching a logo forces the highest error-correction level
    pub fn attach_logo(&mut self, image: String) -> Change {
        self.config.logo.image = Some(image);
        self.config.error_correction = ErrorCorrection::H;
        debug!("Logo attached, error correction forced to H");
        Change::Settings
    }

    /// Always restores Q, not whatever level was active before the logo
    pub fn detach_logo(&mut self) -> Change {
        self.config.logo.image = None;
        self.config.error_correction = ErrorCorrection::Q;
        debug!("Logo removed, error correction reset to Q");
        Change::Settings
    }

    pub fn set_logo_size(&mut self, ratio: f32) -> Change {
        self.config.logo.size_ratio = ratio;
        Change::Settings
    }

    pub fn set_logo_margin(&mut self, margin: u32) -> Change {
        self.config.logo.margin = margin;
        Change::Settings
    }

    /// Direct set. Does not re-check the logo rule: a manual choice wins.
    pub fn set_error_correction(&mut self, level: ErrorCorrection) -> Change {
        self.config.error_correction = level;
        debug!(%level, "Error correction updated");
        Change::Settings
    }

    /// Unknown names are ignored without any signal
    pub fn apply_preset(&mut self, name: &str) -> Change {
        let Some(preset) = presets::find(name) else {
            debug!(name, "Ignoring unknown preset");
            return Change::Unchanged;
        };
        self.copy_preset(preset);
        Change::PresetApplied(preset.name)
    }

    fn copy_preset(&mut self, preset: &'static Preset) {
        self.config.dots = preset.dots;
        self.config.corner_square = preset.corner_square;
        self.config.corner_dot = preset.corner_dot;
        self.config.background = Background::Color(preset.background);
        self.active_preset = Some(preset.name);
        debug!(preset = preset.name, "Preset applied");
    }

    pub fn set_size(&mut self, size: u32) -> Change {
        self.config.geometry.size = size;
        Change::Settings
    }

    pub fn set_margin(&mut self, margin: u32) -> Change {
        self.config.geometry.margin = margin;
        Change::Settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    fn assert_exclusive(store: &ConfigStore) {
        for target in StyleTarget::ALL {
            let paint = store.config().style(target).paint;
            assert!(paint.flat_color().is_some() ^ paint.gradient().is_some());
        }
    }

    #[test]
    fn test_set_content_blank_uses_placeholder() {
        let mut store = ConfigStore::new();
        store.set_content("hello");
        assert_eq!(store.config().content, "hello");

        store.set_content("   ");
        assert_eq!(store.config().content, "https://example.com");

        store.set_content("");
        assert_eq!(store.config().content, "https://example.com");

        // Non-blank input is kept verbatim, surrounding whitespace included
        store.set_content(" padded ");
        assert_eq!(store.config().content, " padded ");
    }

    #[test]
    fn test_set_shape_rejects_illegal_for_target() {
        let mut store = ConfigStore::new();
        let before = store.config().corner_dot;

        let err = store.set_shape(StyleTarget::CornerDot, ShapeType::Classy).unwrap_err();
        assert_eq!(
            err,
            ConfigError::IllegalShape { target: StyleTarget::CornerDot, shape: ShapeType::Classy }
        );
        assert_eq!(store.config().corner_dot, before);

        store.set_shape(StyleTarget::CornerDot, ShapeType::Dot).unwrap();
        assert_eq!(store.config().corner_dot.shape, ShapeType::Dot);
        assert_eq!(store.config().corner_dot.paint, before.paint);
    }

    #[test]
    fn test_mutual_exclusion_over_sequences() {
        let mut store = ConfigStore::new();
        let red = hex("#FF0000");
        let blue = hex("#0000FF");

        for target in StyleTarget::ALL {
            store.set_flat_color(target, ColorRole::Primary, red);
            assert_exclusive(&store);
            store.set_gradient_enabled(target, true, red, blue, GradientKind::Radial, 10.0);
            assert_exclusive(&store);
            store.set_flat_color(target, ColorRole::Secondary, red);
            assert_exclusive(&store);
            store.set_gradient_enabled(target, false, blue, red, GradientKind::Linear, 0.0);
            assert_exclusive(&store);
            assert_eq!(store.config().style(target).paint, Paint::Flat(blue));
            store.set_flat_color(target, ColorRole::Secondary, red);
            assert_exclusive(&store);
        }
    }

    #[test]
    fn test_secondary_color_without_gradient_is_noop() {
        let mut store = ConfigStore::new();
        store.apply_preset("classic");
        let change = store.set_flat_color(StyleTarget::Dots, ColorRole::Secondary, hex("#FF0000"));
        assert_eq!(change, Change::Unchanged);
        assert_eq!(store.config().dots.paint, Paint::Flat(HexColor::BLACK));
        assert_eq!(store.active_preset(), Some("classic"));
    }

    #[test]
    fn test_gradient_enable_scenario() {
        let mut store = ConfigStore::new();
        store.set_gradient_enabled(
            StyleTarget::Dots,
            true,
            hex("#00F260"),
            hex("#0575E6"),
            GradientKind::Linear,
            45.0,
        );

        let gradient = store.config().dots.paint.gradient().copied().expect("gradient set");
        assert_eq!(gradient.kind, GradientKind::Linear);
        assert!((gradient.rotation - 0.7854).abs() < 1e-4);
        assert!((gradient.rotation - PI / 4.0).abs() < 1e-6);

        let [first, last] = gradient.stops();
        assert_eq!((first.offset, first.color), (0.0, hex("#00F260")));
        assert_eq!((last.offset, last.color), (1.0, hex("#0575E6")));
        assert_eq!(store.config().dots.paint.flat_color(), None);
    }

    #[test]
    fn test_primary_color_with_gradient_updates_start_stop() {
        let mut store = ConfigStore::new();
        store.set_gradient_enabled(
            StyleTarget::CornerSquare,
            true,
            hex("#111111"),
            hex("#222222"),
            GradientKind::Radial,
            0.0,
        );

        store.set_flat_color(StyleTarget::CornerSquare, ColorRole::Primary, hex("#123ABC"));

        let paint = store.config().corner_square.paint;
        let gradient = paint.gradient().expect("gradient stays active");
        assert_eq!(gradient.start, hex("#123ABC"));
        assert_eq!(gradient.end, hex("#222222"));
        assert_eq!(gradient.kind, GradientKind::Radial);
        assert_eq!(paint.flat_color(), None);
    }

    #[test]
    fn test_gradient_kind_and_rotation_ignored_without_gradient() {
        let mut store = ConfigStore::new();
        store.apply_preset("rounded");
        let before = store.config().clone();

        assert_eq!(store.set_gradient_kind(StyleTarget::Dots, GradientKind::Radial), Change::Unchanged);
        assert_eq!(store.set_gradient_rotation(StyleTarget::Dots, 90.0), Change::Unchanged);
        assert_eq!(store.config(), &before);
        assert_eq!(store.active_preset(), Some("rounded"));
    }

    #[test]
    fn test_gradient_kind_and_rotation_update_in_place() {
        let mut store = ConfigStore::new();
        store.apply_preset("neon");

        store.set_gradient_kind(StyleTarget::Dots, GradientKind::Radial);
        store.set_gradient_rotation(StyleTarget::Dots, 180.0);

        let gradient = store.config().dots.paint.gradient().copied().unwrap();
        assert_eq!(gradient.kind, GradientKind::Radial);
        assert!((gradient.rotation - PI).abs() < 1e-6);
        assert_eq!(gradient.start, hex("#00F260"));
    }

    #[test]
    fn test_logo_forces_h_and_detach_restores_q() {
        for level in ErrorCorrection::ALL {
            let mut store = ConfigStore::new();
            store.set_error_correction(level);

            store.attach_logo("data:image/png;base64,AAAA".to_string());
            assert_eq!(store.config().error_correction, ErrorCorrection::H);
            assert!(store.config().logo.is_attached());

            store.detach_logo();
            assert_eq!(store.config().error_correction, ErrorCorrection::Q);
            assert!(!store.config().logo.is_attached());
        }
    }

    #[test]
    fn test_set_error_correction_overrides_logo_level() {
        let mut store = ConfigStore::new();
        store.attach_logo("data:image/png;base64,AAAA".to_string());
        store.set_error_correction(ErrorCorrection::L);
        assert_eq!(store.config().error_correction, ErrorCorrection::L);
    }

    #[test]
    fn test_logo_settings_accepted_without_logo() {
        let mut store = ConfigStore::new();
        assert_eq!(store.set_logo_size(0.25), Change::Settings);
        assert_eq!(store.set_logo_margin(12), Change::Settings);
        assert_eq!(store.config().logo.size_ratio, 0.25);
        assert_eq!(store.config().logo.margin, 12);
        assert!(!store.config().logo.is_attached());
    }

    #[test]
    fn test_apply_preset_idempotent() {
        let mut once = ConfigStore::new();
        once.apply_preset("sunset");

        let mut twice = ConfigStore::new();
        twice.apply_preset("sunset");
        twice.apply_preset("sunset");

        assert_eq!(once.config(), twice.config());
        assert_eq!(twice.active_preset(), Some("sunset"));
    }

    #[test]
    fn test_apply_preset_clears_previous_gradients() {
        let mut store = ConfigStore::new();
        store.set_gradient_enabled(
            StyleTarget::CornerDot,
            true,
            hex("#FF0000"),
            hex("#00FF00"),
            GradientKind::Linear,
            0.0,
        );
        store.apply_preset("neon");
        assert!(store.config().dots.paint.gradient().is_some());

        store.apply_preset("classic");
        for target in StyleTarget::ALL {
            assert_eq!(store.config().style(target).paint, Paint::Flat(HexColor::BLACK));
        }
        assert_eq!(store.config().background, Background::Color(HexColor::WHITE));
    }

    #[test]
    fn test_apply_unknown_preset_is_noop() {
        let mut store = ConfigStore::new();
        store.apply_preset("ocean");
        let before = store.config().clone();

        assert_eq!(store.apply_preset("does-not-exist"), Change::Unchanged);
        assert_eq!(store.config(), &before);
        assert_eq!(store.active_preset(), Some("ocean"));
    }

    #[test]
    fn test_neon_logo_cycle_keeps_styles() {
        let mut store = ConfigStore::new();
        store.apply_preset("neon");
        let styles = (store.config().dots, store.config().corner_square, store.config().corner_dot);

        store.attach_logo("data:image/png;base64,AAAA".to_string());
        store.detach_logo();

        assert_eq!(
            (store.config().dots, store.config().corner_square, store.config().corner_dot),
            styles
        );
        assert_eq!(store.config().error_correction, ErrorCorrection::Q);
        assert_eq!(store.active_preset(), Some("neon"));
    }

    #[test]
    fn test_styling_edits_clear_preset() {
        let styling_edits = vec![
            Edit::SetContent { text: "x".into() },
            Edit::SetShape { target: StyleTarget::Dots, shape: ShapeType::Dots },
            Edit::SetFlatColor { target: StyleTarget::Dots, role: ColorRole::Primary, color: HexColor::WHITE },
            Edit::SetGradientEnabled {
                target: StyleTarget::CornerDot,
                enabled: true,
                base: HexColor::BLACK,
                end: HexColor::WHITE,
                kind: GradientKind::Linear,
                rotation_deg: 0.0,
            },
            Edit::SetBackground { background: Background::Transparent },
        ];

        for edit in styling_edits {
            let mut store = ConfigStore::new();
            store.apply_preset("classy");
            assert_eq!(store.apply(edit.clone()).unwrap(), Change::Styling, "{edit:?}");
            assert_eq!(store.active_preset(), None, "{edit:?}");
        }
    }

    #[test]
    fn test_settings_edits_keep_preset() {
        let settings_edits = vec![
            Edit::AttachLogo { image: "data:,".into() },
            Edit::DetachLogo,
            Edit::SetLogoSize { ratio: 0.3 },
            Edit::SetLogoMargin { margin: 2 },
            Edit::SetErrorCorrection { level: ErrorCorrection::M },
            Edit::SetSize { size: 512 },
            Edit::SetMargin { margin: 0 },
        ];

        for edit in settings_edits {
            let mut store = ConfigStore::new();
            store.apply_preset("elegant");
            assert_eq!(store.apply(edit.clone()).unwrap(), Change::Settings, "{edit:?}");
            assert_eq!(store.active_preset(), Some("elegant"), "{edit:?}");
        }
    }

    #[test]
    fn test_edit_deserializes_from_json() {
        let edit: Edit = serde_json::from_str(
            r##"{"op":"set_gradient_enabled","target":"corner_square","enabled":true,"base":"#00f260","end":"#0575e6","rotation_deg":45}"##,
        )
        .unwrap();
        assert_eq!(
            edit,
            Edit::SetGradientEnabled {
                target: StyleTarget::CornerSquare,
                enabled: true,
                base: hex("#00F260"),
                end: hex("#0575E6"),
                kind: GradientKind::Linear,
                rotation_deg: 45.0,
            }
        );

        let edit: Edit = serde_json::from_str(r##"{"op":"set_flat_color","target":"dots","color":"#123ABC"}"##).unwrap();
        assert!(matches!(edit, Edit::SetFlatColor { role: ColorRole::Primary, .. }));

        let edit: Edit = serde_json::from_str(r#"{"op":"set_error_correction","level":"H"}"#).unwrap();
        assert_eq!(edit, Edit::SetErrorCorrection { level: ErrorCorrection::H });

        assert!(serde_json::from_str::<Edit>(r#"{"op":"set_flat_color","target":"dots","color":"red"}"#).is_err());
    }

    #[test]
    fn test_check_range_on_ranged_edits() {
        assert!(Edit::SetSize { size: 100 }.check_range().is_ok());
        assert!(Edit::SetSize { size: 1000 }.check_range().is_ok());
        assert!(Edit::SetMargin { margin: 50 }.check_range().is_ok());
        assert!(Edit::SetLogoSize { ratio: 0.5 }.check_range().is_ok());
        assert!(Edit::SetLogoMargin { margin: 0 }.check_range().is_ok());

        assert_eq!(
            Edit::SetSize { size: 4_000_000_000 }.check_range(),
            Err(ConfigError::OutOfRange {
                field: "size",
                value: "4000000000".into(),
                min: "100".into(),
                max: "1000".into(),
            })
        );
        assert!(Edit::SetSize { size: 99 }.check_range().is_err());
        assert!(Edit::SetMargin { margin: 51 }.check_range().is_err());
        assert!(Edit::SetLogoSize { ratio: 0.05 }.check_range().is_err());
        assert!(Edit::SetLogoSize { ratio: f32::NAN }.check_range().is_err());
        assert!(Edit::SetLogoMargin { margin: 21 }.check_range().is_err());
        assert!(Edit::DetachLogo.check_range().is_ok());
    }
}
