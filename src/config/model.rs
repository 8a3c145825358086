//! In-memory configuration record
//!
//! One `Configuration` lives for the whole session and is never persisted.
//! Paint is an enum so a style can never hold a flat color and a gradient at
//! the same time; gradient stop offsets are implied (0 and 1) rather than stored.

use std::f32::consts::PI;

use crate::color::{Background, HexColor};
use crate::constants::defaults;
use crate::types::{ErrorCorrection, GradientKind, ShapeType, StyleTarget};

/// A single gradient stop as the engine sees it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: HexColor,
}

/// Two-stop gradient; only the colors vary, never the stop positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub kind: GradientKind,
    /// Rotation in radians
    pub rotation: f32,
    pub start: HexColor,
    pub end: HexColor,
}

impl Gradient {
    pub fn from_degrees(kind: GradientKind, rotation_deg: f32, start: HexColor, end: HexColor) -> Self {
        Self {
            kind,
            rotation: degrees_to_radians(rotation_deg),
            start,
            end,
        }
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation * 180.0 / PI
    }

    pub fn stops(&self) -> [ColorStop; 2] {
        [
            ColorStop { offset: 0.0, color: self.start },
            ColorStop { offset: 1.0, color: self.end },
        ]
    }
}

pub fn degrees_to_radians(deg: f32) -> f32 {
    deg / 180.0 * PI
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Flat(HexColor),
    Gradient(Gradient),
}

impl Paint {
    pub fn flat_color(&self) -> Option<HexColor> {
        match self {
            Paint::Flat(color) => Some(*color),
            Paint::Gradient(_) => None,
        }
    }

    pub fn gradient(&self) -> Option<&Gradient> {
        match self {
            Paint::Flat(_) => None,
            Paint::Gradient(gradient) => Some(gradient),
        }
    }

    /// Color shown in the primary picker: the flat color or the start stop
    pub fn primary_color(&self) -> HexColor {
        match self {
            Paint::Flat(color) => *color,
            Paint::Gradient(gradient) => gradient.start,
        }
    }
}

/// Shape and paint of one element class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleSpec {
    pub shape: ShapeType,
    pub paint: Paint,
}

impl StyleSpec {
    pub const fn flat(shape: ShapeType, color: HexColor) -> Self {
        Self {
            shape,
            paint: Paint::Flat(color),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub size: u32,
    pub margin: u32,
}

/// Embedded logo; size and margin survive a detach so a re-upload keeps them
#[derive(Debug, Clone, PartialEq)]
pub struct LogoSpec {
    /// Data URL of the image, `None` while no logo is attached
    pub image: Option<String>,
    pub size_ratio: f32,
    pub margin: u32,
}

impl LogoSpec {
    pub fn is_attached(&self) -> bool {
        self.image.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub content: String,
    pub geometry: Geometry,
    pub error_correction: ErrorCorrection,
    pub dots: StyleSpec,
    pub corner_square: StyleSpec,
    pub corner_dot: StyleSpec,
    pub background: Background,
    pub logo: LogoSpec,
}

impl Configuration {
    pub fn style(&self, target: StyleTarget) -> &StyleSpec {
        match target {
            StyleTarget::Dots => &self.dots,
            StyleTarget::CornerSquare => &self.corner_square,
            StyleTarget::CornerDot => &self.corner_dot,
        }
    }

    pub fn style_mut(&mut self, target: StyleTarget) -> &mut StyleSpec {
        match target {
            StyleTarget::Dots => &mut self.dots,
            StyleTarget::CornerSquare => &mut self.corner_square,
            StyleTarget::CornerDot => &mut self.corner_dot,
        }
    }
}

impl Default for Configuration {
    fn default() -> Self {
        let foreground = HexColor::parse(defaults::FOREGROUND).unwrap_or(HexColor::BLACK);
        let background = HexColor::parse(defaults::BACKGROUND).unwrap_or(HexColor::WHITE);

        Self {
            content: defaults::CONTENT.to_string(),
            geometry: Geometry {
                size: defaults::SIZE,
                margin: defaults::MARGIN,
            },
            error_correction: ErrorCorrection::Q,
            dots: StyleSpec::flat(ShapeType::Square, foreground),
            corner_square: StyleSpec::flat(ShapeType::Square, foreground),
            corner_dot: StyleSpec::flat(ShapeType::Square, foreground),
            background: Background::Color(background),
            logo: LogoSpec {
                image: None,
                size_ratio: defaults::LOGO_SIZE_RATIO,
                margin: defaults::LOGO_MARGIN,
            },
        }
    }
}
