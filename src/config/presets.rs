//! Built-in style presets
//!
//! Read-only templates. Applying one copies its values into the live
//! configuration; the table itself is never touched.

use crate::color::HexColor;
use crate::config::model::{Gradient, Paint, StyleSpec};
use crate::types::{GradientKind, ShapeType};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub label: &'static str,
    pub dots: StyleSpec,
    pub corner_square: StyleSpec,
    pub corner_dot: StyleSpec,
    pub background: HexColor,
}

const fn hex(rgb: u32) -> HexColor {
    HexColor::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

const fn flat(shape: ShapeType, rgb: u32) -> StyleSpec {
    StyleSpec::flat(shape, hex(rgb))
}

const fn linear(shape: ShapeType, rotation: f32, start: u32, end: u32) -> StyleSpec {
    StyleSpec {
        shape,
        paint: Paint::Gradient(Gradient {
            kind: GradientKind::Linear,
            rotation,
            start: hex(start),
            end: hex(end),
        }),
    }
}

pub const PRESETS: &[Preset] = &[
    Preset {
        name: "classic",
        label: "Classic",
        dots: flat(ShapeType::Square, 0x000000),
        corner_square: flat(ShapeType::Square, 0x000000),
        corner_dot: flat(ShapeType::Square, 0x000000),
        background: hex(0xFFFFFF),
    },
    Preset {
        name: "rounded",
        label: "Rounded",
        dots: flat(ShapeType::Rounded, 0x2D2D2D),
        corner_square: flat(ShapeType::ExtraRounded, 0x1A1A1A),
        corner_dot: flat(ShapeType::Dot, 0x1A1A1A),
        background: hex(0xFFFFFF),
    },
    Preset {
        name: "dots",
        label: "Dots",
        dots: flat(ShapeType::Dots, 0x333333),
        corner_square: flat(ShapeType::Dot, 0x111111),
        corner_dot: flat(ShapeType::Dot, 0x111111),
        background: hex(0xFFFFFF),
    },
    Preset {
        name: "classy",
        label: "Classy",
        dots: flat(ShapeType::Classy, 0x1A1A2E),
        corner_square: flat(ShapeType::ExtraRounded, 0x16213E),
        corner_dot: flat(ShapeType::Dot, 0x0F3460),
        background: hex(0xFAFAFA),
    },
    Preset {
        name: "elegant",
        label: "Elegant",
        dots: flat(ShapeType::ClassyRounded, 0x0D1117),
        corner_square: flat(ShapeType::ExtraRounded, 0x161B22),
        corner_dot: flat(ShapeType::Dot, 0x0D1117),
        background: hex(0xFFFFFF),
    },
    Preset {
        name: "neon",
        label: "Neon",
        dots: linear(ShapeType::Dots, 0.7, 0x00F260, 0x0575E6),
        corner_square: flat(ShapeType::ExtraRounded, 0x00F260),
        corner_dot: flat(ShapeType::Dot, 0x0575E6),
        background: hex(0x0A0A12),
    },
    Preset {
        name: "ocean",
        label: "Ocean",
        dots: linear(ShapeType::Rounded, 0.5, 0x2193B0, 0x6DD5ED),
        corner_square: flat(ShapeType::ExtraRounded, 0x2193B0),
        corner_dot: flat(ShapeType::Dot, 0x2193B0),
        background: hex(0xFFFFFF),
    },
    Preset {
        name: "sunset",
        label: "Sunset",
        dots: linear(ShapeType::ExtraRounded, 0.4, 0xF12711, 0xF5AF19),
        corner_square: flat(ShapeType::ExtraRounded, 0xF12711),
        corner_dot: flat(ShapeType::Dot, 0xF5AF19),
        background: hex(0xFFFDF6),
    },
];

/// Look up a preset by its (case-sensitive) name
pub fn find(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.name == name)
}
