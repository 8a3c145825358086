//! Normalized render snapshots
//!
//! A snapshot is always a complete record. The inactive paint variant and a
//! missing logo are emitted as explicit `null`s, so an engine that merges
//! updates key by key can never keep a stale gradient or image around.

use serde::{Deserialize, Serialize};

use crate::color::{Background, HexColor};
use crate::config::model::{Configuration, Gradient, Paint, StyleSpec};
use crate::types::{ErrorCorrection, GradientKind, ShapeType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub data: String,
    pub qr_options: QrOptions,
    pub dots_options: StyleOptions,
    pub corners_square_options: StyleOptions,
    pub corners_dot_options: StyleOptions,
    pub background_options: BackgroundOptions,
    pub image_options: ImageOptions,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrOptions {
    pub error_correction_level: ErrorCorrection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleOptions {
    #[serde(rename = "type")]
    pub shape: ShapeType,
    pub color: Option<HexColor>,
    pub gradient: Option<GradientOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientOptions {
    #[serde(rename = "type")]
    pub kind: GradientKind,
    pub rotation: f32,
    pub color_stops: Vec<ColorStopOptions>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStopOptions {
    pub offset: f32,
    pub color: HexColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundOptions {
    pub color: Background,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    pub cross_origin: String,
    pub margin: u32,
    pub image_size: f32,
}

impl From<&Gradient> for GradientOptions {
    fn from(gradient: &Gradient) -> Self {
        Self {
            kind: gradient.kind,
            rotation: gradient.rotation,
            color_stops: gradient
                .stops()
                .iter()
                .map(|stop| ColorStopOptions {
                    offset: stop.offset,
                    color: stop.color,
                })
                .collect(),
        }
    }
}

impl From<&StyleSpec> for StyleOptions {
    fn from(style: &StyleSpec) -> Self {
        Self {
            shape: style.shape,
            color: style.paint.flat_color(),
            gradient: style.paint.gradient().map(GradientOptions::from),
        }
    }
}

impl StyleOptions {
    /// Rebuild the paint; a gradient wins if both are somehow present
    pub fn paint(&self) -> Option<Paint> {
        if let Some(gradient) = &self.gradient {
            let start = gradient.color_stops.first()?.color;
            let end = gradient.color_stops.last()?.color;
            return Some(Paint::Gradient(Gradient {
                kind: gradient.kind,
                rotation: gradient.rotation,
                start,
                end,
            }));
        }
        self.color.map(Paint::Flat)
    }
}

/// Build the full snapshot pushed to the render engine
pub fn normalize(config: &Configuration) -> Snapshot {
    Snapshot {
        width: config.geometry.size,
        height: config.geometry.size,
        margin: config.geometry.margin,
        data: config.content.clone(),
        qr_options: QrOptions {
            error_correction_level: config.error_correction,
        },
        dots_options: StyleOptions::from(&config.dots),
        corners_square_options: StyleOptions::from(&config.corner_square),
        corners_dot_options: StyleOptions::from(&config.corner_dot),
        background_options: BackgroundOptions {
            color: config.background,
        },
        image_options: ImageOptions {
            cross_origin: "anonymous".to_string(),
            margin: config.logo.margin,
            image_size: config.logo.size_ratio,
        },
        image: config.logo.image.clone(),
    }
}
