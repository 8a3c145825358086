//! Shared enums for style targets, shapes and render options
//!
//! Wire names match what the render engine expects (`extra-rounded`,
//! `classy-rounded`, single-letter EC levels).

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three independently styled element classes of a code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTarget {
    Dots,
    CornerSquare,
    CornerDot,
}

impl StyleTarget {
    pub const ALL: [StyleTarget; 3] = [
        StyleTarget::Dots,
        StyleTarget::CornerSquare,
        StyleTarget::CornerDot,
    ];

    /// Shapes the engine accepts for this target
    pub fn legal_shapes(&self) -> &'static [ShapeType] {
        match self {
            StyleTarget::Dots => &[
                ShapeType::Square,
                ShapeType::Dots,
                ShapeType::Rounded,
                ShapeType::ExtraRounded,
                ShapeType::Classy,
                ShapeType::ClassyRounded,
            ],
            StyleTarget::CornerSquare => {
                &[ShapeType::Square, ShapeType::Dot, ShapeType::ExtraRounded]
            }
            StyleTarget::CornerDot => &[ShapeType::Square, ShapeType::Dot],
        }
    }

    pub fn accepts(&self, shape: ShapeType) -> bool {
        self.legal_shapes().contains(&shape)
    }

    pub fn label(&self) -> &'static str {
        match self {
            StyleTarget::Dots => "Dots",
            StyleTarget::CornerSquare => "Corner Squares",
            StyleTarget::CornerDot => "Corner Dots",
        }
    }
}

impl fmt::Display for StyleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StyleTarget::Dots => "dots",
            StyleTarget::CornerSquare => "corner squares",
            StyleTarget::CornerDot => "corner dots",
        })
    }
}

/// Union of every shape name the engine knows; legality is per target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeType {
    Square,
    Dots,
    Dot,
    Rounded,
    ExtraRounded,
    Classy,
    ClassyRounded,
}

impl ShapeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeType::Square => "square",
            ShapeType::Dots => "dots",
            ShapeType::Dot => "dot",
            ShapeType::Rounded => "rounded",
            ShapeType::ExtraRounded => "extra-rounded",
            ShapeType::Classy => "classy",
            ShapeType::ClassyRounded => "classy-rounded",
        }
    }

    /// Human-readable label for selector buttons
    pub fn label(&self) -> &'static str {
        match self {
            ShapeType::Square => "Square",
            ShapeType::Dots => "Dots",
            ShapeType::Dot => "Dot",
            ShapeType::Rounded => "Rounded",
            ShapeType::ExtraRounded => "Extra Rounded",
            ShapeType::Classy => "Classy",
            ShapeType::ClassyRounded => "Classy Rounded",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which color control of a style group an edit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRole {
    /// Flat color, or the gradient start stop
    Primary,
    /// Gradient end stop
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

impl GradientKind {
    pub fn label(&self) -> &'static str {
        match self {
            GradientKind::Linear => "Linear",
            GradientKind::Radial => "Radial",
        }
    }
}

/// Redundancy level of the encoded symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ErrorCorrection {
    L,
    M,
    #[default]
    Q,
    H,
}

impl ErrorCorrection {
    pub const ALL: [ErrorCorrection; 4] = [
        ErrorCorrection::L,
        ErrorCorrection::M,
        ErrorCorrection::Q,
        ErrorCorrection::H,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
    Jpeg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Svg, ExportFormat::Jpeg];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
            ExportFormat::Jpeg => "jpeg",
        }
    }

    /// Guess the format from a file extension (`jpg` counts as JPEG)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ExportFormat::Png),
            "svg" => Some(ExportFormat::Svg),
            "jpg" | "jpeg" => Some(ExportFormat::Jpeg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_shapes_per_target() {
        assert_eq!(StyleTarget::Dots.legal_shapes().len(), 6);
        assert!(!StyleTarget::Dots.accepts(ShapeType::Dot));

        assert!(StyleTarget::CornerSquare.accepts(ShapeType::ExtraRounded));
        assert!(!StyleTarget::CornerSquare.accepts(ShapeType::Rounded));

        assert_eq!(StyleTarget::CornerDot.legal_shapes(), &[ShapeType::Square, ShapeType::Dot]);
        assert!(!StyleTarget::CornerDot.accepts(ShapeType::ExtraRounded));
    }

    #[test]
    fn test_shape_wire_names() {
        assert_eq!(serde_json::to_string(&ShapeType::ClassyRounded).unwrap(), "\"classy-rounded\"");
        let shape: ShapeType = serde_json::from_str("\"extra-rounded\"").unwrap();
        assert_eq!(shape, ShapeType::ExtraRounded);
        assert_eq!(shape.to_string(), "extra-rounded");
    }

    #[test]
    fn test_export_format_from_extension() {
        assert_eq!(ExportFormat::from_extension("JPG"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_extension("svg"), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_extension("gif"), None);
    }
}
