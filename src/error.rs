//! Validation errors raised at the edge of the configuration store

use thiserror::Error;

use crate::types::{ShapeType, StyleTarget};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid hex color {0:?} (expected #RRGGBB)")]
    InvalidHexColor(String),

    #[error("shape '{shape}' is not available for {target}")]
    IllegalShape { target: StyleTarget, shape: ShapeType },

    #[error("unknown preset {0:?}")]
    UnknownPreset(String),

    #[error("{field} {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: String,
        max: String,
    },
}
