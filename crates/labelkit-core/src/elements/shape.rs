//! Shape element properties.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Geometric primitive drawn by a shape element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    #[default]
    Rectangle,
    Ellipse,
    Line,
}

/// Properties payload for shape elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeProperties {
    pub kind: ShapeKind,
    /// Fill color (None = no fill).
    pub fill: Option<SerializableColor>,
    pub border_color: SerializableColor,
    /// Border width in document pixels.
    pub border_width_px: f64,
    /// Corner radius for rectangles (0 = sharp corners).
    pub corner_radius: f64,
}

impl Default for ShapeProperties {
    fn default() -> Self {
        Self {
            kind: ShapeKind::default(),
            fill: None,
            border_color: SerializableColor::black(),
            border_width_px: 1.0,
            corner_radius: 0.0,
        }
    }
}
