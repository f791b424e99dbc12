//! Text element properties.

use super::SerializableColor;
use serde::{Deserialize, Serialize};

/// Font family options offered by the designer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Clean sans-serif (default).
    #[default]
    Sans,
    /// Serif for formal label text.
    Serif,
    /// Monospace for codes and numbering.
    Mono,
}

impl FontFamily {
    /// Get the font family name as used by the renderer.
    pub fn name(&self) -> &'static str {
        match self {
            FontFamily::Sans => "Noto Sans",
            FontFamily::Serif => "Noto Serif",
            FontFamily::Mono => "Noto Sans Mono",
        }
    }

    /// Get all available font families.
    pub fn all() -> &'static [FontFamily] {
        &[FontFamily::Sans, FontFamily::Serif, FontFamily::Mono]
    }
}

/// Horizontal alignment of text within its element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Properties payload for text elements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextProperties {
    pub content: String,
    pub font_family: FontFamily,
    /// Font size in points.
    pub font_size_pt: f64,
    pub color: SerializableColor,
    pub bold: bool,
    pub align: TextAlign,
}

impl Default for TextProperties {
    fn default() -> Self {
        Self {
            content: "Sample Text".to_string(),
            font_family: FontFamily::default(),
            font_size_pt: 12.0,
            color: SerializableColor::black(),
            bold: false,
            align: TextAlign::default(),
        }
    }
}
