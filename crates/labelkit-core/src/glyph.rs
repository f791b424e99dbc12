//! Glyph renderer boundary for barcode/QR content.
//!
//! Encoding a content string into a printable glyph is a pure function
//! of content, symbology and style. The canvas core never renders
//! glyphs itself; element rendering calls through this trait, and the
//! interaction engine never touches it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Supported barcode symbologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbology {
    QrCode,
    Code128,
    Code39,
    Ean13,
    DataMatrix,
}

impl Symbology {
    /// Display name for property panels.
    pub fn display_name(&self) -> &'static str {
        match self {
            Symbology::QrCode => "QR Code",
            Symbology::Code128 => "Code 128",
            Symbology::Code39 => "Code 39",
            Symbology::Ean13 => "EAN-13",
            Symbology::DataMatrix => "Data Matrix",
        }
    }

    /// Whether the symbology encodes into a square module matrix
    /// rather than a one-dimensional bar pattern.
    pub fn is_two_dimensional(&self) -> bool {
        matches!(self, Symbology::QrCode | Symbology::DataMatrix)
    }
}

/// Style hints passed through to the glyph renderer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlyphStyle {
    /// Size of one module in document pixels.
    pub module_px: f64,
    /// Quiet zone around the glyph, in modules.
    pub quiet_zone_modules: u32,
}

impl Default for GlyphStyle {
    fn default() -> Self {
        Self {
            module_px: 2.0,
            quiet_zone_modules: 4,
        }
    }
}

/// Renderer-agnostic glyph: the set of dark modules on a module grid.
#[derive(Debug, Clone, Default)]
pub struct GlyphDrawable {
    /// Grid dimensions in modules (width, height).
    pub size_modules: (u32, u32),
    /// Coordinates of dark modules, row-major.
    pub dark_modules: Vec<(u32, u32)>,
}

/// Glyph encoding errors.
#[derive(Debug, Error)]
pub enum GlyphError {
    #[error("symbology {0:?} is not supported by this renderer")]
    UnsupportedSymbology(Symbology),
    #[error("content cannot be encoded: {0}")]
    InvalidContent(String),
}

/// Pure content-to-drawable encoder.
pub trait GlyphRenderer {
    fn render(
        &self,
        content: &str,
        symbology: Symbology,
        style: &GlyphStyle,
    ) -> Result<GlyphDrawable, GlyphError>;
}

/// Test double that renders every glyph as empty.
pub struct NullGlyphRenderer;

impl GlyphRenderer for NullGlyphRenderer {
    fn render(
        &self,
        _content: &str,
        _symbology: Symbology,
        _style: &GlyphStyle,
    ) -> Result<GlyphDrawable, GlyphError> {
        Ok(GlyphDrawable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_renderer_is_empty() {
        let drawable = NullGlyphRenderer
            .render("hello", Symbology::QrCode, &GlyphStyle::default())
            .unwrap();
        assert_eq!(drawable.size_modules, (0, 0));
        assert!(drawable.dark_modules.is_empty());
    }

    #[test]
    fn test_dimensionality() {
        assert!(Symbology::QrCode.is_two_dimensional());
        assert!(!Symbology::Code128.is_two_dimensional());
    }
}
