//! Barcode element properties.

use super::SerializableColor;
use crate::glyph::Symbology;
use serde::{Deserialize, Serialize};

/// Properties payload for barcode/QR elements.
///
/// The encoded glyph itself comes from the glyph renderer boundary; the
/// canvas only stores the content string and presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeProperties {
    /// Content string encoded into the glyph.
    pub content: String,
    pub symbology: Symbology,
    /// Whether the human-readable content is printed under the bars.
    pub show_text: bool,
    pub module_color: SerializableColor,
}

impl Default for BarcodeProperties {
    fn default() -> Self {
        Self {
            content: "123456789".to_string(),
            symbology: Symbology::QrCode,
            show_text: false,
            module_color: SerializableColor::black(),
        }
    }
}
