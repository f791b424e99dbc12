//! Image element properties.

use serde::{Deserialize, Serialize};

/// How an image is fitted into its element box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    /// Scale to fit entirely inside the box, preserving aspect ratio.
    #[default]
    Contain,
    /// Scale to cover the whole box, cropping overflow.
    Cover,
    /// Stretch to the box, ignoring aspect ratio.
    Stretch,
}

/// Properties payload for image elements.
///
/// The canvas stores only a reference to the uploaded asset; upload and
/// hosting are handled outside the canvas core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageProperties {
    /// URI of the hosted asset. Empty until an upload is linked.
    pub source_uri: String,
    pub fit: ImageFit,
}
