//! Element definitions for the label canvas.

mod barcode;
mod image;
mod shape;
mod text;

pub use barcode::BarcodeProperties;
pub use image::{ImageFit, ImageProperties};
pub use shape::{ShapeKind, ShapeProperties};
pub use text::{FontFamily, TextAlign, TextProperties};

use kurbo::{Point, Rect, Size};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements. Assigned by the persistence layer on
/// creation, never by the client.
pub type ElementId = Uuid;

/// Minimum element width/height in document pixels. The interaction
/// engine never lets a resize go below this floor.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Discriminant for the element variants, used by the command surface
/// and for per-type creation defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Text,
    Barcode,
    Image,
    Shape,
}

impl ElementKind {
    /// Human-readable default name for new elements of this kind.
    pub fn default_name(&self) -> &'static str {
        match self {
            ElementKind::Text => "Text",
            ElementKind::Barcode => "Barcode",
            ElementKind::Image => "Image",
            ElementKind::Shape => "Shape",
        }
    }

    /// Default position for new elements of this kind, in document px.
    pub fn default_position(&self) -> Point {
        match self {
            ElementKind::Text => Point::new(50.0, 50.0),
            ElementKind::Barcode => Point::new(60.0, 60.0),
            ElementKind::Image => Point::new(70.0, 70.0),
            ElementKind::Shape => Point::new(80.0, 80.0),
        }
    }

    /// Default size for new elements of this kind, in document px.
    pub fn default_size(&self) -> Size {
        match self {
            ElementKind::Text => Size::new(150.0, 50.0),
            ElementKind::Barcode => Size::new(120.0, 120.0),
            ElementKind::Image => Size::new(100.0, 100.0),
            ElementKind::Shape => Size::new(100.0, 80.0),
        }
    }

    /// Default variant payload for this kind.
    pub fn default_properties(&self) -> ElementProperties {
        match self {
            ElementKind::Text => ElementProperties::Text(TextProperties::default()),
            ElementKind::Barcode => ElementProperties::Barcode(BarcodeProperties::default()),
            ElementKind::Image => ElementProperties::Image(ImageProperties::default()),
            ElementKind::Shape => ElementProperties::Shape(ShapeProperties::default()),
        }
    }
}

/// Variant-specific payload, tagged by element type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ElementProperties {
    Text(TextProperties),
    Barcode(BarcodeProperties),
    Image(ImageProperties),
    Shape(ShapeProperties),
}

impl ElementProperties {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementProperties::Text(_) => ElementKind::Text,
            ElementProperties::Barcode(_) => ElementKind::Barcode,
            ElementProperties::Image(_) => ElementKind::Image,
            ElementProperties::Shape(_) => ElementKind::Shape,
        }
    }
}

/// A placed element: shared base fields plus the variant payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    /// Top-left corner in document pixels.
    pub position: Point,
    /// Width/height in document pixels.
    pub size: Size,
    /// Rotation in degrees, kept in [0, 360).
    pub rotation_degrees: f64,
    /// Paint layer. Higher paints later (on top); not required to be
    /// contiguous across elements.
    pub layer: i32,
    /// Display label shown in layer/property panels.
    pub name: String,
    pub properties: ElementProperties,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        self.properties.kind()
    }

    /// Axis-aligned bounding box in document coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    /// Check if a document-space point hits this element.
    /// Rotation is ignored for hit-testing.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    /// Set the rotation, wrapping into [0, 360).
    pub fn set_rotation(&mut self, degrees: f64) {
        self.rotation_degrees = degrees.rem_euclid(360.0);
    }
}

/// A new element as sent to the persistence layer: everything but the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementDraft {
    pub position: Point,
    pub size: Size,
    pub rotation_degrees: f64,
    pub layer: i32,
    pub name: String,
    pub properties: ElementProperties,
}

impl ElementDraft {
    /// Build a draft with the per-type creation defaults.
    pub fn for_kind(kind: ElementKind) -> Self {
        Self {
            position: kind.default_position(),
            size: kind.default_size(),
            rotation_degrees: 0.0,
            layer: 0,
            name: kind.default_name().to_string(),
            properties: kind.default_properties(),
        }
    }

    /// Materialize the draft into an element with the given id.
    pub fn into_element(self, id: ElementId) -> Element {
        Element {
            id,
            position: self.position,
            size: self.size,
            rotation_degrees: self.rotation_degrees,
            layer: self.layer,
            name: self.name,
            properties: self.properties,
        }
    }
}

/// A partial update to an element. Fields left as `None` are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_degrees: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<ElementProperties>,
}

impl ElementPatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn geometry(position: Point, size: Size) -> Self {
        Self {
            position: Some(position),
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn layer(layer: i32) -> Self {
        Self {
            layer: Some(layer),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.size.is_none()
            && self.rotation_degrees.is_none()
            && self.layer.is_none()
            && self.name.is_none()
            && self.properties.is_none()
    }

    /// Apply the patch to an element. Last write wins per field.
    pub fn apply(&self, element: &mut Element) {
        if let Some(position) = self.position {
            element.position = position;
        }
        if let Some(size) = self.size {
            element.size = size;
        }
        if let Some(rotation) = self.rotation_degrees {
            element.set_rotation(rotation);
        }
        if let Some(layer) = self.layer {
            element.layer = layer;
        }
        if let Some(name) = &self.name {
            element.name = name.clone();
        }
        if let Some(properties) = &self.properties {
            element.properties = properties.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_defaults() {
        let draft = ElementDraft::for_kind(ElementKind::Text);
        assert_eq!(draft.position, Point::new(50.0, 50.0));
        assert_eq!(draft.size, Size::new(150.0, 50.0));
        assert_eq!(draft.layer, 0);
        match &draft.properties {
            ElementProperties::Text(text) => assert_eq!(text.content, "Sample Text"),
            other => panic!("expected text properties, got {other:?}"),
        }
    }

    #[test]
    fn test_hit_test() {
        let element = ElementDraft::for_kind(ElementKind::Shape).into_element(Uuid::new_v4());
        // Shape default: 100x80 at (80,80)
        assert!(element.hit_test(Point::new(100.0, 100.0), 0.0));
        assert!(!element.hit_test(Point::new(300.0, 100.0), 0.0));
        assert!(element.hit_test(Point::new(185.0, 100.0), 10.0));
    }

    #[test]
    fn test_rotation_wraps() {
        let mut element = ElementDraft::for_kind(ElementKind::Text).into_element(Uuid::new_v4());
        element.set_rotation(370.0);
        assert!((element.rotation_degrees - 10.0).abs() < f64::EPSILON);
        element.set_rotation(-45.0);
        assert!((element.rotation_degrees - 315.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_patch_apply_last_write_wins() {
        let mut element = ElementDraft::for_kind(ElementKind::Text).into_element(Uuid::new_v4());
        ElementPatch::position(Point::new(10.0, 10.0)).apply(&mut element);
        ElementPatch::position(Point::new(30.0, 40.0)).apply(&mut element);
        assert_eq!(element.position, Point::new(30.0, 40.0));
        // Untouched fields survive
        assert_eq!(element.size, Size::new(150.0, 50.0));
    }

    #[test]
    fn test_properties_serde_tag() {
        let draft = ElementDraft::for_kind(ElementKind::Barcode);
        let json = serde_json::to_string(&draft).unwrap();
        assert!(json.contains("\"type\":\"barcode\""));
        let back: ElementDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back.properties.kind(), ElementKind::Barcode);
    }
}
