//! Canvas document: the working set for one template.

use crate::elements::{Element, ElementId};
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Layout of the physical medium: one label, or a multi-up repeat grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelLayout {
    #[default]
    Single,
    Grid,
}

/// Grid and multi-label layout settings, persisted with the template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridSettings {
    /// Fine grid pitch in document pixels.
    pub grid_size: f64,
    pub label_layout: LabelLayout,
    /// Repeat grid dimensions (only meaningful for `LabelLayout::Grid`).
    pub columns: u32,
    pub rows: u32,
    /// Size of one label cell in document pixels.
    pub label_width: f64,
    pub label_height: f64,
    /// Gaps between cells in document pixels.
    pub horizontal_gap: f64,
    pub vertical_gap: f64,
    /// Corner radius of each cell outline.
    pub corner_radius: f64,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            label_layout: LabelLayout::Single,
            columns: 1,
            rows: 1,
            label_width: 200.0,
            label_height: 100.0,
            horizontal_gap: 8.0,
            vertical_gap: 8.0,
            corner_radius: 4.0,
        }
    }
}

/// The document being edited: canvas dimensions, grid settings and the
/// placed elements. Created on template selection, mutated through the
/// element store, discarded on template deselection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CanvasDocument {
    /// Canvas dimensions in document pixels, matching the physical medium.
    pub size_px: Size,
    pub grid: GridSettings,
    /// Elements in insertion order. Paint order is derived, see
    /// [`CanvasDocument::painted`].
    pub elements: Vec<Element>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new(Size::new(400.0, 300.0))
    }
}

impl CanvasDocument {
    /// Create a new empty document for a medium of the given size.
    pub fn new(size_px: Size) -> Self {
        Self {
            size_px,
            grid: GridSettings::default(),
            elements: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Insert an element, keeping insertion order.
    pub fn insert(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Remove an element by id.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.id == id)?;
        Some(self.elements.remove(index))
    }

    /// Elements in paint order: ascending by layer, ties broken by
    /// insertion order.
    pub fn painted(&self) -> Vec<&Element> {
        let mut ordered: Vec<&Element> = self.elements.iter().collect();
        ordered.sort_by_key(|e| e.layer);
        ordered
    }

    /// Topmost element at a document-space point, respecting paint order.
    pub fn element_at_point(&self, point: Point, tolerance: f64) -> Option<ElementId> {
        self.painted()
            .into_iter()
            .rev()
            .find(|e| e.hit_test(point, tolerance))
            .map(|e| e.id)
    }

    /// Bounding box of all elements, or None for an empty document.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        for element in &self.elements {
            let bounds = element.bounds();
            result = Some(match result {
                Some(r) => r.union(bounds),
                None => bounds,
            });
        }
        result
    }
}
