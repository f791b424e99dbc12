//! Overlay rendering: fine grid, rulers, margins and the multi-label
//! repeat grid.
//!
//! `render` is a pure function from view parameters and grid settings to
//! drawable primitives. Overlay primitives are visual only and are never
//! part of pointer hit-testing.

use crate::camera::Camera;
use crate::document::{GridSettings, LabelLayout};
use crate::elements::SerializableColor;
use kurbo::{Point, Rect, Size};

/// Inset of the label repeat grid from the document edges, as a fraction
/// of the document dimensions.
pub const LABEL_GRID_INSET_FRACTION: f64 = 0.05;

/// Margin guide inset from each document edge, in document pixels.
pub const MARGIN_INSET: f64 = 10.0;

/// Every n-th ruler tick is a major tick.
pub const RULER_MAJOR_EVERY: u32 = 5;

const GRID_COLOR: SerializableColor = SerializableColor { r: 220, g: 220, b: 220, a: 255 };
const MARGIN_COLOR: SerializableColor = SerializableColor { r: 244, g: 138, b: 66, a: 255 };
const ACTIVE_CELL_COLOR: SerializableColor = SerializableColor { r: 66, g: 133, b: 244, a: 255 };
const COPY_CELL_COLOR: SerializableColor = SerializableColor { r: 160, g: 160, b: 160, a: 255 };

/// Per-layer visibility switches, part of the transient view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayToggles {
    pub show_grid: bool,
    pub show_rulers: bool,
    pub show_margins: bool,
    pub show_snaplines: bool,
    pub show_label_grid: bool,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_rulers: true,
            show_margins: false,
            show_snaplines: true,
            show_label_grid: true,
        }
    }
}

/// Overlay layer kind, used by toggle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    Grid,
    Rulers,
    Margins,
    Snaplines,
    LabelGrid,
}

impl OverlayToggles {
    pub fn toggle(&mut self, kind: OverlayKind) {
        match kind {
            OverlayKind::Grid => self.show_grid = !self.show_grid,
            OverlayKind::Rulers => self.show_rulers = !self.show_rulers,
            OverlayKind::Margins => self.show_margins = !self.show_margins,
            OverlayKind::Snaplines => self.show_snaplines = !self.show_snaplines,
            OverlayKind::LabelGrid => self.show_label_grid = !self.show_label_grid,
        }
    }
}

/// Ruler axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Drawable overlay primitive in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Line {
        from: Point,
        to: Point,
        color: SerializableColor,
        width: f64,
    },
    Rect {
        rect: Rect,
        stroke: SerializableColor,
        stroke_width: f64,
        fill: Option<SerializableColor>,
        corner_radius: f64,
    },
    /// "Copy" marker at the center of an inert repeat-grid cell.
    CopyLabel { at: Point },
    RulerTick {
        at: Point,
        axis: Axis,
        major: bool,
    },
}

/// Render the overlay layers for the current view. Layers are emitted in
/// a fixed compositing order: grid, rulers, margins, label grid.
pub fn render(
    camera: &Camera,
    toggles: &OverlayToggles,
    grid: &GridSettings,
    doc_size: Size,
) -> Vec<DrawPrimitive> {
    let mut primitives = Vec::new();

    if toggles.show_grid {
        render_fine_grid(camera, grid.grid_size, doc_size, &mut primitives);
    }
    if toggles.show_rulers {
        render_rulers(camera, grid.grid_size, doc_size, &mut primitives);
    }
    if toggles.show_margins {
        render_margins(camera, doc_size, &mut primitives);
    }
    if toggles.show_label_grid && grid.label_layout == LabelLayout::Grid {
        render_label_grid(camera, grid, doc_size, &mut primitives);
    }

    primitives
}

fn render_fine_grid(
    camera: &Camera,
    grid_size: f64,
    doc_size: Size,
    out: &mut Vec<DrawPrimitive>,
) {
    if grid_size <= 0.0 {
        return;
    }

    let mut x = 0.0;
    while x <= doc_size.width {
        out.push(DrawPrimitive::Line {
            from: camera.to_screen(Point::new(x, 0.0)),
            to: camera.to_screen(Point::new(x, doc_size.height)),
            color: GRID_COLOR,
            width: 1.0,
        });
        x += grid_size;
    }

    let mut y = 0.0;
    while y <= doc_size.height {
        out.push(DrawPrimitive::Line {
            from: camera.to_screen(Point::new(0.0, y)),
            to: camera.to_screen(Point::new(doc_size.width, y)),
            color: GRID_COLOR,
            width: 1.0,
        });
        y += grid_size;
    }
}

fn render_rulers(camera: &Camera, grid_size: f64, doc_size: Size, out: &mut Vec<DrawPrimitive>) {
    if grid_size <= 0.0 {
        return;
    }

    let mut index = 0u32;
    let mut x = 0.0;
    while x <= doc_size.width {
        out.push(DrawPrimitive::RulerTick {
            at: camera.to_screen(Point::new(x, 0.0)),
            axis: Axis::Horizontal,
            major: index % RULER_MAJOR_EVERY == 0,
        });
        index += 1;
        x += grid_size;
    }

    let mut index = 0u32;
    let mut y = 0.0;
    while y <= doc_size.height {
        out.push(DrawPrimitive::RulerTick {
            at: camera.to_screen(Point::new(0.0, y)),
            axis: Axis::Vertical,
            major: index % RULER_MAJOR_EVERY == 0,
        });
        index += 1;
        y += grid_size;
    }
}

fn render_margins(camera: &Camera, doc_size: Size, out: &mut Vec<DrawPrimitive>) {
    let inset = Rect::new(
        MARGIN_INSET,
        MARGIN_INSET,
        doc_size.width - MARGIN_INSET,
        doc_size.height - MARGIN_INSET,
    );
    if inset.width() <= 0.0 || inset.height() <= 0.0 {
        return;
    }
    let top_left = camera.to_screen(Point::new(inset.x0, inset.y0));
    let bottom_right = camera.to_screen(Point::new(inset.x1, inset.y1));
    out.push(DrawPrimitive::Rect {
        rect: Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y),
        stroke: MARGIN_COLOR,
        stroke_width: 1.0,
        fill: None,
        corner_radius: 0.0,
    });
}

fn render_label_grid(
    camera: &Camera,
    grid: &GridSettings,
    doc_size: Size,
    out: &mut Vec<DrawPrimitive>,
) {
    let origin = Point::new(
        doc_size.width * LABEL_GRID_INSET_FRACTION,
        doc_size.height * LABEL_GRID_INSET_FRACTION,
    );

    for row in 0..grid.rows {
        for col in 0..grid.columns {
            let x = origin.x + col as f64 * (grid.label_width + grid.horizontal_gap);
            let y = origin.y + row as f64 * (grid.label_height + grid.vertical_gap);
            let top_left = camera.to_screen(Point::new(x, y));
            let bottom_right =
                camera.to_screen(Point::new(x + grid.label_width, y + grid.label_height));
            let cell = Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y);

            let active = row == 0 && col == 0;
            out.push(DrawPrimitive::Rect {
                rect: cell,
                stroke: if active { ACTIVE_CELL_COLOR } else { COPY_CELL_COLOR },
                stroke_width: if active { 2.0 } else { 1.0 },
                fill: None,
                corner_radius: grid.corner_radius * camera.scale(),
            });
            if !active {
                out.push(DrawPrimitive::CopyLabel {
                    at: cell.center(),
                });
            }
        }
    }
}
