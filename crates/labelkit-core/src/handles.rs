//! Resize handle definitions and resize math.

use crate::elements::MIN_ELEMENT_SIZE;
use kurbo::{Point, Rect, Size, Vec2};

/// Handle size in screen pixels (for rendering).
pub const HANDLE_SIZE: f64 = 8.0;
/// Handle hit tolerance in screen pixels.
pub const HANDLE_HIT_TOLERANCE: f64 = 12.0;

/// The eight compass handles around a selected element's bounds.
/// Edge handles affect one axis, corner handles affect both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
}

impl HandleKind {
    /// Handles on the west side resize the left edge and anchor the right.
    pub fn is_west(&self) -> bool {
        matches!(self, HandleKind::TopLeft | HandleKind::Left | HandleKind::BottomLeft)
    }

    pub fn is_east(&self) -> bool {
        matches!(self, HandleKind::TopRight | HandleKind::Right | HandleKind::BottomRight)
    }

    pub fn is_north(&self) -> bool {
        matches!(self, HandleKind::TopLeft | HandleKind::Top | HandleKind::TopRight)
    }

    pub fn is_south(&self) -> bool {
        matches!(self, HandleKind::BottomLeft | HandleKind::Bottom | HandleKind::BottomRight)
    }

    /// CSS-style cursor name for chrome to show while hovering.
    pub fn cursor_name(&self) -> &'static str {
        match self {
            HandleKind::TopLeft | HandleKind::BottomRight => "nwse-resize",
            HandleKind::TopRight | HandleKind::BottomLeft => "nesw-resize",
            HandleKind::Top | HandleKind::Bottom => "ns-resize",
            HandleKind::Left | HandleKind::Right => "ew-resize",
        }
    }
}

/// A resize handle with its position in document coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Handle {
    pub kind: HandleKind,
    pub position: Point,
}

/// The eight handles for a bounding rectangle.
pub fn handles_for(bounds: Rect) -> Vec<Handle> {
    let cx = (bounds.x0 + bounds.x1) / 2.0;
    let cy = (bounds.y0 + bounds.y1) / 2.0;
    vec![
        Handle { kind: HandleKind::TopLeft, position: Point::new(bounds.x0, bounds.y0) },
        Handle { kind: HandleKind::Top, position: Point::new(cx, bounds.y0) },
        Handle { kind: HandleKind::TopRight, position: Point::new(bounds.x1, bounds.y0) },
        Handle { kind: HandleKind::Right, position: Point::new(bounds.x1, cy) },
        Handle { kind: HandleKind::BottomRight, position: Point::new(bounds.x1, bounds.y1) },
        Handle { kind: HandleKind::Bottom, position: Point::new(cx, bounds.y1) },
        Handle { kind: HandleKind::BottomLeft, position: Point::new(bounds.x0, bounds.y1) },
        Handle { kind: HandleKind::Left, position: Point::new(bounds.x0, cy) },
    ]
}

/// Find which handle (if any) is hit at a document-space point.
/// `tolerance` should be pre-divided by the camera scale so handles feel
/// the same size at every zoom level.
pub fn hit_test_handles(bounds: Rect, point: Point, tolerance: f64) -> Option<HandleKind> {
    for handle in handles_for(bounds) {
        let dx = point.x - handle.position.x;
        let dy = point.y - handle.position.y;
        if dx * dx + dy * dy <= tolerance * tolerance {
            return Some(handle.kind);
        }
    }
    None
}

/// Compute new geometry for a resize from the gesture origin.
///
/// `delta` is the unscaled pointer delta in document pixels. Each axis is
/// floored at [`MIN_ELEMENT_SIZE`]; once floored, further shrinking is
/// absorbed without moving the anchored edge. West/north handles shift
/// the position so the opposite edge stays fixed.
pub fn resize_bounds(
    origin_position: Point,
    origin_size: Size,
    handle: HandleKind,
    delta: Vec2,
) -> (Point, Size) {
    let mut x = origin_position.x;
    let mut y = origin_position.y;
    let mut width = origin_size.width;
    let mut height = origin_size.height;

    if handle.is_east() {
        width = (origin_size.width + delta.x).max(MIN_ELEMENT_SIZE);
    } else if handle.is_west() {
        width = (origin_size.width - delta.x).max(MIN_ELEMENT_SIZE);
        x = origin_position.x + origin_size.width - width;
    }

    if handle.is_south() {
        height = (origin_size.height + delta.y).max(MIN_ELEMENT_SIZE);
    } else if handle.is_north() {
        height = (origin_size.height - delta.y).max(MIN_ELEMENT_SIZE);
        y = origin_position.y + origin_size.height - height;
    }

    (Point::new(x, y), Size::new(width, height))
}
