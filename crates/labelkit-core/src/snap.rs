//! Snap functionality for aligning drag positions to the grid and to
//! other elements.

use kurbo::Point;

/// Distance threshold for element snapping, in document pixels.
pub const ELEMENT_SNAP_THRESHOLD: f64 = 6.0;

/// Snap mode for aligning elements while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    /// No snapping.
    #[default]
    None,
    /// Snap to grid intersections.
    Grid,
    /// Snap to other element corners/midpoints/centers.
    Elements,
    /// Snap to both, element targets winning within threshold.
    All,
}

impl SnapMode {
    pub fn snaps_to_grid(self) -> bool {
        matches!(self, SnapMode::Grid | SnapMode::All)
    }

    pub fn snaps_to_elements(self) -> bool {
        matches!(self, SnapMode::Elements | SnapMode::All)
    }

    pub fn is_enabled(self) -> bool {
        self != SnapMode::None
    }
}

/// Result of a snap operation.
#[derive(Debug, Clone, Copy)]
pub struct SnapResult {
    /// The snapped point.
    pub point: Point,
    pub snapped_x: bool,
    pub snapped_y: bool,
}

impl SnapResult {
    pub fn none(point: Point) -> Self {
        Self {
            point,
            snapped_x: false,
            snapped_y: false,
        }
    }

    pub fn is_snapped(&self) -> bool {
        self.snapped_x || self.snapped_y
    }
}

/// Snap a point to the nearest grid intersection.
pub fn snap_to_grid(point: Point, grid_size: f64) -> SnapResult {
    let snapped_x = (point.x / grid_size).round() * grid_size;
    let snapped_y = (point.y / grid_size).round() * grid_size;
    SnapResult {
        point: Point::new(snapped_x, snapped_y),
        snapped_x: true,
        snapped_y: true,
    }
}

/// A point on another element that can be snapped to.
#[derive(Debug, Clone, Copy)]
pub struct SnapTarget {
    pub point: Point,
    pub kind: SnapTargetKind,
}

/// Type of snap target, used for guide rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapTargetKind {
    Corner,
    Midpoint,
    Center,
}

/// Collect snap targets from an element's bounds: four corners, four
/// edge midpoints and the center.
pub fn targets_from_bounds(bounds: kurbo::Rect) -> Vec<SnapTarget> {
    let cx = (bounds.x0 + bounds.x1) / 2.0;
    let cy = (bounds.y0 + bounds.y1) / 2.0;
    vec![
        SnapTarget { point: Point::new(bounds.x0, bounds.y0), kind: SnapTargetKind::Corner },
        SnapTarget { point: Point::new(bounds.x1, bounds.y0), kind: SnapTargetKind::Corner },
        SnapTarget { point: Point::new(bounds.x1, bounds.y1), kind: SnapTargetKind::Corner },
        SnapTarget { point: Point::new(bounds.x0, bounds.y1), kind: SnapTargetKind::Corner },
        SnapTarget { point: Point::new(cx, bounds.y0), kind: SnapTargetKind::Midpoint },
        SnapTarget { point: Point::new(bounds.x1, cy), kind: SnapTargetKind::Midpoint },
        SnapTarget { point: Point::new(cx, bounds.y1), kind: SnapTargetKind::Midpoint },
        SnapTarget { point: Point::new(bounds.x0, cy), kind: SnapTargetKind::Midpoint },
        SnapTarget { point: Point::new(cx, cy), kind: SnapTargetKind::Center },
    ]
}

/// Snap a point to the nearest target within `threshold`.
pub fn snap_to_targets(point: Point, targets: &[SnapTarget], threshold: f64) -> SnapResult {
    let mut best: Option<&SnapTarget> = None;
    let mut best_dist_sq = threshold * threshold;

    for target in targets {
        let dx = point.x - target.point.x;
        let dy = point.y - target.point.y;
        let dist_sq = dx * dx + dy * dy;
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            best = Some(target);
        }
    }

    match best {
        Some(target) => SnapResult {
            point: target.point,
            snapped_x: true,
            snapped_y: true,
        },
        None => SnapResult::none(point),
    }
}

/// Snap a point based on the current mode. Element targets take priority
/// over the grid when both are enabled.
pub fn snap_point_with_targets(
    point: Point,
    mode: SnapMode,
    grid_size: f64,
    targets: &[SnapTarget],
) -> SnapResult {
    match mode {
        SnapMode::None => SnapResult::none(point),
        SnapMode::Grid => snap_to_grid(point, grid_size),
        SnapMode::Elements => snap_to_targets(point, targets, ELEMENT_SNAP_THRESHOLD),
        SnapMode::All => {
            let element_result = snap_to_targets(point, targets, ELEMENT_SNAP_THRESHOLD);
            if element_result.is_snapped() {
                element_result
            } else {
                snap_to_grid(point, grid_size)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn test_snap_to_grid() {
        let result = snap_to_grid(Point::new(23.0, 47.0), 20.0);
        assert_eq!(result.point, Point::new(20.0, 40.0));
        assert!(result.is_snapped());
    }

    #[test]
    fn test_snap_to_grid_round_up() {
        let result = snap_to_grid(Point::new(31.0, 51.0), 20.0);
        assert_eq!(result.point, Point::new(40.0, 60.0));
    }

    #[test]
    fn test_targets_from_bounds() {
        let targets = targets_from_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(targets.len(), 9);
        assert!(targets.iter().any(|t| t.kind == SnapTargetKind::Center
            && t.point == Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_element_targets_beat_grid() {
        let targets = targets_from_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        // Near the (100,100) corner but off-grid
        let result =
            snap_point_with_targets(Point::new(103.0, 98.0), SnapMode::All, 20.0, &targets);
        assert_eq!(result.point, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_mode_none_passthrough() {
        let result = snap_point_with_targets(Point::new(13.0, 7.0), SnapMode::None, 20.0, &[]);
        assert!(!result.is_snapped());
        assert_eq!(result.point, Point::new(13.0, 7.0));
    }
}
