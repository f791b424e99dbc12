//! Camera module for the document/screen coordinate transform.

use kurbo::{Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom bounds for interactive (wheel) zoom, in percent.
pub const WHEEL_ZOOM_MIN: f64 = 25.0;
pub const WHEEL_ZOOM_MAX: f64 = 500.0;

/// Zoom bounds for discrete presets (toolbar buttons), in percent.
pub const PRESET_ZOOM_MIN: f64 = 10.0;
pub const PRESET_ZOOM_MAX: f64 = 500.0;

/// Step applied by one wheel notch while the zoom modifier is held.
pub const WHEEL_ZOOM_STEP: f64 = 10.0;

/// Margin kept around the document when fitting it to the viewport.
pub const FIT_MARGIN: f64 = 40.0;

/// Padding added around the element bounding box for "zoom to objects".
pub const OBJECT_FIT_PADDING: f64 = 20.0;

/// Camera manages the view transform for the canvas.
///
/// It converts between document coordinates (fixed pixels matching the
/// physical label) and screen coordinates (document scaled by the zoom
/// percentage, then offset by the pan).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Zoom level in percent (100 = 1:1).
    pub zoom_percent: f64,
    /// Current translation offset (pan) in screen pixels.
    pub pan: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            zoom_percent: 100.0,
            pan: Vec2::ZERO,
        }
    }
}

impl Camera {
    /// Create a new camera at 100% zoom with no pan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Document-to-screen scale factor.
    pub fn scale(&self) -> f64 {
        self.zoom_percent / 100.0
    }

    /// Convert a document point to screen coordinates.
    pub fn to_screen(&self, doc_point: Point) -> Point {
        let s = self.scale();
        Point::new(doc_point.x * s + self.pan.x, doc_point.y * s + self.pan.y)
    }

    /// Convert a screen point to document coordinates.
    pub fn to_document(&self, screen_point: Point) -> Point {
        let s = self.scale();
        Point::new(
            (screen_point.x - self.pan.x) / s,
            (screen_point.y - self.pan.y) / s,
        )
    }

    /// Unscale a screen-space delta into document space.
    ///
    /// All drag/resize math runs on unscaled deltas so gestures feel the
    /// same at every zoom level.
    pub fn unscale_delta(&self, delta: Vec2) -> Vec2 {
        delta * (100.0 / self.zoom_percent)
    }

    /// Clamp a zoom value to the interactive (wheel) range.
    pub fn clamp_wheel_zoom(value: f64) -> f64 {
        value.clamp(WHEEL_ZOOM_MIN, WHEEL_ZOOM_MAX)
    }

    /// Clamp a zoom value to the discrete preset range.
    pub fn clamp_preset_zoom(value: f64) -> f64 {
        value.clamp(PRESET_ZOOM_MIN, PRESET_ZOOM_MAX)
    }

    /// Apply one wheel zoom step. `direction` > 0 zooms in.
    ///
    /// The screen point under the cursor stays fixed so the canvas zooms
    /// around the pointer.
    pub fn wheel_zoom(&mut self, screen_point: Point, direction: f64) {
        let step = if direction > 0.0 {
            WHEEL_ZOOM_STEP
        } else {
            -WHEEL_ZOOM_STEP
        };
        let new_zoom = Self::clamp_wheel_zoom(self.zoom_percent + step);
        if (new_zoom - self.zoom_percent).abs() < f64::EPSILON {
            return;
        }

        let doc_point = self.to_document(screen_point);
        self.zoom_percent = new_zoom;

        // Adjust pan so doc_point stays at screen_point
        let new_screen = self.to_screen(doc_point);
        self.pan += Vec2::new(
            screen_point.x - new_screen.x,
            screen_point.y - new_screen.y,
        );
    }

    /// Set the zoom to a discrete preset value.
    pub fn set_preset_zoom(&mut self, percent: f64) {
        self.zoom_percent = Self::clamp_preset_zoom(percent);
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Fit the camera to show the given document-space bounds.
    ///
    /// Picks the largest zoom (within the preset range) at which `bounds`
    /// plus `margin` fits into `viewport`, then centers the bounds.
    pub fn fit_to_bounds(&mut self, viewport: Size, bounds: Rect, margin: f64) {
        if bounds.is_zero_area() {
            self.zoom_percent = 100.0;
            self.pan = Vec2::ZERO;
            return;
        }

        let padded = Size::new(
            (viewport.width - margin * 2.0).max(1.0),
            (viewport.height - margin * 2.0).max(1.0),
        );

        let scale_x = padded.width / bounds.width();
        let scale_y = padded.height / bounds.height();
        self.zoom_percent = Self::clamp_preset_zoom(scale_x.min(scale_y) * 100.0);

        let s = self.scale();
        let bounds_center = bounds.center();
        let viewport_center = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.pan = Vec2::new(
            viewport_center.x - bounds_center.x * s,
            viewport_center.y - bounds_center.y * s,
        );
    }

    /// Fit the full document into the viewport ("zoom to document").
    pub fn zoom_to_document(&mut self, viewport: Size, doc_size: Size) {
        let bounds = Rect::from_origin_size(Point::ZERO, doc_size);
        self.fit_to_bounds(viewport, bounds, FIT_MARGIN);
    }

    /// Fit the combined element bounds into the viewport ("zoom to
    /// objects"). Falls back to the document when `content` is None.
    pub fn zoom_to_objects(&mut self, viewport: Size, content: Option<Rect>, doc_size: Size) {
        match content {
            Some(bounds) => self.fit_to_bounds(
                viewport,
                bounds.inflate(OBJECT_FIT_PADDING, OBJECT_FIT_PADDING),
                FIT_MARGIN,
            ),
            None => self.zoom_to_document(viewport, doc_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = Camera::new();
        assert_eq!(camera.pan, Vec2::ZERO);
        assert!((camera.zoom_percent - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_document_with_pan() {
        let mut camera = Camera::new();
        camera.pan = Vec2::new(50.0, 100.0);
        let doc = camera.to_document(Point::new(100.0, 200.0));
        assert!((doc.x - 50.0).abs() < f64::EPSILON);
        assert!((doc.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_document_with_zoom() {
        let mut camera = Camera::new();
        camera.zoom_percent = 200.0;
        let doc = camera.to_document(Point::new(100.0, 200.0));
        assert!((doc.x - 50.0).abs() < f64::EPSILON);
        assert!((doc.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        for zoom in [10.0, 25.0, 100.0, 137.0, 500.0] {
            let mut camera = Camera::new();
            camera.zoom_percent = zoom;
            camera.pan = Vec2::new(30.0, -20.0);

            let original = Point::new(123.0, 456.0);
            let doc = camera.to_document(original);
            let back = camera.to_screen(doc);

            assert!((back.x - original.x).abs() < 1e-9);
            assert!((back.y - original.y).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unscale_delta() {
        let mut camera = Camera::new();
        camera.zoom_percent = 200.0;
        let delta = camera.unscale_delta(Vec2::new(20.0, 20.0));
        assert!((delta.x - 10.0).abs() < f64::EPSILON);
        assert!((delta.y - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zoom_clamp() {
        let mut camera = Camera::new();
        for _ in 0..100 {
            camera.wheel_zoom(Point::ZERO, 1.0);
        }
        assert!((camera.zoom_percent - WHEEL_ZOOM_MAX).abs() < f64::EPSILON);

        for _ in 0..100 {
            camera.wheel_zoom(Point::ZERO, -1.0);
        }
        assert!((camera.zoom_percent - WHEEL_ZOOM_MIN).abs() < f64::EPSILON);
    }

    #[test]
    fn test_preset_zoom_clamp() {
        let mut camera = Camera::new();
        camera.set_preset_zoom(5.0);
        assert!((camera.zoom_percent - PRESET_ZOOM_MIN).abs() < f64::EPSILON);
        camera.set_preset_zoom(900.0);
        assert!((camera.zoom_percent - PRESET_ZOOM_MAX).abs() < f64::EPSILON);
    }

    #[test]
    fn test_wheel_zoom_keeps_cursor_fixed() {
        let mut camera = Camera::new();
        camera.pan = Vec2::new(12.0, 34.0);
        let cursor = Point::new(300.0, 200.0);
        let doc_before = camera.to_document(cursor);
        camera.wheel_zoom(cursor, 1.0);
        let doc_after = camera.to_document(cursor);
        assert!((doc_before.x - doc_after.x).abs() < 1e-9);
        assert!((doc_before.y - doc_after.y).abs() < 1e-9);
    }

    #[test]
    fn test_fit_to_bounds_centers_document() {
        let mut camera = Camera::new();
        camera.zoom_to_document(Size::new(800.0, 600.0), Size::new(300.0, 500.0));

        // Height-limited: (600 - 2*40) / 500 = 1.04
        assert!((camera.zoom_percent - 104.0).abs() < 1e-9);

        // Document center lands on the viewport center
        let center = camera.to_screen(Point::new(150.0, 250.0));
        assert!((center.x - 400.0).abs() < 1e-9);
        assert!((center.y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_to_objects_falls_back_to_document() {
        let mut a = Camera::new();
        let mut b = Camera::new();
        let viewport = Size::new(800.0, 600.0);
        let doc = Size::new(400.0, 300.0);
        a.zoom_to_objects(viewport, None, doc);
        b.zoom_to_document(viewport, doc);
        assert!((a.zoom_percent - b.zoom_percent).abs() < 1e-9);
    }
}
