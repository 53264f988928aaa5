//! Viewport and coordinate transformation for canvas rendering.
//!
//! Handles conversion between viewport coordinates (pixels on the drawing
//! surface) and document coordinates. Both spaces have their origin at the
//! top-left with +Y pointing down; the viewport only adds zoom and pan.

use nalgebra::Matrix3;
use polyround_core::config::zoom_in_range;

use crate::model::Point;

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
}

impl Viewport {
    /// Creates a new viewport at 1:1 zoom with no pan.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn from_settings(settings: &polyround_core::CanvasSettings) -> Self {
        let mut viewport = Self::new(settings.width, settings.height);
        viewport.set_zoom(settings.zoom);
        viewport.set_pan(settings.pan_x, settings.pan_y);
        viewport
    }

    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level. Values outside the supported range are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom_in_range(zoom) {
            self.zoom = zoom;
        }
    }

    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    /// Document-to-viewport matrix.
    ///
    /// ```text
    /// pixel_x = doc_x * zoom + pan_x
    /// pixel_y = doc_y * zoom + pan_y
    /// ```
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::new(
            self.zoom, 0.0, self.pan_x, //
            0.0, self.zoom, self.pan_y, //
            0.0, 0.0, 1.0,
        )
    }

    /// Converts viewport (pixel) coordinates to document coordinates.
    pub fn to_document(&self, pixel: Point) -> Point {
        Point::new(
            (pixel.x - self.pan_x) / self.zoom,
            (pixel.y - self.pan_y) / self.zoom,
        )
    }

    /// Converts document coordinates to viewport (pixel) coordinates.
    pub fn to_viewport(&self, doc: Point) -> Point {
        Point::new(doc.x * self.zoom + self.pan_x, doc.y * self.zoom + self.pan_y)
    }

    /// Zooms to a point, maintaining that point's screen position.
    pub fn zoom_to_point(&mut self, doc_point: &Point, new_zoom: f64) {
        if !zoom_in_range(new_zoom) {
            return;
        }

        let pixel = self.to_viewport(*doc_point);
        self.zoom = new_zoom;
        self.pan_x = pixel.x - doc_point.x * new_zoom;
        self.pan_y = pixel.y - doc_point.y * new_zoom;
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(600.0, 600.0)
    }
}
