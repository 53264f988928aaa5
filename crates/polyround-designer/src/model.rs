//! Value types shared by the geometry engine, the handles and the canvas.

use nalgebra::{Matrix3, Point2};
use polyround_core::GeometryError;
use serde::{Deserialize, Serialize};

/// Distance kept between the effective corner radius and half an edge, so
/// neighbouring corner cuts never meet.
pub const EDGE_EPSILON: f64 = 1e-6;

/// Gap kept below `size / 2` when a corner radius drag is clamped.
pub const RADIUS_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Point at fraction `t` of the way from `self` to `other`.
    pub fn lerp(&self, other: &Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

impl From<Point2<f64>> for Point {
    fn from(p: Point2<f64>) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Point> for Point2<f64> {
    fn from(p: Point) -> Self {
        Point2::new(p.x, p.y)
    }
}

/// The two continuous parameters of a rounded regular polygon, plus the
/// fixed size of the square it is inscribed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    pub size: f64,
    pub num_verts: u32,
    pub corner_radius: f64,
}

impl ShapeParams {
    /// Creates validated parameters.
    ///
    /// `corner_radius` must lie in `[0, size / 2)`. It may still exceed half
    /// an edge for the given vertex count; the outline clamps that at build
    /// time (see [`ShapeParams::effective_radius`]).
    pub fn new(
        size: f64,
        num_verts: u32,
        corner_radius: f64,
        max_num_verts: u32,
    ) -> Result<Self, GeometryError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(GeometryError::InvalidSize { size });
        }
        if num_verts < 3 {
            return Err(GeometryError::TooFewVertices { num_verts });
        }
        if num_verts > max_num_verts {
            return Err(GeometryError::TooManyVertices {
                num_verts,
                max_num_verts,
            });
        }
        if !(corner_radius >= 0.0) {
            return Err(GeometryError::NegativeRadius {
                radius: corner_radius,
            });
        }
        if corner_radius >= size / 2.0 {
            return Err(GeometryError::RadiusTooLarge {
                radius: corner_radius,
                limit: size / 2.0,
            });
        }

        Ok(Self {
            size,
            num_verts,
            corner_radius,
        })
    }

    /// Length of every edge of the regular polygon.
    pub fn edge_length(&self) -> f64 {
        edge_length(self.num_verts, self.size)
    }

    /// Corner radius actually used to cut the corners.
    pub fn effective_radius(&self) -> f64 {
        effective_radius(self.num_verts, self.corner_radius, self.size)
    }

    pub fn with_num_verts(self, num_verts: u32) -> Self {
        Self { num_verts, ..self }
    }

    pub fn with_corner_radius(self, corner_radius: f64) -> Self {
        Self {
            corner_radius,
            ..self
        }
    }
}

pub(crate) fn edge_length(num_verts: u32, size: f64) -> f64 {
    2.0 * (size / 2.0) * (std::f64::consts::PI / num_verts as f64).sin()
}

pub(crate) fn effective_radius(num_verts: u32, corner_radius: f64, size: f64) -> f64 {
    let ceiling = (edge_length(num_verts, size) / 2.0 - EDGE_EPSILON).max(0.0);
    corner_radius.min(ceiling)
}

/// Placement of the shape's local frame in document space.
///
/// The local frame is a square of side `size` centred on the origin.
/// `left`/`top` are always the top-left corner of the axis-aligned box the
/// shape occupies; a negative scale mirrors the shape about its own centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self::at(0.0, 0.0)
    }

    /// Unscaled placement with the top-left corner at `(left, top)`.
    pub fn at(left: f64, top: f64) -> Self {
        Self {
            left,
            top,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Document-space centre of the shape.
    pub fn center(&self, size: f64) -> Point {
        Point::new(
            self.left + size / 2.0 * self.scale_x.abs(),
            self.top + size / 2.0 * self.scale_y.abs(),
        )
    }

    /// Local-to-document matrix.
    pub fn matrix(&self, size: f64) -> Matrix3<f64> {
        let c = self.center(size);
        Matrix3::new(
            self.scale_x, 0.0, c.x, //
            0.0, self.scale_y, c.y, //
            0.0, 0.0, 1.0,
        )
    }

    pub fn to_document(&self, local: Point, size: f64) -> Point {
        self.matrix(size).transform_point(&local.into()).into()
    }

    /// Axis-aligned document-space box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self, size: f64) -> (f64, f64, f64, f64) {
        (
            self.left,
            self.top,
            self.left + size * self.scale_x.abs(),
            self.top + size * self.scale_y.abs(),
        )
    }

    pub fn is_mirrored(&self) -> bool {
        self.scale_x < 0.0 || self.scale_y < 0.0
    }
}

/// Style attributes carried alongside the geometry in every snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub stroke: String,
    pub stroke_width: f64,
    pub fill: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            stroke: "green".to_string(),
            stroke_width: 1.0,
            fill: String::new(),
        }
    }
}

impl From<&polyround_core::StyleSettings> for Style {
    fn from(s: &polyround_core::StyleSettings) -> Self {
        Self {
            stroke: s.stroke.clone(),
            stroke_width: s.stroke_width,
            fill: s.fill.clone(),
        }
    }
}
