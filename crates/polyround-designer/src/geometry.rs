//! Outline construction for rounded regular polygons.
//!
//! The outline is derived from `(num_verts, corner_radius, size)` alone and
//! is expressed in the shape's local frame: origin at the centre, +Y down,
//! first vertex straight up. Placement in the document is applied separately
//! through [`crate::model::Transform`].

use std::f64::consts::PI;
use std::fmt::Write as _;

use lyon::math::point;
use lyon::path::Path;

use crate::model::{self, Point, ShapeParams};

/// One command of an outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic corner whose control point is the raw polygon vertex.
    CornerTo { ctrl: Point, to: Point },
    Close,
}

/// A polygon vertex together with the two points where its rounded corner
/// meets the adjacent edges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub vertex: Point,
    /// Cut point on the edge arriving at `vertex`.
    pub incoming: Point,
    /// Cut point on the edge leaving `vertex`.
    pub outgoing: Point,
}

/// Closed vector outline of a rounded regular polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    num_verts: u32,
    radius: f64,
    corners: Vec<Corner>,
    segments: Vec<PathSegment>,
}

/// Vertices of a regular polygon inscribed in a circle of diameter `size`,
/// starting straight up and going clockwise on screen.
pub fn vertices(num_verts: u32, size: f64) -> Vec<Point> {
    let r = size / 2.0;
    let step = 2.0 * PI / num_verts as f64;
    (0..num_verts)
        .map(|i| {
            let angle = step * i as f64 - PI / 2.0;
            Point::new(r * angle.cos(), r * angle.sin())
        })
        .collect()
}

/// Builds the outline for the given parameters.
///
/// The corner radius is clamped to just under half an edge, so any
/// non-negative radius yields a simple closed curve. A zero radius produces
/// a plain polygon without curve commands.
///
/// # Panics
///
/// Panics if `num_verts < 3` or `corner_radius` is negative or NaN.
pub fn build_outline(num_verts: u32, corner_radius: f64, size: f64) -> Outline {
    assert!(num_verts >= 3, "polygon needs at least 3 vertices, got {num_verts}");
    assert!(
        corner_radius >= 0.0,
        "corner radius must be non-negative, got {corner_radius}"
    );

    let radius = model::effective_radius(num_verts, corner_radius, size);
    let verts = vertices(num_verts, size);
    let edge = model::edge_length(num_verts, size);
    let n = verts.len();
    let t = if edge > 0.0 { radius / edge } else { 0.0 };

    let corners: Vec<Corner> = (0..n)
        .map(|i| {
            let vertex = verts[i];
            let prev = verts[(i + n - 1) % n];
            let next = verts[(i + 1) % n];
            Corner {
                vertex,
                incoming: vertex.lerp(&prev, t),
                outgoing: vertex.lerp(&next, t),
            }
        })
        .collect();

    let mut segments = Vec::with_capacity(2 * n + 2);
    if radius > 0.0 {
        segments.push(PathSegment::MoveTo(corners[n - 1].outgoing));
        for c in &corners {
            segments.push(PathSegment::LineTo(c.incoming));
            segments.push(PathSegment::CornerTo {
                ctrl: c.vertex,
                to: c.outgoing,
            });
        }
    } else {
        segments.push(PathSegment::MoveTo(verts[0]));
        for v in &verts[1..] {
            segments.push(PathSegment::LineTo(*v));
        }
    }
    segments.push(PathSegment::Close);

    Outline {
        num_verts,
        radius,
        corners,
        segments,
    }
}

impl Outline {
    pub fn from_params(params: &ShapeParams) -> Self {
        build_outline(params.num_verts, params.corner_radius, params.size)
    }

    pub fn vertex_count(&self) -> u32 {
        self.num_verts
    }

    /// Corner radius after clamping.
    pub fn effective_radius(&self) -> f64 {
        self.radius
    }

    pub fn corners(&self) -> &[Corner] {
        &self.corners
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn curve_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::CornerTo { .. }))
            .count()
    }

    /// End points of every drawing command, in path order.
    pub fn on_curve_points(&self) -> Vec<Point> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => Some(*p),
                PathSegment::CornerTo { to, .. } => Some(*to),
                PathSegment::Close => None,
            })
            .collect()
    }

    /// SVG path data (`M`, `L`, `Q`, `Z`).
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        for seg in &self.segments {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing into a String cannot fail.
            let _ = match seg {
                PathSegment::MoveTo(p) => write!(d, "M{},{}", p.x, p.y),
                PathSegment::LineTo(p) => write!(d, "L{},{}", p.x, p.y),
                PathSegment::CornerTo { ctrl, to } => {
                    write!(d, "Q{},{} {},{}", ctrl.x, ctrl.y, to.x, to.y)
                }
                PathSegment::Close => write!(d, "Z"),
            };
        }
        d
    }

    /// Local-frame path for rendering.
    pub fn to_path(&self) -> Path {
        let mut builder = Path::builder();
        for seg in &self.segments {
            match seg {
                PathSegment::MoveTo(p) => {
                    builder.begin(point(p.x as f32, p.y as f32));
                }
                PathSegment::LineTo(p) => {
                    builder.line_to(point(p.x as f32, p.y as f32));
                }
                PathSegment::CornerTo { ctrl, to } => {
                    builder.quadratic_bezier_to(
                        point(ctrl.x as f32, ctrl.y as f32),
                        point(to.x as f32, to.y as f32),
                    );
                }
                PathSegment::Close => builder.close(),
            }
        }
        builder.build()
    }

    /// Tight local-frame bounds as `(min_x, min_y, max_x, max_y)`.
    pub fn bounding_box(&self) -> (f64, f64, f64, f64) {
        let path = self.to_path();
        let bb = lyon::algorithms::aabb::bounding_box(path.iter());
        (
            bb.min.x as f64,
            bb.min.y as f64,
            bb.max.x as f64,
            bb.max.y as f64,
        )
    }
}
