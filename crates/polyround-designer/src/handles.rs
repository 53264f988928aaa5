//! Drag handles for the rounded polygon.
//!
//! Six handles are attached to the shape: four corner handles that resize
//! it while the opposite corner stays put, a corner-radius handle and a
//! vertex-count handle. Handles carry no state; each one maps a drag point
//! and the current shape to new parameters or a new placement.

use std::f64::consts::PI;
use std::fmt;

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

use crate::model::{Point, ShapeParams, Transform, RADIUS_EPSILON};

/// Horizontal distance from the centre below which a vertex-count drag is
/// treated as vertical.
pub const VERTICAL_SNAP_THRESHOLD: f64 = 1.0;

/// Smallest box extent a corner drag may produce on either axis.
pub const MIN_EXTENT: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    /// Drags the corner radius (`pn`).
    CornerRadius,
    /// Drags the vertex count (`pr`).
    VertexCount,
}

impl HandleKind {
    pub const ALL: [HandleKind; 6] = [
        HandleKind::TopLeft,
        HandleKind::TopRight,
        HandleKind::BottomLeft,
        HandleKind::BottomRight,
        HandleKind::CornerRadius,
        HandleKind::VertexCount,
    ];

    /// Short action name used by the drawing surface.
    pub fn code(&self) -> &'static str {
        match self {
            HandleKind::TopLeft => "tl",
            HandleKind::TopRight => "tr",
            HandleKind::BottomLeft => "bl",
            HandleKind::BottomRight => "br",
            HandleKind::CornerRadius => "pn",
            HandleKind::VertexCount => "pr",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.code() == code)
    }

    pub fn is_corner(&self) -> bool {
        self.corner_signs().is_some()
    }

    /// Sign of the handle's local x and y for corner handles.
    fn corner_signs(&self) -> Option<(f64, f64)> {
        match self {
            HandleKind::TopLeft => Some((-1.0, -1.0)),
            HandleKind::TopRight => Some((1.0, -1.0)),
            HandleKind::BottomLeft => Some((-1.0, 1.0)),
            HandleKind::BottomRight => Some((1.0, 1.0)),
            HandleKind::CornerRadius | HandleKind::VertexCount => None,
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Result of a handle drag. `None` fields are unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandleUpdate {
    pub params: Option<ShapeParams>,
    pub transform: Option<Transform>,
}

impl HandleUpdate {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_none() && self.transform.is_none()
    }
}

/// Position of a handle in the shape's local frame.
pub fn handle_local_position(kind: HandleKind, params: &ShapeParams) -> Point {
    let half = params.size / 2.0;
    if let Some((sx, sy)) = kind.corner_signs() {
        return Point::new(sx * half, sy * half);
    }
    match kind {
        HandleKind::CornerRadius => Point::new(0.0, -half + params.corner_radius),
        // The vertex after the apex, going clockwise.
        _ => {
            let angle = -PI / 2.0 + 2.0 * PI / params.num_verts as f64;
            Point::new(half * angle.cos(), half * angle.sin())
        }
    }
}

/// Position of a handle on the viewport.
///
/// `local_to_viewport` is the shape's local-to-document matrix composed with
/// the surface's document-to-viewport matrix.
pub fn handle_position(
    kind: HandleKind,
    params: &ShapeParams,
    local_to_viewport: &Matrix3<f64>,
) -> Point {
    let local = handle_local_position(kind, params);
    local_to_viewport.transform_point(&local.into()).into()
}

/// Maps handle drags to new shape parameters or placements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleController {
    max_num_verts: u32,
}

impl HandleController {
    pub fn new(max_num_verts: u32) -> Self {
        debug_assert!(max_num_verts >= 3, "max_num_verts must be >= 3");
        Self { max_num_verts }
    }

    pub fn max_num_verts(&self) -> u32 {
        self.max_num_verts
    }

    /// Computes the effect of dragging `kind` to `drag` (document space).
    pub fn compute_update(
        &self,
        kind: HandleKind,
        drag: Point,
        params: &ShapeParams,
        transform: &Transform,
    ) -> HandleUpdate {
        let update = match kind {
            HandleKind::CornerRadius => HandleUpdate {
                params: corner_radius_update(drag, params, transform),
                transform: None,
            },
            HandleKind::VertexCount => HandleUpdate {
                params: self.vertex_count_update(drag, params, transform),
                transform: None,
            },
            corner => HandleUpdate {
                params: None,
                transform: resize_update(corner, drag, params.size, transform),
            },
        };
        tracing::trace!(handle = %kind, ?drag, ?update, "handle update");
        update
    }

    /// Vertex count whose angular step best matches the drag direction.
    pub fn snap_vertex_count(&self, drag: Point, center: Point) -> u32 {
        let dx = drag.x - center.x;
        if dx.abs() < VERTICAL_SNAP_THRESHOLD {
            return self.max_num_verts;
        }

        let angle = PI / 2.0 + ((drag.y - center.y) / dx).atan();
        let mut best = 3;
        let mut best_delta = f64::INFINITY;
        for n in 3..self.max_num_verts {
            let delta = (2.0 * PI / n as f64 - angle).abs();
            if delta < best_delta {
                best_delta = delta;
                best = n;
            }
        }
        best
    }

    fn vertex_count_update(
        &self,
        drag: Point,
        params: &ShapeParams,
        transform: &Transform,
    ) -> Option<ShapeParams> {
        let center = transform.center(params.size);
        let num_verts = self.snap_vertex_count(drag, center);
        // The stored radius is kept as is; the outline clamps it.
        (num_verts != params.num_verts).then(|| params.with_num_verts(num_verts))
    }
}

/// Anchor-preserving resize from a corner handle.
fn resize_update(
    kind: HandleKind,
    drag: Point,
    size: f64,
    transform: &Transform,
) -> Option<Transform> {
    let (hx, hy) = kind.corner_signs()?;
    let anchor = transform.to_document(Point::new(-hx * size / 2.0, -hy * size / 2.0), size);

    let width = hx * (drag.x - anchor.x);
    let height = hy * (drag.y - anchor.y);
    if width.abs() < MIN_EXTENT || height.abs() < MIN_EXTENT {
        return None;
    }

    Some(Transform {
        left: anchor.x.min(drag.x),
        top: anchor.y.min(drag.y),
        scale_x: width / size,
        scale_y: height / size,
    })
}

fn corner_radius_update(
    drag: Point,
    params: &ShapeParams,
    transform: &Transform,
) -> Option<ShapeParams> {
    if transform.scale_y.abs() < MIN_EXTENT {
        return None;
    }

    // Inverse of the handle placement; for an unmirrored shape this is
    // (drag.y - top) / scale_y.
    let center = transform.center(params.size);
    let raw = (drag.y - center.y) / transform.scale_y + params.size / 2.0;
    let radius = raw.clamp(0.0, params.size / 2.0 - RADIUS_EPSILON);

    (radius != params.corner_radius).then(|| params.with_corner_radius(radius))
}

/// The handle definitions bound to a live shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleSet {
    kinds: Vec<HandleKind>,
}

impl HandleSet {
    /// All six handles.
    pub fn standard() -> Self {
        Self {
            kinds: HandleKind::ALL.to_vec(),
        }
    }

    pub fn kinds(&self) -> &[HandleKind] {
        &self.kinds
    }

    pub fn contains(&self, kind: HandleKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Viewport positions of every bound handle.
    pub fn positions(
        &self,
        params: &ShapeParams,
        local_to_viewport: &Matrix3<f64>,
    ) -> Vec<(HandleKind, Point)> {
        self.kinds
            .iter()
            .map(|k| (*k, handle_position(*k, params, local_to_viewport)))
            .collect()
    }

    /// The handle closest to `pointer` within `tolerance` viewport units.
    pub fn hit_test(
        &self,
        pointer: Point,
        params: &ShapeParams,
        local_to_viewport: &Matrix3<f64>,
        tolerance: f64,
    ) -> Option<HandleKind> {
        self.positions(params, local_to_viewport)
            .into_iter()
            .map(|(k, p)| (k, p.distance_to(&pointer)))
            .filter(|(_, d)| *d <= tolerance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(k, _)| k)
    }
}

impl Default for HandleSet {
    fn default() -> Self {
        Self::standard()
    }
}
