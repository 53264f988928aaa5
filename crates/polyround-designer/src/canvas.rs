//! Headless drawing surface holding the single editable polygon.
//!
//! [`PolygonCanvas`] owns the live shape, applies handle drags to it and
//! reports committed edits. Snapshots are JSON documents wrapped in an
//! immutable [`Snapshot`] value.

use std::sync::Arc;

use nalgebra::Matrix3;
use polyround_core::{Config, GeometryError, RestoreError, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::Outline;
use crate::handles::{HandleController, HandleKind, HandleSet};
use crate::model::{Point, ShapeParams, Style, Transform};
use crate::surface::{EditEvent, EditListener, SurfaceAdapter};
use crate::viewport::Viewport;

const SHAPE_KIND: &str = "rounded-polygon";
const SNAPSHOT_VERSION: u32 = 1;

/// Immutable serialized capture of the shape. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Snapshot(Arc<str>);

impl Snapshot {
    /// Wraps externally supplied JSON. It is only decoded on restore.
    pub fn from_json(json: impl Into<String>) -> Self {
        Self(Arc::from(json.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wire layout of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShapeRecord {
    kind: String,
    version: u32,
    transform: Transform,
    params: ShapeParams,
    style: Style,
}

/// The live shape: parameters, placement, style, derived outline and the
/// handles currently bound to it.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonShape {
    params: ShapeParams,
    transform: Transform,
    style: Style,
    outline: Outline,
    handles: Option<HandleSet>,
}

impl PolygonShape {
    /// Creates a shape with all handles bound.
    pub fn new(params: ShapeParams, transform: Transform, style: Style) -> Self {
        Self {
            outline: Outline::from_params(&params),
            params,
            transform,
            style,
            handles: Some(HandleSet::standard()),
        }
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    /// `None` after a generic restore until the handles are rebound.
    pub fn handles(&self) -> Option<&HandleSet> {
        self.handles.as_ref()
    }

    fn set_params(&mut self, params: ShapeParams) {
        let rebuild = params.num_verts != self.params.num_verts
            || params.corner_radius != self.params.corner_radius;
        self.params = params;
        if rebuild {
            self.outline = Outline::from_params(&self.params);
        }
    }

    /// Document-space bounds of the placement box.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.transform.bounds(self.params.size)
    }

    fn to_record(&self) -> ShapeRecord {
        ShapeRecord {
            kind: SHAPE_KIND.to_string(),
            version: SNAPSHOT_VERSION,
            transform: self.transform,
            params: self.params,
            style: self.style.clone(),
        }
    }
}

/// In-memory drawing surface for one shape.
#[derive(Debug, Clone)]
pub struct PolygonCanvas {
    shape: PolygonShape,
    viewport: Viewport,
    controller: HandleController,
    selected: bool,
    /// State as of the last reported edit.
    committed: Snapshot,
}

impl PolygonCanvas {
    /// Creates a canvas holding the shape described by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let s = &config.shape;
        let params = ShapeParams::new(s.size, s.num_verts, s.corner_radius, s.max_num_verts)?;
        let transform = Transform::at(config.placement.left, config.placement.top);
        let shape = PolygonShape::new(params, transform, Style::from(&config.style));

        Ok(Self::with_shape(
            shape,
            Viewport::from_settings(&config.canvas),
            HandleController::new(s.max_num_verts),
        ))
    }

    pub fn with_shape(shape: PolygonShape, viewport: Viewport, controller: HandleController) -> Self {
        let committed = encode(&shape);
        Self {
            shape,
            viewport,
            controller,
            selected: false,
            committed,
        }
    }

    pub fn shape(&self) -> &PolygonShape {
        &self.shape
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn controller(&self) -> &HandleController {
        &self.controller
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Shape-local to viewport matrix used to place the handles.
    pub fn local_to_viewport(&self) -> Matrix3<f64> {
        self.viewport.matrix() * self.shape.transform.matrix(self.shape.params.size)
    }

    /// Viewport positions of the bound handles; empty when none are bound.
    pub fn handle_positions(&self) -> Vec<(HandleKind, Point)> {
        match &self.shape.handles {
            Some(set) => set.positions(&self.shape.params, &self.local_to_viewport()),
            None => Vec::new(),
        }
    }

    /// The bound handle under a viewport pointer position.
    pub fn handle_at(&self, pointer: Point, tolerance: f64) -> Option<HandleKind> {
        self.shape.handles.as_ref()?.hit_test(
            pointer,
            &self.shape.params,
            &self.local_to_viewport(),
            tolerance,
        )
    }

    /// Applies a drag of `kind` to `drag` (document space) to the live shape.
    ///
    /// Returns whether the shape changed. Nothing is reported until
    /// [`PolygonCanvas::release`].
    pub fn drag_handle(&mut self, kind: HandleKind, drag: Point) -> bool {
        if !self.shape.handles.as_ref().is_some_and(|h| h.contains(kind)) {
            tracing::debug!(handle = %kind, "drag on unbound handle ignored");
            return false;
        }

        let update =
            self.controller
                .compute_update(kind, drag, &self.shape.params, &self.shape.transform);
        if update.is_empty() {
            return false;
        }

        if let Some(transform) = update.transform {
            self.shape.transform = transform;
        }
        if let Some(params) = update.params {
            self.shape.set_params(params);
        }
        tracing::debug!(
            handle = %kind,
            num_verts = self.shape.params.num_verts,
            corner_radius = self.shape.params.corner_radius,
            "shape updated"
        );
        true
    }

    /// Same as [`PolygonCanvas::drag_handle`] with a viewport position.
    pub fn drag_handle_at_viewport(&mut self, kind: HandleKind, pointer: Point) -> bool {
        let drag = self.viewport.to_document(pointer);
        self.drag_handle(kind, drag)
    }

    /// Ends a drag. Reports one `ShapeModified` if the shape differs from
    /// the last reported state.
    pub fn release(&mut self, listener: &mut dyn EditListener<Snapshot>) -> bool {
        let snapshot = self.take_snapshot();
        if snapshot == self.committed {
            return false;
        }
        self.committed = snapshot.clone();
        listener.on_edit(EditEvent::ShapeModified, snapshot);
        true
    }

    pub fn set_selected(&mut self, selected: bool, listener: &mut dyn EditListener<Snapshot>) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
        listener.on_edit(EditEvent::SelectionChanged, self.take_snapshot());
    }

    /// Replaces the shape on the canvas.
    ///
    /// The new shape must keep the document size and stay within the vertex
    /// limit, otherwise earlier snapshots could no longer be restored.
    pub fn add_shape(
        &mut self,
        shape: PolygonShape,
        listener: &mut dyn EditListener<Snapshot>,
    ) -> std::result::Result<(), GeometryError> {
        let size = shape.params.size;
        if size != self.shape.params.size {
            return Err(GeometryError::SizeMismatch {
                size,
                document_size: self.shape.params.size,
            });
        }
        let max_num_verts = self.controller.max_num_verts();
        if shape.params.num_verts > max_num_verts {
            return Err(GeometryError::TooManyVertices {
                num_verts: shape.params.num_verts,
                max_num_verts,
            });
        }

        self.shape = shape;
        self.shape.handles = Some(HandleSet::standard());
        self.committed = self.take_snapshot();
        listener.on_edit(EditEvent::ShapeAdded, self.committed.clone());
        Ok(())
    }

    fn decode(&self, snapshot: &Snapshot) -> std::result::Result<PolygonShape, RestoreError> {
        let record: ShapeRecord =
            serde_json::from_str(snapshot.as_str()).map_err(|e| RestoreError::Malformed {
                reason: e.to_string(),
            })?;

        if record.kind != SHAPE_KIND {
            return Err(incompatible(format!("unknown shape kind '{}'", record.kind)));
        }
        if record.version != SNAPSHOT_VERSION {
            return Err(incompatible(format!(
                "unsupported snapshot version {}",
                record.version
            )));
        }
        if record.params.size != self.shape.params.size {
            return Err(incompatible(format!(
                "shape size {} differs from document size {}",
                record.params.size, self.shape.params.size
            )));
        }
        let params = ShapeParams::new(
            record.params.size,
            record.params.num_verts,
            record.params.corner_radius,
            self.controller.max_num_verts(),
        )
        .map_err(|e| incompatible(e.to_string()))?;

        let t = &record.transform;
        if ![t.left, t.top, t.scale_x, t.scale_y]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(incompatible("transform is not finite".to_string()));
        }

        let mut shape = PolygonShape::new(params, record.transform, record.style);
        shape.handles = None;
        Ok(shape)
    }
}

impl SurfaceAdapter for PolygonCanvas {
    type Snapshot = Snapshot;

    fn take_snapshot(&self) -> Snapshot {
        encode(&self.shape)
    }

    fn apply_state(
        &mut self,
        snapshot: &Snapshot,
        listener: &mut dyn EditListener<Snapshot>,
    ) -> std::result::Result<(), RestoreError> {
        let shape = self.decode(snapshot)?;
        self.shape = shape;
        self.committed = snapshot.clone();
        listener.on_edit(EditEvent::ShapeModified, snapshot.clone());
        Ok(())
    }

    fn rebind_handles(&mut self) {
        self.shape.handles = Some(HandleSet::standard());
    }
}

fn encode(shape: &PolygonShape) -> Snapshot {
    match serde_json::to_string(&shape.to_record()) {
        Ok(json) => Snapshot::from_json(json),
        Err(e) => {
            // Restoring an empty snapshot fails as malformed.
            tracing::error!("Failed to encode snapshot: {}", e);
            Snapshot::from_json(String::new())
        }
    }
}

fn incompatible(reason: String) -> RestoreError {
    RestoreError::Incompatible { reason }
}
