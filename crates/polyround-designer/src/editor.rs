//! Editing session for a single rounded polygon.
//!
//! Wires the canvas to the history: committed drags and selection changes
//! are recorded, undo and redo restore snapshots back onto the canvas.

use polyround_core::{Config, GeometryError, RestoreError, Result};

use crate::canvas::{PolygonCanvas, PolygonShape, Snapshot};
use crate::geometry::Outline;
use crate::handles::HandleKind;
use crate::history::{Capabilities, History};
use crate::model::{Point, ShapeParams, Transform};
use crate::surface::SurfaceAdapter;

#[derive(Debug, Clone)]
pub struct Editor {
    canvas: PolygonCanvas,
    history: History<Snapshot>,
}

impl Editor {
    /// Creates the canvas from `config` and seeds the history with its
    /// initial state.
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        let canvas = PolygonCanvas::new(config)?;
        Ok(Self::with_canvas(canvas, config.history.capacity))
    }

    pub fn with_canvas(canvas: PolygonCanvas, capacity: usize) -> Self {
        let history = History::new(canvas.take_snapshot(), capacity);
        tracing::info!(capacity, "editor ready");
        Self { canvas, history }
    }

    pub fn canvas(&self) -> &PolygonCanvas {
        &self.canvas
    }

    pub fn history(&self) -> &History<Snapshot> {
        &self.history
    }

    pub fn params(&self) -> &ShapeParams {
        self.canvas.shape().params()
    }

    pub fn transform(&self) -> &Transform {
        self.canvas.shape().transform()
    }

    pub fn outline(&self) -> &Outline {
        self.canvas.shape().outline()
    }

    /// Drags a handle to a document-space point. Not recorded until
    /// [`Editor::release`].
    pub fn drag(&mut self, kind: HandleKind, point: Point) -> bool {
        self.canvas.drag_handle(kind, point)
    }

    /// Drags a handle to a viewport position.
    pub fn drag_at_viewport(&mut self, kind: HandleKind, pointer: Point) -> bool {
        self.canvas.drag_handle_at_viewport(kind, pointer)
    }

    /// Picks the handle under a viewport position.
    pub fn handle_at(&self, pointer: Point, tolerance: f64) -> Option<HandleKind> {
        self.canvas.handle_at(pointer, tolerance)
    }

    /// Ends the current drag, recording it if the shape changed.
    pub fn release(&mut self) -> Capabilities {
        self.canvas.release(&mut self.history);
        self.history.capabilities()
    }

    pub fn select(&mut self) -> Capabilities {
        self.canvas.set_selected(true, &mut self.history);
        self.history.capabilities()
    }

    pub fn deselect(&mut self) -> Capabilities {
        self.canvas.set_selected(false, &mut self.history);
        self.history.capabilities()
    }

    /// Replaces the shape with a fresh one, recorded as an edit.
    ///
    /// Rejects shapes of another size or above the vertex limit.
    pub fn replace_shape(
        &mut self,
        shape: PolygonShape,
    ) -> std::result::Result<Capabilities, GeometryError> {
        self.canvas.add_shape(shape, &mut self.history)?;
        Ok(self.history.capabilities())
    }

    /// Zooms the viewport about a document point.
    pub fn zoom_to(&mut self, doc_point: Point, zoom: f64) {
        self.canvas.viewport_mut().zoom_to_point(&doc_point, zoom);
    }

    /// Pans the viewport by a pixel offset.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.canvas.viewport_mut().pan_by(dx, dy);
    }

    pub fn undo(
        &mut self,
        on_complete: impl FnOnce(Capabilities),
    ) -> std::result::Result<bool, RestoreError> {
        self.history.undo(&mut self.canvas, on_complete)
    }

    pub fn redo(
        &mut self,
        on_complete: impl FnOnce(Capabilities),
    ) -> std::result::Result<bool, RestoreError> {
        self.history.redo(&mut self.canvas, on_complete)
    }

    pub fn capabilities(&self) -> Capabilities {
        self.history.capabilities()
    }

    /// Current shape as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let shape = self.canvas.shape();
        let viewport = self.canvas.viewport();
        let t = shape.transform();
        let c = t.center(shape.params().size);
        let style = shape.style();
        let fill = if style.fill.is_empty() {
            "none"
        } else {
            style.fill.as_str()
        };

        format!(
            concat!(
                "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\">\n",
                "  <path d=\"{d}\" transform=\"matrix({sx} 0 0 {sy} {cx} {cy})\" ",
                "stroke=\"{stroke}\" stroke-width=\"{sw}\" fill=\"{fill}\" ",
                "vector-effect=\"non-scaling-stroke\"/>\n",
                "</svg>\n"
            ),
            w = viewport.canvas_width(),
            h = viewport.canvas_height(),
            d = shape.outline().to_svg_path(),
            sx = t.scale_x,
            sy = t.scale_y,
            cx = c.x,
            cy = c.y,
            stroke = style.stroke,
            sw = style.stroke_width,
            fill = fill,
        )
    }
}
