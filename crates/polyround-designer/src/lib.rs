//! # Polyround Designer
//!
//! Interactive editing of a single rounded regular polygon.
//!
//! ## Core Components
//!
//! - **Geometry**: builds the closed outline from vertex count and corner
//!   radius, clamping the radius so the outline never self-intersects
//! - **Handles**: four anchor-preserving corner handles, a corner-radius
//!   handle and a vertex-count handle that snaps drag angles to vertex counts
//! - **History**: bounded undo/redo log of snapshots with a lock that
//!   ignores the edit signals a restore fires
//! - **Canvas**: headless surface that owns the live shape and its snapshot
//!   codec
//! - **Editor**: wires the canvas and the history together
//!
//! ## Architecture
//!
//! ```text
//! pointer drag -> Handles -> Canvas (shape + outline) -> edit signal -> History
//! undo / redo  -> History -> Canvas::apply_state -> rebind handles
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use polyround_core::Config;
//! use polyround_designer::{Editor, HandleKind, Point};
//!
//! let mut editor = Editor::new(&Config::default()).unwrap();
//! editor.drag(HandleKind::CornerRadius, Point::new(200.0, 120.0));
//! editor.release();
//! assert_eq!(editor.params().corner_radius, 20.0);
//!
//! editor.undo(|_| {}).unwrap();
//! assert_eq!(editor.params().corner_radius, 0.0);
//! ```

pub mod canvas;
pub mod editor;
pub mod geometry;
pub mod handles;
pub mod history;
pub mod model;
pub mod surface;
pub mod viewport;

pub use canvas::{PolygonCanvas, PolygonShape, Snapshot};
pub use editor::Editor;
pub use geometry::{build_outline, Corner, Outline, PathSegment};
pub use handles::{
    handle_local_position, handle_position, HandleController, HandleKind, HandleSet,
    HandleUpdate,
};
pub use history::{Capabilities, History};
pub use model::{Point, ShapeParams, Style, Transform};
pub use surface::{EditEvent, EditListener, SurfaceAdapter};
pub use viewport::Viewport;
