//! Interface between the editing core and the drawing surface.
//!
//! The surface owns the live shape and renders it. It reports edits through
//! an [`EditListener`] and restores snapshots on request. Restoring re-fires
//! the same edit signal, which is why [`SurfaceAdapter::apply_state`] is
//! handed the listener explicitly.

use polyround_core::RestoreError;

/// Edit signals emitted by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditEvent {
    ShapeAdded,
    ShapeModified,
    SelectionChanged,
}

/// Receives edit signals together with the state they produced.
pub trait EditListener<S> {
    fn on_edit(&mut self, event: EditEvent, snapshot: S);
}

/// Collects every signal; handy for inspecting what a surface emitted.
impl<S> EditListener<S> for Vec<(EditEvent, S)> {
    fn on_edit(&mut self, event: EditEvent, snapshot: S) {
        self.push((event, snapshot));
    }
}

/// Drops every signal.
impl<S> EditListener<S> for () {
    fn on_edit(&mut self, _event: EditEvent, _snapshot: S) {}
}

/// The drawing surface as seen by the history.
pub trait SurfaceAdapter {
    /// Opaque, immutable capture of the shape.
    type Snapshot: Clone;

    /// Captures the current shape, placement and style.
    fn take_snapshot(&self) -> Self::Snapshot;

    /// Replaces the live shape with `snapshot`.
    ///
    /// Implementations must validate the whole snapshot before mutating
    /// anything: on `Err` the live shape is untouched. Once the shape and its
    /// rendering are updated, the surface reports the change to `listener`
    /// like any other edit.
    fn apply_state(
        &mut self,
        snapshot: &Self::Snapshot,
        listener: &mut dyn EditListener<Self::Snapshot>,
    ) -> Result<(), RestoreError>;

    /// Reattaches the interactive handles after a restore.
    fn rebind_handles(&mut self);
}
