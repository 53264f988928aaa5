//! Undo/redo history over shape snapshots.
//!
//! The history is a bounded log of snapshots with a cursor marking the one
//! currently applied. Recording an edit discards everything after the
//! cursor, so a new edit after an undo makes the old redo branch
//! unreachable.
//!
//! Restoring a snapshot makes the surface emit the same edit signal that
//! normally feeds [`History::record`]. The history therefore holds a lock
//! for the duration of a restore, and `record` is a no-op while it is held.

use polyround_core::RestoreError;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::surface::{EditEvent, EditListener, SurfaceAdapter};

/// Whether undo and redo are currently possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub undoable: bool,
    pub redoable: bool,
}

#[derive(Debug, Clone)]
pub struct History<S> {
    entries: Vec<S>,
    cursor: usize,
    capacity: usize,
    locked: bool,
}

impl<S: Clone> History<S> {
    /// Creates a history holding only `seed`, the shape's initial state.
    ///
    /// `capacity` counts every entry including the current one; it is
    /// raised to 1 if given as 0.
    pub fn new(seed: S, capacity: usize) -> Self {
        Self {
            entries: vec![seed],
            cursor: 0,
            capacity: capacity.max(1),
            locked: false,
        }
    }

    /// Appends `snapshot` after the cursor, discarding the redo branch.
    ///
    /// Ignored while a restore is being applied.
    pub fn record(&mut self, snapshot: S) -> Capabilities {
        if self.locked {
            trace!("record ignored while restoring");
            return self.capabilities();
        }

        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;

        if self.entries.len() > self.capacity {
            self.entries.remove(0);
            self.cursor -= 1;
        }

        debug!(
            cursor = self.cursor,
            len = self.entries.len(),
            "recorded snapshot"
        );
        self.capabilities()
    }

    /// Steps back one entry and restores it on `surface`.
    ///
    /// Returns `Ok(false)` without touching anything when there is nothing
    /// to undo. `on_complete` runs only after a successful restore.
    pub fn undo<A>(
        &mut self,
        surface: &mut A,
        on_complete: impl FnOnce(Capabilities),
    ) -> Result<bool, RestoreError>
    where
        A: SurfaceAdapter<Snapshot = S> + ?Sized,
    {
        if self.cursor == 0 {
            return Ok(false);
        }
        self.restore(self.cursor - 1, surface, on_complete)?;
        Ok(true)
    }

    /// Steps forward one entry and restores it on `surface`.
    pub fn redo<A>(
        &mut self,
        surface: &mut A,
        on_complete: impl FnOnce(Capabilities),
    ) -> Result<bool, RestoreError>
    where
        A: SurfaceAdapter<Snapshot = S> + ?Sized,
    {
        if self.cursor + 1 >= self.entries.len() {
            return Ok(false);
        }
        self.restore(self.cursor + 1, surface, on_complete)?;
        Ok(true)
    }

    fn restore<A>(
        &mut self,
        target: usize,
        surface: &mut A,
        on_complete: impl FnOnce(Capabilities),
    ) -> Result<(), RestoreError>
    where
        A: SurfaceAdapter<Snapshot = S> + ?Sized,
    {
        let snapshot = self.entries[target].clone();

        self.locked = true;
        let result = surface.apply_state(&snapshot, self);
        if result.is_ok() {
            self.cursor = target;
            surface.rebind_handles();
        }
        self.locked = false;

        match result {
            Ok(()) => {
                debug!(cursor = self.cursor, "restored snapshot");
                on_complete(self.capabilities());
                Ok(())
            }
            Err(e) => {
                warn!(target, "restore failed: {}", e);
                Err(e)
            }
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            undoable: self.can_undo(),
            redoable: self.can_redo(),
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }

    /// Number of redo steps available.
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True while a restore is being applied.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// The snapshot at the cursor.
    pub fn current(&self) -> &S {
        &self.entries[self.cursor]
    }

    pub fn entries(&self) -> &[S] {
        &self.entries
    }

    /// Drops all entries and starts over from `seed`.
    pub fn clear(&mut self, seed: S) {
        self.entries.clear();
        self.entries.push(seed);
        self.cursor = 0;
    }
}

impl<S: Clone> EditListener<S> for History<S> {
    fn on_edit(&mut self, event: EditEvent, snapshot: S) {
        trace!(?event, locked = self.locked, "edit signal");
        self.record(snapshot);
    }
}
