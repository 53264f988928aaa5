use polyround_core::RestoreError;
use polyround_designer::history::{Capabilities, History};
use polyround_designer::surface::{EditEvent, EditListener, SurfaceAdapter};
use proptest::prelude::*;

/// Surface whose whole state is one integer. Restoring re-fires the edit
/// signal the way a real drawing surface does.
struct CounterSurface {
    value: i32,
    rebinds: usize,
    reject: bool,
}

impl CounterSurface {
    fn new(value: i32) -> Self {
        Self {
            value,
            rebinds: 0,
            reject: false,
        }
    }

    fn edit(&mut self, value: i32, listener: &mut dyn EditListener<i32>) {
        self.value = value;
        listener.on_edit(EditEvent::ShapeModified, value);
    }
}

impl SurfaceAdapter for CounterSurface {
    type Snapshot = i32;

    fn take_snapshot(&self) -> i32 {
        self.value
    }

    fn apply_state(
        &mut self,
        snapshot: &i32,
        listener: &mut dyn EditListener<i32>,
    ) -> Result<(), RestoreError> {
        if self.reject {
            return Err(RestoreError::Incompatible {
                reason: "rejected".to_string(),
            });
        }
        self.edit(*snapshot, listener);
        Ok(())
    }

    fn rebind_handles(&mut self) {
        self.rebinds += 1;
    }
}

fn seeded(capacity: usize) -> (CounterSurface, History<i32>) {
    let surface = CounterSurface::new(0);
    let history = History::new(surface.take_snapshot(), capacity);
    (surface, history)
}

#[test]
fn test_undo_redo_round_trip() {
    let (mut surface, mut history) = seeded(50);
    for v in [1, 2, 3] {
        surface.edit(v, &mut history);
    }

    assert!(history.undo(&mut surface, |_| {}).unwrap());
    assert_eq!(surface.value, 2);
    assert!(history.redo(&mut surface, |_| {}).unwrap());
    assert_eq!(surface.value, 3);
    assert_eq!(history.entries(), &[0, 1, 2, 3]);
}

#[test]
fn test_restore_does_not_record() {
    let (mut surface, mut history) = seeded(50);
    surface.edit(1, &mut history);
    surface.edit(2, &mut history);

    history.undo(&mut surface, |_| {}).unwrap();
    history.undo(&mut surface, |_| {}).unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history.cursor(), 0);
    assert!(!history.is_locked());
    assert_eq!(surface.value, 0);
}

#[test]
fn test_new_edit_discards_redo_branch() {
    let (mut surface, mut history) = seeded(50);
    surface.edit(1, &mut history); // A
    surface.edit(2, &mut history); // B
    surface.edit(3, &mut history); // C

    history.undo(&mut surface, |_| {}).unwrap();
    history.undo(&mut surface, |_| {}).unwrap();
    assert_eq!(surface.value, 1);

    surface.edit(4, &mut history); // D
    assert!(!history.capabilities().redoable);
    assert_eq!(history.entries(), &[0, 1, 4]);
    assert!(!history.redo(&mut surface, |_| {}).unwrap());
    assert_eq!(surface.value, 4);
}

#[test]
fn test_capacity_eviction_keeps_current_position() {
    let (mut surface, mut history) = seeded(4);
    for v in 1..=3 {
        surface.edit(v, &mut history);
    }
    assert_eq!(history.len(), 4);
    assert_eq!(history.undo_depth(), 3);

    surface.edit(4, &mut history);
    assert_eq!(history.len(), 4);
    assert_eq!(history.entries(), &[1, 2, 3, 4]);
    assert_eq!(*history.current(), 4);
    assert_eq!(history.undo_depth(), 3);

    // Undo everything that is left: the evicted seed is unreachable.
    while history.undo(&mut surface, |_| {}).unwrap() {}
    assert_eq!(surface.value, 1);
}

#[test]
fn test_eviction_after_branching() {
    let (mut surface, mut history) = seeded(3);
    surface.edit(1, &mut history);
    surface.edit(2, &mut history);
    history.undo(&mut surface, |_| {}).unwrap();
    assert_eq!(history.undo_depth(), 1);

    surface.edit(5, &mut history);
    assert_eq!(history.entries(), &[0, 1, 5]);
    assert_eq!(history.undo_depth(), 2);

    surface.edit(6, &mut history);
    assert_eq!(history.entries(), &[1, 5, 6]);
    assert_eq!(history.undo_depth(), 2);
}

#[test]
fn test_undo_on_seed_is_noop() {
    let (mut surface, mut history) = seeded(50);
    let mut called = false;
    assert!(!history.undo(&mut surface, |_| called = true).unwrap());
    assert!(!history.redo(&mut surface, |_| called = true).unwrap());
    assert!(!called);
    assert_eq!(surface.rebinds, 0);
}

#[test]
fn test_completion_reports_capabilities() {
    let (mut surface, mut history) = seeded(50);
    surface.edit(1, &mut history);

    let mut reported = None;
    history.undo(&mut surface, |caps| reported = Some(caps)).unwrap();
    assert_eq!(
        reported,
        Some(Capabilities {
            undoable: false,
            redoable: true,
        })
    );
    assert_eq!(surface.rebinds, 1);

    history.redo(&mut surface, |caps| reported = Some(caps)).unwrap();
    assert_eq!(
        reported,
        Some(Capabilities {
            undoable: true,
            redoable: false,
        })
    );
    assert_eq!(surface.rebinds, 2);
}

#[test]
fn test_failed_restore_keeps_cursor() {
    let (mut surface, mut history) = seeded(50);
    surface.edit(1, &mut history);
    surface.reject = true;

    let mut called = false;
    let err = history.undo(&mut surface, |_| called = true).unwrap_err();
    assert!(matches!(err, RestoreError::Incompatible { .. }));
    assert!(!called);
    assert_eq!(history.cursor(), 1);
    assert!(!history.is_locked());
    assert_eq!(surface.value, 1);
    assert_eq!(surface.rebinds, 0);

    // The history stays usable once the surface accepts again.
    surface.reject = false;
    assert!(history.undo(&mut surface, |_| {}).unwrap());
    assert_eq!(surface.value, 0);
}

#[test]
fn test_selection_signal_is_recorded() {
    let (_surface, mut history) = seeded(50);
    history.on_edit(EditEvent::SelectionChanged, 0);
    assert_eq!(history.entries(), &[0, 0]);
    assert!(history.can_undo());
}

proptest! {
    #[test]
    fn prop_undo_then_redo_is_identity(
        edits in proptest::collection::vec(-1000i32..1000, 1..40),
        undos in 0usize..40,
    ) {
        let (mut surface, mut history) = seeded(64);
        for v in &edits {
            surface.edit(*v, &mut history);
        }
        let undos = undos.min(edits.len());
        for _ in 0..undos {
            history.undo(&mut surface, |_| {}).unwrap();
        }

        let before = surface.value;
        let entries = history.entries().to_vec();
        if history.undo(&mut surface, |_| {}).unwrap() {
            let redone = history.redo(&mut surface, |_| {}).unwrap();
            prop_assert!(redone);
        }
        prop_assert_eq!(surface.value, before);
        prop_assert_eq!(history.entries(), entries.as_slice());
    }

    #[test]
    fn prop_history_never_exceeds_capacity(
        capacity in 1usize..10,
        edits in proptest::collection::vec(0i32..100, 0..30),
    ) {
        let (mut surface, mut history) = seeded(capacity);
        for v in &edits {
            surface.edit(*v, &mut history);
            prop_assert!(history.len() <= capacity);
            prop_assert_eq!(*history.current(), *v);
        }
    }
}
