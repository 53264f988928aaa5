use std::f64::consts::PI;

use polyround_designer::handles::{handle_position, HandleController, HandleKind, HandleSet};
use polyround_designer::model::{Point, ShapeParams, Transform, RADIUS_EPSILON};
use proptest::prelude::*;

const SIZE: f64 = 200.0;

fn params(num_verts: u32, corner_radius: f64) -> ShapeParams {
    ShapeParams::new(SIZE, num_verts, corner_radius, 21).unwrap()
}

fn opposite(kind: HandleKind) -> HandleKind {
    match kind {
        HandleKind::TopLeft => HandleKind::BottomRight,
        HandleKind::TopRight => HandleKind::BottomLeft,
        HandleKind::BottomLeft => HandleKind::TopRight,
        HandleKind::BottomRight => HandleKind::TopLeft,
        other => other,
    }
}

fn corner_in_document(kind: HandleKind, p: &ShapeParams, t: &Transform) -> Point {
    handle_position(kind, p, &t.matrix(p.size))
}

#[test]
fn test_vertex_count_snaps_to_angle() {
    let controller = HandleController::new(15);
    let p = params(3, 0.0);
    let t = Transform::at(100.0, 100.0);
    let center = t.center(SIZE);

    // angle = pi/2 + atan(dy/dx) = 2pi/6
    let dx = 100.0;
    let dy = dx * (2.0 * PI / 6.0 - PI / 2.0).tan();
    let drag = Point::new(center.x + dx, center.y + dy);

    let update = controller.compute_update(HandleKind::VertexCount, drag, &p, &t);
    assert_eq!(update.params.map(|p| p.num_verts), Some(6));
    assert!(update.transform.is_none());
}

#[test]
fn test_vertical_drag_gives_max_vertex_count() {
    let controller = HandleController::new(15);
    let p = params(3, 0.0);
    let t = Transform::at(100.0, 100.0);
    let center = t.center(SIZE);

    for drag in [
        Point::new(center.x + 0.5, center.y - 80.0),
        Point::new(center.x - 0.99, center.y + 300.0),
        Point::new(center.x, center.y),
    ] {
        assert_eq!(controller.snap_vertex_count(drag, center), 15);
    }
}

#[test]
fn test_vertex_count_keeps_stored_radius() {
    let controller = HandleController::new(21);
    let p = params(3, 80.0);
    let t = Transform::at(100.0, 100.0);
    let center = t.center(SIZE);

    let update = controller.compute_update(
        HandleKind::VertexCount,
        Point::new(center.x, center.y - 50.0),
        &p,
        &t,
    );
    let next = update.params.unwrap();
    assert_eq!(next.num_verts, 21);
    assert_eq!(next.corner_radius, 80.0);
    assert!(next.effective_radius() < next.corner_radius);
}

#[test]
fn test_same_vertex_count_is_no_update() {
    let controller = HandleController::new(21);
    let p = params(21, 0.0);
    let t = Transform::at(100.0, 100.0);
    let center = t.center(SIZE);
    let update = controller.compute_update(HandleKind::VertexCount, center, &p, &t);
    assert!(update.is_empty());
}

#[test]
fn test_corner_radius_follows_drag() {
    let controller = HandleController::new(21);
    let p = params(4, 0.0);
    let t = Transform::at(100.0, 100.0);

    let update = controller.compute_update(HandleKind::CornerRadius, Point::new(0.0, 130.0), &p, &t);
    assert_eq!(update.params.map(|p| p.corner_radius), Some(30.0));

    let above = controller.compute_update(HandleKind::CornerRadius, Point::new(0.0, 20.0), &p, &t);
    assert!(above.is_empty(), "radius already 0, nothing to clamp to");

    let below = controller.compute_update(HandleKind::CornerRadius, Point::new(0.0, 900.0), &p, &t);
    let r = below.params.unwrap().corner_radius;
    assert!((r - (SIZE / 2.0 - RADIUS_EPSILON)).abs() < 1e-12);
}

#[test]
fn test_corner_radius_on_scaled_shape() {
    let controller = HandleController::new(21);
    let p = params(4, 0.0);
    let t = Transform {
        left: 50.0,
        top: 50.0,
        scale_x: 1.0,
        scale_y: 2.0,
    };
    // top + radius * scale_y
    let update = controller.compute_update(HandleKind::CornerRadius, Point::new(0.0, 90.0), &p, &t);
    assert_eq!(update.params.map(|p| p.corner_radius), Some(20.0));
}

#[test]
fn test_bottom_right_resize() {
    let controller = HandleController::new(21);
    let p = params(4, 0.0);
    let t = Transform::at(100.0, 100.0);

    let update = controller.compute_update(HandleKind::BottomRight, Point::new(500.0, 400.0), &p, &t);
    let next = update.transform.unwrap();
    assert_eq!(next.left, 100.0);
    assert_eq!(next.top, 100.0);
    assert!((next.scale_x - 2.0).abs() < 1e-12);
    assert!((next.scale_y - 1.5).abs() < 1e-12);
}

#[test]
fn test_drag_past_anchor_mirrors() {
    let controller = HandleController::new(21);
    let p = params(4, 0.0);
    let t = Transform::at(100.0, 100.0);

    // Past the fixed top-left corner on both axes.
    let update = controller.compute_update(HandleKind::BottomRight, Point::new(0.0, 50.0), &p, &t);
    let next = update.transform.unwrap();
    assert!(next.is_mirrored());
    assert_eq!(next.left, 0.0);
    assert_eq!(next.top, 50.0);
    assert!((next.scale_x + 0.5).abs() < 1e-12);
    assert!((next.scale_y + 0.25).abs() < 1e-12);
}

#[test]
fn test_degenerate_resize_is_rejected() {
    let controller = HandleController::new(21);
    let p = params(4, 0.0);
    let t = Transform::at(100.0, 100.0);
    // Collapses the width onto the anchor x.
    let update = controller.compute_update(HandleKind::TopRight, Point::new(100.0, 0.0), &p, &t);
    assert!(update.is_empty());
}

#[test]
fn test_hit_test_picks_nearest_handle() {
    let set = HandleSet::standard();
    let p = params(4, 20.0);
    let m = Transform::at(100.0, 100.0).matrix(SIZE);

    assert_eq!(
        set.hit_test(Point::new(101.0, 99.0), &p, &m, 5.0),
        Some(HandleKind::TopLeft)
    );
    assert_eq!(
        set.hit_test(Point::new(200.0, 121.0), &p, &m, 5.0),
        Some(HandleKind::CornerRadius)
    );
    assert_eq!(set.hit_test(Point::new(200.0, 200.0), &p, &m, 5.0), None);
}

proptest! {
    #[test]
    fn prop_resize_keeps_opposite_corner(
        corner in 0usize..4,
        left in -500.0f64..500.0,
        top in -500.0f64..500.0,
        scale_x in prop_oneof![-3.0f64..-0.05, 0.05f64..3.0],
        scale_y in prop_oneof![-3.0f64..-0.05, 0.05f64..3.0],
        drag_x in -1000.0f64..1000.0,
        drag_y in -1000.0f64..1000.0,
    ) {
        let kind = HandleKind::ALL[corner];
        let controller = HandleController::new(21);
        let p = params(5, 10.0);
        let t = Transform { left, top, scale_x, scale_y };
        let anchor = corner_in_document(opposite(kind), &p, &t);
        let drag = Point::new(drag_x, drag_y);

        let update = controller.compute_update(kind, drag, &p, &t);
        prop_assume!(update.transform.is_some());
        let next = update.transform.unwrap();

        let moved_anchor = corner_in_document(opposite(kind), &p, &next);
        prop_assert!(moved_anchor.distance_to(&anchor) < 1e-6,
            "{:?}: anchor {:?} moved to {:?}", kind, anchor, moved_anchor);

        let dragged = corner_in_document(kind, &p, &next);
        prop_assert!(dragged.distance_to(&drag) < 1e-6,
            "{:?}: corner at {:?}, drag {:?}", kind, dragged, drag);
    }
}
