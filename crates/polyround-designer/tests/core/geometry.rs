use polyround_designer::geometry::{build_outline, vertices, PathSegment};
use polyround_designer::model::{ShapeParams, EDGE_EPSILON};
use proptest::prelude::*;

const SIZE: f64 = 200.0;
const MAX_NUM_VERTS: u32 = 21;

#[test]
fn test_triangle_vertices() {
    let verts = vertices(3, SIZE);
    assert_eq!(verts.len(), 3);
    assert!(verts[0].x.abs() < 1e-9);
    assert!((verts[0].y + 100.0).abs() < 1e-9);
    // Clockwise on screen: the second vertex is bottom right.
    assert!(verts[1].x > 0.0 && verts[1].y > 0.0);
    assert!(verts[2].x < 0.0 && verts[2].y > 0.0);
}

#[test]
fn test_square_radius_is_clamped() {
    let outline = build_outline(4, 500.0, SIZE);
    let edge = SIZE * (std::f64::consts::PI / 4.0).sin();
    assert!((outline.effective_radius() - (edge / 2.0 - EDGE_EPSILON)).abs() < 1e-9);
    assert_eq!(outline.curve_count(), 4);
}

#[test]
fn test_rounded_outline_layout() {
    let outline = build_outline(5, 10.0, SIZE);
    let segments = outline.segments();
    let corners = outline.corners();

    assert_eq!(segments.len(), 2 * 5 + 2);
    assert_eq!(segments[0], PathSegment::MoveTo(corners[4].outgoing));
    assert_eq!(segments[1], PathSegment::LineTo(corners[0].incoming));
    assert_eq!(
        segments[2],
        PathSegment::CornerTo {
            ctrl: corners[0].vertex,
            to: corners[0].outgoing,
        }
    );
    assert_eq!(segments.last(), Some(&PathSegment::Close));

    for c in corners {
        assert!((c.vertex.distance_to(&c.incoming) - 10.0).abs() < 1e-9);
        assert!((c.vertex.distance_to(&c.outgoing) - 10.0).abs() < 1e-9);
    }
}

#[test]
fn test_outline_is_deterministic() {
    assert_eq!(build_outline(7, 12.5, SIZE), build_outline(7, 12.5, SIZE));
}

#[test]
fn test_bounding_box_contains_outline() {
    let outline = build_outline(6, 15.0, SIZE);
    let (min_x, min_y, max_x, max_y) = outline.bounding_box();
    assert!(min_x >= -100.1 && max_x <= 100.1);
    assert!(min_y >= -100.1 && max_y <= 100.1);
    assert!(max_x - min_x > 150.0, "width was {}", max_x - min_x);
}

proptest! {
    #[test]
    fn prop_sharp_outline_is_plain_polygon(n in 3u32..MAX_NUM_VERTS) {
        let outline = build_outline(n, 0.0, SIZE);
        prop_assert_eq!(outline.curve_count(), 0);
        prop_assert_eq!(outline.segments().len(), n as usize + 1);
        prop_assert_eq!(outline.on_curve_points(), vertices(n, SIZE));
    }

    #[test]
    fn prop_clamped_corners_never_cross(n in 3u32..MAX_NUM_VERTS, extra in 0.0f64..500.0) {
        let params = ShapeParams::new(SIZE, n, 0.0, MAX_NUM_VERTS).unwrap();
        let requested = params.edge_length() / 2.0 + extra;
        let outline = build_outline(n, requested, SIZE);
        prop_assert!(outline.effective_radius() < params.edge_length() / 2.0);

        let corners = outline.corners();
        for i in 0..corners.len() {
            let here = &corners[i];
            let next = &corners[(i + 1) % corners.len()];
            // Both cut points lie on the edge here.vertex -> next.vertex.
            let out = here.vertex.distance_to(&here.outgoing);
            let incoming = here.vertex.distance_to(&next.incoming);
            prop_assert!(out <= incoming + 1e-9, "edge {}: {} > {}", i, out, incoming);
        }
    }

    #[test]
    fn prop_effective_radius_never_exceeds_request(n in 3u32..MAX_NUM_VERTS, r in 0.0f64..100.0) {
        let outline = build_outline(n, r, SIZE);
        prop_assert!(outline.effective_radius() <= r);
        prop_assert!(outline.effective_radius() >= 0.0);
    }
}
