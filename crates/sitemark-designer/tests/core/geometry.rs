use proptest::prelude::*;
use sitemark_designer::geometry::{
    azimuth_from_line, line_length, normalize_degrees, point_in_polygon, polygon_area,
    polygon_centroid, polyline_intersects_box, snap_to_45, Bounds, OrientedRect,
};
use sitemark_designer::Point;

fn roof() -> Vec<Point> {
    vec![
        Point::new(0.0, 0.0),
        Point::new(1000.0, 0.0),
        Point::new(1000.0, 500.0),
        Point::new(0.0, 500.0),
    ]
}

#[test]
fn test_roof_area_at_one_centimetre_per_pixel() {
    assert!((polygon_area(&roof(), Some(0.01)) - 50.0).abs() < 1e-9);
}

#[test]
fn test_area_ignores_winding() {
    let mut reversed = roof();
    reversed.reverse();
    assert_eq!(polygon_area(&roof(), Some(0.02)), polygon_area(&reversed, Some(0.02)));
}

#[test]
fn test_area_and_length_are_zero_without_scale() {
    assert_eq!(polygon_area(&roof(), None), 0.0);
    assert_eq!(line_length(&roof(), None), 0.0);
}

#[test]
fn test_line_length_sums_segments() {
    let points = [Point::new(0.0, 0.0), Point::new(300.0, 400.0), Point::new(300.0, 0.0)];
    assert!((line_length(&points, Some(0.01)) - 9.0).abs() < 1e-9);
}

#[test]
fn test_centroid_of_l_shape_is_inside_the_bulk() {
    let l = [
        Point::new(0.0, 0.0),
        Point::new(200.0, 0.0),
        Point::new(200.0, 50.0),
        Point::new(50.0, 50.0),
        Point::new(50.0, 200.0),
        Point::new(0.0, 200.0),
    ];
    let c = polygon_centroid(&l);
    assert!(c.x < 100.0 && c.y < 100.0);
    assert!((c.x - c.y).abs() < 1e-9);
}

#[test]
fn test_point_on_edge_is_inside() {
    assert!(point_in_polygon(Point::new(1000.0, 250.0), &roof()));
    assert!(!point_in_polygon(Point::new(1000.1, 250.0), &roof()));
}

#[test]
fn test_azimuth_compass_points() {
    let o = Point::new(0.0, 0.0);
    assert_eq!(azimuth_from_line(o, Point::new(0.0, -10.0)), 0.0);
    assert!((azimuth_from_line(o, Point::new(10.0, 0.0)) - 90.0).abs() < 1e-9);
    assert!((azimuth_from_line(o, Point::new(0.0, 10.0)) - 180.0).abs() < 1e-9);
    assert!((azimuth_from_line(o, Point::new(-10.0, 0.0)) - 270.0).abs() < 1e-9);
}

#[test]
fn test_snap_to_45_keeps_distance() {
    let anchor = Point::new(10.0, 10.0);
    let snapped = snap_to_45(anchor, Point::new(110.0, 20.0));
    assert!((snapped.y - 10.0).abs() < 1e-9);
    assert!((snapped.distance_to(&anchor) - Point::new(100.0, 10.0).length()).abs() < 1e-9);
}

#[test]
fn test_path_crossing_box_without_vertices_inside() {
    let rect = Bounds::new(40.0, 40.0, 60.0, 60.0);
    let path = [Point::new(0.0, 50.0), Point::new(100.0, 50.0)];
    assert!(polyline_intersects_box(&path, &rect));
    let miss = [Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
    assert!(!polyline_intersects_box(&miss, &rect));
}

#[test]
fn test_rotated_rect_contains() {
    let rect = OrientedRect::new(Point::new(0.0, 0.0), 100.0, 20.0, 90.0);
    assert!(rect.contains(Point::new(0.0, 45.0), 0.0));
    assert!(!rect.contains(Point::new(45.0, 0.0), 0.0));
}

proptest! {
    #[test]
    fn prop_normalized_angle_in_range(deg in -1.0e6f64..1.0e6) {
        let n = normalize_degrees(deg);
        prop_assert!((0.0..360.0).contains(&n));
    }

    #[test]
    fn prop_area_scales_with_ratio_squared(w in 1.0f64..2000.0, h in 1.0f64..2000.0, ratio in 0.001f64..0.1) {
        let rect = [
            Point::new(0.0, 0.0),
            Point::new(w, 0.0),
            Point::new(w, h),
            Point::new(0.0, h),
        ];
        let expected = w * h * ratio * ratio;
        prop_assert!((polygon_area(&rect, Some(ratio)) - expected).abs() <= expected * 1e-9);
    }

    #[test]
    fn prop_area_ignores_starting_vertex(shift in 0usize..6, scale in 0.5f64..20.0) {
        let hexagon: Vec<Point> = [(0.0, 0.0), (40.0, -10.0), (80.0, 10.0), (90.0, 50.0), (40.0, 80.0), (-5.0, 45.0)]
            .iter()
            .map(|&(x, y)| Point::new(x * scale, y * scale))
            .collect();
        let mut rotated = hexagon.clone();
        rotated.rotate_left(shift);
        let base = polygon_area(&hexagon, Some(0.01));
        prop_assert!(base > 0.0);
        prop_assert!((polygon_area(&rotated, Some(0.01)) - base).abs() <= base * 1e-9);
        rotated.reverse();
        prop_assert!((polygon_area(&rotated, Some(0.01)) - base).abs() <= base * 1e-9);
    }

    #[test]
    fn prop_point_just_outside_is_never_inside(eps in 1.0e-6f64..10.0, y in 0.0f64..500.0) {
        let p = Point::new(1000.0 + eps, y);
        let first = point_in_polygon(p, &roof());
        prop_assert!(!first);
        prop_assert_eq!(first, point_in_polygon(p, &roof()));
    }
}
