use proptest::prelude::*;
use sitemark_core::constants::{MAX_ZOOM, MIN_ZOOM};
use sitemark_designer::{Bounds, Point, Viewport};

#[test]
fn test_default_view_is_identity() {
    let vp = Viewport::new(800.0, 600.0);
    let p = Point::new(123.0, 456.0);
    assert_eq!(vp.to_world(p), p);
    assert_eq!(vp.to_screen(p), p);
}

#[test]
fn test_zoom_at_keeps_cursor_point_fixed() {
    let mut vp = Viewport::new(800.0, 600.0);
    let cursor = Point::new(200.0, 150.0);
    let before = vp.to_world(cursor);
    vp.zoom_at(cursor, 2.0);
    assert_eq!(vp.zoom(), 2.0);
    let after = vp.to_world(cursor);
    assert!(before.distance_to(&after) < 1e-9);
}

#[test]
fn test_zoom_is_clamped() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(1000.0);
    assert_eq!(vp.zoom(), MAX_ZOOM);
    vp.zoom_at(Point::new(0.0, 0.0), 1e-6);
    assert_eq!(vp.zoom(), MIN_ZOOM);
}

#[test]
fn test_fit_to_view_centres_bounds() {
    let mut vp = Viewport::new(1000.0, 500.0);
    vp.fit_to_view(&Bounds::new(0.0, 0.0, 2000.0, 500.0));
    let centre = vp.to_screen(Point::new(1000.0, 250.0));
    assert!((centre.x - 500.0).abs() < 1e-9);
    assert!((centre.y - 250.0).abs() < 1e-9);
    let visible = vp.visible_bounds();
    assert!(visible.contains(Point::new(0.0, 0.0)));
    assert!(visible.contains(Point::new(2000.0, 500.0)));
}

#[test]
fn test_fit_to_empty_bounds_is_a_no_op() {
    let mut vp = Viewport::new(1000.0, 500.0);
    vp.fit_to_view(&Bounds::new(5.0, 5.0, 5.0, 5.0));
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.offset(), Point::new(0.0, 0.0));
}

#[test]
fn test_screen_distance_shrinks_when_zoomed_in() {
    let mut vp = Viewport::new(800.0, 600.0);
    vp.set_zoom(4.0);
    assert_eq!(vp.screen_to_world_distance(12.0), 3.0);
}

proptest! {
    #[test]
    fn prop_screen_world_round_trip(
        zoom in MIN_ZOOM..MAX_ZOOM,
        ox in -5000.0f64..5000.0,
        oy in -5000.0f64..5000.0,
        x in -10000.0f64..10000.0,
        y in -10000.0f64..10000.0,
    ) {
        let mut vp = Viewport::new(800.0, 600.0);
        vp.set_zoom(zoom);
        vp.set_offset(ox, oy);
        let p = Point::new(x, y);
        let back = vp.to_world(vp.to_screen(p));
        prop_assert!(back.distance_to(&p) < 1e-6);
    }
}
