use super::*;

fn close(a: f64, b: f64, rel: f64) -> bool {
    (a - b).abs() <= rel * b.abs().max(1.0)
}

#[test]
fn inner_radius_follows_thickness_and_is_monotonic() {
    let outer = 200.0;
    let mut prev = f64::INFINITY;
    for t in 0..=100 {
        let inner = inner_radius_for(outer, f64::from(t));
        assert!(close(inner, outer * (1.0 - f64::from(t) / 100.0), 1e-12));
        assert!(inner <= prev);
        prev = inner;
    }
    assert_eq!(inner_radius_for(outer, 0.0), outer);
    assert_eq!(inner_radius_for(outer, 100.0), 0.0);
}

#[test]
fn inner_radius_clamps_out_of_range_thickness() {
    assert_eq!(inner_radius_for(100.0, -20.0), 100.0);
    assert_eq!(inner_radius_for(100.0, 250.0), 0.0);
    assert_eq!(inner_radius_for(100.0, f64::NAN), 100.0);
}

#[test]
fn from_controls_uses_half_the_size() {
    for s in [0.0, 1.0, 100.0, 333.0, 512.0] {
        let g = RingGeometry::from_controls(Canvas::ICON, s, 50.0);
        assert_eq!(g.outer_radius(), s / 2.0);
        assert_eq!(g.inner_radius(), s / 4.0);
        assert_eq!(g.center(), Point::new(256.0, 256.0));
    }
}

#[test]
fn radii_are_clamped_into_invariant() {
    let g = RingGeometry::new(Point::ORIGIN, 900.0, 1000.0);
    assert_eq!(g.outer_radius(), MAX_OUTER_RADIUS);
    assert_eq!(g.inner_radius(), MAX_OUTER_RADIUS);

    let g = RingGeometry::new(Point::ORIGIN, -5.0, -1.0);
    assert_eq!(g.outer_radius(), 0.0);
    assert_eq!(g.inner_radius(), 0.0);

    let g = RingGeometry::new(Point::ORIGIN, f64::NAN, 3.0);
    assert_eq!(g.outer_radius(), 0.0);
    assert_eq!(g.inner_radius(), 0.0);
}

#[test]
fn outer_radius_fits_the_canvas() {
    assert_eq!(MAX_OUTER_RADIUS, Canvas::ICON.max_radius());

    let small = Canvas::new(200, 120).unwrap();
    let g = RingGeometry::from_controls(small, 512.0, 50.0);
    assert_eq!(g.outer_radius(), 60.0);
    assert_eq!(g.inner_radius(), 30.0);
    assert_eq!(g.center(), Point::new(100.0, 60.0));
}

#[test]
fn circles_have_opposite_winding() {
    let mut outer = BezPath::new();
    push_circle(&mut outer, Point::new(50.0, 50.0), 40.0, TAU);
    let mut inner = BezPath::new();
    push_circle(&mut inner, Point::new(50.0, 50.0), 20.0, -TAU);

    let (a_outer, a_inner) = (outer.area(), inner.area());
    assert!(a_outer.signum() != a_inner.signum());
    assert!(close(a_outer.abs(), PI * 1600.0, 1e-3));
    assert!(close(a_inner.abs(), PI * 400.0, 1e-3));
}

#[test]
fn ring_path_area_matches_analytic_area() {
    let g = RingGeometry::new(Point::new(256.0, 256.0), 256.0, 128.0);
    assert!(close(g.to_path().area().abs(), g.area(), 1e-3));
}

#[test]
fn zero_inner_radius_is_a_solid_disk() {
    let g = RingGeometry::from_controls(Canvas::ICON, 512.0, 100.0);
    assert_eq!(g.inner_radius(), 0.0);
    let path = g.to_path();
    let moves = path
        .elements()
        .iter()
        .filter(|el| matches!(el, kurbo::PathEl::MoveTo(_)))
        .count();
    assert_eq!(moves, 1);
    assert!(g.contains(g.center()));
    assert!(close(path.area().abs(), PI * 256.0 * 256.0, 1e-3));
}

#[test]
fn equal_radii_give_an_empty_ring() {
    let g = RingGeometry::from_controls(Canvas::ICON, 400.0, 0.0);
    assert_eq!(g.inner_radius(), g.outer_radius());
    assert_eq!(g.area(), 0.0);
    assert!(!g.contains(Point::new(256.0, 56.0)));
    assert!(g.to_path().area().abs() < 1.0);
}

#[test]
fn zero_size_produces_no_path() {
    let g = RingGeometry::from_controls(Canvas::ICON, 0.0, 50.0);
    assert!(g.to_path().elements().is_empty());
}

#[test]
fn contains_checks_the_band() {
    let g = RingGeometry::new(Point::new(0.0, 0.0), 10.0, 5.0);
    assert!(!g.contains(Point::new(0.0, 0.0)));
    assert!(!g.contains(Point::new(4.9, 0.0)));
    assert!(g.contains(Point::new(5.0, 0.0)));
    assert!(g.contains(Point::new(0.0, 7.5)));
    assert!(g.contains(Point::new(-10.0, 0.0)));
    assert!(!g.contains(Point::new(7.5, 7.5)));
}

#[test]
fn svg_path_data_describes_the_same_ring() {
    let g = RingGeometry::new(Point::new(256.0, 256.0), 200.0, 120.0);
    let d = g.to_svg_path_data();
    assert!(d.starts_with("M 256,56 A 200,200 0 1,1 256,456"));
    assert!(d.contains("M 256,136 A 120,120 0 1,0 256,376"));
    let parsed = BezPath::from_svg(&d).unwrap();
    assert!(close(parsed.area().abs(), g.area(), 1e-3));
}
