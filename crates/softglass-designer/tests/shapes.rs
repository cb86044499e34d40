use proptest::prelude::*;
use softglass_core::geometry::signed_area;
use softglass_designer::{build_outline, shape_area_cm2, Outline, ShapeKind, WindowSpec};

fn spec_for(kind: ShapeKind, w: f64, h: f64, param: f64) -> WindowSpec {
    WindowSpec::new(kind, w, h)
        .unwrap()
        .with_top_delta(param)
        .with_flat_top_height(param)
        .with_arch_height(Some(param))
}

#[test]
fn test_trapezoid_with_zero_delta_matches_rectangle() {
    let rect = WindowSpec::new(ShapeKind::Rect, 180.0, 120.0).unwrap();
    let trap = WindowSpec::new(ShapeKind::Trapezoid, 180.0, 120.0)
        .unwrap()
        .with_top_delta(0.0);
    assert_eq!(shape_area_cm2(&trap), shape_area_cm2(&rect));
}

#[test]
fn test_triangle_area() {
    let spec = WindowSpec::new(ShapeKind::Triangle, 100.0, 100.0).unwrap();
    assert_eq!(shape_area_cm2(&spec), 5_000.0);
    assert_eq!(build_outline(&spec).vertices().len(), 3);
}

#[test]
fn test_trapezoid_oversized_delta_is_clamped() {
    let spec = WindowSpec::new(ShapeKind::Trapezoid, 100.0, 50.0)
        .unwrap()
        .with_top_delta(150.0);
    assert_eq!(spec.params().top_delta_cm, 0.0);
    assert_eq!(shape_area_cm2(&spec), 5_000.0);
}

#[test]
fn test_every_shape_is_clockwise() {
    for kind in ShapeKind::ALL {
        let spec = spec_for(kind, 120.0, 160.0, 40.0);
        let points = build_outline(&spec).flatten(32);
        assert!(
            signed_area(&points) > 0.0,
            "{} outline is not clockwise",
            kind
        );
    }
}

proptest! {
    #[test]
    fn prop_polygon_area_matches_outline(
        w in 1.0f64..500.0,
        h in 1.0f64..500.0,
        param in -50.0f64..600.0,
        kind_index in 0usize..5,
    ) {
        let kind = ShapeKind::ALL[kind_index];
        let spec = spec_for(kind, w, h, param);
        let outline = build_outline(&spec);
        if let Outline::Polygon { vertices } = &outline {
            let area = shape_area_cm2(&spec);
            let shoelace = signed_area(vertices);
            prop_assert!((area - shoelace).abs() <= 1e-6 * area.max(1.0));
        }
    }

    #[test]
    fn prop_outline_is_valid(
        w in 0.5f64..1000.0,
        h in 0.5f64..1000.0,
        param in -100.0f64..1000.0,
        kind_index in 0usize..6,
    ) {
        let kind = ShapeKind::ALL[kind_index];
        let spec = spec_for(kind, w, h, param);
        let outline = build_outline(&spec);
        prop_assert!(outline.vertices().len() >= 3);
        prop_assert!(shape_area_cm2(&spec) > 0.0);
    }

    #[test]
    fn prop_rectangle_area_is_exact(w in 0.1f64..2000.0, h in 0.1f64..2000.0) {
        let spec = WindowSpec::new(ShapeKind::Rect, w, h).unwrap();
        prop_assert_eq!(shape_area_cm2(&spec), w * h);
    }
}
