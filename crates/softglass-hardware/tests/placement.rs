use proptest::prelude::*;
use softglass_designer::{build_outline, ShapeKind, WindowSpec};
use softglass_hardware::{
    place_fasteners, plan_edge, EdgeRef, FastenerKind, FastenerLayout, MAX_STEP_CM, MIN_STEP_CM,
};

fn layout_for(spec: &WindowSpec) -> FastenerLayout {
    place_fasteners(spec, &build_outline(spec))
}

#[test]
fn test_rectangle_uses_constrained_plan() {
    let spec = WindowSpec::new(ShapeKind::Rect, 200.0, 150.0).unwrap();
    let layout = layout_for(&spec);
    // 8 top grommets, 7 bottom brackets, 4 + 4 side brackets
    assert_eq!(layout.count_of(FastenerKind::Grommet), 8);
    assert_eq!(layout.count_of(FastenerKind::Bracket), 15);
    assert_eq!(layout.count(), 23);

    let corners: Vec<_> = layout
        .on_edge(EdgeRef::Bottom)
        .filter(|p| p.position.y == 145.0)
        .map(|p| p.position.x)
        .collect();
    assert_eq!(corners, vec![2.5, 197.5]);

    // a skirt moves nothing
    let skirted = layout_for(&spec.clone().with_skirt_height(30.0));
    assert_eq!(skirted, layout);
}

#[test]
fn test_trapezoid_walks_every_edge() {
    let spec = WindowSpec::new(ShapeKind::Trapezoid, 120.0, 90.0)
        .unwrap()
        .with_top_delta(40.0);
    let layout = layout_for(&spec);
    assert_eq!(layout.count_of(FastenerKind::Bracket), 0);
    for edge in 0..4 {
        assert!(layout.on_edge(EdgeRef::Edge(edge)).count() >= 2);
    }
    // top edge is 80 wide: 80 / 30 -> 2 steps, 3 grommets
    assert_eq!(layout.on_edge(EdgeRef::Edge(0)).count(), 3);
}

#[test]
fn test_arch_covers_walls_and_arc() {
    let spec = WindowSpec::new(ShapeKind::Arch, 100.0, 150.0).unwrap();
    let layout = layout_for(&spec);
    assert!(layout.on_edge(EdgeRef::Arc).count() > 1);
    assert_eq!(
        layout.on_edge(EdgeRef::LeftWall).count(),
        layout.on_edge(EdgeRef::RightWall).count()
    );
    assert!(layout.points.iter().all(|p| p.kind == FastenerKind::Grommet));
}

#[test]
fn test_layout_serializes_camel_case() {
    let spec = WindowSpec::new(ShapeKind::Triangle, 60.0, 60.0).unwrap();
    let json = serde_json::to_value(layout_for(&spec)).unwrap();
    let first = &json["points"][0];
    assert_eq!(first["kind"], "grommet");
    assert!(first.get("labelCm").is_some());
}

proptest! {
    #[test]
    fn prop_realized_step_stays_in_range(
        length in 0.0f64..2000.0,
        target in 0.5f64..200.0,
    ) {
        if let Some(plan) = plan_edge(length, 2.5, 2.5, target) {
            if plan.usable >= MIN_STEP_CM {
                prop_assert!(plan.step >= MIN_STEP_CM - 1e-9);
            }
            prop_assert!(plan.step <= MAX_STEP_CM + 1e-9 || plan.usable < MIN_STEP_CM);
            prop_assert!((plan.step * plan.intervals as f64 - plan.usable).abs() < 1e-6);
        } else {
            prop_assert!(length <= 5.0);
        }
    }

    #[test]
    fn prop_every_shape_gets_fasteners(
        w in 1.0f64..600.0,
        h in 1.0f64..600.0,
        step in 1.0f64..80.0,
        kind_index in 0usize..6,
    ) {
        let kind = ShapeKind::ALL[kind_index];
        let spec = WindowSpec::new(kind, w, h).unwrap().with_step(step);
        let layout = layout_for(&spec);
        prop_assert!(layout.count() >= 4);
        prop_assert!(layout.points.iter().all(|p| p.position.x.is_finite() && p.position.y.is_finite()));
    }
}
