use softglass_core::Point;
use softglass_designer::{build_outline, DrawingSurface, LayoutProjector, Outline, ShapeKind, WindowSpec};

#[test]
fn test_scale_uses_height_plus_skirt() {
    let surface = DrawingSurface::default();
    // 360 / (100 + 20) = 3.0 beats 440 / 100 = 4.4
    let spec = WindowSpec::new(ShapeKind::Rect, 100.0, 100.0)
        .unwrap()
        .with_skirt_height(20.0);
    let projector = LayoutProjector::for_spec(&surface, &spec);
    assert_eq!(projector.scale(), 3.0);
    assert_eq!(projector.padding(), 40.0);
}

#[test]
fn test_projected_outline_fits_surface() {
    let surface = DrawingSurface::default();
    for kind in ShapeKind::ALL {
        let spec = WindowSpec::new(kind, 310.0, 95.0).unwrap();
        let projector = LayoutProjector::for_spec(&surface, &spec);
        let projected = projector.project_outline(&build_outline(&spec));
        for p in projected.flatten(16) {
            assert!(p.x >= surface.padding - 1e-9);
            assert!(p.x <= surface.width - surface.padding + 1e-9);
            assert!(p.y >= surface.padding - 1e-9);
            assert!(p.y <= surface.height - surface.padding + 1e-9);
        }
    }
}

#[test]
fn test_projected_arc_scales_radius() {
    let spec = WindowSpec::new(ShapeKind::Arch, 100.0, 180.0).unwrap();
    let projector = LayoutProjector::for_spec(&DrawingSurface::default(), &spec);
    match projector.project_outline(&build_outline(&spec)) {
        Outline::Arched { arc, .. } => {
            assert_eq!(arc.radius, 50.0 * projector.scale());
            assert_eq!(arc.center, projector.project(&Point::new(50.0, 50.0)));
        }
        other => panic!("expected arched outline, got {:?}", other),
    }
}
