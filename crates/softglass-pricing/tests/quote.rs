use proptest::prelude::*;
use softglass_designer::{ShapeKind, WindowSpec};
use softglass_pricing::{
    compute_quote, fastener_cost_count, MaterialSelection, PriceTable, QuoteSelection,
};

const PRICES: &str = r##"{
    "materials": [{"id": "pvc700", "label": "PVC 700", "pricePerM2": 1400}],
    "edging": {
        "pricePerM": 80,
        "colors": [{"id": "black", "label": "Black", "fill": "#111", "stroke": "#000"}]
    },
    "laborPricePerM2": 300,
    "hardware": [{"id": "grommet10", "label": "Grommet 10 mm", "pricePerPiece": 44}],
    "extras": {"skirtPricePerM": 250}
}"##;

fn table() -> PriceTable {
    PriceTable::from_json_str(PRICES).unwrap()
}

fn selection() -> QuoteSelection {
    QuoteSelection {
        material: MaterialSelection {
            material_id: Some("pvc700".into()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_rectangle_quote() {
    let spec = WindowSpec::new(ShapeKind::Rect, 200.0, 150.0).unwrap();
    let quote = compute_quote(&spec, &selection(), &table());

    assert_eq!(quote.area_m2, 3.0);
    assert_eq!(quote.perimeter_m, 7.0);
    assert_eq!(quote.film_cost, 4200.0);
    assert_eq!(quote.edging_cost, 560.0);
    assert_eq!(quote.labor_cost, 900.0);
    assert_eq!(quote.fasteners_count, 24);
    assert_eq!(quote.hardware_cost, 24.0 * 44.0);
    assert_eq!(quote.total, 4200 + 560 + 900 + 24 * 44);
    assert_eq!(quote.shape_name, "Rectangle");
    assert_eq!(quote.material_name, "PVC 700");
    assert_eq!(quote.edging_color, "black");
    assert_eq!(quote.edging_color_label, "Black");
}

#[test]
fn test_skirt_adds_area_and_line() {
    let spec = WindowSpec::new(ShapeKind::Rect, 200.0, 150.0)
        .unwrap()
        .with_skirt_height(30.0);
    let quote = compute_quote(&spec, &selection(), &table());

    assert!((quote.area_m2 - 3.6).abs() < 1e-12);
    assert_eq!(quote.skirt_cost, 2.0 * 250.0);
    // edging stays on the window perimeter
    assert_eq!(quote.edging_cost, 560.0);
}

#[test]
fn test_triangle_area() {
    let spec = WindowSpec::new(ShapeKind::Triangle, 100.0, 100.0).unwrap();
    let quote = compute_quote(&spec, &selection(), &table());
    assert_eq!(quote.area_m2, 0.5);
    // perimeter is billed on the bounding rectangle
    assert_eq!(quote.perimeter_m, 4.0);
}

#[test]
fn test_unknown_material_falls_back() {
    let spec = WindowSpec::new(ShapeKind::Rect, 100.0, 100.0).unwrap();
    let mut selection = selection();
    selection.material.material_id = Some("glass".into());
    let quote = compute_quote(&spec, &selection, &table());
    assert_eq!(quote.material_id, "pvc700");
    assert_eq!(quote.film_cost, 1400.0);
}

#[test]
fn test_quote_json_is_camel_case() {
    let spec = WindowSpec::new(ShapeKind::Arch, 100.0, 150.0).unwrap();
    let quote = compute_quote(&spec, &selection(), &table());
    let json = serde_json::to_value(&quote).unwrap();
    assert_eq!(json["shape"], "arch");
    assert!(json.get("filmCost").is_some());
    assert!(json.get("fastenersCount").is_some());
    assert!(json.get("total").unwrap().is_i64());
}

proptest! {
    #[test]
    fn prop_rectangle_area_exact(w in 0.1f64..1000.0, h in 0.1f64..1000.0) {
        let spec = WindowSpec::new(ShapeKind::Rect, w, h).unwrap();
        let quote = compute_quote(&spec, &selection(), &table());
        prop_assert_eq!(quote.area_m2, w * h / 10_000.0);
    }

    #[test]
    fn prop_fastener_count_at_least_four(
        w in 0.1f64..2000.0,
        h in 0.1f64..2000.0,
        step in -10.0f64..500.0,
    ) {
        let spec = WindowSpec::new(ShapeKind::Rect, w, h).unwrap().with_step(step);
        prop_assert!(fastener_cost_count(&spec) >= 4);
    }

    #[test]
    fn prop_total_is_rounded_sum(w in 1.0f64..500.0, h in 1.0f64..500.0, kind_index in 0usize..6) {
        let spec = WindowSpec::new(ShapeKind::ALL[kind_index], w, h).unwrap();
        let quote = compute_quote(&spec, &selection(), &table());
        let sum: f64 = quote.lines().iter().map(|l| l.amount).sum();
        prop_assert!((quote.total as f64 - sum).abs() <= 0.5 + 1e-6);
    }
}
