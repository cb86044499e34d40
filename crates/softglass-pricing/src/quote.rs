//! Area, perimeter and cost composition for one window.
//!
//! The film and labor lines are billed on the opening area plus the skirt
//! strip. Edging is billed on the bounding perimeter `2 * (w + h)` whatever
//! the shape, and the fastener count that is billed defaults to the closed
//! form estimate over that same perimeter.

use serde::{Deserialize, Serialize};
use softglass_core::{cm2_to_m2, cm_to_m};
use softglass_designer::{shape_area_cm2, ShapeKind, WindowSpec};
use tracing::debug;

use crate::price_table::PriceTable;

/// Fewest fasteners ever billed for a window.
pub const MIN_BILLED_FASTENERS: usize = 4;

/// Which fastener count the hardware line is billed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FastenerCountPolicy {
    /// `max(4, ceil(2 * (w + h) / step))`
    #[default]
    Estimate,
    /// The number of fasteners actually placed on the layout
    Placed,
}

/// Which patch and cutout counts the accessory lines are billed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessoryCountPolicy {
    /// Explicit positions plus polygons plus the automatic count, as entered
    #[default]
    Requested,
    /// The accessories actually placed on the layout
    Placed,
}

/// Closed-form fastener estimate billed by default.
pub fn fastener_cost_count(spec: &WindowSpec) -> usize {
    let perimeter_cm = 2.0 * (spec.width_cm() + spec.height_cm());
    let count = (perimeter_cm / spec.step_cm()).ceil();
    if count.is_finite() && count > 0.0 {
        (count as usize).max(MIN_BILLED_FASTENERS)
    } else {
        MIN_BILLED_FASTENERS
    }
}

/// Film, edging and labor choices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaterialSelection {
    pub material_id: Option<String>,
    pub edging_color: Option<String>,
    /// Overrides the table's edging price when positive
    pub edging_price_per_m: Option<f64>,
    /// Overrides the table's labor price when positive
    pub labor_price_per_m2: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HardwareSelection {
    pub hardware_id: Option<String>,
    /// Overrides the table's unit price when positive
    pub price_per_piece: Option<f64>,
    pub policy: FastenerCountPolicy,
    /// Fasteners on the computed layout, if one was placed
    pub placed_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtrasSelection {
    /// Patches as requested: positions + polygons + automatic count
    pub patch_count: usize,
    /// Cutouts as requested: positions + polygons + automatic count
    pub cutout_count: usize,
    pub policy: AccessoryCountPolicy,
    /// Patches on the computed layout, if one was placed
    pub placed_patch_count: Option<usize>,
    /// Cutouts on the computed layout, if one was placed
    pub placed_cutout_count: Option<usize>,
    pub has_zipper: bool,
    pub has_pocket: bool,
    pub pocket_size: Option<String>,
}

/// Everything a quote is computed from besides the window itself.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteSelection {
    pub material: MaterialSelection,
    pub hardware: HardwareSelection,
    pub extras: ExtrasSelection,
}

/// One priced line of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LineItem {
    Film,
    Edging,
    Labor,
    Hardware,
    Skirt,
    Patches,
    Cutouts,
    Zipper,
    Pocket,
}

impl LineItem {
    pub fn label(&self) -> &'static str {
        match self {
            LineItem::Film => "Film",
            LineItem::Edging => "Edging",
            LineItem::Labor => "Labor",
            LineItem::Hardware => "Hardware",
            LineItem::Skirt => "Skirt",
            LineItem::Patches => "Patches",
            LineItem::Cutouts => "Cutouts",
            LineItem::Zipper => "Zipper",
            LineItem::Pocket => "Soft entry",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub item: LineItem,
    pub amount: f64,
}

/// Itemized price of one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub shape: ShapeKind,
    pub shape_name: String,
    pub width_cm: f64,
    pub height_cm: f64,
    pub step_cm: f64,
    /// Opening plus skirt
    pub area_m2: f64,
    pub perimeter_m: f64,

    pub material_id: String,
    pub material_name: String,
    pub material_price_per_m2: f64,
    pub film_cost: f64,

    pub edging_color: String,
    pub edging_color_label: String,
    pub edging_price_per_m: f64,
    pub edging_cost: f64,

    pub labor_price_per_m2: f64,
    pub labor_cost: f64,

    /// Count the hardware line is billed on
    pub fasteners_count: usize,
    pub estimated_fasteners_count: usize,
    pub placed_fasteners_count: Option<usize>,
    pub hardware_id: String,
    pub hardware_label: String,
    pub hardware_price_per_piece: f64,
    pub hardware_cost: f64,

    pub skirt_height_cm: f64,
    pub skirt_cost: f64,
    pub patch_count: usize,
    pub patch_cost: f64,
    pub cutout_count: usize,
    pub cutout_cost: f64,
    pub has_zipper: bool,
    pub zipper_cost: f64,
    pub has_pocket: bool,
    pub pocket_size: Option<String>,
    pub pocket_cost: f64,

    /// Sum of all lines rounded to a whole currency unit
    pub total: i64,
}

impl Quote {
    /// Priced lines in display order. Optional extras appear only when
    /// selected.
    pub fn lines(&self) -> Vec<QuoteLine> {
        let mut lines = vec![
            QuoteLine {
                item: LineItem::Film,
                amount: self.film_cost,
            },
            QuoteLine {
                item: LineItem::Edging,
                amount: self.edging_cost,
            },
            QuoteLine {
                item: LineItem::Labor,
                amount: self.labor_cost,
            },
            QuoteLine {
                item: LineItem::Hardware,
                amount: self.hardware_cost,
            },
        ];
        let optional = [
            (self.skirt_height_cm > 0.0, LineItem::Skirt, self.skirt_cost),
            (self.patch_count > 0, LineItem::Patches, self.patch_cost),
            (self.cutout_count > 0, LineItem::Cutouts, self.cutout_cost),
            (self.has_zipper, LineItem::Zipper, self.zipper_cost),
            (self.has_pocket, LineItem::Pocket, self.pocket_cost),
        ];
        lines.extend(
            optional
                .into_iter()
                .filter(|(selected, _, _)| *selected)
                .map(|(_, item, amount)| QuoteLine { item, amount }),
        );
        lines
    }

    /// Unrounded sum of every line.
    pub fn subtotal(&self) -> f64 {
        self.film_cost
            + self.edging_cost
            + self.labor_cost
            + self.hardware_cost
            + self.skirt_cost
            + self.patch_cost
            + self.cutout_cost
            + self.zipper_cost
            + self.pocket_cost
    }
}

/// Computes quotes against one price table.
pub struct QuoteCalculator<'a> {
    table: &'a PriceTable,
}

fn billed_accessories(
    policy: AccessoryCountPolicy,
    requested: usize,
    placed: Option<usize>,
    what: &'static str,
) -> usize {
    match (policy, placed) {
        (AccessoryCountPolicy::Placed, Some(placed)) => placed,
        (AccessoryCountPolicy::Placed, None) => {
            debug!(what, "no placed accessory count supplied, billing the requested count");
            requested
        }
        (AccessoryCountPolicy::Requested, _) => requested,
    }
}

impl<'a> QuoteCalculator<'a> {
    pub fn new(table: &'a PriceTable) -> Self {
        Self { table }
    }

    pub fn calculate(&self, spec: &WindowSpec, selection: &QuoteSelection) -> Quote {
        let table = self.table;
        let (w, h) = (spec.width_cm(), spec.height_cm());

        let skirt_cm2 = if spec.has_skirt() {
            w * spec.skirt_height_cm()
        } else {
            0.0
        };
        let area_m2 = cm2_to_m2(shape_area_cm2(spec) + skirt_cm2);
        let perimeter_m = cm_to_m(2.0 * (w + h));

        let material = table.material(selection.material.material_id.as_deref());
        let material_price = material.map(|m| m.price_per_m2).unwrap_or(0.0);
        let film_cost = area_m2 * material_price;

        // Unknown colours resolve to the table's first colour; the id itself
        // is kept only when the table lists no colours
        let requested_color = selection.material.edging_color.as_deref();
        let edging_color = table
            .edging_color(requested_color)
            .map(|c| c.id.clone())
            .or_else(|| requested_color.map(str::to_string))
            .unwrap_or_default();
        let edging_price = PriceTable::resolve_price(
            selection.material.edging_price_per_m,
            table.edging_price_per_m(),
        );
        let edging_cost = perimeter_m * edging_price;

        let labor_price = PriceTable::resolve_price(
            selection.material.labor_price_per_m2,
            table.labor_price_per_m2,
        );
        let labor_cost = area_m2 * labor_price;

        let hardware = table.hardware_item(selection.hardware.hardware_id.as_deref());
        let hardware_price = PriceTable::resolve_price(
            selection.hardware.price_per_piece,
            hardware.map(|h| h.price_per_piece).unwrap_or(0.0),
        );
        let estimated = fastener_cost_count(spec);
        let billed = match (selection.hardware.policy, selection.hardware.placed_count) {
            (FastenerCountPolicy::Placed, Some(placed)) => placed,
            (FastenerCountPolicy::Placed, None) => {
                debug!("no placed fastener count supplied, billing the estimate");
                estimated
            }
            (FastenerCountPolicy::Estimate, _) => estimated,
        };
        let hardware_cost = billed as f64 * hardware_price;

        let extras_prices = &table.extras;
        let extras = &selection.extras;
        let skirt_cost = if spec.has_skirt() {
            cm_to_m(w) * extras_prices.skirt_price_per_m
        } else {
            0.0
        };
        let patch_count = billed_accessories(
            extras.policy,
            extras.patch_count,
            extras.placed_patch_count,
            "patches",
        );
        let cutout_count = billed_accessories(
            extras.policy,
            extras.cutout_count,
            extras.placed_cutout_count,
            "cutouts",
        );
        let patch_cost = patch_count as f64 * extras_prices.patch_price;
        let cutout_cost = cutout_count as f64 * extras_prices.cutout_price;
        let zipper_cost = if extras.has_zipper {
            extras_prices.zipper_price
        } else {
            0.0
        };
        let pocket_cost = if extras.has_pocket {
            extras_prices.pocket_price
        } else {
            0.0
        };

        let mut quote = Quote {
            shape: spec.shape(),
            shape_name: spec.shape().display_name().to_string(),
            width_cm: w,
            height_cm: h,
            step_cm: spec.step_cm(),
            area_m2,
            perimeter_m,
            material_id: material
                .map(|m| m.id.clone())
                .or_else(|| selection.material.material_id.clone())
                .unwrap_or_default(),
            material_name: material.map(|m| m.label.clone()).unwrap_or_default(),
            material_price_per_m2: material_price,
            film_cost,
            edging_color_label: table.edging_color_label(requested_color),
            edging_color,
            edging_price_per_m: edging_price,
            edging_cost,
            labor_price_per_m2: labor_price,
            labor_cost,
            fasteners_count: billed,
            estimated_fasteners_count: estimated,
            placed_fasteners_count: selection.hardware.placed_count,
            hardware_id: hardware.map(|h| h.id.clone()).unwrap_or_default(),
            hardware_label: hardware.map(|h| h.label.clone()).unwrap_or_default(),
            hardware_price_per_piece: hardware_price,
            hardware_cost,
            skirt_height_cm: spec.skirt_height_cm(),
            skirt_cost,
            patch_count,
            patch_cost,
            cutout_count,
            cutout_cost,
            has_zipper: extras.has_zipper,
            zipper_cost,
            has_pocket: extras.has_pocket,
            pocket_size: extras.pocket_size.clone(),
            pocket_cost,
            total: 0,
        };
        quote.total = quote.subtotal().round() as i64;

        debug!(
            shape = %quote.shape,
            area_m2 = quote.area_m2,
            fasteners = quote.fasteners_count,
            total = quote.total,
            "quote computed"
        );
        quote
    }
}

/// Computes the quote for `spec` against `table`.
pub fn compute_quote(spec: &WindowSpec, selection: &QuoteSelection, table: &PriceTable) -> Quote {
    QuoteCalculator::new(table).calculate(spec, selection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_table::{EdgingColor, ExtrasPrices, HardwareItem, Material};

    fn table() -> PriceTable {
        PriceTable {
            materials: vec![Material {
                id: "pvc700".into(),
                label: "PVC 700".into(),
                price_per_m2: 1400.0,
            }],
            labor_price_per_m2: 300.0,
            hardware: vec![HardwareItem {
                id: "grommet10".into(),
                label: "Grommet 10 mm".into(),
                price_per_piece: 44.0,
            }],
            extras: ExtrasPrices {
                patch_price: 150.0,
                cutout_price: 90.0,
                zipper_price: 1200.0,
                skirt_price_per_m: 250.0,
                pocket_price: 0.0,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_fastener_cost_count() {
        let spec = WindowSpec::new(ShapeKind::Rect, 200.0, 150.0).unwrap();
        assert_eq!(fastener_cost_count(&spec), 24);
        let tiny = WindowSpec::new(ShapeKind::Rect, 10.0, 10.0).unwrap();
        assert_eq!(fastener_cost_count(&tiny), 4);
    }

    #[test]
    fn test_placed_policy_bills_placed_count() {
        let spec = WindowSpec::new(ShapeKind::Rect, 200.0, 150.0).unwrap();
        let mut selection = QuoteSelection::default();
        selection.hardware.policy = FastenerCountPolicy::Placed;
        selection.hardware.placed_count = Some(23);
        let quote = compute_quote(&spec, &selection, &table());
        assert_eq!(quote.fasteners_count, 23);
        assert_eq!(quote.estimated_fasteners_count, 24);
        assert_eq!(quote.hardware_cost, 23.0 * 44.0);

        selection.hardware.placed_count = None;
        let quote = compute_quote(&spec, &selection, &table());
        assert_eq!(quote.fasteners_count, 24);
    }

    #[test]
    fn test_extras_lines() {
        let spec = WindowSpec::new(ShapeKind::Rect, 100.0, 100.0).unwrap();
        let selection = QuoteSelection {
            extras: ExtrasSelection {
                patch_count: 2,
                cutout_count: 1,
                has_zipper: true,
                has_pocket: true,
                pocket_size: Some("60x80".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let quote = compute_quote(&spec, &selection, &table());
        assert_eq!(quote.patch_cost, 300.0);
        assert_eq!(quote.cutout_cost, 90.0);
        assert_eq!(quote.zipper_cost, 1200.0);
        assert_eq!(quote.pocket_cost, 0.0);
        assert_eq!(quote.skirt_cost, 0.0);

        let items: Vec<LineItem> = quote.lines().iter().map(|l| l.item).collect();
        assert!(items.contains(&LineItem::Pocket));
        assert!(!items.contains(&LineItem::Skirt));
        let sum: f64 = quote.lines().iter().map(|l| l.amount).sum();
        assert_eq!(quote.total, sum.round() as i64);
    }

    #[test]
    fn test_accessory_policy() {
        let spec = WindowSpec::new(ShapeKind::Rect, 100.0, 100.0).unwrap();
        let mut selection = QuoteSelection {
            extras: ExtrasSelection {
                patch_count: 5,
                cutout_count: 2,
                placed_patch_count: Some(3),
                placed_cutout_count: Some(2),
                ..Default::default()
            },
            ..Default::default()
        };
        let quote = compute_quote(&spec, &selection, &table());
        assert_eq!(quote.patch_count, 5);
        assert_eq!(quote.patch_cost, 750.0);

        selection.extras.policy = AccessoryCountPolicy::Placed;
        let quote = compute_quote(&spec, &selection, &table());
        assert_eq!(quote.patch_count, 3);
        assert_eq!(quote.patch_cost, 450.0);
        assert_eq!(quote.cutout_cost, 180.0);

        selection.extras.placed_patch_count = None;
        let quote = compute_quote(&spec, &selection, &table());
        assert_eq!(quote.patch_count, 5);
    }

    #[test]
    fn test_unknown_edging_color_reports_fallback() {
        let spec = WindowSpec::new(ShapeKind::Rect, 100.0, 100.0).unwrap();
        let selection = QuoteSelection {
            material: MaterialSelection {
                edging_color: Some("pink".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        // no colours listed: the id is echoed
        let quote = compute_quote(&spec, &selection, &table());
        assert_eq!(quote.edging_color, "pink");
        assert_eq!(quote.edging_color_label, "pink");

        let mut with_colors = table();
        with_colors.edging.colors = vec![EdgingColor {
            id: "black".into(),
            label: "Black".into(),
            ..Default::default()
        }];
        let quote = compute_quote(&spec, &selection, &with_colors);
        assert_eq!(quote.edging_color, "black");
        assert_eq!(quote.edging_color_label, "Black");
    }

    #[test]
    fn test_price_overrides() {
        let spec = WindowSpec::new(ShapeKind::Rect, 100.0, 100.0).unwrap();
        let selection = QuoteSelection {
            material: MaterialSelection {
                labor_price_per_m2: Some(500.0),
                edging_price_per_m: Some(0.0),
                ..Default::default()
            },
            hardware: HardwareSelection {
                price_per_piece: Some(10.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let quote = compute_quote(&spec, &selection, &table());
        assert_eq!(quote.labor_cost, 500.0);
        assert_eq!(quote.edging_price_per_m, 0.0);
        assert_eq!(quote.hardware_price_per_piece, 10.0);
    }
}
