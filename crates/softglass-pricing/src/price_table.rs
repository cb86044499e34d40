//! The externally supplied price list.
//!
//! Field names follow the JSON the price editor stores, so a table can be
//! deserialized directly. Every section is optional and defaults to empty.
//! Lookups by id never fail: an unknown id resolves to the first entry of
//! its list.

use serde::{Deserialize, Serialize};
use softglass_core::Result;
use softglass_designer::window::DEFAULT_STEP_CM;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Material {
    pub id: String,
    pub label: String,
    pub price_per_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HardwareItem {
    pub id: String,
    pub label: String,
    pub price_per_piece: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgingColor {
    pub id: String,
    pub label: String,
    /// Fill colour used when drawing the edging
    pub fill: String,
    pub stroke: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EdgingPrices {
    pub price_per_m: f64,
    /// Price presets offered to the user
    pub options: Vec<f64>,
    pub colors: Vec<EdgingColor>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtrasPrices {
    pub patch_price: f64,
    pub cutout_price: f64,
    pub zipper_price: f64,
    pub skirt_price_per_m: f64,
    pub pocket_price: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceDefaults {
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub grommet_step: Option<f64>,
    pub edging_price_per_m: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriceTable {
    pub materials: Vec<Material>,
    pub edging: EdgingPrices,
    pub labor_price_per_m2: f64,
    pub hardware: Vec<HardwareItem>,
    pub extras: ExtrasPrices,
    pub defaults: PriceDefaults,
    pub grommet_step_options: Vec<f64>,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn lookup<'a, T>(
    items: &'a [T],
    id: Option<&str>,
    list: &'static str,
    id_of: impl Fn(&T) -> &str,
) -> Option<&'a T> {
    if let Some(id) = id {
        if let Some(found) = items.iter().find(|item| id_of(item) == id) {
            return Some(found);
        }
    }
    let first = items.first();
    debug!(
        list,
        requested = id.unwrap_or(""),
        fallback = first.map(&id_of).unwrap_or(""),
        "unknown price reference, using first entry"
    );
    first
}

impl PriceTable {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Material by id, falling back to the first material.
    pub fn material(&self, id: Option<&str>) -> Option<&Material> {
        lookup(&self.materials, id, "materials", |m| m.id.as_str())
    }

    /// Hardware item by id, falling back to the first item.
    pub fn hardware_item(&self, id: Option<&str>) -> Option<&HardwareItem> {
        lookup(&self.hardware, id, "hardware", |h| h.id.as_str())
    }

    /// Edging colour by id, falling back to the first colour.
    pub fn edging_color(&self, id: Option<&str>) -> Option<&EdgingColor> {
        lookup(&self.edging.colors, id, "edging colors", |c| c.id.as_str())
    }

    /// Label shown for an edging colour; the id itself when the table lists
    /// no colours.
    pub fn edging_color_label(&self, id: Option<&str>) -> String {
        match self.edging_color(id) {
            Some(color) if !color.label.is_empty() => color.label.clone(),
            Some(color) => color.id.clone(),
            None => id.unwrap_or_default().to_string(),
        }
    }

    /// Edging price per metre: the edging section, then the defaults.
    pub fn edging_price_per_m(&self) -> f64 {
        positive(Some(self.edging.price_per_m))
            .or_else(|| positive(self.defaults.edging_price_per_m))
            .unwrap_or(0.0)
    }

    /// Step the table suggests: `defaults.grommetStep`, then the first
    /// step option.
    pub fn step_option_cm(&self) -> Option<f64> {
        positive(self.defaults.grommet_step)
            .or_else(|| positive(self.grommet_step_options.first().copied()))
    }

    /// Fastener step used when a request names none.
    pub fn default_step_cm(&self) -> f64 {
        self.step_option_cm().unwrap_or(DEFAULT_STEP_CM)
    }

    /// Resolves a request override against a table price: missing or
    /// non-positive overrides use the table.
    pub fn resolve_price(override_price: Option<f64>, table_price: f64) -> f64 {
        positive(override_price).unwrap_or(table_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r##"{
        "materials": [
            {"id": "pvc500", "label": "PVC 500 mkm", "pricePerM2": 1100},
            {"id": "pvc700", "label": "PVC 700 mkm", "pricePerM2": 1400}
        ],
        "edging": {
            "pricePerM": 80,
            "options": [80, 100, 120],
            "colors": [
                {"id": "black", "label": "Black", "fill": "#111827", "stroke": "#000000"},
                {"id": "brown", "label": "Brown", "fill": "#7c4a2d", "stroke": "#5b3520"}
            ]
        },
        "laborPricePerM2": 300,
        "hardware": [{"id": "grommet10", "label": "Grommet 10 mm", "pricePerPiece": 44}],
        "defaults": {"widthCm": 200, "heightCm": 200, "grommetStep": 35},
        "grommetStepOptions": [30, 40]
    }"##;

    #[test]
    fn test_parse_table() {
        let table = PriceTable::from_json_str(TABLE).unwrap();
        assert_eq!(table.materials.len(), 2);
        assert_eq!(table.edging.options, vec![80.0, 100.0, 120.0]);
        assert_eq!(table.labor_price_per_m2, 300.0);
        assert_eq!(table.extras, ExtrasPrices::default());
        assert_eq!(table.default_step_cm(), 35.0);
    }

    #[test]
    fn test_lookup_falls_back_to_first() {
        let table = PriceTable::from_json_str(TABLE).unwrap();
        assert_eq!(table.material(Some("pvc700")).unwrap().price_per_m2, 1400.0);
        assert_eq!(table.material(Some("glass")).unwrap().id, "pvc500");
        assert_eq!(table.material(None).unwrap().id, "pvc500");
        assert_eq!(table.hardware_item(Some("bracket")).unwrap().id, "grommet10");
        assert_eq!(table.edging_color_label(Some("brown")), "Brown");
        assert_eq!(table.edging_color_label(Some("white")), "Black");
    }

    #[test]
    fn test_empty_table() {
        let table = PriceTable::from_json_str("{}").unwrap();
        assert!(table.material(Some("pvc700")).is_none());
        assert_eq!(table.edging_color_label(Some("white")), "white");
        assert_eq!(table.default_step_cm(), 30.0);
        assert_eq!(table.edging_price_per_m(), 0.0);
    }

    #[test]
    fn test_step_fallback_chain() {
        let mut table = PriceTable {
            grommet_step_options: vec![25.0, 40.0],
            ..Default::default()
        };
        assert_eq!(table.default_step_cm(), 25.0);
        table.defaults.grommet_step = Some(0.0);
        assert_eq!(table.default_step_cm(), 25.0);
        table.defaults.grommet_step = Some(45.0);
        assert_eq!(table.default_step_cm(), 45.0);
    }

    #[test]
    fn test_resolve_price() {
        assert_eq!(PriceTable::resolve_price(Some(120.0), 80.0), 120.0);
        assert_eq!(PriceTable::resolve_price(Some(0.0), 80.0), 80.0);
        assert_eq!(PriceTable::resolve_price(Some(-5.0), 80.0), 80.0);
        assert_eq!(PriceTable::resolve_price(None, 80.0), 80.0);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = PriceTable::from_json_str("{\"materials\": 3}").unwrap_err();
        assert!(matches!(err, softglass_core::Error::Serialization(_)));
    }
}
