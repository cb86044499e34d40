//! Request orchestration.
//!
//! A [`QuoteRequest`] arrives as flat camelCase JSON. The [`Engine`] turns it
//! into a fresh [`WindowSpec`], builds the outline, places fasteners and
//! accessories, prices the result and projects the layout onto the drawing
//! surface. Nothing is shared between computations.

use serde::{Deserialize, Serialize};
use softglass_core::{Point, Result};
use softglass_designer::{
    build_outline, parse_positions_cm, place_extras, DrawingSurface, ExtrasLayout,
    ExtrasOverrides, LayoutProjector, Outline, PolygonCm, PositionCm, ShapeKind, WindowSpec,
};
use softglass_hardware::{place_fasteners, FastenerLayout, FastenerPoint};
use softglass_pricing::{
    compute_quote, ExtrasSelection, HardwareSelection, MaterialSelection, PriceTable, Quote,
    QuoteSelection,
};
use softglass_settings::EngineConfig;
use tracing::{debug, info};

/// One window as submitted by a client.
///
/// Field names accept both the `...Cm` spelling and the short names the
/// web form posts (`topDelta`, `grommetStep`, `hardwareType`, ...).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteRequest {
    pub shape: ShapeKind,
    pub width_cm: Option<f64>,
    pub height_cm: Option<f64>,
    #[serde(alias = "topDelta")]
    pub top_delta_cm: Option<f64>,
    #[serde(alias = "flatTopHeight")]
    pub flat_top_height_cm: Option<f64>,
    #[serde(alias = "archHeight")]
    pub arch_height_cm: Option<f64>,
    pub frame_cm: Option<f64>,
    #[serde(alias = "skirtHeight")]
    pub skirt_height_cm: Option<f64>,
    #[serde(alias = "grommetStep")]
    pub step_cm: Option<f64>,

    pub material_id: Option<String>,
    pub edging_color: Option<String>,
    pub edging_price_per_m: Option<f64>,
    pub labor_price_per_m2: Option<f64>,
    #[serde(alias = "hardwareType")]
    pub hardware_id: Option<String>,
    pub hardware_price_per_piece: Option<f64>,

    /// Automatic patches when no explicit positions are given
    pub patch_count: u32,
    /// Automatic cutouts when no explicit positions are given
    #[serde(alias = "sideCutouts")]
    pub cutout_count: u32,
    pub has_zipper: bool,
    pub has_pocket: bool,
    pub pocket_size: Option<String>,

    pub patch_positions: Vec<PositionCm>,
    pub cutout_positions: Vec<PositionCm>,
    pub patch_polygons: Vec<PolygonCm>,
    pub cutout_polygons: Vec<PolygonCm>,
    /// `"x1,y1; x2,y2"`, used when `patchPositions` is empty
    pub patch_positions_text: Option<String>,
    /// `"x1,y1; x2,y2"`, used when `cutoutPositions` is empty
    pub cutout_positions_text: Option<String>,
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

fn positions_or_text(positions: &[PositionCm], text: Option<&str>) -> Vec<PositionCm> {
    if positions.is_empty() {
        text.map(parse_positions_cm).unwrap_or_default()
    } else {
        positions.to_vec()
    }
}

impl QuoteRequest {
    /// Accessory overrides with text positions resolved.
    pub fn extras_overrides(&self) -> ExtrasOverrides {
        ExtrasOverrides {
            patch_positions: positions_or_text(
                &self.patch_positions,
                self.patch_positions_text.as_deref(),
            ),
            cutout_positions: positions_or_text(
                &self.cutout_positions,
                self.cutout_positions_text.as_deref(),
            ),
            patch_polygons: self.patch_polygons.clone(),
            cutout_polygons: self.cutout_polygons.clone(),
            patch_count: self.patch_count,
            cutout_count: self.cutout_count,
            has_zipper: self.has_zipper,
        }
    }
}

/// Outline, fasteners and accessories in window centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowLayout {
    pub outline: Outline,
    pub fasteners: FastenerLayout,
    pub extras: ExtrasLayout,
}

/// The same layout in drawing-surface pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Drawing {
    pub surface: DrawingSurface,
    /// Pixels per centimetre
    pub scale: f64,
    pub outline: Outline,
    /// Fasteners with pixel positions; labels stay in centimetres
    pub fasteners: Vec<FastenerPoint>,
    pub extras: ExtrasLayout,
}

impl Drawing {
    fn project(surface: &DrawingSurface, spec: &WindowSpec, layout: &WindowLayout) -> Self {
        let projector = LayoutProjector::for_spec(surface, spec);
        Self {
            surface: *surface,
            scale: projector.scale(),
            outline: projector.project_outline(&layout.outline),
            fasteners: layout
                .fasteners
                .points
                .iter()
                .map(|f| FastenerPoint {
                    position: projector.project(&f.position),
                    ..*f
                })
                .collect(),
            extras: projector.project_extras(&layout.extras),
        }
    }

    /// Pixel positions of every fastener.
    pub fn fastener_positions(&self) -> Vec<Point> {
        self.fasteners.iter().map(|f| f.position).collect()
    }
}

/// Everything derived from one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Computation {
    pub spec: WindowSpec,
    pub layout: WindowLayout,
    pub quote: Quote,
    pub drawing: Drawing,
}

/// Computes layouts and quotes against one configuration and price table.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
    prices: PriceTable,
}

impl Engine {
    pub fn new(config: EngineConfig, prices: PriceTable) -> Self {
        Self { config, prices }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Step for a request: the request, then the price table, then the
    /// configured default.
    pub fn resolve_step(&self, request: &QuoteRequest) -> f64 {
        positive(request.step_cm)
            .or_else(|| self.prices.step_option_cm())
            .unwrap_or(self.config.default_step_cm)
    }

    /// Validates the request dimensions and builds the window spec.
    ///
    /// Missing, non-finite or non-positive width or height is the only
    /// error; every other parameter is clamped.
    pub fn build_spec(&self, request: &QuoteRequest) -> Result<WindowSpec> {
        let mut spec =
            WindowSpec::from_dimensions(request.shape, request.width_cm, request.height_cm)?
                .with_frame(request.frame_cm.unwrap_or(self.config.frame_cm))
                .with_skirt_height(request.skirt_height_cm.unwrap_or(0.0))
                .with_step(self.resolve_step(request));

        // Shape parameters only apply to their own shapes
        match request.shape {
            ShapeKind::Trapezoid => {
                spec = spec.with_top_delta(request.top_delta_cm.unwrap_or(0.0));
            }
            ShapeKind::AngledRight | ShapeKind::AngledLeft => {
                spec = spec.with_flat_top_height(request.flat_top_height_cm.unwrap_or(0.0));
            }
            ShapeKind::Arch => {
                spec = spec.with_arch_height(request.arch_height_cm);
            }
            ShapeKind::Rect | ShapeKind::Triangle => {}
        }
        Ok(spec)
    }

    /// Builds the layout for `spec`.
    pub fn layout(&self, spec: &WindowSpec, overrides: &ExtrasOverrides) -> WindowLayout {
        let outline = build_outline(spec);
        let fasteners = place_fasteners(spec, &outline);
        let extras = place_extras(spec, overrides);
        WindowLayout {
            outline,
            fasteners,
            extras,
        }
    }

    /// Runs the full computation for one request.
    pub fn compute(&self, request: &QuoteRequest) -> Result<Computation> {
        let spec = self.build_spec(request)?;
        debug!(?spec, "window spec built");

        let overrides = request.extras_overrides();
        let layout = self.layout(&spec, &overrides);

        let selection = QuoteSelection {
            material: MaterialSelection {
                material_id: request.material_id.clone(),
                edging_color: request.edging_color.clone(),
                edging_price_per_m: request.edging_price_per_m,
                labor_price_per_m2: request.labor_price_per_m2,
            },
            hardware: HardwareSelection {
                hardware_id: request.hardware_id.clone(),
                price_per_piece: request.hardware_price_per_piece,
                policy: self.config.fastener_count_policy,
                placed_count: Some(layout.fasteners.count()),
            },
            extras: ExtrasSelection {
                patch_count: overrides.requested_patch_count(),
                cutout_count: overrides.requested_cutout_count(),
                policy: self.config.accessory_count_policy,
                placed_patch_count: Some(layout.extras.patch_count()),
                placed_cutout_count: Some(layout.extras.cutout_count()),
                has_zipper: request.has_zipper,
                has_pocket: request.has_pocket,
                pocket_size: request.pocket_size.clone(),
            },
        };
        let quote = compute_quote(&spec, &selection, &self.prices);
        let drawing = Drawing::project(&self.config.drawing, &spec, &layout);

        info!(
            shape = %spec.shape(),
            width_cm = spec.width_cm(),
            height_cm = spec.height_cm(),
            fasteners = layout.fasteners.count(),
            total = quote.total,
            "window computed"
        );

        Ok(Computation {
            spec,
            layout,
            quote,
            drawing,
        })
    }

    /// Quote only.
    pub fn quote(&self, request: &QuoteRequest) -> Result<Quote> {
        self.compute(request).map(|c| c.quote)
    }
}
