//! Accessory placement: patches, cutouts, zipper and skirt.
//!
//! Explicit positions win over the automatic layout and are never checked
//! against the outline. Without them, patches are staggered diagonally from
//! the top-left interior corner and cutouts run down the left inner edge.

use serde::{Deserialize, Serialize};
use softglass_core::{parse_cm, Point, Rect};
use tracing::debug;

use crate::window::WindowSpec;

/// Footprint of a rectangular patch (cm)
pub const PATCH_SIZE_CM: (f64, f64) = (16.0, 10.0);
/// Footprint of a rectangular cutout (cm)
pub const CUTOUT_SIZE_CM: (f64, f64) = (6.0, 10.0);

/// First automatic patch, measured from the inner top-left corner
const PATCH_ORIGIN_CM: (f64, f64) = (10.0, 12.5);
/// Offset between consecutive automatic patches
const PATCH_STAGGER_CM: (f64, f64) = (15.0, 7.5);
/// First automatic cutout below the inner top edge
const CUTOUT_FIRST_Y_CM: f64 = 20.0;
/// Vertical pitch between automatic cutouts
const CUTOUT_PITCH_CM: f64 = 17.5;

/// Width of one zipper tape
pub const ZIPPER_TAPE_CM: f64 = 4.0;
/// Gap between the two zipper tapes
pub const ZIPPER_STRIPE_CM: f64 = 1.0;

/// A position as it travels over the wire: `{"xCm": 10, "yCm": 20}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionCm {
    #[serde(default)]
    pub x_cm: f64,
    #[serde(default)]
    pub y_cm: f64,
}

impl PositionCm {
    pub fn new(x_cm: f64, y_cm: f64) -> Self {
        Self { x_cm, y_cm }
    }
}

impl From<PositionCm> for Point {
    fn from(p: PositionCm) -> Self {
        Point::new(p.x_cm, p.y_cm)
    }
}

/// A polygon as it travels over the wire: `{"points": [...]}`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PolygonCm {
    #[serde(default)]
    pub points: Vec<PositionCm>,
}

/// Parses `"x1,y1; x2,y2"` into positions.
///
/// Pairs are separated by `;`, coordinates by `,`. Pairs that do not yield
/// two finite numbers are dropped.
pub fn parse_positions_cm(input: &str) -> Vec<PositionCm> {
    input
        .split(';')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let mut coords = pair.split(',').map(str::trim);
            let x = coords.next().and_then(parse_cm);
            let y = coords.next().and_then(parse_cm);
            let (Some(x), Some(y), None) = (x, y, coords.next()) else {
                debug!(pair, "dropping malformed position");
                return None;
            };
            Some(PositionCm::new(x, y))
        })
        .collect()
}

/// Parses the same text format into a polygon, `None` below three points.
pub fn parse_polygon_cm(input: &str) -> Option<PolygonCm> {
    let points = parse_positions_cm(input);
    (points.len() >= 3).then_some(PolygonCm { points })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessoryKind {
    Patch,
    Cutout,
}

/// One placed accessory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "camelCase")]
pub enum Accessory {
    /// Rectangular footprint anchored at its top-left corner.
    Point { kind: AccessoryKind, footprint: Rect },
    /// Arbitrary outline, three or more points.
    Polygon { kind: AccessoryKind, points: Vec<Point> },
}

impl Accessory {
    pub fn kind(&self) -> AccessoryKind {
        match self {
            Accessory::Point { kind, .. } | Accessory::Polygon { kind, .. } => *kind,
        }
    }

    fn at(kind: AccessoryKind, origin: Point) -> Self {
        let (w, h) = match kind {
            AccessoryKind::Patch => PATCH_SIZE_CM,
            AccessoryKind::Cutout => CUTOUT_SIZE_CM,
        };
        Accessory::Point {
            kind,
            footprint: Rect::new(origin.x, origin.y, w, h),
        }
    }
}

/// User choices for accessories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtrasOverrides {
    pub patch_positions: Vec<PositionCm>,
    pub cutout_positions: Vec<PositionCm>,
    pub patch_polygons: Vec<PolygonCm>,
    pub cutout_polygons: Vec<PolygonCm>,
    /// Automatic patches used when no explicit patch positions are given
    pub patch_count: u32,
    /// Automatic cutouts used when no explicit cutout positions are given
    pub cutout_count: u32,
    pub has_zipper: bool,
}

impl ExtrasOverrides {
    /// Patches as entered: explicit positions, polygons and the automatic
    /// count added together, degenerate polygons included.
    pub fn requested_patch_count(&self) -> usize {
        self.patch_positions.len() + self.patch_polygons.len() + self.patch_count as usize
    }

    /// Cutouts as entered, counted like [`Self::requested_patch_count`].
    pub fn requested_cutout_count(&self) -> usize {
        self.cutout_positions.len() + self.cutout_polygons.len() + self.cutout_count as usize
    }
}

/// Zipper drawn as two tapes with a stripe between them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZipperLayout {
    pub left_tape: Rect,
    pub stripe: Rect,
    pub right_tape: Rect,
}

/// Everything the extras placer produces, in centimetres.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrasLayout {
    pub patches: Vec<Accessory>,
    pub cutouts: Vec<Accessory>,
    pub zipper: Option<ZipperLayout>,
    pub skirt: Option<Rect>,
}

impl ExtrasLayout {
    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    pub fn cutout_count(&self) -> usize {
        self.cutouts.len()
    }
}

fn auto_patch(frame: f64, i: u32) -> Point {
    let i = f64::from(i);
    Point::new(
        frame + PATCH_ORIGIN_CM.0 + i * PATCH_STAGGER_CM.0,
        frame + PATCH_ORIGIN_CM.1 + i * PATCH_STAGGER_CM.1,
    )
}

fn auto_cutout(frame: f64, i: u32) -> Point {
    Point::new(
        frame - CUTOUT_SIZE_CM.0 / 2.0,
        frame + CUTOUT_FIRST_Y_CM + f64::from(i) * CUTOUT_PITCH_CM,
    )
}

fn place_kind(
    kind: AccessoryKind,
    positions: &[PositionCm],
    polygons: &[PolygonCm],
    auto_count: u32,
    auto_origin: impl Fn(u32) -> Point,
) -> Vec<Accessory> {
    let mut placed: Vec<Accessory> = if positions.is_empty() {
        (0..auto_count)
            .map(|i| Accessory::at(kind, auto_origin(i)))
            .collect()
    } else {
        positions
            .iter()
            .map(|p| Accessory::at(kind, Point::from(*p)))
            .collect()
    };

    for polygon in polygons {
        if polygon.points.len() < 3 {
            debug!(?kind, points = polygon.points.len(), "dropping degenerate polygon");
            continue;
        }
        placed.push(Accessory::Polygon {
            kind,
            points: polygon.points.iter().copied().map(Point::from).collect(),
        });
    }
    placed
}

/// Zipper centered on the inner opening, running the full window height.
pub fn zipper_layout(spec: &WindowSpec) -> ZipperLayout {
    let center_x = spec.width_cm() / 2.0;
    let h = spec.height_cm();
    ZipperLayout {
        left_tape: Rect::new(
            center_x - ZIPPER_STRIPE_CM / 2.0 - ZIPPER_TAPE_CM,
            0.0,
            ZIPPER_TAPE_CM,
            h,
        ),
        stripe: Rect::new(center_x - ZIPPER_STRIPE_CM / 2.0, 0.0, ZIPPER_STRIPE_CM, h),
        right_tape: Rect::new(center_x + ZIPPER_STRIPE_CM / 2.0, 0.0, ZIPPER_TAPE_CM, h),
    }
}

/// Resolves accessory positions for one window.
pub fn place_extras(spec: &WindowSpec, overrides: &ExtrasOverrides) -> ExtrasLayout {
    let frame = spec.frame_cm();

    let patches = place_kind(
        AccessoryKind::Patch,
        &overrides.patch_positions,
        &overrides.patch_polygons,
        overrides.patch_count,
        |i| auto_patch(frame, i),
    );
    let cutouts = place_kind(
        AccessoryKind::Cutout,
        &overrides.cutout_positions,
        &overrides.cutout_polygons,
        overrides.cutout_count,
        |i| auto_cutout(frame, i),
    );

    let skirt = spec
        .has_skirt()
        .then(|| Rect::new(0.0, spec.height_cm(), spec.width_cm(), spec.skirt_height_cm()));

    ExtrasLayout {
        patches,
        cutouts,
        zipper: overrides.has_zipper.then(|| zipper_layout(spec)),
        skirt,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::ShapeKind;

    #[test]
    fn test_parse_positions() {
        let parsed = parse_positions_cm("10,20; 30.5,40");
        assert_eq!(
            parsed,
            vec![PositionCm::new(10.0, 20.0), PositionCm::new(30.5, 40.0)]
        );
    }

    #[test]
    fn test_parse_positions_drops_malformed() {
        let parsed = parse_positions_cm("10,20; abc,5; 7; ;1,2,3; 4 , 5 ;");
        assert_eq!(
            parsed,
            vec![PositionCm::new(10.0, 20.0), PositionCm::new(4.0, 5.0)]
        );
        assert!(parse_positions_cm("").is_empty());
    }

    #[test]
    fn test_parse_polygon() {
        assert!(parse_polygon_cm("0,0; 10,0").is_none());
        let polygon = parse_polygon_cm("0,0; 10,0; 10,10").unwrap();
        assert_eq!(polygon.points.len(), 3);
    }

    #[test]
    fn test_auto_layout_is_deterministic() {
        let spec = WindowSpec::new(ShapeKind::Rect, 200.0, 150.0).unwrap();
        let overrides = ExtrasOverrides {
            patch_count: 2,
            cutout_count: 2,
            ..Default::default()
        };
        let a = place_extras(&spec, &overrides);
        let b = place_extras(&spec, &overrides);
        assert_eq!(a, b);

        match &a.patches[1] {
            Accessory::Point { footprint, .. } => {
                assert_eq!(footprint.x, 5.0 + 10.0 + 15.0);
                assert_eq!(footprint.y, 5.0 + 12.5 + 7.5);
            }
            other => panic!("unexpected accessory {:?}", other),
        }
        match &a.cutouts[1] {
            Accessory::Point { footprint, .. } => {
                assert_eq!(footprint.x, 2.0);
                assert_eq!(footprint.y, 5.0 + 20.0 + 17.5);
            }
            other => panic!("unexpected accessory {:?}", other),
        }
    }

    #[test]
    fn test_zipper_centered() {
        let spec = WindowSpec::new(ShapeKind::Rect, 100.0, 80.0).unwrap();
        let zipper = zipper_layout(&spec);
        assert_eq!(zipper.left_tape.x, 45.5);
        assert_eq!(zipper.stripe.x, 49.5);
        assert_eq!(zipper.right_tape.x, 50.5);
        assert_eq!(zipper.stripe.height, 80.0);
    }
}
