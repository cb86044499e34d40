//! Window specification
//!
//! A [`WindowSpec`] is the immutable description of one opening. It is
//! rebuilt from the request on every computation. Construction rejects
//! unusable dimensions; every other parameter is clamped through the named
//! functions in [`clamp`] so the resolved values can be asserted directly.

use serde::{Deserialize, Serialize};
use softglass_core::ValidationError;
use std::fmt;
use std::str::FromStr;

/// Default frame (edging) thickness in centimetres
pub const DEFAULT_FRAME_CM: f64 = 5.0;

/// Default fastener target step in centimetres
pub const DEFAULT_STEP_CM: f64 = 30.0;

/// Smallest fastener target step; finer requests are raised to it
pub const MIN_TARGET_STEP_CM: f64 = 1.0;

/// Largest accepted width or height in centimetres
pub const MAX_DIMENSION_CM: f64 = 10_000.0;

/// Straight wall an arch always keeps below its spring line
pub const MIN_STRAIGHT_WALL_CM: f64 = 10.0;

/// Bottom fraction of the width where the right-hand cut starts
pub const ANGLED_RIGHT_SLOPE_START: f64 = 0.65;

/// Bottom fraction of the width where the left-hand cut starts
pub const ANGLED_LEFT_SLOPE_START: f64 = 0.35;

/// Shape of the opening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ShapeKind {
    #[default]
    #[serde(alias = "rectangle")]
    Rect,
    Trapezoid,
    AngledRight,
    AngledLeft,
    Triangle,
    Arch,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 6] = [
        ShapeKind::Rect,
        ShapeKind::Trapezoid,
        ShapeKind::AngledRight,
        ShapeKind::AngledLeft,
        ShapeKind::Triangle,
        ShapeKind::Arch,
    ];

    /// Wire identifier used in requests and quotes.
    pub fn id(&self) -> &'static str {
        match self {
            ShapeKind::Rect => "rect",
            ShapeKind::Trapezoid => "trapezoid",
            ShapeKind::AngledRight => "angledRight",
            ShapeKind::AngledLeft => "angledLeft",
            ShapeKind::Triangle => "triangle",
            ShapeKind::Arch => "arch",
        }
    }

    /// Human readable name shown next to a quote.
    pub fn display_name(&self) -> &'static str {
        match self {
            ShapeKind::Rect => "Rectangle",
            ShapeKind::Trapezoid => "Trapezoid",
            ShapeKind::AngledRight => "Angled right",
            ShapeKind::AngledLeft => "Angled left",
            ShapeKind::Triangle => "Triangle",
            ShapeKind::Arch => "Arch",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rect" | "rectangle" => Ok(Self::Rect),
            "trapezoid" => Ok(Self::Trapezoid),
            "angledRight" | "angled-right" => Ok(Self::AngledRight),
            "angledLeft" | "angled-left" => Ok(Self::AngledLeft),
            "triangle" => Ok(Self::Triangle),
            "arch" => Ok(Self::Arch),
            other => Err(format!("Unknown shape: {}", other)),
        }
    }
}

/// Clamping policy for parameters the engine never rejects.
///
/// Each function returns the value the geometry will actually use. A change
/// is traced at debug level and otherwise goes unreported.
pub mod clamp {
    use super::{DEFAULT_STEP_CM, MIN_STRAIGHT_WALL_CM, MIN_TARGET_STEP_CM};
    use tracing::debug;

    fn note(name: &str, requested: f64, applied: f64) -> f64 {
        if requested != applied {
            debug!(parameter = name, requested, applied, "parameter clamped");
        }
        applied
    }

    /// Trapezoid top-width delta: must satisfy `0 <= delta < width`, else 0.
    pub fn top_delta(width_cm: f64, requested: f64) -> f64 {
        let applied = if requested.is_finite() && requested >= 0.0 && requested < width_cm {
            requested
        } else {
            0.0
        };
        note("top_delta", requested, applied)
    }

    /// Angled-cut flat top height, clamped into `[0, height]`.
    pub fn flat_top_height(height_cm: f64, requested: f64) -> f64 {
        let applied = if requested.is_finite() {
            requested.clamp(0.0, height_cm)
        } else {
            0.0
        };
        note("flat_top_height", requested, applied)
    }

    /// Arch rise above the spring line.
    ///
    /// Defaults to half the width (a semicircle). The rise never eats the
    /// straight wall below [`MIN_STRAIGHT_WALL_CM`]; openings too short for
    /// that margin cap the rise at half their height.
    pub fn arch_height(width_cm: f64, height_cm: f64, requested: Option<f64>) -> f64 {
        let radius = width_cm / 2.0;
        let wanted = requested
            .filter(|r| r.is_finite() && *r > 0.0)
            .unwrap_or(radius);
        let max_rise = (height_cm - MIN_STRAIGHT_WALL_CM).max(height_cm / 2.0);
        note("arch_height", requested.unwrap_or(radius), wanted.min(max_rise))
    }

    /// Frame thickness, kept within `[0, min(width, height) / 2]`.
    pub fn frame(width_cm: f64, height_cm: f64, requested: f64) -> f64 {
        let max = width_cm.min(height_cm) / 2.0;
        let applied = if requested.is_finite() {
            requested.clamp(0.0, max)
        } else {
            0.0
        };
        note("frame", requested, applied)
    }

    /// Skirt height, negative values become 0.
    pub fn skirt_height(requested: f64) -> f64 {
        let applied = if requested.is_finite() {
            requested.max(0.0)
        } else {
            0.0
        };
        note("skirt_height", requested, applied)
    }

    /// Fastener target step, non-positive values fall back to the default
    /// and steps finer than [`MIN_TARGET_STEP_CM`] are raised to it.
    pub fn step(requested: f64) -> f64 {
        let applied = if requested.is_finite() && requested > 0.0 {
            requested.max(MIN_TARGET_STEP_CM)
        } else {
            DEFAULT_STEP_CM
        };
        note("step", requested, applied)
    }
}

/// Shape-specific parameters after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeParams {
    /// Trapezoid: bottom width minus top width
    pub top_delta_cm: f64,
    /// Angled cuts: height of the full-height side left flat at the top
    pub flat_top_height_cm: f64,
    /// Arch: rise of the arc above the spring line
    pub arch_height_cm: f64,
}

/// Immutable description of one window opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSpec {
    shape: ShapeKind,
    width_cm: f64,
    height_cm: f64,
    params: ShapeParams,
    frame_cm: f64,
    skirt_height_cm: f64,
    step_cm: f64,
}

fn check_dimension(name: &'static str, value: Option<f64>) -> Result<f64, ValidationError> {
    let value = value.ok_or(ValidationError::MissingDimension { name })?;
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteDimension { name });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveDimension { name, value });
    }
    if value > MAX_DIMENSION_CM {
        return Err(ValidationError::DimensionTooLarge {
            name,
            value,
            max: MAX_DIMENSION_CM,
        });
    }
    Ok(value)
}

impl WindowSpec {
    /// Creates a spec with default frame, no skirt and the default step.
    pub fn new(shape: ShapeKind, width_cm: f64, height_cm: f64) -> Result<Self, ValidationError> {
        Self::from_dimensions(shape, Some(width_cm), Some(height_cm))
    }

    /// Creates a spec from possibly missing request dimensions.
    pub fn from_dimensions(
        shape: ShapeKind,
        width_cm: Option<f64>,
        height_cm: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let width_cm = check_dimension("width", width_cm)?;
        let height_cm = check_dimension("height", height_cm)?;

        Ok(Self {
            shape,
            width_cm,
            height_cm,
            params: ShapeParams {
                top_delta_cm: 0.0,
                flat_top_height_cm: 0.0,
                arch_height_cm: clamp::arch_height(width_cm, height_cm, None),
            },
            frame_cm: clamp::frame(width_cm, height_cm, DEFAULT_FRAME_CM),
            skirt_height_cm: 0.0,
            step_cm: DEFAULT_STEP_CM,
        })
    }

    pub fn with_top_delta(mut self, top_delta_cm: f64) -> Self {
        self.params.top_delta_cm = clamp::top_delta(self.width_cm, top_delta_cm);
        self
    }

    pub fn with_flat_top_height(mut self, flat_top_height_cm: f64) -> Self {
        self.params.flat_top_height_cm = clamp::flat_top_height(self.height_cm, flat_top_height_cm);
        self
    }

    pub fn with_arch_height(mut self, arch_height_cm: Option<f64>) -> Self {
        self.params.arch_height_cm =
            clamp::arch_height(self.width_cm, self.height_cm, arch_height_cm);
        self
    }

    pub fn with_frame(mut self, frame_cm: f64) -> Self {
        self.frame_cm = clamp::frame(self.width_cm, self.height_cm, frame_cm);
        self
    }

    pub fn with_skirt_height(mut self, skirt_height_cm: f64) -> Self {
        self.skirt_height_cm = clamp::skirt_height(skirt_height_cm);
        self
    }

    pub fn with_step(mut self, step_cm: f64) -> Self {
        self.step_cm = clamp::step(step_cm);
        self
    }

    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn params(&self) -> &ShapeParams {
        &self.params
    }

    pub fn frame_cm(&self) -> f64 {
        self.frame_cm
    }

    pub fn skirt_height_cm(&self) -> f64 {
        self.skirt_height_cm
    }

    pub fn has_skirt(&self) -> bool {
        self.skirt_height_cm > 0.0
    }

    pub fn step_cm(&self) -> f64 {
        self.step_cm
    }
}
