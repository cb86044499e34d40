//! # Softglass Hardware
//!
//! Places grommets and brackets along the edges of a window outline.
//!
//! Rectangles get a constrained plan where every edge is spaced on its own
//! within fixed minimum and maximum steps. Every other polygon is walked
//! edge by edge at the target step, and arches are covered wall, arc and
//! bottom separately.

pub mod fastener;
pub mod path;
pub mod rectangular;

pub use fastener::{
    EdgeOrientation, EdgeRef, FastenerKind, FastenerLayout, FastenerPoint, MAX_INTERVALS_PER_EDGE,
};
pub use path::{place_along_path, place_arch};
pub use rectangular::{place_rectangular, plan_edge, EdgePlan, MAX_STEP_CM, MIN_STEP_CM};

use softglass_designer::{Outline, ShapeKind, WindowSpec};
use tracing::debug;

/// Places fasteners for one window.
pub struct FastenerPlacer<'a> {
    spec: &'a WindowSpec,
}

impl<'a> FastenerPlacer<'a> {
    pub fn new(spec: &'a WindowSpec) -> Self {
        Self { spec }
    }

    /// Places fasteners along `outline`, which must be the outline built
    /// from the same spec.
    pub fn place(&self, outline: &Outline) -> FastenerLayout {
        let step = self.spec.step_cm();
        let points = match (self.spec.shape(), outline) {
            (ShapeKind::Rect, _) => place_rectangular(self.spec),
            (_, Outline::Arched { arc, .. }) => place_arch(arc, self.spec.height_cm(), step),
            (_, Outline::Polygon { vertices }) => place_along_path(vertices, step),
        };
        let layout = FastenerLayout { points };
        debug!(
            shape = %self.spec.shape(),
            step,
            count = layout.count(),
            "fasteners placed"
        );
        layout
    }
}

/// Places fasteners for `spec` along its `outline`.
pub fn place_fasteners(spec: &WindowSpec, outline: &Outline) -> FastenerLayout {
    FastenerPlacer::new(spec).place(outline)
}
