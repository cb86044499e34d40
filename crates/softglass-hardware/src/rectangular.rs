//! Constrained placement for rectangular frames.
//!
//! Each side of a rectangle is planned on its own: the usable length between
//! two insets is split into equal intervals whose length stays within
//! [`MIN_STEP_CM`, `MAX_STEP_CM`]. Top corners are inset by half the frame
//! thickness; bottom corner brackets sit [`BOTTOM_INSET_CM`] above the
//! bottom edge.

use softglass_core::Point;
use softglass_designer::WindowSpec;
use tracing::trace;

use crate::fastener::{
    EdgeOrientation, EdgeRef, FastenerKind, FastenerPoint, MAX_INTERVALS_PER_EDGE,
};

pub const MIN_STEP_CM: f64 = 20.0;
pub const MAX_STEP_CM: f64 = 40.0;

/// Inset at both ends of the top edge
pub const TOP_INSET_CM: f64 = 2.5;
/// Inset at both ends of the bottom edge
pub const BOTTOM_INSET_CM: f64 = 5.0;
/// Inset at both ends of a side, measured on `height - BOTTOM_INSET_CM`
pub const SIDE_INSET_CM: f64 = 2.5;

/// Spacing chosen for one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgePlan {
    /// Offset of the first interval from the edge start
    pub start: f64,
    pub usable: f64,
    pub intervals: usize,
    pub step: f64,
}

impl EdgePlan {
    /// Interior fastener offsets, both usable ends excluded.
    pub fn positions(&self) -> Vec<f64> {
        (1..self.intervals)
            .map(|i| self.start + self.step * i as f64)
            .collect()
    }
}

/// Plans an edge of `length` cm with the given insets.
///
/// Returns `None` when nothing usable remains between the insets.
pub fn plan_edge(length: f64, inset_start: f64, inset_end: f64, target_step: f64) -> Option<EdgePlan> {
    let usable = length - inset_start - inset_end;
    if !(usable > 0.0) || !usable.is_finite() {
        return None;
    }

    let mut intervals = (usable / target_step).round().max(1.0);
    let mut step = usable / intervals;

    if step < MIN_STEP_CM {
        intervals = (usable / MIN_STEP_CM).floor().max(1.0);
        step = usable / intervals;
    }
    if step > MAX_STEP_CM {
        intervals = (usable / MAX_STEP_CM).ceil().max(1.0);
        step = usable / intervals;
    }
    if intervals > MAX_INTERVALS_PER_EDGE as f64 {
        trace!(usable, intervals, "interval count capped");
        intervals = MAX_INTERVALS_PER_EDGE as f64;
        step = usable / intervals;
    }

    Some(EdgePlan {
        start: inset_start,
        usable,
        intervals: intervals as usize,
        step,
    })
}

fn interior(length: f64, inset: f64, target_step: f64) -> Vec<f64> {
    plan_edge(length, inset, inset, target_step)
        .map(|plan| plan.positions())
        .unwrap_or_default()
}

fn horizontal(x: f64, y: f64, kind: FastenerKind, edge: EdgeRef) -> FastenerPoint {
    FastenerPoint {
        position: Point::new(x, y),
        kind,
        edge,
        orientation: EdgeOrientation::Horizontal,
        label_cm: x,
    }
}

fn vertical(x: f64, y: f64, edge: EdgeRef) -> FastenerPoint {
    FastenerPoint {
        position: Point::new(x, y),
        kind: FastenerKind::Bracket,
        edge,
        orientation: EdgeOrientation::Vertical,
        label_cm: y,
    }
}

/// Places grommets along the top and brackets along the bottom and sides
/// of a rectangular frame.
pub fn place_rectangular(spec: &WindowSpec) -> Vec<FastenerPoint> {
    let (w, h) = (spec.width_cm(), spec.height_cm());
    let target = spec.step_cm();
    let inset = spec.frame_cm() / 2.0;

    let left_x = inset;
    let right_x = w - inset;
    let top_y = inset;
    let bottom_y = h - inset;

    let mut points = vec![
        horizontal(left_x, top_y, FastenerKind::Grommet, EdgeRef::Top),
        horizontal(right_x, top_y, FastenerKind::Grommet, EdgeRef::Top),
    ];

    let top = interior(w, TOP_INSET_CM, target);
    trace!(count = top.len(), "top edge grommets");
    points.extend(
        top.into_iter()
            .map(|x| horizontal(x, top_y, FastenerKind::Grommet, EdgeRef::Top)),
    );

    let bottom = interior(w, BOTTOM_INSET_CM, target);
    trace!(count = bottom.len(), "bottom edge brackets");
    points.extend(
        bottom
            .into_iter()
            .map(|x| horizontal(x, bottom_y, FastenerKind::Bracket, EdgeRef::Bottom)),
    );

    let sides = interior(h - BOTTOM_INSET_CM, SIDE_INSET_CM, target);
    trace!(count = sides.len(), "side brackets per side");
    for y in sides {
        points.push(vertical(left_x, y, EdgeRef::Left));
        points.push(vertical(right_x, y, EdgeRef::Right));
    }

    // Bottom corners sit at skirt-mount level, with or without a skirt
    let corner_y = h - BOTTOM_INSET_CM;
    points.push(horizontal(left_x, corner_y, FastenerKind::Bracket, EdgeRef::Bottom));
    points.push(horizontal(right_x, corner_y, FastenerKind::Bracket, EdgeRef::Bottom));

    points
}
