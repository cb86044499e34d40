//! Uniform placement along polygon edges and around arches.

use softglass_core::Point;
use softglass_designer::ArcSegment;
use std::f64::consts::PI;
use tracing::trace;

use crate::fastener::{
    EdgeOrientation, EdgeRef, FastenerKind, FastenerPoint, MAX_INTERVALS_PER_EDGE,
};

/// Slack absorbing float error when a stride lands exactly on an edge end.
const STRIDE_EPSILON: f64 = 1e-9;

/// Number of whole strides of `step` that fit into `length`, at most
/// [`MAX_INTERVALS_PER_EDGE`].
fn strides(length: f64, step: f64) -> Option<usize> {
    if !(step > 0.0) || !(length >= 0.0) || !length.is_finite() {
        return None;
    }
    let n = (length / step + STRIDE_EPSILON).floor();
    if n > MAX_INTERVALS_PER_EDGE as f64 {
        trace!(length, step, "stride count capped");
        return Some(MAX_INTERVALS_PER_EDGE);
    }
    Some(n as usize)
}

/// Step that covers `length` in at most [`MAX_INTERVALS_PER_EDGE`] strides.
fn bounded_step(length: f64, step: f64) -> f64 {
    step.max(length / MAX_INTERVALS_PER_EDGE as f64)
}

/// Walks every edge of a closed polygon, wrapping from the last vertex to
/// the first.
///
/// An edge of length `L` gets `max(1, floor(L / step)) + 1` grommets at
/// equal parametric spacing, both end points included. A vertex shared by
/// two edges is therefore placed twice. Zero-length edges are skipped.
pub fn place_along_path(vertices: &[Point], step: f64) -> Vec<FastenerPoint> {
    let n = vertices.len();
    let mut points = Vec::new();
    if n < 2 || !(step > 0.0) {
        return points;
    }

    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len = dx.hypot(dy);
        if len <= STRIDE_EPSILON {
            trace!(edge = i, "skipping zero-length edge");
            continue;
        }

        let steps = strides(len, step).unwrap_or(0).max(1);
        let orientation = EdgeOrientation::classify(dx, dy);
        trace!(edge = i, len, steps, ?orientation, "placing edge");

        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let position = a.lerp(&b, t);
            let label_cm = match orientation {
                EdgeOrientation::Horizontal => position.x,
                EdgeOrientation::Vertical => position.y,
                EdgeOrientation::Sloped => len * t,
            };
            points.push(FastenerPoint {
                position,
                kind: FastenerKind::Grommet,
                edge: EdgeRef::Edge(i),
                orientation,
                label_cm,
            });
        }
    }
    points
}

/// Places grommets around an arched opening.
///
/// Order: the bottom edge left to right, the left wall upward to the spring
/// line, the arc over the crown in equal-angle steps, the right wall down
/// to the bottom.
pub fn place_arch(arc: &ArcSegment, bottom_y: f64, step: f64) -> Vec<FastenerPoint> {
    let mut points = Vec::new();
    let left = arc.center.x - arc.radius;
    let right = arc.center.x + arc.radius;
    let spring = arc.center.y;

    let grommet = |position: Point, edge: EdgeRef, orientation, label_cm| FastenerPoint {
        position,
        kind: FastenerKind::Grommet,
        edge,
        orientation,
        label_cm,
    };

    let bottom_step = bounded_step(right - left, step);
    if let Some(n) = strides(right - left, bottom_step) {
        trace!(count = n + 1, "arch bottom");
        for i in 0..=n {
            let x = left + bottom_step * i as f64;
            points.push(grommet(
                Point::new(x, bottom_y),
                EdgeRef::Bottom,
                EdgeOrientation::Horizontal,
                x,
            ));
        }
    }

    let wall = bottom_y - spring;
    let wall_step = bounded_step(wall, step);
    if let Some(n) = strides(wall, wall_step) {
        trace!(count = n + 1, "arch left wall");
        for i in 0..=n {
            let y = bottom_y - wall_step * i as f64;
            points.push(grommet(
                Point::new(left, y),
                EdgeRef::LeftWall,
                EdgeOrientation::Vertical,
                y,
            ));
        }
    }

    let arc_len = arc.length();
    if step > 0.0 && arc_len.is_finite() {
        let steps = strides(arc_len, step).unwrap_or(0).max(1);
        trace!(count = steps + 1, arc_len, "arch arc");
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            points.push(grommet(
                arc.point_at(PI - PI * t),
                EdgeRef::Arc,
                EdgeOrientation::Sloped,
                arc_len * t,
            ));
        }
    }

    if let Some(n) = strides(wall, wall_step) {
        trace!(count = n + 1, "arch right wall");
        for i in 0..=n {
            let y = spring + wall_step * i as f64;
            points.push(grommet(
                Point::new(right, y),
                EdgeRef::RightWall,
                EdgeOrientation::Vertical,
                y,
            ));
        }
    }

    points
}
