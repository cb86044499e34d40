//! Fastener points and the edge metadata attached to them.

use serde::{Deserialize, Serialize};
use softglass_core::{format_cm_label, Point};

/// Edges whose cross component stays within this share of the main
/// component count as horizontal or vertical.
pub const ORIENTATION_TOLERANCE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FastenerKind {
    /// Round eyelet punched through the edging
    Grommet,
    /// Rotating bracket screwed to the frame
    Bracket,
}

/// Orientation tag of the edge a fastener sits on. Only drives where a
/// label is drawn and which coordinate it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeOrientation {
    Horizontal,
    Vertical,
    Sloped,
}

impl EdgeOrientation {
    /// Classifies an edge by its direction vector.
    pub fn classify(dx: f64, dy: f64) -> Self {
        let (ax, ay) = (dx.abs(), dy.abs());
        if ay <= ax * ORIENTATION_TOLERANCE {
            EdgeOrientation::Horizontal
        } else if ax <= ay * ORIENTATION_TOLERANCE {
            EdgeOrientation::Vertical
        } else {
            EdgeOrientation::Sloped
        }
    }
}

/// Most intervals ever planned on one edge or arc.
pub const MAX_INTERVALS_PER_EDGE: usize = 10_000;

/// The outline segment a fastener belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeRef {
    Top,
    Bottom,
    Left,
    Right,
    /// Polygon edge starting at the given vertex index
    Edge(usize),
    LeftWall,
    RightWall,
    Arc,
}

/// One grommet or bracket in window centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastenerPoint {
    pub position: Point,
    pub kind: FastenerKind,
    pub edge: EdgeRef,
    pub orientation: EdgeOrientation,
    /// Distance shown next to the fastener
    pub label_cm: f64,
}

impl FastenerPoint {
    pub fn label(&self) -> String {
        format_cm_label(self.label_cm)
    }
}

/// Every fastener placed on one window, in placement order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FastenerLayout {
    pub points: Vec<FastenerPoint>,
}

impl FastenerLayout {
    pub fn count(&self) -> usize {
        self.points.len()
    }

    pub fn count_of(&self, kind: FastenerKind) -> usize {
        self.points.iter().filter(|p| p.kind == kind).count()
    }

    pub fn on_edge(&self, edge: EdgeRef) -> impl Iterator<Item = &FastenerPoint> + '_ {
        self.points.iter().filter(move |p| p.edge == edge)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
