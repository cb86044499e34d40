//! Outline construction for every supported opening shape.
//!
//! Each shape implements [`WindowShape`]: it builds a clockwise outline in
//! centimetres and reports the area it encloses. [`Shape`] dispatches over
//! the closed set of shapes.

use serde::{Deserialize, Serialize};
use softglass_core::Point;
use std::f64::consts::PI;

use crate::window::{ShapeKind, WindowSpec, ANGLED_LEFT_SLOPE_START, ANGLED_RIGHT_SLOPE_START};

/// Half of an ellipse spanning the top of an arch.
///
/// Angles follow the drawing convention: `PI` is the left spring point,
/// `PI / 2` the crown and `0` the right spring point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArcSegment {
    pub center: Point,
    /// Horizontal semi-axis, always half the opening width
    pub radius: f64,
    /// Vertical semi-axis (rise above the spring line)
    pub rise: f64,
}

impl ArcSegment {
    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + self.radius * angle.cos(),
            self.center.y - self.rise * angle.sin(),
        )
    }

    /// Length of the half ellipse (Ramanujan's approximation, exact for a
    /// semicircle).
    pub fn length(&self) -> f64 {
        let (a, b) = (self.radius, self.rise);
        let full = PI * (3.0 * (a + b) - ((3.0 * a + b) * (a + 3.0 * b)).sqrt());
        full / 2.0
    }

    pub fn area(&self) -> f64 {
        PI * self.radius * self.rise / 2.0
    }

    /// Samples the arc from the left spring point to the right one.
    pub fn sample(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(PI - PI * i as f64 / segments as f64))
            .collect()
    }
}

/// Closed boundary of an opening in centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Outline {
    /// Straight-edged polygon, wound clockwise.
    Polygon { vertices: Vec<Point> },
    /// Arc from the left spring point over the crown to the right spring
    /// point, then the straight walls `wall` (right spring, bottom right,
    /// bottom left, left spring).
    Arched { arc: ArcSegment, wall: Vec<Point> },
}

impl Outline {
    /// Corner vertices; for an arch, the wall corners.
    pub fn vertices(&self) -> &[Point] {
        match self {
            Outline::Polygon { vertices } => vertices,
            Outline::Arched { wall, .. } => wall,
        }
    }

    pub fn arc(&self) -> Option<&ArcSegment> {
        match self {
            Outline::Polygon { .. } => None,
            Outline::Arched { arc, .. } => Some(arc),
        }
    }

    /// Polygon approximation, arcs split into `arc_segments` chords.
    pub fn flatten(&self, arc_segments: usize) -> Vec<Point> {
        match self {
            Outline::Polygon { vertices } => vertices.clone(),
            Outline::Arched { arc, wall } => {
                let mut points = arc.sample(arc_segments);
                // The arc already ends on the right spring point and the
                // wall closes back onto the left one.
                points.extend(wall.iter().skip(1).take(wall.len().saturating_sub(2)));
                points
            }
        }
    }
}

/// Contract shared by every opening shape.
pub trait WindowShape {
    fn kind(&self) -> ShapeKind;
    fn outline(&self) -> Outline;
    /// Enclosed area in square centimetres, skirt excluded.
    fn area_cm2(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectShape {
    pub width: f64,
    pub height: f64,
}

impl WindowShape for RectShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Rect
    }

    fn outline(&self) -> Outline {
        let (w, h) = (self.width, self.height);
        Outline::Polygon {
            vertices: vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ],
        }
    }

    fn area_cm2(&self) -> f64 {
        self.width * self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidShape {
    pub width: f64,
    pub height: f64,
    pub top_delta: f64,
}

impl TrapezoidShape {
    pub fn top_width(&self) -> f64 {
        self.width - self.top_delta
    }
}

impl WindowShape for TrapezoidShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Trapezoid
    }

    fn outline(&self) -> Outline {
        let (w, h) = (self.width, self.height);
        let offset = self.top_delta / 2.0;
        Outline::Polygon {
            vertices: vec![
                Point::new(offset, 0.0),
                Point::new(w - offset, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ],
        }
    }

    fn area_cm2(&self) -> f64 {
        (self.width + self.top_width()) / 2.0 * self.height
    }
}

/// Which side of the opening the cut falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngledCutShape {
    pub width: f64,
    pub height: f64,
    pub flat_top_height: f64,
    pub side: CutSide,
}

impl AngledCutShape {
    /// x where the slope meets the bottom edge.
    pub fn slope_start_x(&self) -> f64 {
        match self.side {
            CutSide::Right => self.width * ANGLED_RIGHT_SLOPE_START,
            CutSide::Left => self.width * ANGLED_LEFT_SLOPE_START,
        }
    }

    /// Horizontal leg of the triangle removed by the cut.
    pub fn cut_width(&self) -> f64 {
        match self.side {
            CutSide::Right => self.width - self.slope_start_x(),
            CutSide::Left => self.slope_start_x(),
        }
    }

    /// Vertical leg of the triangle removed by the cut.
    pub fn cut_height(&self) -> f64 {
        (self.height - self.flat_top_height).max(0.0)
    }
}

impl WindowShape for AngledCutShape {
    fn kind(&self) -> ShapeKind {
        match self.side {
            CutSide::Right => ShapeKind::AngledRight,
            CutSide::Left => ShapeKind::AngledLeft,
        }
    }

    fn outline(&self) -> Outline {
        let (w, h) = (self.width, self.height);
        let flat = self.flat_top_height;
        let slope_x = self.slope_start_x();
        let vertices = match self.side {
            CutSide::Right => vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, flat),
                Point::new(slope_x, h),
                Point::new(0.0, h),
            ],
            CutSide::Left => vec![
                Point::new(0.0, 0.0),
                Point::new(w, 0.0),
                Point::new(w, h),
                Point::new(slope_x, h),
                Point::new(0.0, flat),
            ],
        };
        Outline::Polygon { vertices }
    }

    fn area_cm2(&self) -> f64 {
        self.width * self.height - 0.5 * self.cut_width() * self.cut_height()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleShape {
    pub width: f64,
    pub height: f64,
}

impl WindowShape for TriangleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Triangle
    }

    fn outline(&self) -> Outline {
        let (w, h) = (self.width, self.height);
        Outline::Polygon {
            vertices: vec![
                Point::new(w / 2.0, 0.0),
                Point::new(w, h),
                Point::new(0.0, h),
            ],
        }
    }

    fn area_cm2(&self) -> f64 {
        self.width * self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArchShape {
    pub width: f64,
    pub height: f64,
    pub arch_height: f64,
}

impl ArchShape {
    pub fn radius(&self) -> f64 {
        self.width / 2.0
    }

    /// Height of the straight walls below the spring line.
    pub fn straight_height(&self) -> f64 {
        self.height - self.arch_height
    }

    pub fn arc(&self) -> ArcSegment {
        ArcSegment {
            center: Point::new(self.width / 2.0, self.arch_height),
            radius: self.radius(),
            rise: self.arch_height,
        }
    }
}

impl WindowShape for ArchShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Arch
    }

    fn outline(&self) -> Outline {
        let (w, h, spring) = (self.width, self.height, self.arch_height);
        Outline::Arched {
            arc: self.arc(),
            wall: vec![
                Point::new(w, spring),
                Point::new(w, h),
                Point::new(0.0, h),
                Point::new(0.0, spring),
            ],
        }
    }

    fn area_cm2(&self) -> f64 {
        self.width * self.straight_height() + self.arc().area()
    }
}

/// Any supported opening shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect(RectShape),
    Trapezoid(TrapezoidShape),
    AngledCut(AngledCutShape),
    Triangle(TriangleShape),
    Arch(ArchShape),
}

impl Shape {
    /// Resolves the concrete shape described by a spec.
    pub fn from_spec(spec: &WindowSpec) -> Self {
        let (width, height) = (spec.width_cm(), spec.height_cm());
        let params = spec.params();
        match spec.shape() {
            ShapeKind::Rect => Shape::Rect(RectShape { width, height }),
            ShapeKind::Trapezoid => Shape::Trapezoid(TrapezoidShape {
                width,
                height,
                top_delta: params.top_delta_cm,
            }),
            ShapeKind::AngledRight => Shape::AngledCut(AngledCutShape {
                width,
                height,
                flat_top_height: params.flat_top_height_cm,
                side: CutSide::Right,
            }),
            ShapeKind::AngledLeft => Shape::AngledCut(AngledCutShape {
                width,
                height,
                flat_top_height: params.flat_top_height_cm,
                side: CutSide::Left,
            }),
            ShapeKind::Triangle => Shape::Triangle(TriangleShape { width, height }),
            ShapeKind::Arch => Shape::Arch(ArchShape {
                width,
                height,
                arch_height: params.arch_height_cm,
            }),
        }
    }

    fn inner(&self) -> &dyn WindowShape {
        match self {
            Shape::Rect(s) => s,
            Shape::Trapezoid(s) => s,
            Shape::AngledCut(s) => s,
            Shape::Triangle(s) => s,
            Shape::Arch(s) => s,
        }
    }
}

impl WindowShape for Shape {
    fn kind(&self) -> ShapeKind {
        self.inner().kind()
    }

    fn outline(&self) -> Outline {
        self.inner().outline()
    }

    fn area_cm2(&self) -> f64 {
        self.inner().area_cm2()
    }
}

/// Builds the outline of the opening described by `spec`.
pub fn build_outline(spec: &WindowSpec) -> Outline {
    Shape::from_spec(spec).outline()
}

/// Area of the opening in square centimetres, skirt excluded.
pub fn shape_area_cm2(spec: &WindowSpec) -> f64 {
    Shape::from_spec(spec).area_cm2()
}
