//! Projection of centimetre layouts onto a drawing surface.
//!
//! One uniform scale fits the opening plus its skirt into the surface minus
//! a fixed padding on every side:
//!
//! ```text
//! scale = min(max_w / width_cm, max_h / (height_cm + skirt_cm))
//! pixel = cm * scale + padding
//! ```

use serde::{Deserialize, Serialize};
use softglass_core::{Point, Rect};

use crate::extras::{Accessory, ExtrasLayout, ZipperLayout};
use crate::shapes::{ArcSegment, Outline};
use crate::window::WindowSpec;

/// Drawing surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawingSurface {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self {
            width: 520.0,
            height: 440.0,
            padding: 40.0,
        }
    }
}

impl DrawingSurface {
    /// Width available to the drawing once padding is removed.
    pub fn max_drawing_width(&self) -> f64 {
        self.width - self.padding * 2.0
    }

    /// Height available to the drawing once padding is removed.
    pub fn max_drawing_height(&self) -> f64 {
        self.height - self.padding * 2.0
    }
}

/// Maps centimetres to drawing pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutProjector {
    scale: f64,
    padding: f64,
}

impl LayoutProjector {
    /// Fits an opening of the given size into the surface.
    pub fn fit(surface: &DrawingSurface, width_cm: f64, full_height_cm: f64) -> Self {
        let width_cm = if width_cm > 0.0 { width_cm } else { 1.0 };
        let full_height_cm = if full_height_cm > 0.0 {
            full_height_cm
        } else {
            1.0
        };
        let scale = (surface.max_drawing_width() / width_cm)
            .min(surface.max_drawing_height() / full_height_cm);
        Self {
            scale,
            padding: surface.padding,
        }
    }

    /// Fits the opening and skirt of `spec`.
    pub fn for_spec(surface: &DrawingSurface, spec: &WindowSpec) -> Self {
        Self::fit(
            surface,
            spec.width_cm(),
            spec.height_cm() + spec.skirt_height_cm(),
        )
    }

    /// Gets the pixels-per-centimetre factor.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Gets the padding in pixels.
    pub fn padding(&self) -> f64 {
        self.padding
    }

    /// Converts a length in centimetres to pixels.
    pub fn length(&self, value_cm: f64) -> f64 {
        value_cm * self.scale
    }

    /// Converts a point in centimetres to surface pixels.
    pub fn project(&self, p: &Point) -> Point {
        p.scaled(self.scale).translated(self.padding, self.padding)
    }

    pub fn project_rect(&self, r: &Rect) -> Rect {
        let origin = self.project(&Point::new(r.x, r.y));
        Rect::new(
            origin.x,
            origin.y,
            self.length(r.width),
            self.length(r.height),
        )
    }

    pub fn project_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|p| self.project(p)).collect()
    }

    pub fn project_outline(&self, outline: &Outline) -> Outline {
        match outline {
            Outline::Polygon { vertices } => Outline::Polygon {
                vertices: self.project_points(vertices),
            },
            Outline::Arched { arc, wall } => Outline::Arched {
                arc: ArcSegment {
                    center: self.project(&arc.center),
                    radius: self.length(arc.radius),
                    rise: self.length(arc.rise),
                },
                wall: self.project_points(wall),
            },
        }
    }

    pub fn project_accessory(&self, accessory: &Accessory) -> Accessory {
        match accessory {
            Accessory::Point { kind, footprint } => Accessory::Point {
                kind: *kind,
                footprint: self.project_rect(footprint),
            },
            Accessory::Polygon { kind, points } => Accessory::Polygon {
                kind: *kind,
                points: self.project_points(points),
            },
        }
    }

    /// Projects every accessory, the zipper and the skirt.
    pub fn project_extras(&self, extras: &ExtrasLayout) -> ExtrasLayout {
        ExtrasLayout {
            patches: extras
                .patches
                .iter()
                .map(|a| self.project_accessory(a))
                .collect(),
            cutouts: extras
                .cutouts
                .iter()
                .map(|a| self.project_accessory(a))
                .collect(),
            zipper: extras.zipper.map(|z| ZipperLayout {
                left_tape: self.project_rect(&z.left_tape),
                stripe: self.project_rect(&z.stripe),
                right_tape: self.project_rect(&z.right_tape),
            }),
            skirt: extras.skirt.map(|r| self.project_rect(&r)),
        }
    }
}
