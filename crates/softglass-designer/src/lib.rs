//! # Softglass Designer
//!
//! Geometry of a soft window opening: the immutable [`WindowSpec`], the
//! outline builder for every supported shape, accessory placement and the
//! projection of centimetre layouts onto a drawing surface.
//!
//! ## Architecture
//!
//! ```text
//! WindowSpec (validated dimensions + clamped parameters)
//!   ├── Shape / Outline (clockwise, centimetres)
//!   ├── Extras (patches, cutouts, zipper, skirt)
//!   └── LayoutProjector (centimetres -> pixels)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use softglass_designer::{build_outline, ShapeKind, WindowSpec};
//!
//! let spec = WindowSpec::new(ShapeKind::Trapezoid, 120.0, 90.0)
//!     .unwrap()
//!     .with_top_delta(30.0);
//! let outline = build_outline(&spec);
//! assert_eq!(outline.vertices().len(), 4);
//! ```

pub mod extras;
pub mod shapes;
pub mod viewport;
pub mod window;

pub use extras::{
    parse_polygon_cm, parse_positions_cm, place_extras, Accessory, AccessoryKind, ExtrasLayout,
    ExtrasOverrides, PolygonCm, PositionCm, ZipperLayout,
};
pub use shapes::{
    build_outline, shape_area_cm2, ArcSegment, Outline, Shape, WindowShape,
};
pub use viewport::{DrawingSurface, LayoutProjector};
pub use window::{clamp, ShapeKind, ShapeParams, WindowSpec};
