//! # Softglass
//!
//! Geometry, hardware placement and pricing engine for soft PVC windows.
//!
//! ## Architecture
//!
//! Softglass is organized as a workspace with multiple crates:
//!
//! 1. **softglass-core** - Errors, units, 2-D geometry primitives
//! 2. **softglass-designer** - Window spec, outlines, accessories, drawing projection
//! 3. **softglass-hardware** - Grommet and bracket placement
//! 4. **softglass-pricing** - Price table, quotes, orders
//! 5. **softglass-settings** - Engine configuration and price table files
//! 6. **softglass** - The [`Engine`] tying them together and the CLI
//!
//! ## Data flow
//!
//! ```text
//! QuoteRequest ─► WindowSpec ─► Outline ─┬─► fasteners ─┐
//!                                        └─► extras ────┴─► Quote
//!                                                        └─► Drawing (px)
//! ```

pub mod engine;

pub use engine::{Computation, Drawing, Engine, QuoteRequest, WindowLayout};

pub use softglass_core::{Error, Result, ValidationError};
pub use softglass_designer::{Outline, ShapeKind, WindowSpec};
pub use softglass_hardware::{FastenerKind, FastenerLayout, FastenerPoint};
pub use softglass_pricing::{AccessoryCountPolicy, FastenerCountPolicy, Order, PriceTable, Quote};
pub use softglass_settings::EngineConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr so stdout stays clean for JSON
/// - RUST_LOG environment variable support
/// - WARN level when RUST_LOG is not set
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
