//! Configuration and price table files for Softglass
//!
//! Provides the engine configuration (JSON or TOML, stored in the
//! platform config directory) and loading of the externally maintained
//! price table.

pub mod config;
pub mod prices;

pub use config::{config_dir, default_config_path, ConfigFormat, EngineConfig};
pub use prices::{load_price_table, save_price_table};
