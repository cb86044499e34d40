//! Price table files
//!
//! The price table is owned by whoever edits prices; the engine only reads
//! it. Files are JSON in the same camelCase layout the editor stores.

use softglass_core::{ConfigError, Result};
use softglass_pricing::PriceTable;
use std::path::Path;
use tracing::debug;

/// Load a price table from a JSON file
pub fn load_price_table(path: &Path) -> Result<PriceTable> {
    let content = std::fs::read_to_string(path)?;
    let table = PriceTable::from_json_str(&content).map_err(|e| ConfigError::Parse {
        format: "JSON",
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    debug!(
        path = %path.display(),
        materials = table.materials.len(),
        hardware = table.hardware.len(),
        "price table loaded"
    );
    Ok(table)
}

/// Save a price table as pretty-printed JSON
pub fn save_price_table(table: &PriceTable, path: &Path) -> Result<()> {
    std::fs::write(path, table.to_json_string()?)?;
    Ok(())
}
