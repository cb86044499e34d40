//! Engine configuration
//!
//! Settings that stay fixed across computations: frame thickness, the
//! fallback fastener step, the drawing surface and the billing policies.
//! Stored as JSON or TOML, picked by file extension.

use serde::{Deserialize, Serialize};
use softglass_core::{ConfigError, Error, Result};
use softglass_designer::window::{DEFAULT_FRAME_CM, DEFAULT_STEP_CM};
use softglass_designer::DrawingSurface;
use softglass_pricing::{AccessoryCountPolicy, FastenerCountPolicy};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory name under the platform config directory
pub const CONFIG_DIR_NAME: &str = "softglass";
/// Default config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat {
                path: path.display().to_string(),
            }
            .into()),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Toml => "TOML",
        }
    }
}

/// Engine settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame thickness in cm, the same for every shape
    pub frame_cm: f64,
    /// Fastener step when neither the request nor the price table has one
    pub default_step_cm: f64,
    /// Which fastener count the hardware line is billed on
    pub fastener_count_policy: FastenerCountPolicy,
    /// Which patch and cutout counts the accessory lines are billed on
    pub accessory_count_policy: AccessoryCountPolicy,
    /// Price table loaded when none is given on the command line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_table_path: Option<PathBuf>,
    /// Surface the layout is projected onto
    pub drawing: DrawingSurface,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_cm: DEFAULT_FRAME_CM,
            default_step_cm: DEFAULT_STEP_CM,
            fastener_count_policy: FastenerCountPolicy::Estimate,
            accessory_count_policy: AccessoryCountPolicy::Requested,
            price_table_path: None,
            drawing: DrawingSurface::default(),
        }
    }
}

fn invalid(key: &str, reason: &str) -> Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

impl EngineConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let parse_error = |reason: String| ConfigError::Parse {
            format: format.name(),
            path: path.display().to_string(),
            reason,
        };
        let config: Self = match format {
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?
            }
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?,
        };

        config.validate()?;
        debug!(path = %path.display(), "engine config loaded");
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)
                .map_err(|e| Error::other(format!("Failed to serialize config: {}", e)))?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Loads the config at `path`, or the defaults when no file exists there.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.frame_cm.is_finite() || self.frame_cm < 0.0 {
            return Err(invalid("frame_cm", "must be a non-negative number"));
        }

        if !self.default_step_cm.is_finite() || self.default_step_cm <= 0.0 {
            return Err(invalid("default_step_cm", "must be > 0"));
        }

        let d = &self.drawing;
        if !(d.padding >= 0.0) {
            return Err(invalid("drawing.padding", "must be >= 0"));
        }
        if !(d.max_drawing_width() > 0.0) || !(d.max_drawing_height() > 0.0) {
            return Err(invalid(
                "drawing",
                "surface must be larger than twice the padding",
            ));
        }

        Ok(())
    }
}

/// Platform config directory for Softglass, falling back to the home
/// directory and then the working directory.
pub fn config_dir() -> PathBuf {
    let mut path = dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    path.push(CONFIG_DIR_NAME);
    path
}

/// Default location of the engine config file.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}
