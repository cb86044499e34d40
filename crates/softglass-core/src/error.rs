//! Error handling for Softglass
//!
//! Provides the error types shared by every layer of the engine:
//! - Validation errors (request dimensions the engine refuses to work with)
//! - Configuration errors (engine settings and price table files)
//!
//! Parameter clamping and unknown price references are not errors; they are
//! resolved in place and only traced.

use thiserror::Error;

/// Validation error type
///
/// Raised when a window request cannot be turned into geometry at all.
/// The computation is aborted and no partial quote is produced.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required dimension was not supplied
    #[error("Missing required dimension: {name}")]
    MissingDimension {
        /// The dimension name (`width` or `height`).
        name: &'static str,
    },

    /// A dimension was zero or negative
    #[error("Dimension '{name}' must be positive, got {value}")]
    NonPositiveDimension {
        /// The dimension name.
        name: &'static str,
        /// The rejected value in centimetres.
        value: f64,
    },

    /// A dimension was NaN or infinite
    #[error("Dimension '{name}' is not a finite number")]
    NonFiniteDimension {
        /// The dimension name.
        name: &'static str,
    },

    /// A dimension was larger than any window the engine lays out
    #[error("Dimension '{name}' must be at most {max} cm, got {value}")]
    DimensionTooLarge {
        /// The dimension name.
        name: &'static str,
        /// The rejected value in centimetres.
        value: f64,
        /// The largest accepted value in centimetres.
        max: f64,
    },
}

impl ValidationError {
    /// Name of the offending dimension
    pub fn dimension(&self) -> &'static str {
        match self {
            Self::MissingDimension { name }
            | Self::NonPositiveDimension { name, .. }
            | Self::NonFiniteDimension { name }
            | Self::DimensionTooLarge { name, .. } => name,
        }
    }
}

/// Configuration error type
///
/// Represents problems with engine settings or price table files.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    /// The file extension does not select a supported format
    #[error("Unsupported config format: {path}")]
    UnsupportedFormat {
        /// The offending path.
        path: String,
    },

    /// The file content could not be parsed
    #[error("Invalid {format} in {path}: {reason}")]
    Parse {
        /// Format name (JSON or TOML).
        format: &'static str,
        /// The offending path.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// A setting has an unusable value
    #[error("Invalid setting '{key}': {reason}")]
    InvalidValue {
        /// Setting key.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Main error type for Softglass
///
/// A unified error type used by public APIs of every crate.
#[derive(Error, Debug)]
pub enum Error {
    /// Request validation error
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// Check if this is a configuration error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::NonPositiveDimension {
            name: "width",
            value: -5.0,
        };
        assert_eq!(err.to_string(), "Dimension 'width' must be positive, got -5");
        assert_eq!(err.dimension(), "width");

        let err = ValidationError::MissingDimension { name: "height" };
        assert_eq!(err.to_string(), "Missing required dimension: height");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnsupportedFormat {
            path: "engine.ini".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported config format: engine.ini");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ValidationError::MissingDimension { name: "width" }.into();
        assert!(err.is_validation_error());
        assert!(!err.is_config_error());

        let err: Error = ConfigError::InvalidValue {
            key: "frame_cm".to_string(),
            reason: "must be > 0".to_string(),
        }
        .into();
        assert!(err.is_config_error());
        assert_eq!(err.to_string(), "Invalid setting 'frame_cm': must be > 0");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "prices.json");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
