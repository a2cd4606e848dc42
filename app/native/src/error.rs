//! Error types for Wallweave.
//!
//! `ExtendError` is returned by the compositor and only ever describes bad
//! input. `WallweaveError` is the application-level error used by the CLI,
//! and wraps everything else (configuration, I/O, serialization).

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while extending an image.
///
/// The compositor has no partial states: every variant is raised before any
/// canvas is allocated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtendError {
    /// Source or target dimensions are zero, or the aspect ratio is not a
    /// positive finite number.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Pixel data does not match the declared channel layout.
    #[error("Unsupported pixel format: {0}")]
    UnsupportedFormat(String),
    /// A compositing parameter is outside of its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParams(String),
}

/// Errors that can occur during application execution.
#[derive(Debug, Error)]
pub enum WallweaveError {
    /// Compositing failed.
    #[error("Compositor error: {0}")]
    CompositorError(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<ExtendError> for WallweaveError {
    fn from(err: ExtendError) -> Self { Self::CompositorError(err.to_string()) }
}

impl From<ConfigError> for WallweaveError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<std::io::Error> for WallweaveError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for WallweaveError {
    fn from(err: serde_json::Error) -> Self { Self::SerializationError(err.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // ExtendError tests
    // ========================================================================

    #[test]
    fn test_invalid_geometry_display() {
        let err = ExtendError::InvalidGeometry("source width is zero".to_string());
        let msg = err.to_string();
        assert!(msg.contains("Invalid geometry"));
        assert!(msg.contains("source width is zero"));
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = ExtendError::UnsupportedFormat("expected 12 bytes, got 10".to_string());
        assert!(err.to_string().contains("Unsupported pixel format"));
    }

    #[test]
    fn test_invalid_params_display() {
        let err = ExtendError::InvalidParams("brightness_factor must be positive".to_string());
        assert!(err.to_string().contains("Invalid parameter"));
    }

    // ========================================================================
    // WallweaveError tests
    // ========================================================================

    #[test]
    fn test_extend_error_converts_to_compositor_error() {
        let err: WallweaveError = ExtendError::InvalidGeometry("ratio is NaN".to_string()).into();
        assert!(matches!(err, WallweaveError::CompositorError(_)));
        assert!(err.to_string().contains("ratio is NaN"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: WallweaveError = ConfigError::NotFound.into();
        assert!(matches!(err, WallweaveError::ConfigError(_)));
        assert!(err.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: WallweaveError = io_err.into();
        assert!(matches!(err, WallweaveError::IoError(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_serde_json_error_converts() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: WallweaveError = json_err.into();
        assert!(matches!(err, WallweaveError::SerializationError(_)));
        assert!(err.to_string().starts_with("Serialization error"));
    }
}
