//! Configuration template generation.
//!
//! Generates a commented configuration template with all available options.

use std::fs;
use std::path::Path;

use crate::config::ConfigError;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// Wallweave Configuration File
// ============================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.

{
  // "$schema": "./wallweave.schema.json",

  // ============================================================================
  // Compositor
  // ============================================================================
  // "compositor": {
  //   // Gaussian blur radius for the fill panels (0 = no blur)
  //   "blurRadius": 20,
  //
  //   // Brightness multiplier (1 = unchanged, below 1 darkens)
  //   "brightnessFactor": 0.8,
  //
  //   // What the brightness applies to: "background" or "canvas"
  //   "brightnessScope": "background",
  //
  //   // Pixels at each seam taken from the blurred layer
  //   "seamBuffer": 1,
  //
  //   // Only extend images narrower than this fraction of the canvas
  //   "minFillFraction": 0.9,
  //
  //   // Fill mode: "direct", "matchedRatio" or "mirror"
  //   "fillMode": "direct",
  //
  //   // Extra columns the right panel may absorb when the padding is odd
  //   "edgeCorrection": 1
  // },

  // ============================================================================
  // Display
  // ============================================================================
  // Target display used when no --aspect or --screen is given
  // "display": { "width": 2560, "height": 1440 }
}
"#
    .to_string()
}

/// Creates a configuration file with the template at the specified path.
///
/// Creates parent directories if they don't exist.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}

/// Writes the template to `path`, refusing to replace an existing file
/// unless `overwrite` is set.
///
/// # Errors
///
/// Returns `ConfigError::AlreadyExists` for an existing file without
/// `overwrite`, or `ConfigError::IoError` if writing fails.
pub fn write_template(path: &Path, overwrite: bool) -> Result<(), ConfigError> {
    if path.exists() && !overwrite {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    create_config_file(path)?;
    tracing::info!(path = %path.display(), overwrite, "wrote configuration template");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WallweaveConfig;

    #[test]
    fn test_generate_config_template_is_valid_jsonc() {
        let template = generate_config_template();
        let stripped = json_comments::StripComments::new(template.as_bytes());
        let config: WallweaveConfig = serde_json::from_reader(stripped).unwrap();
        assert_eq!(config, WallweaveConfig::default());
    }

    #[test]
    fn test_generate_config_template_contains_all_sections() {
        let template = generate_config_template();
        for key in [
            "compositor",
            "blurRadius",
            "brightnessFactor",
            "brightnessScope",
            "seamBuffer",
            "minFillFraction",
            "fillMode",
            "edgeCorrection",
            "display",
        ] {
            assert!(template.contains(key), "template is missing {key}");
        }
    }

    #[test]
    fn test_create_config_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("wallweave").join("config.jsonc");
        create_config_file(&path).unwrap();
        assert!(path.exists());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), generate_config_template());
    }

    #[test]
    fn test_write_template_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        std::fs::write(&path, "{}").unwrap();

        let err = write_template(&path, false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(ref p) if p == &path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");

        write_template(&path, true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), generate_config_template());
    }
}
