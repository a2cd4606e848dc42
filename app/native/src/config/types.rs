//! Configuration types and loading for Wallweave.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::ScreenSize;
use crate::params::CompositeParams;

/// Root configuration structure.
///
/// Every section is optional; a missing or empty file yields the compositor
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct WallweaveConfig {
    /// Optional JSON Schema reference for editor support.
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Compositor parameters.
    pub compositor: CompositeParams,

    /// Display the canvas is planned for when neither `--aspect` nor
    /// `--screen` is given on the command line.
    /// Default: none (falls back to 2560x1440)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<ScreenSize>,
}

impl WallweaveConfig {
    /// Returns the configured display, or the 2K fallback.
    #[must_use]
    pub fn display_or_default(&self) -> ScreenSize {
        self.display.unwrap_or_else(ScreenSize::default_2k)
    }
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
    /// The configuration parsed but holds out-of-range values.
    Invalid(String),
    /// A new configuration file would replace an existing one.
    AlreadyExists(PathBuf),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/wallweave/config.jsonc \
                or ~/.wallweave.jsonc"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
            Self::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
            Self::AlreadyExists(path) => {
                write!(f, "{} already exists (pass --force to replace it)", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound | Self::Invalid(_) | Self::AlreadyExists(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Legacy configuration file names in home directory.
const LEGACY_CONFIG_FILE_NAMES: &[&str] = &[".wallweave.jsonc", ".wallweave.json"];

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/wallweave/` if set
/// 2. `~/.config/wallweave/`
/// 3. The platform configuration directory (`dirs::config_dir()`)
/// 4. `~/.wallweave.jsonc` or `~/.wallweave.json`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let app_dir = PathBuf::from(xdg_config).join("wallweave");
        for filename in CONFIG_FILE_NAMES {
            paths.push(app_dir.join(filename));
        }
    }

    if let Some(home) = dirs::home_dir() {
        let app_dir = home.join(".config").join("wallweave");
        for filename in CONFIG_FILE_NAMES {
            let path = app_dir.join(filename);
            // XDG_CONFIG_HOME might be ~/.config
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let app_dir = config_dir.join("wallweave");
        for filename in CONFIG_FILE_NAMES {
            let path = app_dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if let Some(home) = dirs::home_dir() {
        for filename in LEGACY_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from a specific file.
///
/// Comments are stripped before parsing and the compositor section is
/// validated.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist,
/// `ConfigError::IoError` if it cannot be read, `ConfigError::ParseError`
/// for invalid JSON and `ConfigError::Invalid` for out-of-range values.
pub fn load_config_from_path(path: &Path) -> Result<(WallweaveConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: WallweaveConfig = serde_json::from_reader(reader)?;

    config.compositor.validate().map_err(|err| ConfigError::Invalid(err.to_string()))?;
    if let Some(display) = config.display.filter(|d| d.width == 0 || d.height == 0) {
        return Err(ConfigError::Invalid(format!("display {display} is empty")));
    }

    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok((config, path.to_path_buf()))
}

/// Where a search path stands relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStatus {
    /// The first existing file; this is the one that gets loaded.
    Active,
    /// Exists, but an earlier path wins.
    Shadowed,
    /// Does not exist.
    Missing,
}

/// Tags each of `paths` with its status, preserving order.
#[must_use]
pub fn classify_paths(paths: Vec<PathBuf>) -> Vec<(PathBuf, PathStatus)> {
    let mut active_seen = false;
    paths
        .into_iter()
        .map(|path| {
            let status = match (path.exists(), active_seen) {
                (false, _) => PathStatus::Missing,
                (true, true) => PathStatus::Shadowed,
                (true, false) => {
                    active_seen = true;
                    PathStatus::Active
                }
            };
            (path, status)
        })
        .collect()
}

/// Returns the search paths tagged with their status.
#[must_use]
pub fn search_status() -> Vec<(PathBuf, PathStatus)> { classify_paths(config_paths()) }

/// Returns the configuration file that [`load_config`] would read.
#[must_use]
pub fn active_config_path() -> Option<PathBuf> {
    search_status()
        .into_iter()
        .find_map(|(path, status)| (status == PathStatus::Active).then_some(path))
}

/// Returns where a new configuration file should be created: the first
/// search path, or `config.jsonc` in the working directory when no home
/// directory is known.
#[must_use]
pub fn default_config_path() -> PathBuf {
    config_paths().into_iter().next().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAMES[0]))
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of
/// the expected locations, or any error from [`load_config_from_path`] for
/// the first file that does.
pub fn load_config() -> Result<(WallweaveConfig, PathBuf), ConfigError> {
    active_config_path().map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::params::FillMode;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_uses_compositor_defaults() {
        let config = WallweaveConfig::default();
        assert_eq!(config.compositor, CompositeParams::default());
        assert_eq!(config.display, None);
        assert_eq!(config.display_or_default(), ScreenSize::default_2k());
    }

    #[test]
    fn test_config_deserializes_with_comments() {
        let file = write_config(
            r#"{
                // Softer background
                "compositor": {
                    "blurRadius": 35,
                    /* mirror the edges */
                    "fillMode": "mirror"
                },
                "display": { "width": 3440, "height": 1440 }
            }"#,
        );

        let (config, path) = load_config_from_path(file.path()).unwrap();
        assert_eq!(path, file.path());
        assert!((config.compositor.blur_radius - 35.0).abs() < f32::EPSILON);
        assert_eq!(config.compositor.fill_mode, FillMode::Mirror);
        assert_eq!(config.display, Some(ScreenSize { width: 3440, height: 1440 }));
    }

    #[test]
    fn test_empty_object_is_default() {
        let file = write_config("{}");
        let (config, _) = load_config_from_path(file.path()).unwrap();
        assert_eq!(config, WallweaveConfig::default());
    }

    #[test]
    fn test_schema_key_is_accepted() {
        let file = write_config(r#"{ "$schema": "./wallweave.schema.json" }"#);
        let (config, _) = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.schema.as_deref(), Some("./wallweave.schema.json"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("nope.jsonc")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let file = write_config("{ \"compositor\": ");
        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_out_of_range_values_are_invalid() {
        let file = write_config(r#"{ "compositor": { "brightnessFactor": -1 } }"#);
        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("brightnessFactor"));
    }

    #[test]
    fn test_empty_display_is_invalid() {
        let file = write_config(r#"{ "display": { "width": 0, "height": 1080 } }"#);
        let err = load_config_from_path(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_config_paths_are_not_empty() {
        let paths = config_paths();
        assert!(!paths.is_empty() || std::env::var("HOME").is_err());
    }

    #[test]
    fn test_config_paths_end_with_known_names() {
        for path in config_paths() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            assert!(
                CONFIG_FILE_NAMES.contains(&name) || LEGACY_CONFIG_FILE_NAMES.contains(&name),
                "unexpected config file name: {name}"
            );
        }
    }

    #[test]
    fn test_classify_paths_marks_first_existing_active() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("config.jsonc");
        let first = dir.path().join("config.json");
        let second = dir.path().join(".wallweave.jsonc");
        std::fs::write(&first, "{}").unwrap();
        std::fs::write(&second, "{}").unwrap();

        let statuses: Vec<_> = classify_paths(vec![missing.clone(), first.clone(), second.clone()])
            .into_iter()
            .map(|(_, status)| status)
            .collect();
        assert_eq!(statuses, [PathStatus::Missing, PathStatus::Active, PathStatus::Shadowed]);
    }

    #[test]
    fn test_classify_paths_without_files_has_no_active() {
        let dir = tempfile::tempdir().unwrap();
        let paths = vec![dir.path().join("a.jsonc"), dir.path().join("b.jsonc")];
        assert!(classify_paths(paths).iter().all(|(_, status)| *status == PathStatus::Missing));
    }

    #[test]
    fn test_default_config_path_is_first_search_path() {
        let path = default_config_path();
        match config_paths().first() {
            Some(first) => assert_eq!(&path, first),
            None => assert_eq!(path, PathBuf::from("config.jsonc")),
        }
    }

    #[test]
    fn test_config_error_display() {
        let msg = ConfigError::NotFound.to_string();
        assert!(msg.contains("No configuration file found"));
    }
}
