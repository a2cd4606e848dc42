//! Configuration module for Wallweave.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.
//!
//! Unlike a long-running app, the CLI resolves its configuration once per
//! invocation, so there is no global instance here.

pub mod template;
pub mod types;

use std::path::{Path, PathBuf};

pub use types::{
    ConfigError, PathStatus, WallweaveConfig, active_config_path, config_paths, default_config_path,
    load_config, load_config_from_path, search_status,
};

/// Resolves the configuration for one invocation.
///
/// A `custom` path (from `--config`) must exist. Without one, the default
/// search paths are tried and a missing file falls back to defaults, with
/// `None` as the path.
///
/// # Errors
///
/// Returns any loading error except `NotFound` on the default search.
pub fn resolve(custom: Option<&Path>) -> Result<(WallweaveConfig, Option<PathBuf>), ConfigError> {
    let result = custom.map_or_else(load_config, load_config_from_path);

    match result {
        Ok((config, path)) => Ok((config, Some(path))),
        Err(ConfigError::NotFound) if custom.is_none() => {
            tracing::debug!("no configuration file found, using defaults");
            Ok((WallweaveConfig::default(), None))
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_custom_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.jsonc");
        let err = resolve(Some(&missing)).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound));
    }

    #[test]
    fn test_resolve_custom_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        std::fs::write(&path, r#"{ "compositor": { "seamBuffer": 4 } }"#).unwrap();

        let (config, used) = resolve(Some(&path)).unwrap();
        assert_eq!(config.compositor.seam_buffer, 4);
        assert_eq!(used.as_deref(), Some(path.as_path()));
    }
}
