//! Shared types for CLI commands.

use crate::params::{BrightnessScope, FillMode};

/// Fill mode (CLI representation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFillMode {
    /// Sample the source's edges, or stretch its halves when they are too narrow.
    Direct,
    /// Scale the whole source to the canvas width as a background.
    MatchedRatio,
    /// Reflect the source's edges outward.
    Mirror,
}

impl From<CliFillMode> for FillMode {
    fn from(mode: CliFillMode) -> Self {
        match mode {
            CliFillMode::Direct => Self::Direct,
            CliFillMode::MatchedRatio => Self::MatchedRatio,
            CliFillMode::Mirror => Self::Mirror,
        }
    }
}

/// Brightness scope (CLI representation).
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliBrightnessScope {
    /// Dim only the blurred background.
    Background,
    /// Dim the whole canvas, source included.
    Canvas,
}

impl From<CliBrightnessScope> for BrightnessScope {
    fn from(scope: CliBrightnessScope) -> Self {
        match scope {
            CliBrightnessScope::Background => Self::Background,
            CliBrightnessScope::Canvas => Self::Canvas,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_mode_conversion() {
        assert_eq!(FillMode::from(CliFillMode::Direct), FillMode::Direct);
        assert_eq!(FillMode::from(CliFillMode::MatchedRatio), FillMode::MatchedRatio);
        assert_eq!(FillMode::from(CliFillMode::Mirror), FillMode::Mirror);
    }

    #[test]
    fn test_brightness_scope_conversion() {
        assert_eq!(BrightnessScope::from(CliBrightnessScope::Canvas), BrightnessScope::Canvas);
        assert_eq!(
            BrightnessScope::from(CliBrightnessScope::Background),
            BrightnessScope::Background
        );
    }
}
