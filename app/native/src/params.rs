//! Compositing parameters.
//!
//! Every tunable knob of the compositor lives here, including the constants
//! that are easy to mistake for derived values (seam buffer, right edge
//! correction, minimum fill fraction). The struct doubles as the
//! `compositor` section of the configuration file.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ExtendError;

/// Default Gaussian blur radius for the fill panels.
pub const DEFAULT_BLUR_RADIUS: f32 = 20.0;

/// Default brightness multiplier for the blurred background.
pub const DEFAULT_BRIGHTNESS: f32 = 0.8;

/// Default inward margin, in pixels, of the blurred band at the seams.
pub const DEFAULT_SEAM_BUFFER: u32 = 1;

/// Images narrower than this fraction of the canvas get extended.
pub const DEFAULT_MIN_FILL_FRACTION: f64 = 0.9;

/// Default number of flooring-remainder columns the right panel may absorb.
pub const DEFAULT_EDGE_CORRECTION: u32 = 1;

/// How the gaps on either side of the source are filled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum FillMode {
    /// Panels come straight from the source: its edge columns when there are
    /// enough of them, otherwise each half stretched to the panel width.
    #[default]
    Direct,
    /// The whole source scaled to canvas width and center-cropped serves as
    /// a single full-width background.
    MatchedRatio,
    /// The source's edge columns reflected outward.
    Mirror,
}

/// Which part of the composite the brightness factor applies to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum BrightnessScope {
    /// Only the blurred background; the sharp source keeps its own levels.
    #[default]
    Background,
    /// The whole composite after blending, source included.
    Canvas,
}

/// Compositor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CompositeParams {
    /// Gaussian blur radius (sigma) in pixels applied to the fill layer.
    /// 0 disables blurring. Useful range: 0-100.
    /// Default: 20
    pub blur_radius: f32,

    /// Multiplier applied to every channel, clamped to the valid range.
    /// 1.0 leaves the image untouched, values below 1 darken.
    /// Default: 0.8
    pub brightness_factor: f32,

    /// Part of the composite the brightness factor applies to.
    /// Default: "background"
    pub brightness_scope: BrightnessScope,

    /// Inward margin in pixels on each side of the source that is taken from
    /// the blurred layer instead of the sharp one, softening the seam.
    /// Default: 1
    pub seam_buffer: u32,

    /// Images narrower than this fraction of the canvas width are extended
    /// by `extend_if_needed`; wider ones are returned as they are.
    /// Must be within (0, 1). Default: 0.9
    pub min_fill_fraction: f64,

    /// Fill strategy family.
    /// Default: "direct"
    pub fill_mode: FillMode,

    /// When the spare width is odd, the right panel absorbs up to this many
    /// extra columns. With 0 the last column repeats its neighbour instead.
    /// Default: 1
    pub edge_correction: u32,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            blur_radius: DEFAULT_BLUR_RADIUS,
            brightness_factor: DEFAULT_BRIGHTNESS,
            brightness_scope: BrightnessScope::default(),
            seam_buffer: DEFAULT_SEAM_BUFFER,
            min_fill_fraction: DEFAULT_MIN_FILL_FRACTION,
            fill_mode: FillMode::default(),
            edge_correction: DEFAULT_EDGE_CORRECTION,
        }
    }
}

impl CompositeParams {
    /// Returns a copy with a different blur radius.
    #[must_use]
    pub const fn with_blur_radius(mut self, blur_radius: f32) -> Self {
        self.blur_radius = blur_radius;
        self
    }

    /// Returns a copy with a different brightness factor.
    #[must_use]
    pub const fn with_brightness(mut self, brightness_factor: f32) -> Self {
        self.brightness_factor = brightness_factor;
        self
    }

    /// Returns a copy with a different fill mode.
    #[must_use]
    pub const fn with_fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Returns a copy with a different seam buffer.
    #[must_use]
    pub const fn with_seam_buffer(mut self, seam_buffer: u32) -> Self {
        self.seam_buffer = seam_buffer;
        self
    }

    /// Returns whether the brightness pass would change anything.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn adjusts_brightness(&self) -> bool { self.brightness_factor != 1.0 }

    /// Checks every field against its domain.
    ///
    /// # Errors
    ///
    /// Returns `ExtendError::InvalidParams` naming the first offending field.
    pub fn validate(&self) -> Result<(), ExtendError> {
        if !self.blur_radius.is_finite() || self.blur_radius < 0.0 {
            return Err(ExtendError::InvalidParams(format!(
                "blurRadius must be a finite value >= 0, got {}",
                self.blur_radius
            )));
        }

        if !self.brightness_factor.is_finite() || self.brightness_factor <= 0.0 {
            return Err(ExtendError::InvalidParams(format!(
                "brightnessFactor must be a finite value > 0, got {}",
                self.brightness_factor
            )));
        }

        if !(self.min_fill_fraction > 0.0 && self.min_fill_fraction < 1.0) {
            return Err(ExtendError::InvalidParams(format!(
                "minFillFraction must be within (0, 1), got {}",
                self.min_fill_fraction
            )));
        }

        Ok(())
    }
}
