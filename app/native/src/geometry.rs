//! Canvas geometry.
//!
//! Works out how large the extended canvas is and where the source and the
//! two fill panels sit on it. Everything here is integer arithmetic over the
//! source size and a target aspect ratio; no pixels are touched.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ExtendError;

/// Display dimensions in pixels.
///
/// The compositor never enumerates displays itself; callers hand in a
/// `ScreenSize` (or its aspect ratio) obtained however they like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScreenSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ScreenSize {
    /// Returns a default screen size (2K) for when nothing else is known.
    #[must_use]
    pub const fn default_2k() -> Self { Self { width: 2560, height: 1440 } }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(self) -> f64 { f64::from(self.width) / f64::from(self.height) }
}

impl std::str::FromStr for ScreenSize {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `3440x1440`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("Invalid size '{s}'. Expected WIDTHxHEIGHT, e.g. 1920x1080."))?;

        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .ok()
                .filter(|v| *v > 0)
                .ok_or_else(|| format!("Invalid size '{s}'. Both sides must be positive integers."))
        };

        Ok(Self { width: parse(w)?, height: parse(h)? })
    }
}

impl std::fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Placement of the source and fill panels on the target canvas.
///
/// `width` is always `round(source_height * ratio)` and `height` is always
/// the source height; the remaining fields only make sense when
/// `needs_extension()` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasGeometry {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels (equal to the source height).
    pub height: u32,
    /// Width of the source image.
    pub source_width: u32,
    /// `floor((width - source_width) / 2)`; zero or negative means the source
    /// already fills the canvas.
    pub side_padding: i64,
}

impl CanvasGeometry {
    /// Computes the canvas for a source of `source_width x source_height`
    /// shown at `target_aspect_ratio`.
    ///
    /// # Errors
    ///
    /// Returns `ExtendError::InvalidGeometry` for zero dimensions, a
    /// non-finite or non-positive ratio, or a canvas that does not fit in
    /// `u32`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn compute(
        source_width: u32,
        source_height: u32,
        target_aspect_ratio: f64,
    ) -> Result<Self, ExtendError> {
        if source_width == 0 || source_height == 0 {
            return Err(ExtendError::InvalidGeometry(format!(
                "source must be non-empty, got {source_width}x{source_height}"
            )));
        }

        if !target_aspect_ratio.is_finite() || target_aspect_ratio <= 0.0 {
            return Err(ExtendError::InvalidGeometry(format!(
                "target aspect ratio must be a positive number, got {target_aspect_ratio}"
            )));
        }

        let width = (f64::from(source_height) * target_aspect_ratio).round();
        if width < 1.0 || width > f64::from(u32::MAX) {
            return Err(ExtendError::InvalidGeometry(format!(
                "target width {width} for height {source_height} is out of range"
            )));
        }
        let width = width as u32;

        let side_padding = (i64::from(width) - i64::from(source_width)).div_euclid(2);

        Ok(Self {
            width,
            height: source_height,
            source_width,
            side_padding,
        })
    }

    /// Returns whether there is at least one column to fill on each side.
    #[must_use]
    pub const fn needs_extension(&self) -> bool { self.side_padding > 0 }

    /// Left panel width, which is also the x offset of the source.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub const fn left_width(&self) -> u32 {
        if self.side_padding > 0 { self.side_padding as u32 } else { 0 }
    }

    /// Columns left over on the right after the source, before any
    /// correction: `side_padding` or `side_padding + 1` when the total
    /// padding is odd.
    #[must_use]
    pub const fn right_space(&self) -> u32 {
        self.width.saturating_sub(self.left_width() + self.source_width)
    }

    /// Right panel width when the panel may absorb up to `edge_correction`
    /// columns of flooring remainder.
    #[must_use]
    pub const fn right_width(&self, edge_correction: u32) -> u32 {
        let base = self.left_width();
        let remainder = self.right_space().saturating_sub(base);
        let absorbed = if remainder < edge_correction { remainder } else { edge_correction };
        base + absorbed
    }

    /// First column of the right panel.
    #[must_use]
    pub const fn right_offset(&self) -> u32 { self.left_width() + self.source_width }

    /// Columns `[start, end)` kept sharp by the seam mask.
    ///
    /// The range is the source's own columns shrunk by `seam_buffer` on both
    /// sides; it is empty when the buffer swallows the whole source.
    #[must_use]
    pub fn sharp_columns(&self, seam_buffer: u32) -> std::ops::Range<u32> {
        let start = self.left_width().saturating_add(seam_buffer);
        let end = self.right_offset().saturating_sub(seam_buffer);
        start..end.max(start)
    }
}
