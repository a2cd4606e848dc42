//! Fill layer construction.
//!
//! Each strategy produces a full-canvas RGB layer. The layer is what gets
//! blurred; the sharp layer is the same thing with the untouched source
//! pasted on top at its centered offset.

use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::Serialize;

use crate::geometry::CanvasGeometry;
use crate::params::FillMode;

/// Resampling filter used whenever the source is resized.
const SCALING: FilterType = FilterType::Lanczos3;

/// Concrete algorithm used to fill the side gaps of one composite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FillStrategy {
    /// Each half of the source resized to the panel width.
    Stretch,
    /// The source's outermost columns copied verbatim.
    SampledBlur,
    /// The whole source scaled to canvas width and center-cropped.
    MatchedRatioBackground,
    /// The source's edge columns reflected outward.
    Mirror,
}

impl FillStrategy {
    /// Picks the strategy for `geometry` under `mode`.
    ///
    /// In `Direct` mode, sampling would have to reuse more than half of the
    /// image once the padding exceeds half the source width, so the halves
    /// are stretched instead. Exactly half still samples.
    #[must_use]
    pub fn select(geometry: &CanvasGeometry, mode: FillMode) -> Self {
        match mode {
            FillMode::Direct => {
                if geometry.side_padding * 2 > i64::from(geometry.source_width) {
                    Self::Stretch
                } else {
                    Self::SampledBlur
                }
            }
            FillMode::MatchedRatio => Self::MatchedRatioBackground,
            FillMode::Mirror => Self::Mirror,
        }
    }

    /// Short human-readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stretch => "stretch",
            Self::SampledBlur => "sampled",
            Self::MatchedRatioBackground => "matched-ratio",
            Self::Mirror => "mirror",
        }
    }
}

impl std::fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Builds the full-canvas layer that sits under the sharp source.
///
/// `geometry.needs_extension()` must hold.
pub(crate) fn build_fill_layer(
    source: &RgbImage,
    geometry: &CanvasGeometry,
    strategy: FillStrategy,
    edge_correction: u32,
) -> RgbImage {
    match strategy {
        FillStrategy::Stretch => {
            let (left, right) = stretched_panels(source, geometry, edge_correction);
            assemble(source, geometry, &left, &right)
        }
        FillStrategy::SampledBlur => {
            let (left, right) = sampled_panels(source, geometry, edge_correction);
            assemble(source, geometry, &left, &right)
        }
        FillStrategy::MatchedRatioBackground => matched_ratio_background(source, geometry),
        FillStrategy::Mirror => mirrored(source, geometry),
    }
}

/// Returns `layer` with `source` pasted at its centered offset.
pub(crate) fn place_source(layer: &RgbImage, source: &RgbImage, geometry: &CanvasGeometry) -> RgbImage {
    let mut sharp = layer.clone();
    imageops::replace(&mut sharp, source, i64::from(geometry.left_width()), 0);
    sharp
}

/// Splits the source at its midpoint and resizes each half to panel width.
fn stretched_panels(
    source: &RgbImage,
    geometry: &CanvasGeometry,
    edge_correction: u32,
) -> (RgbImage, RgbImage) {
    let (width, height) = source.dimensions();

    // A single column has no halves; both panels stretch the whole thing.
    let (left_half, right_half) = if width < 2 {
        (source.clone(), source.clone())
    } else {
        let split = width / 2;
        (
            imageops::crop_imm(source, 0, 0, split, height).to_image(),
            imageops::crop_imm(source, split, 0, width - split, height).to_image(),
        )
    };

    let left = imageops::resize(&left_half, geometry.left_width(), height, SCALING);
    let right = imageops::resize(&right_half, geometry.right_width(edge_correction), height, SCALING);
    (left, right)
}

/// Copies the outermost columns of the source.
fn sampled_panels(
    source: &RgbImage,
    geometry: &CanvasGeometry,
    edge_correction: u32,
) -> (RgbImage, RgbImage) {
    let (width, height) = source.dimensions();
    let left_width = geometry.left_width().min(width);
    let right_width = geometry.right_width(edge_correction).min(width);

    let left = imageops::crop_imm(source, 0, 0, left_width, height).to_image();
    let right = imageops::crop_imm(source, width - right_width, 0, right_width, height).to_image();
    (left, right)
}

/// Lays out `left | source | right` on a fresh canvas.
///
/// Columns the right panel does not reach (odd spare width with no edge
/// correction) repeat the column before them.
fn assemble(
    source: &RgbImage,
    geometry: &CanvasGeometry,
    left: &RgbImage,
    right: &RgbImage,
) -> RgbImage {
    let mut canvas = RgbImage::new(geometry.width, geometry.height);
    imageops::replace(&mut canvas, left, 0, 0);
    imageops::replace(&mut canvas, source, i64::from(geometry.left_width()), 0);

    let right_offset = geometry.right_offset();
    imageops::replace(&mut canvas, right, i64::from(right_offset), 0);

    let covered = (right_offset + right.width()).min(geometry.width);
    for x in covered.max(1)..geometry.width {
        for y in 0..geometry.height {
            let previous = *canvas.get_pixel(x - 1, y);
            canvas.put_pixel(x, y, previous);
        }
    }

    canvas
}

/// Scales the whole source to canvas width and crops the vertical center.
///
/// Only the band of source rows that survives the crop is resized, so the
/// intermediate image never exceeds the canvas.
fn matched_ratio_background(source: &RgbImage, geometry: &CanvasGeometry) -> RgbImage {
    let (width, height) = source.dimensions();
    let (top, band_height) = center_band(width, height, geometry.width);

    let band = imageops::crop_imm(source, 0, top, width, band_height).to_image();
    imageops::resize(&band, geometry.width, height, SCALING)
}

/// Source rows `(top, height)` that map onto the canvas once the source is
/// scaled to `target_width`: `max(1, round(h * w / target_width))` rows,
/// vertically centered.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn center_band(width: u32, height: u32, target_width: u32) -> (u32, u32) {
    let exact = f64::from(height) * f64::from(width) / f64::from(target_width.max(1));
    let band_height = (exact.round() as u32).clamp(1, height);
    ((height - band_height) / 2, band_height)
}

/// Reflects the source about its left and right borders to cover the canvas.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mirrored(source: &RgbImage, geometry: &CanvasGeometry) -> RgbImage {
    let source_width = source.width();
    let offset = i64::from(geometry.left_width());

    RgbImage::from_fn(geometry.width, geometry.height, |x, y| {
        let sx = reflect_index(i64::from(x) - offset, source_width);
        *source.get_pixel(sx, y)
    })
}

/// Maps any column index onto `[0, len)` by repeated reflection that
/// includes the border pixel (`fedcba|abcdef|fedcba`).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn reflect_index(index: i64, len: u32) -> u32 {
    let len = i64::from(len);
    let period = 2 * len;
    let folded = index.rem_euclid(period);
    let mapped = if folded < len { folded } else { period - 1 - folded };
    mapped as u32
}
