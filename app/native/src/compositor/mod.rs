//! Image-extension compositor.
//!
//! Turns a source image into a wider canvas by filling the gaps on either
//! side with content derived from the source itself, blurring the fill and
//! keeping the source sharp through a seam mask.
//!
//! Pipeline, shared by every fill strategy:
//!
//! 1. compute the canvas geometry, returning the source as-is when it
//!    already fills the target width;
//! 2. build the fill layer (stretched halves, sampled edges, a scaled
//!    background or mirrored edges);
//! 3. blur the fill layer and optionally dim it;
//! 4. copy the sharp layer through the seam mask;
//! 5. optionally adjust the brightness of the whole canvas.

mod effects;
mod fill;
mod mask;

use image::RgbImage;
use serde::Serialize;

pub use self::effects::{apply_brightness, composite_through_mask, gaussian_blur};
pub use self::fill::FillStrategy;
pub use self::mask::SeamMask;
use crate::buffer::PixelBuffer;
use crate::error::ExtendError;
use crate::geometry::{CanvasGeometry, ScreenSize};
use crate::params::{BrightnessScope, CompositeParams};

/// Extends `source` to `target_aspect_ratio`.
///
/// The result is always opaque RGB. Its height equals the source height; its
/// width is `round(height * target_aspect_ratio)` when there is room for at
/// least one column on each side, and the source width otherwise.
///
/// # Errors
///
/// Returns `ExtendError::InvalidParams` for out-of-domain parameters and
/// `ExtendError::InvalidGeometry` for a non-positive or non-finite ratio.
pub fn extend(
    source: &PixelBuffer,
    target_aspect_ratio: f64,
    params: &CompositeParams,
) -> Result<PixelBuffer, ExtendError> {
    params.validate()?;
    let geometry = CanvasGeometry::compute(source.width(), source.height(), target_aspect_ratio)?;

    let flat = source.flatten();
    if !geometry.needs_extension() {
        tracing::debug!(
            source_width = source.width(),
            target_width = geometry.width,
            "source already fills the canvas, skipping extension"
        );
        return Ok(PixelBuffer::from(flat));
    }

    let strategy = FillStrategy::select(&geometry, params.fill_mode);
    Ok(PixelBuffer::from(composite(&flat, &geometry, strategy, params)))
}

/// Extends `source` to fit `screen`.
///
/// # Errors
///
/// Same as [`extend`], plus `ExtendError::InvalidGeometry` for a screen with
/// a zero dimension.
pub fn extend_for_screen(
    source: &PixelBuffer,
    screen: ScreenSize,
    params: &CompositeParams,
) -> Result<PixelBuffer, ExtendError> {
    if screen.width == 0 || screen.height == 0 {
        return Err(ExtendError::InvalidGeometry(format!("screen size {screen} is empty")));
    }
    extend(source, screen.aspect_ratio(), params)
}

/// Returns whether extending is worthwhile under the minimum fill policy:
/// the source must be narrower than `min_fill_fraction` of the canvas.
#[must_use]
pub fn should_extend(source_width: u32, geometry: &CanvasGeometry, params: &CompositeParams) -> bool {
    f64::from(source_width) < f64::from(geometry.width) * params.min_fill_fraction
}

/// Like [`extend`], but returns the flattened source untouched when
/// [`should_extend`] says the source is already wide enough.
///
/// # Errors
///
/// Same as [`extend`].
pub fn extend_if_needed(
    source: &PixelBuffer,
    target_aspect_ratio: f64,
    params: &CompositeParams,
) -> Result<PixelBuffer, ExtendError> {
    params.validate()?;
    let geometry = CanvasGeometry::compute(source.width(), source.height(), target_aspect_ratio)?;

    if !should_extend(source.width(), &geometry, params) {
        tracing::debug!(
            source_width = source.width(),
            target_width = geometry.width,
            min_fill_fraction = params.min_fill_fraction,
            "source is wide enough, not extending"
        );
        return Ok(PixelBuffer::from(source.flatten()));
    }

    extend(source, target_aspect_ratio, params)
}

/// What `extend` would do for a given source size, without touching pixels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositePlan {
    /// Canvas geometry.
    pub geometry: CanvasGeometry,
    /// Strategy that would fill the gaps, `None` on the skip path.
    pub strategy: Option<FillStrategy>,
    /// Left panel width.
    pub left_width: u32,
    /// Right panel width, including any absorbed remainder column.
    pub right_width: u32,
    /// Start of the columns kept sharp.
    pub sharp_start: u32,
    /// End (exclusive) of the columns kept sharp.
    pub sharp_end: u32,
    /// Verdict of the minimum fill policy.
    pub should_extend: bool,
}

/// Plans a composite for a `source_width x source_height` source.
///
/// # Errors
///
/// Same validation as [`extend`].
pub fn plan(
    source_width: u32,
    source_height: u32,
    target_aspect_ratio: f64,
    params: &CompositeParams,
) -> Result<CompositePlan, ExtendError> {
    params.validate()?;
    let geometry = CanvasGeometry::compute(source_width, source_height, target_aspect_ratio)?;

    let extending = geometry.needs_extension();
    let strategy = extending.then(|| FillStrategy::select(&geometry, params.fill_mode));
    let sharp = if extending { geometry.sharp_columns(params.seam_buffer) } else { 0..0 };

    Ok(CompositePlan {
        geometry,
        strategy,
        left_width: geometry.left_width(),
        right_width: if extending { geometry.right_width(params.edge_correction) } else { 0 },
        sharp_start: sharp.start,
        sharp_end: sharp.end,
        should_extend: extending && should_extend(source_width, &geometry, params),
    })
}

/// Runs the shared pipeline for an already-flattened source.
fn composite(
    source: &RgbImage,
    geometry: &CanvasGeometry,
    strategy: FillStrategy,
    params: &CompositeParams,
) -> RgbImage {
    tracing::debug!(
        source_width = source.width(),
        source_height = source.height(),
        target_width = geometry.width,
        side_padding = geometry.side_padding,
        %strategy,
        blur_radius = params.blur_radius,
        "extending image"
    );

    let layer = fill::build_fill_layer(source, geometry, strategy, params.edge_correction);
    let sharp = fill::place_source(&layer, source, geometry);

    let mut canvas = gaussian_blur(&layer, params.blur_radius);
    if params.adjusts_brightness() && params.brightness_scope == BrightnessScope::Background {
        apply_brightness(&mut canvas, params.brightness_factor);
    }

    let mask = SeamMask::build(geometry, params.seam_buffer);
    composite_through_mask(&mut canvas, &sharp, &mask);

    if params.adjusts_brightness() && params.brightness_scope == BrightnessScope::Canvas {
        apply_brightness(&mut canvas, params.brightness_factor);
    }

    canvas
}
