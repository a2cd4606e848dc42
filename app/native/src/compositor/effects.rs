//! Pixel effects used by the compositor: Gaussian blur, brightness scaling
//! and sharp-over-blurred blending through the seam mask.

use image::imageops::{self, FilterType};
use image::RgbImage;
use rayon::prelude::*;

use super::mask::{OPAQUE, SeamMask, TRANSPARENT};

/// Radii above this are blurred on a downscaled copy.
const DIRECT_BLUR_LIMIT: f32 = 8.0;

/// Downscale factor for large-radius blurs.
const BLUR_SCALE_FACTOR: u32 = 4;

/// Applies a Gaussian blur with the given radius (sigma).
///
/// A radius of 0 returns an identical copy. Large radii are approximated by
/// downscaling, blurring at the reduced radius and scaling back up.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn gaussian_blur(img: &RgbImage, radius: f32) -> RgbImage {
    if radius <= 0.0 {
        return img.clone();
    }

    if radius <= DIRECT_BLUR_LIMIT {
        return imageops::blur(img, radius);
    }

    let (width, height) = img.dimensions();
    let small_width = (width / BLUR_SCALE_FACTOR).max(1);
    let small_height = (height / BLUR_SCALE_FACTOR).max(1);

    let small = imageops::resize(img, small_width, small_height, FilterType::CatmullRom);
    let blurred_small = imageops::blur(&small, radius / BLUR_SCALE_FACTOR as f32);

    imageops::resize(&blurred_small, width, height, FilterType::CatmullRom)
}

/// Multiplies every channel by `factor`, rounding and clamping to `0..=255`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn apply_brightness(img: &mut RgbImage, factor: f32) {
    img.par_iter_mut().for_each(|channel| {
        *channel = (f32::from(*channel) * factor).round().clamp(0.0, 255.0) as u8;
    });
}

/// Blends `sharp` over `base` using `mask` as per-pixel coverage.
///
/// Coverage 255 copies the sharp pixel, 0 keeps the base pixel, anything in
/// between mixes linearly. All three must share dimensions.
pub fn composite_through_mask(base: &mut RgbImage, sharp: &RgbImage, mask: &SeamMask) {
    debug_assert_eq!(base.dimensions(), sharp.dimensions());
    debug_assert_eq!(base.dimensions(), mask.dimensions());

    let row_len = base.width() as usize * 3;
    if row_len == 0 {
        return;
    }

    base.par_chunks_mut(row_len)
        .zip(sharp.par_chunks(row_len))
        .enumerate()
        .for_each(|(y, (base_row, sharp_row))| {
            #[allow(clippy::cast_possible_truncation)]
            let coverage = mask.row(y as u32);

            for ((dst, src), &alpha) in
                base_row.chunks_mut(3).zip(sharp_row.chunks(3)).zip(coverage)
            {
                match alpha {
                    OPAQUE => dst.copy_from_slice(src),
                    TRANSPARENT => {}
                    _ => {
                        for (d, s) in dst.iter_mut().zip(src) {
                            *d = mix(*d, *s, alpha);
                        }
                    }
                }
            }
        });
}

/// Linear mix of `under` and `over` weighted by `alpha / 255`.
#[allow(clippy::cast_possible_truncation)]
const fn mix(under: u8, over: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((over as u32 * a + under as u32 * (255 - a) + 127) / 255) as u8
}
