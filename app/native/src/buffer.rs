//! In-memory pixel buffers.
//!
//! `PixelBuffer` is the only image type that crosses the compositor's public
//! boundary. It is a plain row-major byte buffer in 8-bit RGB or RGBA, with
//! conversions to and from the `image` crate's buffer types so callers can
//! decode and encode files however they like.

use image::{DynamicImage, RgbImage, RgbaImage};
use rayon::prelude::*;

use crate::error::ExtendError;

/// Channel layout of a `PixelBuffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Three 8-bit channels, opaque.
    Rgb8,
    /// Four 8-bit channels, straight (non-premultiplied) alpha.
    Rgba8,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    #[must_use]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }

    /// Returns whether the format carries an alpha channel.
    #[must_use]
    pub const fn has_alpha(self) -> bool { matches!(self, Self::Rgba8) }
}

/// An image held in memory.
///
/// Invariants, enforced by every constructor: `width > 0`, `height > 0`, and
/// `data.len() == width * height * format.channels()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns `ExtendError::InvalidGeometry` if either dimension is zero and
    /// `ExtendError::UnsupportedFormat` if `data` has the wrong length for the
    /// given format.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, ExtendError> {
        if width == 0 || height == 0 {
            return Err(ExtendError::InvalidGeometry(format!(
                "pixel buffer must be non-empty, got {width}x{height}"
            )));
        }

        let expected = expected_len(width, height, format).ok_or_else(|| {
            ExtendError::InvalidGeometry(format!("{width}x{height} buffer is too large"))
        })?;

        if data.len() != expected {
            return Err(ExtendError::UnsupportedFormat(format!(
                "{format:?} {width}x{height} needs {expected} bytes, got {}",
                data.len()
            )));
        }

        Ok(Self { width, height, format, data })
    }

    /// Creates an opaque RGB buffer filled with a single color.
    ///
    /// # Errors
    ///
    /// Returns `ExtendError::InvalidGeometry` if either dimension is zero.
    pub fn filled_rgb(width: u32, height: u32, rgb: [u8; 3]) -> Result<Self, ExtendError> {
        let pixels = (width as usize) * (height as usize);
        let data = rgb.iter().copied().cycle().take(pixels * 3).collect();
        Self::new(width, height, PixelFormat::Rgb8, data)
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 { self.width }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 { self.height }

    /// Channel layout.
    #[must_use]
    pub const fn format(&self) -> PixelFormat { self.format }

    /// Raw row-major pixel bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] { &self.data }

    /// Consumes the buffer and returns the raw bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> { self.data }

    /// Returns the channels of the pixel at `(x, y)`, or `None` when out of
    /// bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.format.channels();
        let start = ((y as usize) * (self.width as usize) + (x as usize)) * channels;
        self.data.get(start..start + channels)
    }

    /// Drops the alpha channel, composing every pixel over opaque black.
    ///
    /// RGB buffers are returned as an identical copy.
    #[must_use]
    pub fn flatten(&self) -> RgbImage {
        match self.format {
            PixelFormat::Rgb8 => {
                RgbImage::from_raw(self.width, self.height, self.data.clone()).unwrap_or_default()
            }
            PixelFormat::Rgba8 => {
                let mut out = vec![0u8; (self.width as usize) * (self.height as usize) * 3];
                out.par_chunks_mut(3).zip(self.data.par_chunks(4)).for_each(|(dst, src)| {
                    let alpha = u16::from(src[3]);
                    for (d, s) in dst.iter_mut().zip(src) {
                        *d = mul_div_255(u16::from(*s), alpha);
                    }
                });
                RgbImage::from_raw(self.width, self.height, out).unwrap_or_default()
            }
        }
    }
}

impl From<RgbImage> for PixelBuffer {
    fn from(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgb8,
            data: img.into_raw(),
        }
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgba8,
            data: img.into_raw(),
        }
    }
}

impl TryFrom<DynamicImage> for PixelBuffer {
    type Error = ExtendError;

    /// Accepts 8-bit RGB/RGBA as-is and converts luma variants to RGB(A).
    /// Higher bit depths are rejected rather than silently quantized.
    fn try_from(img: DynamicImage) -> Result<Self, Self::Error> {
        let buffer = match img {
            DynamicImage::ImageRgb8(rgb) => Self::from(rgb),
            DynamicImage::ImageRgba8(rgba) => Self::from(rgba),
            DynamicImage::ImageLuma8(_) => Self::from(img.to_rgb8()),
            DynamicImage::ImageLumaA8(_) => Self::from(img.to_rgba8()),
            other => {
                return Err(ExtendError::UnsupportedFormat(format!(
                    "{:?} is not an 8-bit RGB or RGBA layout",
                    other.color()
                )));
            }
        };

        if buffer.width == 0 || buffer.height == 0 {
            return Err(ExtendError::InvalidGeometry(format!(
                "pixel buffer must be non-empty, got {}x{}",
                buffer.width, buffer.height
            )));
        }

        Ok(buffer)
    }
}

impl From<PixelBuffer> for DynamicImage {
    fn from(buffer: PixelBuffer) -> Self {
        let (width, height) = (buffer.width, buffer.height);
        match buffer.format {
            PixelFormat::Rgb8 => RgbImage::from_raw(width, height, buffer.data)
                .map_or_else(|| Self::new_rgb8(width, height), Self::ImageRgb8),
            PixelFormat::Rgba8 => RgbaImage::from_raw(width, height, buffer.data)
                .map_or_else(|| Self::new_rgba8(width, height), Self::ImageRgba8),
        }
    }
}

/// Number of bytes a `width x height` buffer of `format` occupies.
fn expected_len(width: u32, height: u32, format: PixelFormat) -> Option<usize> {
    (width as usize).checked_mul(height as usize)?.checked_mul(format.channels())
}

/// `value * alpha / 255`, rounded to nearest.
#[allow(clippy::cast_possible_truncation)]
const fn mul_div_255(value: u16, alpha: u16) -> u8 {
    let product = value * alpha + 128;
    ((product + (product >> 8)) >> 8) as u8
}
