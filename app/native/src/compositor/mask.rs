//! Seam mask.
//!
//! Single-channel image the size of the canvas: 255 where the sharp layer
//! shows through, 0 where the blurred layer stays.

use image::{GrayImage, Luma};

use crate::geometry::CanvasGeometry;

/// Fully opaque mask value.
pub const OPAQUE: u8 = 255;

/// Fully transparent mask value.
pub const TRANSPARENT: u8 = 0;

/// Mask selecting the sharp source over the blurred fill.
#[derive(Debug, Clone)]
pub struct SeamMask {
    image: GrayImage,
    columns: std::ops::Range<u32>,
}

impl SeamMask {
    /// Builds the mask for `geometry`: an opaque rectangle over the source's
    /// columns, shrunk by `seam_buffer` at the left and right edges, over the
    /// full height.
    #[must_use]
    pub fn build(geometry: &CanvasGeometry, seam_buffer: u32) -> Self {
        let columns = geometry.sharp_columns(seam_buffer);
        let image = GrayImage::from_fn(geometry.width, geometry.height, |x, _| {
            if columns.contains(&x) { Luma([OPAQUE]) } else { Luma([TRANSPARENT]) }
        });

        Self { image, columns }
    }

    /// Columns covered by the opaque rectangle.
    #[must_use]
    pub fn sharp_columns(&self) -> std::ops::Range<u32> { self.columns.clone() }

    /// One row of coverage values.
    pub(crate) fn row(&self, y: u32) -> &[u8] {
        let width = self.image.width() as usize;
        let start = y as usize * width;
        &self.image.as_raw()[start..start + width]
    }

    /// Mask dimensions.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) { self.image.dimensions() }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Coverage at `(x, y)`; out-of-bounds reads as transparent.
    fn coverage(mask: &SeamMask, x: u32, y: u32) -> u8 {
        mask.image.get_pixel_checked(x, y).map_or(TRANSPARENT, |p| p[0])
    }

    #[test]
    fn test_mask_covers_source_minus_buffer() {
        let geometry = CanvasGeometry::compute(1000, 500, 3.0).unwrap();
        let mask = SeamMask::build(&geometry, 20);

        assert_eq!(mask.dimensions(), (1500, 500));
        assert_eq!(mask.sharp_columns(), 270..1230);
        assert_eq!(coverage(&mask, 269, 0), TRANSPARENT);
        assert_eq!(coverage(&mask, 270, 0), OPAQUE);
        assert_eq!(coverage(&mask, 1229, 499), OPAQUE);
        assert_eq!(coverage(&mask, 1230, 499), TRANSPARENT);
        assert_eq!(coverage(&mask, 0, 0), TRANSPARENT);
    }

    #[test]
    fn test_mask_zero_buffer_matches_source_exactly() {
        let geometry = CanvasGeometry::compute(10, 10, 3.0).unwrap();
        let mask = SeamMask::build(&geometry, 0);
        assert_eq!(mask.sharp_columns(), 10..20);
        assert_eq!(coverage(&mask, 9, 5), TRANSPARENT);
        assert_eq!(coverage(&mask, 10, 5), OPAQUE);
        assert_eq!(coverage(&mask, 19, 5), OPAQUE);
        assert_eq!(coverage(&mask, 20, 5), TRANSPARENT);
    }

    #[test]
    fn test_mask_out_of_bounds_is_transparent() {
        let geometry = CanvasGeometry::compute(10, 10, 3.0).unwrap();
        let mask = SeamMask::build(&geometry, 0);
        assert_eq!(coverage(&mask, 30, 0), TRANSPARENT);
        assert_eq!(coverage(&mask, 0, 10), TRANSPARENT);
    }

    #[test]
    fn test_mask_row_slice() {
        let geometry = CanvasGeometry::compute(4, 2, 4.0).unwrap();
        let mask = SeamMask::build(&geometry, 1);
        assert_eq!(mask.row(1), &[0, 0, 0, 255, 255, 0, 0, 0]);
    }

    #[test]
    fn test_mask_fully_transparent_when_buffer_swallows_source() {
        let geometry = CanvasGeometry::compute(4, 2, 4.0).unwrap();
        let mask = SeamMask::build(&geometry, 2);
        assert!(mask.sharp_columns().is_empty());
        assert!((0..8).all(|x| coverage(&mask, x, 0) == TRANSPARENT));
    }
}
