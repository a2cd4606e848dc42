//! Wallweave - extends wallpapers to fill wider displays.
//!
//! Given an image and a target aspect ratio wider than the image, the
//! compositor builds a canvas of the target width, fills the gaps on either
//! side with content derived from the image itself (sampled edges, stretched
//! halves, a scaled background or mirrored edges), blurs that fill, and
//! keeps the original sharp in the middle through a seam mask.
//!
//! ```no_run
//! use wallweave_lib::{CompositeParams, PixelBuffer, extend};
//!
//! # fn main() -> Result<(), wallweave_lib::ExtendError> {
//! let source = PixelBuffer::filled_rgb(1000, 500, [40, 80, 120])?;
//! let extended = extend(&source, 3.0, &CompositeParams::default())?;
//! assert_eq!((extended.width(), extended.height()), (1500, 500));
//! # Ok(())
//! # }
//! ```
//!
//! Decoding and encoding image files is left to the caller; `PixelBuffer`
//! converts to and from the `image` crate's buffer types.

pub mod buffer;
pub mod cli;
pub mod compositor;
pub mod config;
pub mod error;
pub mod geometry;
pub mod params;
pub mod schema;

pub use buffer::{PixelBuffer, PixelFormat};
pub use compositor::{
    CompositePlan, FillStrategy, extend, extend_for_screen, extend_if_needed, plan, should_extend,
};
pub use error::{ExtendError, WallweaveError};
pub use geometry::{CanvasGeometry, ScreenSize};
pub use params::{BrightnessScope, CompositeParams, FillMode};
