//! Image decoding entry point for the conversion pipeline.
//!
//! The pipeline operates on 8-bit single-channel rasters throughout;
//! [`image::GrayImage`] is the raster type used by every stage.

use std::path::Path;

pub use image::GrayImage;

use crate::error::{Result, RmScribeError};

/// Decode an image file (PNG/JPEG) to an 8-bit grayscale raster.
///
/// Color inputs are converted to luma. An unreadable or unsupported file
/// yields a decode error and no raster.
pub fn decode_to_gray(path: &Path) -> Result<GrayImage> {
    let img = image::open(path)
        .map_err(|e| RmScribeError::decode(format!("{}: {e}", path.display())))?;
    Ok(img.to_luma8())
}

/// Read the dimensions of an image file without decoding the pixel data.
pub fn decode_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path)
        .map_err(|e| RmScribeError::decode(format!("{}: {e}", path.display())))
}
