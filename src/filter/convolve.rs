//! Convolution engine.

use image::GrayImage;
use rayon::prelude::*;

use crate::error::Result;
use crate::filter::kernel::{Anchor, Border, Kernel};
use crate::filter::padding::pad_gray;

/// Apply a convolution kernel to a grayscale raster.
///
/// The raster is first padded by the margins derived from the kernel size
/// and the anchor under the chosen border policy, then every output pixel
/// is the weighted sum of the kernel window over the padded raster,
/// clamped to `[0, 255]`. The result has the same extent as the input.
///
/// Output rows are independent, so rows are computed in parallel.
pub fn convolve_gray(
    img: &GrayImage,
    kernel: &Kernel,
    anchor: Anchor,
    border: Border,
) -> Result<GrayImage> {
    let padded = pad_gray(img, kernel.width(), kernel.height(), anchor, border)?;
    let (w, h) = (img.width() as usize, img.height() as usize);
    let padded_w = padded.width() as usize;
    let padded_raw = padded.as_raw();

    let mut out = vec![0u8; w * h];
    out.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            let mut sum = 0.0f64;
            for ky in 0..kernel.height() {
                let base = (y + ky) * padded_w + x;
                for kx in 0..kernel.width() {
                    sum += f64::from(padded_raw[base + kx]) * kernel.at(kx, ky);
                }
            }
            *cell = sum.clamp(0.0, 255.0) as u8;
        }
    });

    Ok(GrayImage::from_raw(img.width(), img.height(), out)
        .expect("output buffer matches input dimensions"))
}
