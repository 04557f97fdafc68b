//! Border-aware raster padding.
//!
//! Padding sizes are calculated from the kernel size and the anchor point,
//! so a padded raster gives the convolution engine a full window at every
//! original pixel.

use image::GrayImage;
use rayon::prelude::*;

use crate::error::Result;
use crate::filter::kernel::{Anchor, Border, Paddings};

/// Replicate index mapping: clamp to the nearest in-bounds sample.
#[inline]
fn clamp_index(idx: isize, len: usize) -> usize {
    idx.clamp(0, len as isize - 1) as usize
}

/// Reflect index mapping without repeating the edge pixel (`-k` maps to
/// `k`, `len-1+k` maps to `len-1-k`). Folds repeatedly when the margin
/// exceeds the raster extent.
#[inline]
fn mirror_index(mut idx: isize, len: usize) -> usize {
    let n = len as isize;
    if n == 1 {
        return 0;
    }
    loop {
        if idx < 0 {
            idx = -idx;
        } else if idx >= n {
            idx = 2 * n - idx - 2;
        } else {
            return idx as usize;
        }
    }
}

/// Append padding to a grayscale raster. The size of the padding is
/// calculated from the kernel size and the anchor point; see
/// [`Paddings::for_kernel`] for the margin formulas.
///
/// A `3x3` kernel anchored at `(1, 1)` adds a 1px margin on every side.
pub fn pad_gray(
    img: &GrayImage,
    kernel_w: usize,
    kernel_h: usize,
    anchor: Anchor,
    border: Border,
) -> Result<GrayImage> {
    let p = Paddings::for_kernel(kernel_w, kernel_h, anchor)?;
    Ok(pad_gray_by(img, p, border))
}

/// Append explicit margins to a grayscale raster under a border policy.
pub fn pad_gray_by(img: &GrayImage, p: Paddings, border: Border) -> GrayImage {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let padded_w = w + p.left + p.right;
    let padded_h = h + p.top + p.bottom;
    let src = img.as_raw();

    let mut out = vec![0u8; padded_w * padded_h];
    out.par_chunks_mut(padded_w)
        .enumerate()
        .for_each(|(py, row)| {
            let sy = py as isize - p.top as isize;
            for (px, cell) in row.iter_mut().enumerate() {
                let sx = px as isize - p.left as isize;
                *cell = match border {
                    Border::Constant => {
                        if sx >= 0 && sx < w as isize && sy >= 0 && sy < h as isize {
                            src[sy as usize * w + sx as usize]
                        } else {
                            0
                        }
                    }
                    Border::Replicate => src[clamp_index(sy, h) * w + clamp_index(sx, w)],
                    Border::Reflect => src[mirror_index(sy, h) * w + mirror_index(sx, w)],
                };
            }
        });

    GrayImage::from_raw(padded_w as u32, padded_h as u32, out)
        .expect("padded buffer matches computed dimensions")
}
