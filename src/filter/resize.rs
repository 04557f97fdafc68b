//! Separable raster resampling.
//!
//! Scaling runs as two one-dimensional passes (horizontal then vertical),
//! which is equivalent to a single 2D pass for separable filters and far
//! cheaper. Each destination sample maps back to a continuous source
//! coordinate, accumulates a filter-weighted window of source samples and
//! normalizes by the weight sum.

use image::GrayImage;
use rayon::prelude::*;

use crate::error::{Result, RmScribeError};

/// Interpolation method for [`resize_gray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// Takes the nearest source pixel, ties rounding up.
    Nearest,
    /// Linear (tent) interpolation, support radius 1.
    Linear,
    /// Catmull-Rom cubic resampling, support radius 2.
    CatmullRom,
    /// Lanczos windowed-sinc resampling, support radius 3.
    Lanczos,
}

/// One-dimensional resampling filter.
trait ResampleFilter {
    /// Support radius: the filter is zero for `|x| >= support`.
    fn support(&self) -> f64;
    /// Filter weight at distance `x` from the sample center.
    fn eval(&self, x: f64) -> f64;
}

struct Linear;

impl ResampleFilter for Linear {
    fn support(&self) -> f64 {
        1.0
    }

    fn eval(&self, x: f64) -> f64 {
        let x = x.abs();
        if x < 1.0 { 1.0 - x } else { 0.0 }
    }
}

struct CatmullRom;

impl ResampleFilter for CatmullRom {
    fn support(&self) -> f64 {
        2.0
    }

    fn eval(&self, x: f64) -> f64 {
        let x = x.abs();
        if x < 1.0 {
            (3.0 * x * x * x - 5.0 * x * x + 2.0) / 2.0
        } else if x < 2.0 {
            (-x * x * x + 5.0 * x * x - 8.0 * x + 4.0) / 2.0
        } else {
            0.0
        }
    }
}

struct Lanczos;

impl ResampleFilter for Lanczos {
    fn support(&self) -> f64 {
        3.0
    }

    fn eval(&self, x: f64) -> f64 {
        let x = x.abs();
        if x >= 3.0 {
            return 0.0;
        }
        sinc(x) * sinc(x / 3.0)
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let pix = std::f64::consts::PI * x;
    pix.sin() / pix
}

/// Resize a grayscale raster by independent horizontal/vertical factors.
///
/// Fails with a validation error when either factor is not strictly
/// positive, or when a target dimension rounds down to zero.
pub fn resize_gray(
    img: &GrayImage,
    fx: f64,
    fy: f64,
    interpolation: Interpolation,
) -> Result<GrayImage> {
    if fx <= 0.0 || fy <= 0.0 {
        return Err(RmScribeError::validation(format!(
            "scale factors must be greater than 0 (got {fx}, {fy})"
        )));
    }
    let new_w = scaled_extent(img.width(), fx)?;
    let new_h = scaled_extent(img.height(), fy)?;

    match interpolation {
        Interpolation::Nearest => Ok(resize_nearest(img, new_w, new_h, fx, fy)),
        Interpolation::Linear => resize_separable(img, new_w, new_h, fx, fy, &Linear),
        Interpolation::CatmullRom => resize_separable(img, new_w, new_h, fx, fy, &CatmullRom),
        Interpolation::Lanczos => resize_separable(img, new_w, new_h, fx, fy, &Lanczos),
    }
}

fn scaled_extent(extent: u32, factor: f64) -> Result<u32> {
    let scaled = (f64::from(extent) * factor) as u32;
    if scaled == 0 {
        return Err(RmScribeError::validation(format!(
            "scale factor {factor} collapses extent {extent} to zero"
        )));
    }
    Ok(scaled)
}

/// Round a continuous source coordinate to the closest sample, ties up.
#[inline]
fn round_half_up(v: f64) -> usize {
    if v - v.floor() >= 0.5 {
        v as usize + 1
    } else {
        v as usize
    }
}

fn resize_nearest(img: &GrayImage, new_w: u32, new_h: u32, fx: f64, fy: f64) -> GrayImage {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let src = img.as_raw();
    let nw = new_w as usize;

    let mut out = vec![0u8; nw * new_h as usize];
    out.par_chunks_mut(nw).enumerate().for_each(|(y, row)| {
        let old_y = round_half_up(y as f64 / fy).min(h - 1);
        for (x, cell) in row.iter_mut().enumerate() {
            let old_x = round_half_up(x as f64 / fx).min(w - 1);
            *cell = src[old_y * w + old_x];
        }
    });

    GrayImage::from_raw(new_w, new_h, out).expect("output buffer matches computed dimensions")
}

fn resize_separable(
    img: &GrayImage,
    new_w: u32,
    new_h: u32,
    fx: f64,
    fy: f64,
    filter: &(impl ResampleFilter + Sync),
) -> Result<GrayImage> {
    let horizontal = resize_horizontal(img, new_w, fx, filter);
    Ok(resize_vertical(&horizontal, new_h, fy, filter))
}

/// Resample one destination position along a source scanline.
///
/// `stride` selects the axis: 1 walks a row, `row_len` walks a column.
#[inline]
fn resample_at(
    src: &[u8],
    base: usize,
    stride: usize,
    axis_len: usize,
    dst: usize,
    factor: f64,
    radius: f64,
    filter: &impl ResampleFilter,
) -> u8 {
    // Continuous source coordinate of this destination sample.
    let center = (dst as f64 + 0.5) / factor - 0.5;
    let start = ((center - radius + 0.5) as isize).clamp(0, axis_len as isize) as usize;
    let end = ((center + radius) as isize).clamp(0, axis_len as isize) as usize;

    let mut accum = 0.0f64;
    let mut weight_sum = 0.0f64;
    for i in start..end {
        let weight = filter.eval(i as f64 - center);
        accum += f64::from(src[base + i * stride]) * weight;
        weight_sum += weight;
    }
    if weight_sum == 0.0 {
        return 0;
    }
    (accum / weight_sum + 0.5).clamp(0.0, 255.0) as u8
}

fn resize_horizontal(
    img: &GrayImage,
    new_w: u32,
    fx: f64,
    filter: &(impl ResampleFilter + Sync),
) -> GrayImage {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let src = img.as_raw();
    let nw = new_w as usize;
    let radius = (fx * filter.support()).ceil();

    let mut out = vec![0u8; nw * h];
    out.par_chunks_mut(nw).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = resample_at(src, y * w, 1, w, x, fx, radius, filter);
        }
    });

    GrayImage::from_raw(new_w, h as u32, out).expect("output buffer matches computed dimensions")
}

fn resize_vertical(
    img: &GrayImage,
    new_h: u32,
    fy: f64,
    filter: &(impl ResampleFilter + Sync),
) -> GrayImage {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let src = img.as_raw();
    let radius = (fy * filter.support()).ceil();

    let mut out = vec![0u8; w * new_h as usize];
    out.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = resample_at(src, x, w, h, y, fy, radius, filter);
        }
    });

    GrayImage::from_raw(w as u32, new_h, out).expect("output buffer matches computed dimensions")
}
