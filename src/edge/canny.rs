//! Canny edge detection.
//!
//! Five ordered stages: Gaussian smoothing, Sobel gradient, non-maximum
//! suppression, double threshold, hysteresis linking. The stage order is
//! fixed; each stage consumes the previous stage's output.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU8, Ordering};

use image::GrayImage;
use rayon::prelude::*;

use crate::error::{Result, RmScribeError};
use crate::filter::convolve::convolve_gray;
use crate::filter::kernel::{Anchor, Border, Kernel};

/// Thresholded pixel class: promoted edge.
pub const STRONG: u8 = 255;
/// Thresholded pixel class: candidate edge, kept only when linked to a
/// strong pixel.
pub const WEAK: u8 = 128;

/// Pre-normalized 5x5 Gaussian smoothing kernel (integer weights sum to
/// 273 before normalization).
#[rustfmt::skip]
static GAUSSIAN_5: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::new(5, 5, vec![
        1.0,  4.0,  7.0,  4.0, 1.0,
        4.0, 16.0, 26.0, 16.0, 4.0,
        7.0, 26.0, 41.0, 26.0, 7.0,
        4.0, 16.0, 26.0, 16.0, 4.0,
        1.0,  4.0,  7.0,  4.0, 1.0,
    ])
    .expect("static kernel weights are well-formed")
    .normalized()
});

#[rustfmt::skip]
const SOBEL_X: [f64; 9] = [
    -1.0, 0.0, 1.0,
    -2.0, 0.0, 2.0,
    -1.0, 0.0, 1.0,
];

#[rustfmt::skip]
const SOBEL_Y: [f64; 9] = [
    -1.0, -2.0, -1.0,
     0.0,  0.0,  0.0,
     1.0,  2.0,  1.0,
];

/// Per-pixel gradient magnitude and direction.
///
/// Magnitudes are kept as `f64` (no 8-bit quantization); directions are
/// degrees normalized to `[0, 180)`. Border pixels carry zero magnitude.
pub struct GradientField {
    pub magnitude: Vec<f64>,
    pub direction: Vec<f64>,
    pub width: usize,
    pub height: usize,
}

/// Run the full five-stage Canny pipeline on a grayscale raster.
///
/// Returns a raster where edge pixels are 255 and everything else 0.
/// Fails with a validation error when `low > high` or either threshold is
/// negative. Thresholds apply to unquantized gradient magnitudes, so
/// values above 255 are meaningful for hard edges.
pub fn canny_edge_detection(img: &GrayImage, low: f64, high: f64) -> Result<GrayImage> {
    if low < 0.0 || high < 0.0 || low > high {
        return Err(RmScribeError::validation(format!(
            "thresholds must satisfy 0 <= low <= high (got {low}, {high})"
        )));
    }
    let smoothed = convolve_gray(img, &GAUSSIAN_5, Anchor::center(&GAUSSIAN_5), Border::Replicate)?;
    let gradient = compute_gradient(&smoothed);
    let suppressed = non_maximum_suppression(&gradient);
    let thresholded = double_threshold(&suppressed, gradient.width, gradient.height, low, high);
    Ok(hysteresis(&thresholded))
}

/// Stage 2: Sobel gradient magnitude and direction.
///
/// Computed on the interior; the one-pixel border keeps zero magnitude.
pub fn compute_gradient(img: &GrayImage) -> GradientField {
    let (w, h) = (img.width() as usize, img.height() as usize);
    let src = img.as_raw();

    let mut magnitude = vec![0.0f64; w * h];
    let mut direction = vec![0.0f64; w * h];

    magnitude
        .par_chunks_mut(w)
        .zip(direction.par_chunks_mut(w))
        .enumerate()
        .for_each(|(y, (mag_row, dir_row))| {
            if y == 0 || y + 1 >= h {
                return;
            }
            for x in 1..w.saturating_sub(1) {
                let mut gx = 0.0f64;
                let mut gy = 0.0f64;
                for ky in 0..3 {
                    for kx in 0..3 {
                        let pixel = f64::from(src[(y + ky - 1) * w + x + kx - 1]);
                        gx += pixel * SOBEL_X[ky * 3 + kx];
                        gy += pixel * SOBEL_Y[ky * 3 + kx];
                    }
                }
                mag_row[x] = (gx * gx + gy * gy).sqrt();

                // Angle in degrees, normalized to [0, 180)
                let mut angle = gy.atan2(gx).to_degrees();
                if angle < 0.0 {
                    angle += 180.0;
                }
                if angle >= 180.0 {
                    angle -= 180.0;
                }
                dir_row[x] = angle;
            }
        });

    GradientField { magnitude, direction, width: w, height: h }
}

/// Stage 3: non-maximum suppression.
///
/// The gradient direction is discretized into four bins centered at 0, 45,
/// 90 and 135 degrees (each spanning +-22.5, with the 0/180 wraparound
/// merged). A pixel survives only if its magnitude is >= both neighbors
/// along the gradient direction.
pub fn non_maximum_suppression(gradient: &GradientField) -> Vec<f64> {
    let (w, h) = (gradient.width, gradient.height);
    let mag = &gradient.magnitude;
    let dir = &gradient.direction;

    let mut suppressed = vec![0.0f64; w * h];
    suppressed
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            if y == 0 || y + 1 >= h {
                return;
            }
            for x in 1..w.saturating_sub(1) {
                let angle = dir[y * w + x];
                let (q, r) = if !(22.5..157.5).contains(&angle) {
                    // 0 degrees: horizontal gradient
                    (mag[y * w + x + 1], mag[y * w + x - 1])
                } else if angle < 67.5 {
                    // 45 degrees
                    (mag[(y - 1) * w + x + 1], mag[(y + 1) * w + x - 1])
                } else if angle < 112.5 {
                    // 90 degrees: vertical gradient
                    (mag[(y + 1) * w + x], mag[(y - 1) * w + x])
                } else {
                    // 135 degrees
                    (mag[(y - 1) * w + x - 1], mag[(y + 1) * w + x + 1])
                };

                let m = mag[y * w + x];
                if m >= q && m >= r {
                    row[x] = m;
                }
            }
        });
    suppressed
}

/// Stage 4: double threshold.
///
/// Classifies each suppressed magnitude as strong (255), weak (128) or
/// suppressed (0).
pub fn double_threshold(
    suppressed: &[f64],
    width: usize,
    height: usize,
    low: f64,
    high: f64,
) -> GrayImage {
    debug_assert_eq!(suppressed.len(), width * height);

    let mut out = vec![0u8; width * height];
    out.par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let m = suppressed[y * width + x];
                *cell = if m >= high {
                    STRONG
                } else if m >= low {
                    WEAK
                } else {
                    0
                };
            }
        });

    GrayImage::from_raw(width as u32, height as u32, out)
        .expect("output buffer matches computed dimensions")
}

/// Stage 5: hysteresis linking.
///
/// Strong pixels carry over to the output unchanged. Every weak pixel with
/// a strong pixel in its 8-neighborhood seeds an explicit-stack flood fill
/// that promotes all 8-connected weak pixels reachable from it. Each
/// visited weak pixel is consumed (zeroed) in the working buffer the
/// instant it is visited, so two seeds reaching the same connected
/// component promote every pixel at most once. Seeds run as parallel
/// tasks over atomic buffers.
///
/// Running this stage on its own output is a no-op: the output contains no
/// weak pixels.
pub fn hysteresis(thresholded: &GrayImage) -> GrayImage {
    let (w, h) = (thresholded.width() as usize, thresholded.height() as usize);
    let src: &[u8] = thresholded.as_raw();

    // Working copy that flood fills consume, and the promotion target.
    // AtomicU8 lets independent seed tasks share both without locking.
    let work: Vec<AtomicU8> = src.iter().map(|&v| AtomicU8::new(v)).collect();
    let out: Vec<AtomicU8> = src
        .iter()
        .map(|&v| AtomicU8::new(if v == STRONG { STRONG } else { 0 }))
        .collect();

    // Seed discovery reads the immutable stage-4 output.
    let seeds: Vec<(usize, usize)> = (1..h.saturating_sub(1))
        .into_par_iter()
        .flat_map_iter(move |y| {
            (1..w.saturating_sub(1)).filter_map(move |x| {
                (src[y * w + x] == WEAK && has_strong_neighbor(src, w, x, y)).then_some((x, y))
            })
        })
        .collect();

    seeds.par_iter().for_each(|&(x, y)| {
        trace_edge(&work, &out, w, h, x, y);
    });

    let promoted = out.into_iter().map(AtomicU8::into_inner).collect();
    GrayImage::from_raw(w as u32, h as u32, promoted)
        .expect("output buffer matches input dimensions")
}

fn has_strong_neighbor(src: &[u8], w: usize, x: usize, y: usize) -> bool {
    for dy in -1i32..=1 {
        for dx in -1i32..=1 {
            let nx = (x as i32 + dx) as usize;
            let ny = (y as i32 + dy) as usize;
            if src[ny * w + nx] == STRONG {
                return true;
            }
        }
    }
    false
}

/// Promote the 8-connected weak component reachable from `(x, y)`.
///
/// Iterative with an explicit stack; connected components can span the
/// whole raster, so recursion depth is not an option.
fn trace_edge(work: &[AtomicU8], out: &[AtomicU8], w: usize, h: usize, x: usize, y: usize) {
    let mut stack = vec![(x, y)];
    while let Some((px, py)) = stack.pop() {
        // Consume-on-visit: only the task that swaps the weak marker out
        // gets to promote this pixel.
        if work[py * w + px]
            .compare_exchange(WEAK, 0, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            continue;
        }
        out[py * w + px].store(STRONG, Ordering::Release);

        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = px as i32 + dx;
                let ny = py as i32 + dy;
                if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if work[ny * w + nx].load(Ordering::Acquire) == WEAK {
                    stack.push((nx, ny));
                }
            }
        }
    }
}
