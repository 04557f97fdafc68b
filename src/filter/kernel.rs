//! Convolution kernels, anchors and the border-extension model.

use crate::error::{Result, RmScribeError};

/// Immutable convolution weight matrix.
///
/// Weights are stored row-major; `at(x, y)` addresses column `x` of row `y`.
#[derive(Debug, Clone)]
pub struct Kernel {
    width: usize,
    height: usize,
    weights: Vec<f64>,
}

impl Kernel {
    /// Build a kernel from row-major weights.
    ///
    /// Fails when either dimension is zero or the weight count does not
    /// match `width * height`.
    pub fn new(width: usize, height: usize, weights: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RmScribeError::validation("kernel dimensions must be non-zero"));
        }
        if weights.len() != width * height {
            return Err(RmScribeError::validation(format!(
                "kernel weight count {} does not match {}x{}",
                weights.len(),
                width,
                height
            )));
        }
        Ok(Self { width, height, weights })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn at(&self, x: usize, y: usize) -> f64 {
        self.weights[y * self.width + x]
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }

    /// Scale every weight so the kernel sums to 1.
    ///
    /// Used for smoothing kernels whose integer weights are written
    /// unnormalized. A zero-sum kernel is left untouched.
    pub fn normalized(mut self) -> Self {
        let sum = self.sum();
        if sum != 0.0 {
            for w in &mut self.weights {
                *w /= sum;
            }
        }
        self
    }
}

/// Border extension policy applied when a convolution window extends past
/// the raster edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Border {
    /// Missing samples are 0: `000|abcdefgh|000`
    Constant,
    /// Missing samples take the nearest edge pixel: `aaa|abcdefgh|hhh`
    Replicate,
    /// Missing samples mirror the interior without repeating the edge
    /// pixel itself: `dcb|abcdefgh|gfe`
    Reflect,
}

/// Kernel cell aligned with the output pixel during convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub x: usize,
    pub y: usize,
}

impl Anchor {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Anchor at the center of an odd-sized kernel.
    pub fn center(kernel: &Kernel) -> Self {
        Self {
            x: kernel.width() / 2,
            y: kernel.height() / 2,
        }
    }
}

/// Margin sizes derived from a kernel size and anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paddings {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl Paddings {
    /// Derive the four margins for a kernel of `kernel_w x kernel_h`
    /// anchored at `anchor`.
    ///
    /// `left = anchor.x`, `right = kernel_w - anchor.x - 1`, and the same
    /// for the vertical axis. Fails when the anchor lies outside the
    /// kernel bounds.
    pub fn for_kernel(kernel_w: usize, kernel_h: usize, anchor: Anchor) -> Result<Self> {
        if anchor.x >= kernel_w || anchor.y >= kernel_h {
            return Err(RmScribeError::validation(format!(
                "anchor ({}, {}) outside of {}x{} kernel",
                anchor.x, anchor.y, kernel_w, kernel_h
            )));
        }
        Ok(Self {
            left: anchor.x,
            right: kernel_w - anchor.x - 1,
            top: anchor.y,
            bottom: kernel_h - anchor.y - 1,
        })
    }
}
