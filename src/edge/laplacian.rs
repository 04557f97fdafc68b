//! Fixed library of named 3x3 filter kernels.
//!
//! The kernels live in a static read-only table constructed on first use;
//! selection is by [`EdgeKernel`] identifier. All of them are applied
//! through the convolution engine with the anchor at the kernel center.

use std::sync::LazyLock;

use image::GrayImage;

use crate::error::Result;
use crate::filter::kernel::{Anchor, Border, Kernel};
use crate::filter::convolve::convolve_gray;

/// Identifier for a named kernel in the static table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKernel {
    /// 4-neighbor Laplacian second-derivative kernel.
    Laplacian4,
    /// 8-neighbor Laplacian second-derivative kernel.
    Laplacian8,
    /// Sharpening kernel (identity plus 4-neighbor Laplacian response).
    Sharpen,
    /// Normalized 3x3 Gaussian blur.
    Gaussian3,
    /// Horizontal-derivative Sobel kernel.
    SobelX,
    /// Vertical-derivative Sobel kernel.
    SobelY,
}

/// Laplacian variant for [`laplacian_gray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaplacianVariant {
    /// 4-neighbor kernel: `{0,1,0; 1,-4,1; 0,1,0}`
    K4,
    /// 8-neighbor kernel: `{1,1,1; 1,-8,1; 1,1,1}`
    K8,
}

#[rustfmt::skip]
static LAPLACIAN_4: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::new(3, 3, vec![
        0.0,  1.0, 0.0,
        1.0, -4.0, 1.0,
        0.0,  1.0, 0.0,
    ])
    .expect("static kernel weights are well-formed")
});

#[rustfmt::skip]
static LAPLACIAN_8: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::new(3, 3, vec![
        1.0,  1.0, 1.0,
        1.0, -8.0, 1.0,
        1.0,  1.0, 1.0,
    ])
    .expect("static kernel weights are well-formed")
});

#[rustfmt::skip]
static SHARPEN: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::new(3, 3, vec![
         0.0, -1.0,  0.0,
        -1.0,  5.0, -1.0,
         0.0, -1.0,  0.0,
    ])
    .expect("static kernel weights are well-formed")
});

#[rustfmt::skip]
static GAUSSIAN_3: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::new(3, 3, vec![
        1.0, 2.0, 1.0,
        2.0, 4.0, 2.0,
        1.0, 2.0, 1.0,
    ])
    .expect("static kernel weights are well-formed")
    .normalized()
});

#[rustfmt::skip]
static SOBEL_X: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::new(3, 3, vec![
        -1.0, 0.0, 1.0,
        -2.0, 0.0, 2.0,
        -1.0, 0.0, 1.0,
    ])
    .expect("static kernel weights are well-formed")
});

#[rustfmt::skip]
static SOBEL_Y: LazyLock<Kernel> = LazyLock::new(|| {
    Kernel::new(3, 3, vec![
        -1.0, -2.0, -1.0,
         0.0,  0.0,  0.0,
         1.0,  2.0,  1.0,
    ])
    .expect("static kernel weights are well-formed")
});

/// Look up a named kernel in the static table.
pub fn named_kernel(id: EdgeKernel) -> &'static Kernel {
    match id {
        EdgeKernel::Laplacian4 => &LAPLACIAN_4,
        EdgeKernel::Laplacian8 => &LAPLACIAN_8,
        EdgeKernel::Sharpen => &SHARPEN,
        EdgeKernel::Gaussian3 => &GAUSSIAN_3,
        EdgeKernel::SobelX => &SOBEL_X,
        EdgeKernel::SobelY => &SOBEL_Y,
    }
}

/// Apply a named kernel to a grayscale raster under a border policy.
pub fn filter_gray(img: &GrayImage, border: Border, id: EdgeKernel) -> Result<GrayImage> {
    let kernel = named_kernel(id);
    convolve_gray(img, kernel, Anchor::center(kernel), border)
}

/// Apply a Laplacian second-derivative filter to a grayscale raster.
///
/// Single-pass edge response: zero crossings of the second derivative show
/// up as bright pixels against a dark background.
pub fn laplacian_gray(
    img: &GrayImage,
    border: Border,
    variant: LaplacianVariant,
) -> Result<GrayImage> {
    let id = match variant {
        LaplacianVariant::K4 => EdgeKernel::Laplacian4,
        LaplacianVariant::K8 => EdgeKernel::Laplacian8,
    };
    filter_gray(img, border, id)
}
