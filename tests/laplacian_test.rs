// Named kernel library tests.

use image::GrayImage;
use rmscribe::edge::laplacian::{EdgeKernel, LaplacianVariant, filter_gray, laplacian_gray};
use rmscribe::filter::kernel::Border;

fn uniform(w: u32, h: u32, v: u8) -> GrayImage {
    GrayImage::from_raw(w, h, vec![v; (w * h) as usize]).unwrap()
}

#[test]
fn test_laplacian_is_zero_on_uniform_rasters() {
    let img = uniform(5, 5, 170);
    for variant in [LaplacianVariant::K4, LaplacianVariant::K8] {
        let out = laplacian_gray(&img, Border::Replicate, variant).unwrap();
        assert!(out.as_raw().iter().all(|&v| v == 0), "variant {variant:?}");
    }
}

#[test]
fn test_laplacian_responds_around_an_isolated_pixel() {
    let mut img = uniform(5, 5, 0);
    img.put_pixel(2, 2, image::Luma([255]));

    let out = laplacian_gray(&img, Border::Constant, LaplacianVariant::K4).unwrap();
    // Second derivative fires on the 4-neighbors, the center clamps to 0.
    assert_eq!(out.get_pixel(2, 1).0[0], 255);
    assert_eq!(out.get_pixel(1, 2).0[0], 255);
    assert_eq!(out.get_pixel(3, 2).0[0], 255);
    assert_eq!(out.get_pixel(2, 3).0[0], 255);
    assert_eq!(out.get_pixel(2, 2).0[0], 0);
    assert_eq!(out.get_pixel(1, 1).0[0], 0);

    let out = laplacian_gray(&img, Border::Constant, LaplacianVariant::K8).unwrap();
    // The 8-neighbor kernel also fires on the diagonals.
    assert_eq!(out.get_pixel(1, 1).0[0], 255);
    assert_eq!(out.get_pixel(3, 3).0[0], 255);
    assert_eq!(out.get_pixel(2, 2).0[0], 0);
}

#[test]
fn test_sharpen_and_blur_preserve_uniform_rasters() {
    let img = uniform(6, 4, 90);
    for id in [EdgeKernel::Sharpen, EdgeKernel::Gaussian3] {
        let out = filter_gray(&img, Border::Replicate, id).unwrap();
        assert_eq!(out.as_raw(), img.as_raw(), "kernel {id:?}");
    }
}

#[test]
fn test_sobel_pair_detects_oriented_edges() {
    // Vertical boundary: SobelX fires, SobelY stays silent.
    let img = GrayImage::from_fn(8, 8, |x, _| image::Luma([if x < 4 { 0 } else { 200 }]));

    let gx = filter_gray(&img, Border::Replicate, EdgeKernel::SobelX).unwrap();
    let gy = filter_gray(&img, Border::Replicate, EdgeKernel::SobelY).unwrap();

    assert_eq!(gx.get_pixel(4, 4).0[0], 255); // 4 * 200 clamps
    assert_eq!(gx.get_pixel(1, 4).0[0], 0);
    assert!(gy.as_raw().iter().all(|&v| v == 0));
}
