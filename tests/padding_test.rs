// Border model and padding tests.

use image::GrayImage;
use rmscribe::error::RmScribeError;
use rmscribe::filter::kernel::{Anchor, Border, Paddings};
use rmscribe::filter::pad_gray;

// ============================================================
// Helpers
// ============================================================

fn raster_3x3() -> GrayImage {
    GrayImage::from_raw(3, 3, vec![10, 20, 30, 40, 50, 60, 70, 80, 90]).unwrap()
}

fn px(img: &GrayImage, x: u32, y: u32) -> u8 {
    img.get_pixel(x, y).0[0]
}

// ============================================================
// 1. Margin derivation
// ============================================================

#[test]
fn test_paddings_from_kernel_and_anchor() {
    let p = Paddings::for_kernel(5, 5, Anchor::new(1, 1)).expect("valid anchor");
    assert_eq!(p, Paddings { left: 1, right: 3, top: 1, bottom: 3 });

    let p = Paddings::for_kernel(3, 3, Anchor::new(1, 1)).expect("valid anchor");
    assert_eq!(p, Paddings { left: 1, right: 1, top: 1, bottom: 1 });
}

#[test]
fn test_anchor_outside_kernel_is_rejected() {
    let result = Paddings::for_kernel(3, 3, Anchor::new(3, 1));
    assert!(matches!(result, Err(RmScribeError::ValidationError(_))));

    let result = Paddings::for_kernel(3, 3, Anchor::new(0, 5));
    assert!(matches!(result, Err(RmScribeError::ValidationError(_))));
}

// ============================================================
// 2. Padded dimensions
// ============================================================

#[test]
fn test_padded_dimensions_for_all_borders() {
    let img = raster_3x3();
    for border in [Border::Constant, Border::Replicate, Border::Reflect] {
        let padded = pad_gray(&img, 5, 5, Anchor::new(1, 1), border).unwrap();
        // left 1 + right 3, top 1 + bottom 3
        assert_eq!((padded.width(), padded.height()), (7, 7), "border {border:?}");
    }
}

#[test]
fn test_interior_is_copied_verbatim() {
    let img = raster_3x3();
    for border in [Border::Constant, Border::Replicate, Border::Reflect] {
        let padded = pad_gray(&img, 3, 3, Anchor::new(1, 1), border).unwrap();
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(px(&padded, x + 1, y + 1), px(&img, x, y));
            }
        }
    }
}

// ============================================================
// 3. Border synthesis values
// ============================================================

#[test]
fn test_constant_border_is_zero() {
    let img = raster_3x3();
    let padded = pad_gray(&img, 3, 3, Anchor::new(1, 1), Border::Constant).unwrap();
    for i in 0..5 {
        assert_eq!(px(&padded, i, 0), 0);
        assert_eq!(px(&padded, i, 4), 0);
        assert_eq!(px(&padded, 0, i), 0);
        assert_eq!(px(&padded, 4, i), 0);
    }
}

#[test]
fn test_replicate_border_broadcasts_edges() {
    let img = raster_3x3();
    let padded = pad_gray(&img, 3, 3, Anchor::new(1, 1), Border::Replicate).unwrap();
    // Top margin repeats row 0, corners take the corner pixel.
    assert_eq!(px(&padded, 0, 0), 10);
    assert_eq!(px(&padded, 1, 0), 10);
    assert_eq!(px(&padded, 2, 0), 20);
    assert_eq!(px(&padded, 3, 0), 30);
    assert_eq!(px(&padded, 4, 0), 30);
    // Left and right margins repeat the row edges.
    assert_eq!(px(&padded, 0, 2), 40);
    assert_eq!(px(&padded, 4, 2), 60);
    // Bottom-right corner.
    assert_eq!(px(&padded, 4, 4), 90);
}

#[test]
fn test_reflect_border_mirrors_without_edge() {
    let img = raster_3x3();
    let padded = pad_gray(&img, 3, 3, Anchor::new(1, 1), Border::Reflect).unwrap();
    // Row above the raster mirrors interior row 1 (not row 0).
    assert_eq!(px(&padded, 1, 0), 40);
    assert_eq!(px(&padded, 2, 0), 50);
    assert_eq!(px(&padded, 3, 0), 60);
    // Column left of the raster mirrors interior column 1.
    assert_eq!(px(&padded, 0, 1), 20);
    assert_eq!(px(&padded, 0, 2), 50);
    assert_eq!(px(&padded, 0, 3), 80);
    // Below and right mirror the second-to-last row/column.
    assert_eq!(px(&padded, 2, 4), 50);
    assert_eq!(px(&padded, 4, 2), 50);
}

#[test]
fn test_reflect_folds_when_margin_exceeds_extent() {
    let img = GrayImage::from_raw(2, 2, vec![1, 2, 3, 4]).unwrap();
    // 5x5 kernel anchored centrally: margins of 2 on a 2-wide raster.
    let padded = pad_gray(&img, 5, 5, Anchor::new(2, 2), Border::Reflect).unwrap();
    assert_eq!((padded.width(), padded.height()), (6, 6));
    // x=-2 folds back to column 0, x=-1 to column 1.
    assert_eq!(px(&padded, 0, 2), 1);
    assert_eq!(px(&padded, 1, 2), 2);
}
