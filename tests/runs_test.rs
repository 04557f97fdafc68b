// Vectorizer tests: edge mask to horizontal runs.

use image::GrayImage;
use rmscribe::vector::runs::{EdgeMask, Run, horizontal_runs};

fn mask_from_rows(rows: &[&[u8]]) -> EdgeMask {
    let mut mask = EdgeMask::new(rows[0].len(), rows.len());
    for (y, row) in rows.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            mask.set(x, y, cell != 0);
        }
    }
    mask
}

#[test]
fn test_single_row_splits_runs_at_gaps() {
    let mask = mask_from_rows(&[&[0, 1, 1, 1, 0, 1, 0]]);
    let runs = horizontal_runs(&mask);
    assert_eq!(
        runs,
        vec![
            Run { row: 0, start: 1, end: 3 },
            Run { row: 0, start: 5, end: 5 },
        ]
    );
}

#[test]
fn test_runs_are_ordered_row_major_then_by_column() {
    let mask = mask_from_rows(&[
        &[1, 1, 0, 0, 1],
        &[0, 0, 0, 0, 0],
        &[0, 1, 0, 1, 1],
    ]);
    let runs = horizontal_runs(&mask);
    assert_eq!(
        runs,
        vec![
            Run { row: 0, start: 0, end: 1 },
            Run { row: 0, start: 4, end: 4 },
            Run { row: 2, start: 1, end: 1 },
            Run { row: 2, start: 3, end: 4 },
        ]
    );
}

#[test]
fn test_run_reaching_the_last_column_closes_at_the_boundary() {
    let mask = mask_from_rows(&[&[0, 0, 1, 1, 1]]);
    let runs = horizontal_runs(&mask);
    assert_eq!(runs, vec![Run { row: 0, start: 2, end: 4 }]);
}

#[test]
fn test_full_row_is_one_run() {
    let mask = mask_from_rows(&[&[1, 1, 1, 1]]);
    let runs = horizontal_runs(&mask);
    assert_eq!(runs, vec![Run { row: 0, start: 0, end: 3 }]);
}

#[test]
fn test_empty_mask_yields_no_runs() {
    let mask = EdgeMask::new(8, 8);
    assert!(horizontal_runs(&mask).is_empty());
}

#[test]
fn test_mask_thresholding_from_gray() {
    let img = GrayImage::from_raw(4, 1, vec![0, 1, 128, 255]).unwrap();

    let mask = EdgeMask::from_gray(&img, 0);
    assert_eq!(
        (mask.get(0, 0), mask.get(1, 0), mask.get(2, 0), mask.get(3, 0)),
        (false, true, true, true)
    );

    let mask = EdgeMask::from_gray(&img, 128);
    assert_eq!(
        (mask.get(0, 0), mask.get(1, 0), mask.get(2, 0), mask.get(3, 0)),
        (false, false, false, true)
    );
}

#[test]
fn test_mask_extent_matches_source_raster() {
    let img = GrayImage::from_raw(6, 3, vec![0; 18]).unwrap();
    let mask = EdgeMask::from_gray(&img, 0);
    assert_eq!((mask.width(), mask.height()), (6, 3));
}
