//! Raster edge mask to horizontal run vectorization.

use image::GrayImage;
use rayon::prelude::*;

/// Boolean edge mask with the same extent as the raster it was built from.
#[derive(Debug, Clone)]
pub struct EdgeMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl EdgeMask {
    /// Build an all-false mask.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, data: vec![false; width * height] }
    }

    /// Threshold a grayscale edge response into a boolean mask.
    ///
    /// A cell is set when its intensity is strictly greater than
    /// `threshold`; 0 keeps every non-black response.
    pub fn from_gray(img: &GrayImage, threshold: u8) -> Self {
        let (width, height) = (img.width() as usize, img.height() as usize);
        let data = img.as_raw().iter().map(|&v| v > threshold).collect();
        Self { width, height, data }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.data[y * self.width + x] = value;
    }

    fn row(&self, y: usize) -> &[bool] {
        &self.data[y * self.width..(y + 1) * self.width]
    }
}

/// Maximal contiguous run of set cells in one mask row.
///
/// `start == end` is a degenerate single-cell run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub row: usize,
    pub start: usize,
    pub end: usize,
}

/// Extract every horizontal run from a boolean edge mask.
///
/// Rows are scanned left to right; a run that is still open at the last
/// column is closed exactly at the boundary. The output is ordered
/// row-major, then by start column within a row — rayon's indexed
/// `flat_map_iter` keeps that order while rows scan in parallel.
pub fn horizontal_runs(mask: &EdgeMask) -> Vec<Run> {
    (0..mask.height())
        .into_par_iter()
        .flat_map_iter(|y| scan_row(mask.row(y), y))
        .collect()
}

/// Scan a single row for maximal runs of set cells.
fn scan_row(row: &[bool], y: usize) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut open: Option<usize> = None;

    for (x, &cell) in row.iter().enumerate() {
        match (open, cell) {
            (None, true) => open = Some(x),
            (Some(start), false) => {
                runs.push(Run { row: y, start, end: x - 1 });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        // Run reached the last column while still set: close it exactly
        // at the boundary.
        runs.push(Run { row: y, start, end: row.len() - 1 });
    }
    debug_assert!(runs.iter().all(|r| r.start <= r.end), "malformed run in row {y}");
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_row_splits_runs_at_gaps() {
        let row = [false, true, true, true, false, true, false];
        let runs = scan_row(&row, 4);
        assert_eq!(
            runs,
            vec![
                Run { row: 4, start: 1, end: 3 },
                Run { row: 4, start: 5, end: 5 },
            ]
        );
    }

    #[test]
    fn scan_row_closes_at_the_boundary() {
        let row = [true, false, true, true];
        let runs = scan_row(&row, 0);
        assert_eq!(
            runs,
            vec![
                Run { row: 0, start: 0, end: 0 },
                Run { row: 0, start: 2, end: 3 },
            ]
        );
    }
}
