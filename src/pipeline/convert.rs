//! Pipeline orchestrator: image path -> stroke bytes -> container buffer.
//!
//! Data flows strictly downward: raw pixels -> resampled pixels -> edge
//! response -> boolean mask -> runs -> stroke page -> serialized bytes ->
//! container. Decode and validation failures abort the conversion with no
//! partial output.

use std::path::Path;

use tracing::{debug, info};

use crate::edge::canny::canny_edge_detection;
use crate::edge::laplacian::{LaplacianVariant, laplacian_gray};
use crate::error::{Result, RmScribeError};
use crate::filter::kernel::Border;
use crate::filter::resize::{Interpolation, resize_gray};
use crate::raster::decode_to_gray;
use crate::rmdoc::package::create_rmdoc;
use crate::stroke::page::Page;
use crate::vector::runs::{EdgeMask, horizontal_runs};

/// Edge detection facility used by the conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Detector {
    /// Single-pass Laplacian filter.
    Laplacian(LaplacianVariant),
    /// Five-stage Canny pipeline with double thresholds.
    Canny { low: f64, high: f64 },
}

/// Tunable parameters for one conversion run.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Uniform downscale factor applied before edge detection. Historic
    /// deployments used anything between 0.7 and 0.85 depending on input
    /// size; it is a parameter rather than a constant.
    pub scale: f64,
    /// Resampling filter for the downscale pass.
    pub interpolation: Interpolation,
    /// Border policy for convolution stages.
    pub border: Border,
    pub detector: Detector,
    /// Minimum edge-response intensity (exclusive) for a mask cell to be
    /// considered set.
    pub mask_threshold: u8,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            scale: 0.75,
            interpolation: Interpolation::Linear,
            border: Border::Replicate,
            detector: Detector::Laplacian(LaplacianVariant::K8),
            mask_threshold: 0,
        }
    }
}

/// Convert a raster image file into serialized `.lines` stroke bytes.
///
/// decode -> resize -> edge detect -> vectorize -> stroke page -> export.
pub fn convert_image(path: &Path, opts: &ConvertOptions) -> Result<Vec<u8>> {
    let gray = decode_to_gray(path)?;
    debug!(
        path = %path.display(),
        width = gray.width(),
        height = gray.height(),
        "decoded input raster"
    );

    let resized = resize_gray(&gray, opts.scale, opts.scale, opts.interpolation)?;

    let edges = match opts.detector {
        Detector::Laplacian(variant) => laplacian_gray(&resized, opts.border, variant)?,
        Detector::Canny { low, high } => canny_edge_detection(&resized, low, high)?,
    };

    let mask = EdgeMask::from_gray(&edges, opts.mask_threshold);
    let runs = horizontal_runs(&mask);
    debug!(runs = runs.len(), "vectorized edge mask");

    // Runs arrive ordered by row then start column, so line order (and the
    // exported byte stream) is deterministic without any locking.
    let mut page = Page::new();
    for run in &runs {
        let y = run.row as f32;
        if run.start == run.end {
            page.add_dot(run.start as f32, y);
        } else {
            page.add_segment(run.start as f32, y, run.end as f32, y);
        }
    }

    info!(
        path = %path.display(),
        lines = page.line_count(),
        "converted image to stroke page"
    );
    Ok(page.export())
}

/// Convert a raster image file straight into an `.rmdoc` container.
///
/// Returns the container buffer and the suggested file name, derived from
/// the image's base name.
pub fn convert_to_document(path: &Path, opts: &ConvertOptions) -> Result<(Vec<u8>, String)> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| RmScribeError::validation(format!(
            "cannot derive a document name from {}",
            path.display()
        )))?;

    let stroke_bytes = convert_image(path, opts)?;
    create_rmdoc(&format!("{stem}.rm"), &[stroke_bytes])
}
