//! rmscribe converts raster screenshots into reMarkable stroke notebooks.
//!
//! The pipeline runs border-aware convolution, separable resampling and
//! edge detection (Laplacian or five-stage Canny) over an 8-bit grayscale
//! raster, vectorizes the edge mask into horizontal runs, serializes the
//! resulting stroke page to the `.lines` v5 binary format and packages
//! one or more pages into an `.rmdoc` zip container.
//!
//! External collaborators (file watchers, uploaders) consume two calls:
//! [`pipeline::convert_image`] for stroke bytes and
//! [`rmdoc::create_rmdoc`] for the container buffer.

pub mod edge;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod raster;
pub mod rmdoc;
pub mod stroke;
pub mod vector;

pub use error::{Result, RmScribeError};
