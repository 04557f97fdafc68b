pub mod canny;
pub mod laplacian;

pub use canny::canny_edge_detection;
pub use laplacian::{EdgeKernel, LaplacianVariant, filter_gray, laplacian_gray};
