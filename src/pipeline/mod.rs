pub mod convert;

pub use convert::{ConvertOptions, Detector, convert_image, convert_to_document};
