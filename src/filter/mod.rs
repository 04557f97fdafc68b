pub mod convolve;
pub mod kernel;
pub mod padding;
pub mod resize;

pub use convolve::convolve_gray;
pub use kernel::{Anchor, Border, Kernel, Paddings};
pub use padding::{pad_gray, pad_gray_by};
pub use resize::{Interpolation, resize_gray};
