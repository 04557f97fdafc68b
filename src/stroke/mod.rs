pub mod page;

pub use page::{HEADER_V5, Line, Page, Point, X_MAX, Y_MAX};
