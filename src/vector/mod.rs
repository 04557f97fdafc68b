pub mod runs;

pub use runs::{EdgeMask, Run, horizontal_runs};
