pub mod package;

pub use package::create_rmdoc;
