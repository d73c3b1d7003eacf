mod common;
mod image;
mod ops;
mod options;

pub mod prelude;

pub use prelude::*;
