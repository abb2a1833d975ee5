//! Error types

mod grid;
mod row;
mod source;

pub use grid::*;
pub use row::*;
pub use source::*;
