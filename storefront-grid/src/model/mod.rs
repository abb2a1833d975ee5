//! Row and cell models

mod cell;
mod row;

pub use cell::*;
pub use row::*;
