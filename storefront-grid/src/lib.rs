//! Storefront data grid
//!
//! A headless, sortable, searchable and paginated table engine for the
//! storefront administration pages. Rows come from memory or from a JSON
//! endpoint; each state change reruns the query pipeline and draws a
//! [`view::GridView`] on a [`surface::Surface`].

pub mod bind;
pub mod column;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod resources;
pub mod selection;
pub mod source;
pub mod surface;
pub mod view;

mod grid;
mod labels;
mod pagination;

pub use config::GridConfig;
pub use config::GridSettings;
pub use config::SelectionPolicy;
pub use error::GridError;
pub use grid::*;
pub use labels::Labels;
pub use pagination::*;
