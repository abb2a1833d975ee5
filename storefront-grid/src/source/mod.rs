//! Remote data collaborators.
//!
//! A [`DataSource`] answers a path with the rows of a resource. The grid
//! only calls it when a data source URL is configured.
//!
//! - [`HttpSource`] - JSON over HTTP with `reqwest`
//! - [`StaticSource`] - in-memory rows, for tests and offline use

mod http;
mod memory;

pub use http::*;
pub use memory::*;

use async_trait::async_trait;

use crate::error::SourceError;
use crate::model::Row;

/// Fetches rows for a path.
///
/// `credentials` asks the source to send the session credentials with the
/// request; sources without a notion of credentials ignore it.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use storefront_grid::model::Row;
/// use storefront_grid::source::DataSource;
/// use storefront_grid::error::SourceError;
///
/// struct Fixture;
///
/// #[async_trait]
/// impl DataSource for Fixture {
///     async fn fetch(&self, _path: &str, _credentials: bool) -> Result<Vec<Row>, SourceError> {
///         Ok(vec![Row::new(1).set("name", "Nike")])
///     }
/// }
/// ```
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch all rows at `path`.
    async fn fetch(&self, path: &str, credentials: bool) -> Result<Vec<Row>, SourceError>;
}
