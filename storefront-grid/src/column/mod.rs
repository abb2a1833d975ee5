//! Column model: declarative description of what a grid shows.
//!
//! A [`Column`] names the field path it reads, the header title, whether the
//! header sorts, and an optional formatter. [`RowAction`]s describe the
//! per-row buttons of the trailing actions column.

mod action;
mod format;
mod path;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::model::Cell;
use crate::model::Row;

pub use action::*;
pub use format::*;
pub use path::*;

/// Caller-supplied cell formatter.
///
/// Receives the resolved (non-empty) value and the whole row. Formatters are
/// trusted code: a panic inside one propagates to the caller.
pub type Formatter = Arc<dyn Fn(&Value, &Row) -> Cell + Send + Sync>;

/// A grid column definition.
#[derive(Clone)]
pub struct Column {
    /// Dot-separated path of the attribute shown in this column.
    pub field: String,
    /// Header text.
    pub title: String,
    /// Whether clicking the header sorts by this column.
    pub sortable: bool,
    /// Optional formatter replacing the default display rules.
    pub formatter: Option<Formatter>,
}

impl Column {
    /// Creates a sortable column without formatter.
    pub fn new(field: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            title: title.into(),
            sortable: true,
            formatter: None,
        }
    }

    /// Sets the formatter.
    pub fn formatter<F>(mut self, formatter: F) -> Self
    where
        F: Fn(&Value, &Row) -> Cell + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(formatter));
        self
    }

    /// Marks the header as not sortable.
    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Resolves and formats this column's cell for `row`.
    pub fn cell(&self, row: &Row, labels: &crate::Labels) -> Cell {
        format_value(resolve(row, &self.field), self, row, labels)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}
