//! Declarative view model produced on every render.
//!
//! A [`GridView`] is everything a presentation target needs to draw the
//! grid. It is a pure function of the grid state, so two renders of the same
//! state produce equal views.

use crate::model::Cell;
use crate::model::RowId;
use crate::query::Direction;

/// Full description of one frame of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridView {
    pub toolbar: ToolbarView,
    pub header: Vec<HeaderCell>,
    /// Title of the trailing actions column, present when row actions exist.
    pub actions_header: Option<String>,
    pub body: Body,
    pub pager: PagerView,
}

impl GridView {
    /// Number of table columns including the actions column.
    pub fn column_count(&self) -> usize {
        self.header.len() + usize::from(self.actions_header.is_some())
    }

    /// Rows of the current page, empty for placeholder bodies.
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            Body::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Item count, search box and add button.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarView {
    /// Number of rows in the filtered dataset.
    pub total_items: usize,
    /// Localised count, e.g. "3 items".
    pub item_count: String,
    pub search_query: String,
    pub search_placeholder: String,
    /// Label of the add button, `None` when the button is hidden.
    pub add_button: Option<String>,
}

/// One column header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub field: String,
    pub title: String,
    pub sortable: bool,
    /// Sort indicator when this column is the active sort field.
    pub sort: Option<Direction>,
}

/// Table body in one of its four states.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// A load is in flight.
    Loading { message: String, colspan: usize },
    /// The last load failed.
    Error { message: String, colspan: usize },
    /// The filtered dataset is empty.
    Empty { message: String, colspan: usize },
    /// Rows of the current page.
    Rows(Vec<RowView>),
}

impl Body {
    /// Width of the placeholder cell, `None` for populated bodies.
    pub fn colspan(&self) -> Option<usize> {
        match self {
            Body::Loading { colspan, .. } | Body::Error { colspan, .. } | Body::Empty { colspan, .. } => {
                Some(*colspan)
            }
            Body::Rows(_) => None,
        }
    }
}

/// A rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowView {
    pub id: RowId,
    pub selected: bool,
    pub cells: Vec<Cell>,
    pub actions: Vec<ActionButton>,
}

/// A row action button, identified by its class and the row id only.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionButton {
    /// Control class, e.g. `btn-edit`.
    pub class: String,
    pub icon: String,
    pub title: String,
    pub row_id: RowId,
}

/// Pagination controls.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerView {
    pub current_page: usize,
    /// Number of pages; `0` when the filtered dataset is empty.
    pub total_pages: usize,
    /// Localised position text, e.g. "Page 1 of 3".
    pub page_info: String,
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub rows_per_page: usize,
    pub size_options: Vec<usize>,
    /// Word shown next to each size option.
    pub size_label: String,
}
