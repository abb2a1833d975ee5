//! Grid configuration.
//!
//! [`GridConfig`] is the full programmatic configuration, callbacks
//! included. [`GridSettings`] is its serde-friendly subset so the plain
//! options can come from a settings file.

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::Labels;
use crate::bind::HandlerRegistry;
use crate::column::ActionKind;
use crate::column::Column;
use crate::column::RowAction;
use crate::model::Row;
use crate::model::RowId;
use crate::query::Direction;
use crate::query::SortSpec;
use crate::selection::SelectionMode;
use crate::source::DataSource;

/// Default page size.
pub const DEFAULT_ROWS_PER_PAGE: usize = 10;

/// What happens to selected ids whose rows leave the working dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPolicy {
    /// Drop them on `set_data`, `delete_row` and successful loads.
    #[default]
    Prune,
    /// Keep them; callers reconcile stale ids themselves.
    Retain,
}

/// Plain options of a grid, readable from JSON.
///
/// Every field is optional; unset fields leave the [`GridConfig`] untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSettings {
    pub data_source_url: Option<String>,
    pub rows_per_page: Option<usize>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<Direction>,
    pub selectable: Option<bool>,
    pub enable_add_button: Option<bool>,
    pub use_cookies: Option<bool>,
    pub selection_policy: Option<SelectionPolicy>,
    pub labels: Option<Labels>,
}

/// Configuration of a [`DataGrid`](crate::DataGrid).
///
/// # Example
///
/// ```
/// use storefront_grid::GridConfig;
/// use storefront_grid::column::{Column, RowAction};
/// use storefront_grid::query::Direction;
///
/// let config = GridConfig::new(vec![
///         Column::new("name", "Name"),
///         Column::new("url_text", "URL text"),
///     ])
///     .rows_per_page(25)
///     .sort("name", Direction::Asc)
///     .row_action(RowAction::edit("Edit"), |id| println!("edit {}", id))
///     .on_add_click(|| println!("add"));
/// ```
#[derive(Clone)]
pub struct GridConfig {
    pub(crate) columns: Vec<Column>,
    pub(crate) data: Vec<Row>,
    pub(crate) data_source_url: Option<String>,
    pub(crate) source: Option<Arc<dyn DataSource>>,
    pub(crate) rows_per_page: usize,
    pub(crate) sort: Option<SortSpec>,
    pub(crate) selection_mode: SelectionMode,
    pub(crate) row_actions: Vec<RowAction>,
    pub(crate) handlers: HandlerRegistry,
    pub(crate) enable_add_button: bool,
    pub(crate) use_cookies: bool,
    pub(crate) labels: Labels,
    pub(crate) selection_policy: SelectionPolicy,
}

impl GridConfig {
    /// Creates a configuration with the given columns and defaults for the rest.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            data: Vec::new(),
            data_source_url: None,
            source: None,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            sort: None,
            selection_mode: SelectionMode::None,
            row_actions: Vec::new(),
            handlers: HandlerRegistry::new(),
            enable_add_button: true,
            use_cookies: false,
            labels: Labels::default(),
            selection_policy: SelectionPolicy::default(),
        }
    }

    /// Initial in-memory rows.
    pub fn data(mut self, rows: Vec<Row>) -> Self {
        self.data = rows;
        self
    }

    /// Endpoint loaded on `load`/`refresh`.
    pub fn data_source_url(mut self, url: impl Into<String>) -> Self {
        self.data_source_url = Some(url.into());
        self
    }

    /// Collaborator used to fetch the data source URL.
    pub fn source(mut self, source: Arc<dyn DataSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Initial page size.
    pub fn rows_per_page(mut self, rows_per_page: usize) -> Self {
        self.rows_per_page = rows_per_page;
        self
    }

    /// Initial sort.
    pub fn sort(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.sort = Some(SortSpec::new(field, direction));
        self
    }

    /// Enables row-click selection (multi-select).
    pub fn selectable(mut self, selectable: bool) -> Self {
        self.selection_mode = if selectable {
            SelectionMode::Multi
        } else {
            SelectionMode::None
        };
        self
    }

    /// Sets the selection mode directly.
    pub fn selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    /// Declares a row action and binds its callback.
    pub fn row_action<F>(mut self, action: RowAction, on_invoke: F) -> Self
    where
        F: Fn(&RowId) + Send + Sync + 'static,
    {
        self.handlers.bind_action(action.kind.clone(), on_invoke);
        self.declare_action(action)
    }

    /// Declares a row action without binding a callback.
    pub fn declare_action(mut self, action: RowAction) -> Self {
        self.row_actions.retain(|a| a.kind != action.kind);
        self.row_actions.push(action);
        self
    }

    /// Binds the callback of an already declared row action.
    pub fn on_action<F>(mut self, kind: ActionKind, on_invoke: F) -> Self
    where
        F: Fn(&RowId) + Send + Sync + 'static,
    {
        self.handlers.bind_action(kind, on_invoke);
        self
    }

    /// Callback of the add button.
    pub fn on_add_click<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.handlers.bind_add(callback);
        self
    }

    /// Shows or hides the add button.
    pub fn enable_add_button(mut self, enabled: bool) -> Self {
        self.enable_add_button = enabled;
        self
    }

    /// Sends session credentials with data source requests.
    pub fn use_cookies(mut self, use_cookies: bool) -> Self {
        self.use_cookies = use_cookies;
        self
    }

    /// Display strings.
    pub fn labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// What to do with selected ids of removed rows.
    pub fn selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.selection_policy = policy;
        self
    }

    /// Applies the options set in `settings`.
    pub fn with_settings(mut self, settings: GridSettings) -> Self {
        if let Some(url) = settings.data_source_url {
            self.data_source_url = Some(url);
        }
        if let Some(rows_per_page) = settings.rows_per_page {
            self.rows_per_page = rows_per_page;
        }
        match (settings.sort_field, settings.sort_direction) {
            (Some(field), direction) => {
                self.sort = Some(SortSpec::new(field, direction.unwrap_or_default()));
            }
            (None, Some(direction)) => {
                if let Some(sort) = &mut self.sort {
                    sort.direction = direction;
                }
            }
            (None, None) => {}
        }
        if let Some(selectable) = settings.selectable {
            self = self.selectable(selectable);
        }
        if let Some(enabled) = settings.enable_add_button {
            self.enable_add_button = enabled;
        }
        if let Some(use_cookies) = settings.use_cookies {
            self.use_cookies = use_cookies;
        }
        if let Some(policy) = settings.selection_policy {
            self.selection_policy = policy;
        }
        if let Some(labels) = settings.labels {
            self.labels = labels;
        }
        self
    }

    /// Returns the declared columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Returns the declared row actions.
    pub fn row_actions(&self) -> &[RowAction] {
        &self.row_actions
    }

    /// Returns the configured data source URL.
    pub fn endpoint(&self) -> Option<&str> {
        self.data_source_url.as_deref()
    }

    /// Returns whether credentials are sent with data source requests.
    pub fn uses_cookies(&self) -> bool {
        self.use_cookies
    }

    /// Returns the initial sort.
    pub fn initial_sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }
}

impl std::fmt::Debug for GridConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GridConfig")
            .field("columns", &self.columns)
            .field("rows", &self.data.len())
            .field("data_source_url", &self.data_source_url)
            .field("has_source", &self.source.is_some())
            .field("rows_per_page", &self.rows_per_page)
            .field("sort", &self.sort)
            .field("selection_mode", &self.selection_mode)
            .field("row_actions", &self.row_actions)
            .field("handlers", &self.handlers)
            .field("enable_add_button", &self.enable_add_button)
            .field("use_cookies", &self.use_cookies)
            .field("selection_policy", &self.selection_policy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_json() {
        let settings: GridSettings = serde_json::from_str(
            r#"{"rowsPerPage": 25, "sortField": "lastname", "sortDirection": "desc", "useCookies": true}"#,
        )
        .unwrap();
        let config = GridConfig::new(vec![Column::new("lastname", "Last name")]).with_settings(settings);
        assert_eq!(config.rows_per_page, 25);
        assert_eq!(config.sort, Some(SortSpec::new("lastname", Direction::Desc)));
        assert!(config.use_cookies);
        assert!(config.enable_add_button);
    }

    #[test]
    fn test_settings_direction_only_keeps_field() {
        let settings = GridSettings {
            sort_direction: Some(Direction::Desc),
            ..Default::default()
        };
        let config = GridConfig::new(Vec::new())
            .sort("name", Direction::Asc)
            .with_settings(settings);
        assert_eq!(config.sort, Some(SortSpec::new("name", Direction::Desc)));
    }

    #[test]
    fn test_row_action_redeclare_replaces() {
        let config = GridConfig::new(Vec::new())
            .row_action(RowAction::edit("Edit"), |_| {})
            .row_action(RowAction::edit("Modify"), |_| {});
        assert_eq!(config.row_actions.len(), 1);
        assert_eq!(config.row_actions[0].title, "Modify");
    }
}
