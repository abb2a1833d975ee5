//! The grid controller.
//!
//! [`DataGrid`] owns the working dataset and view state, reruns the query
//! pipeline after every change, slices the current page and draws the
//! resulting [`GridView`] on its surface. Every public operation except the
//! remote load is synchronous.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use crate::Labels;
use crate::bind::Control;
use crate::bind::GridEvent;
use crate::bind::HandlerRegistry;
use crate::column::ActionKind;
use crate::column::Column;
use crate::column::RowAction;
use crate::config::GridConfig;
use crate::config::SelectionPolicy;
use crate::error::GridError;
use crate::error::SourceError;
use crate::model::Row;
use crate::model::RowId;
use crate::pagination::Pagination;
use crate::query;
use crate::query::SortSpec;
use crate::selection::Selection;
use crate::selection::SelectionMode;
use crate::source::DataSource;
use crate::surface::Host;
use crate::surface::Surface;
use crate::view::ActionButton;
use crate::view::Body;
use crate::view::GridView;
use crate::view::HeaderCell;
use crate::view::PagerView;
use crate::view::RowView;
use crate::view::ToolbarView;

/// State of the working dataset with respect to the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A load is in flight.
    Loading,
    /// Rows are available.
    Ready,
    /// The last load failed with this message.
    Failed(String),
}

/// Result of finishing a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched rows replaced the working dataset.
    Applied { rows: usize },
    /// The fetch failed; the error is shown in the grid.
    Failed(String),
    /// A newer load or `set_data` superseded this load; nothing changed.
    Stale,
    /// No data source is configured; the pipeline was reapplied.
    Local,
}

/// An issued load, to be completed with [`DataGrid::finish_load`].
///
/// Every call to [`DataGrid::begin_load`] and [`DataGrid::set_data`] bumps the
/// grid's generation; a ticket from an older generation is discarded when it
/// finishes, so the most recently issued request wins.
pub struct LoadTicket {
    generation: u64,
    source: Arc<dyn DataSource>,
    path: String,
    credentials: bool,
}

impl LoadTicket {
    /// Generation this load was issued at.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Path requested from the data source.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Runs the fetch. Does not touch the grid.
    pub async fn fetch(&self) -> Result<Vec<Row>, SourceError> {
        self.source.fetch(&self.path, self.credentials).await
    }
}

impl fmt::Debug for LoadTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadTicket")
            .field("generation", &self.generation)
            .field("path", &self.path)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// A sortable, searchable, paginated table over heterogeneous rows.
///
/// # Example
///
/// ```
/// use storefront_grid::{DataGrid, GridConfig};
/// use storefront_grid::column::Column;
/// use storefront_grid::model::Row;
/// use storefront_grid::surface::MemoryHost;
///
/// let mut host = MemoryHost::new();
/// let frames = host.add_container("brands-datagrid");
///
/// let config = GridConfig::new(vec![Column::new("name", "Name")])
///     .data(vec![Row::new(1).set("name", "Nike"), Row::new(2).set("name", "Adidas")]);
/// let mut grid = DataGrid::new(&mut host, "brands-datagrid", config).unwrap();
///
/// grid.sort_by("name");
/// let view = frames.last().unwrap();
/// assert_eq!(view.rows()[0].cells[0].as_str(), "Adidas");
/// ```
pub struct DataGrid {
    container_id: String,
    surface: Box<dyn Surface>,
    columns: Vec<Column>,
    row_actions: Vec<RowAction>,
    handlers: HandlerRegistry,
    labels: Labels,
    enable_add_button: bool,

    rows: Vec<Row>,
    filtered: Vec<usize>,

    search: String,
    sort: Option<SortSpec>,
    pagination: Pagination,
    selection: Selection<RowId>,
    selection_policy: SelectionPolicy,

    status: LoadStatus,
    generation: u64,
    source: Option<Arc<dyn DataSource>>,
    data_source_url: Option<String>,
    use_cookies: bool,
}

impl DataGrid {
    /// Mounts a grid in the host container `container_id` and draws it.
    ///
    /// Fails with [`GridError::ContainerNotFound`] if the host has no such
    /// container. When a data source URL is configured the grid starts in
    /// the loading state; call [`DataGrid::load`] to fetch, or use
    /// [`DataGrid::mount`] to do both.
    pub fn new<H: Host + ?Sized>(
        host: &mut H,
        container_id: &str,
        config: GridConfig,
    ) -> Result<Self, GridError> {
        let surface = host
            .mount(container_id)
            .ok_or_else(|| GridError::ContainerNotFound(container_id.to_string()))?;
        let pagination = Pagination::new(config.rows_per_page)?;
        if config.data_source_url.is_some() && config.source.is_none() {
            return Err(GridError::invalid_config(
                "a data source URL is configured without a data source",
            ));
        }

        let status = if config.data_source_url.is_some() {
            LoadStatus::Loading
        } else {
            LoadStatus::Ready
        };

        let mut grid = Self {
            container_id: container_id.to_string(),
            surface,
            columns: config.columns,
            row_actions: config.row_actions,
            handlers: config.handlers,
            labels: config.labels,
            enable_add_button: config.enable_add_button,
            rows: config.data,
            filtered: Vec::new(),
            search: String::new(),
            sort: config.sort,
            pagination,
            selection: Selection::new(config.selection_mode),
            selection_policy: config.selection_policy,
            status,
            generation: 0,
            source: config.source,
            data_source_url: config.data_source_url,
            use_cookies: config.use_cookies,
        };

        log::info!(
            "mounted grid '{}' with {} columns, {} rows",
            grid.container_id,
            grid.columns.len(),
            grid.rows.len()
        );
        grid.apply();
        Ok(grid)
    }

    /// Mounts a grid and, when a data source is configured, loads it.
    ///
    /// The returned grid is never left in the loading state: it holds either
    /// the fetched rows or the load failure.
    pub async fn mount<H: Host + ?Sized>(
        host: &mut H,
        container_id: &str,
        config: GridConfig,
    ) -> Result<(Self, LoadOutcome), GridError> {
        let mut grid = Self::new(host, container_id, config)?;
        let outcome = grid.load().await;
        Ok((grid, outcome))
    }

    // -------------------------------------------------------------------------
    // Loading
    // -------------------------------------------------------------------------

    /// Loads from the data source, or reapplies the pipeline if there is none.
    pub async fn load(&mut self) -> LoadOutcome {
        match self.begin_load() {
            Some(ticket) => {
                let result = ticket.fetch().await;
                self.finish_load(ticket, result)
            }
            None => {
                self.apply();
                LoadOutcome::Local
            }
        }
    }

    /// Reloads from the data source and reapplies the pipeline.
    pub async fn refresh(&mut self) -> LoadOutcome {
        self.load().await
    }

    /// Starts a load: bumps the generation and shows the loading state.
    ///
    /// Returns `None` when no data source is configured.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        let path = self.data_source_url.clone()?;
        let source = self.source.clone()?;
        self.generation += 1;
        self.status = LoadStatus::Loading;
        log::info!(
            "grid '{}': loading {} (generation {})",
            self.container_id,
            path,
            self.generation
        );
        self.render();
        Some(LoadTicket {
            generation: self.generation,
            source,
            path,
            credentials: self.use_cookies,
        })
    }

    /// Completes a load started with [`DataGrid::begin_load`].
    ///
    /// Results of superseded loads are dropped. Failures are shown inline
    /// and keep the previous working dataset.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<Row>, SourceError>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            log::warn!(
                "grid '{}': discarding stale load of generation {} (current {})",
                self.container_id,
                ticket.generation,
                self.generation
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(rows) => {
                let count = rows.len();
                log::info!("grid '{}': loaded {} rows", self.container_id, count);
                self.rows = rows;
                self.status = LoadStatus::Ready;
                self.prune_selection();
                self.apply();
                LoadOutcome::Applied { rows: count }
            }
            Err(error) => {
                let message = error.to_string();
                log::warn!("grid '{}': load failed: {}", self.container_id, message);
                self.status = LoadStatus::Failed(message.clone());
                self.render();
                LoadOutcome::Failed(message)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Data mutation
    // -------------------------------------------------------------------------

    /// Replaces the working dataset.
    ///
    /// Also supersedes any load in flight. View state is kept.
    pub fn set_data(&mut self, rows: Vec<Row>) {
        self.generation += 1;
        self.rows = rows;
        self.status = LoadStatus::Ready;
        self.prune_selection();
        self.apply();
    }

    /// Appends a row.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
        self.clear_failure();
        self.apply();
    }

    /// Shallow-merges `patch` into the row with `id`. Returns `false` if absent.
    ///
    /// An `id` key in `patch` is ignored: a row keeps the id it was found by.
    pub fn update_row(&mut self, id: &RowId, patch: Map<String, Value>) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.id() == id) else {
            return false;
        };
        row.merge(patch);
        self.clear_failure();
        self.apply();
        true
    }

    /// Removes every row with `id`. Returns whether one was removed.
    pub fn delete_row(&mut self, id: &RowId) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.id() != id);
        let removed = self.rows.len() != before;
        self.prune_selection();
        self.clear_failure();
        self.apply();
        removed
    }

    fn clear_failure(&mut self) {
        if matches!(self.status, LoadStatus::Failed(_)) {
            self.status = LoadStatus::Ready;
        }
    }

    fn prune_selection(&mut self) {
        if self.selection_policy != SelectionPolicy::Prune || self.selection.is_empty() {
            return;
        }
        let ids: HashSet<&RowId> = self.rows.iter().map(|row| row.id()).collect();
        let dropped = self.selection.retain(|id| ids.contains(id));
        if dropped > 0 {
            log::debug!(
                "grid '{}': pruned {} stale selected ids",
                self.container_id,
                dropped
            );
        }
    }

    // -------------------------------------------------------------------------
    // View state
    // -------------------------------------------------------------------------

    /// Sorts by `field`; repeated calls on the same field flip the direction.
    pub fn sort_by(&mut self, field: &str) {
        self.sort = Some(SortSpec::toggled(self.sort.as_ref(), field));
        self.apply();
    }

    /// Filters by `query` (case-insensitive) and goes back to page 1.
    pub fn search(&mut self, query: &str) {
        self.search = query.to_lowercase();
        self.pagination.reset();
        self.apply();
    }

    /// Changes the page size and goes back to page 1.
    pub fn set_rows_per_page(&mut self, rows_per_page: usize) -> Result<(), GridError> {
        self.pagination.set_rows_per_page(rows_per_page)?;
        self.apply();
        Ok(())
    }

    /// Moves to the next page. Returns `false` (and does nothing) on the last page.
    pub fn next_page(&mut self) -> bool {
        let moved = self.pagination.next(self.filtered.len());
        if moved {
            self.render();
        }
        moved
    }

    /// Moves to the previous page. Returns `false` (and does nothing) on page 1.
    pub fn previous_page(&mut self) -> bool {
        let moved = self.pagination.previous();
        if moved {
            self.render();
        }
        moved
    }

    /// Jumps to `page`, clamped into range.
    pub fn goto_page(&mut self, page: usize) {
        self.pagination.goto(page, self.filtered.len());
        self.render();
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Toggles the selection of `id`. Returns whether the selection changed.
    ///
    /// Does nothing unless the grid is selectable.
    pub fn toggle_selection(&mut self, id: RowId) -> bool {
        let changed = self.selection.toggle(id);
        self.render();
        changed
    }

    /// Selected row ids in insertion order.
    pub fn selected_rows(&self) -> Vec<RowId> {
        self.selection.snapshot()
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: &RowId) -> bool {
        self.selection.is_selected(id)
    }

    // -------------------------------------------------------------------------
    // Interaction
    // -------------------------------------------------------------------------

    /// Applies a user interaction reported by the surface.
    pub fn dispatch(&mut self, event: GridEvent) -> Result<(), GridError> {
        log::debug!("grid '{}': {:?}", self.container_id, event);
        match event {
            GridEvent::HeaderClicked(field) => {
                if self.columns.iter().any(|c| c.field == field && c.sortable) {
                    self.sort_by(&field);
                }
            }
            GridEvent::PreviousPage => {
                self.previous_page();
            }
            GridEvent::NextPage => {
                self.next_page();
            }
            GridEvent::GotoPage(page) => self.goto_page(page),
            GridEvent::RowsPerPageChanged(rows_per_page) => self.set_rows_per_page(rows_per_page)?,
            GridEvent::Search(query) => self.search(&query),
            GridEvent::AddClicked => {
                if self.enable_add_button {
                    self.handlers.invoke(&Control::AddButton, None);
                }
            }
            GridEvent::RowClicked(id) => {
                if self.selection.mode != SelectionMode::None {
                    self.toggle_selection(id);
                }
            }
            GridEvent::ActionClicked { class, id } => {
                self.invoke_action(&class, &id);
            }
        }
        Ok(())
    }

    /// Invokes the row action identified by its control class for row `id`.
    ///
    /// Returns `false` if the class names no declared action or the action
    /// has no bound callback.
    pub fn invoke_action(&self, class: &str, id: &RowId) -> bool {
        let Some(kind) = ActionKind::from_class(class) else {
            return false;
        };
        if !self.row_actions.iter().any(|action| action.kind == kind) {
            return false;
        }
        self.handlers.invoke(&Control::Action(kind), Some(id))
    }

    /// Callback registry, for binding and unbinding after construction.
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// Id of the container the grid is mounted in.
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    /// Column definitions.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Declared row actions.
    pub fn row_actions(&self) -> &[RowAction] {
        &self.row_actions
    }

    /// The working dataset.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Row with `id`, if any.
    pub fn row(&self, id: &RowId) -> Option<&Row> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Finds the id whose text form is `text`.
    pub fn find_id(&self, text: &str) -> Option<RowId> {
        self.rows
            .iter()
            .map(|row| row.id())
            .find(|id| id.to_string() == text)
            .cloned()
    }

    /// The filtered dataset in display order.
    pub fn filtered_rows(&self) -> Vec<&Row> {
        self.filtered.iter().map(|&i| &self.rows[i]).collect()
    }

    /// Rows of the current page.
    pub fn page_rows(&self) -> Vec<&Row> {
        self.filtered[self.pagination.window(self.filtered.len())]
            .iter()
            .map(|&i| &self.rows[i])
            .collect()
    }

    /// Current page (1-indexed).
    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    /// Number of pages of the filtered dataset.
    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages(self.filtered.len())
    }

    /// Page size.
    pub fn rows_per_page(&self) -> usize {
        self.pagination.rows_per_page()
    }

    /// Active (lower-cased) search query.
    pub fn search_query(&self) -> &str {
        &self.search
    }

    /// Active sort.
    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Load status.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Current load generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Display strings.
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Reruns the query pipeline and redraws.
    fn apply(&mut self) {
        self.filtered = query::run(&self.rows, &self.columns, &self.search, self.sort.as_ref());
        self.render();
    }

    /// Clamps the page and draws the current state.
    fn render(&mut self) {
        self.pagination.clamp(self.filtered.len());
        let view = self.view();
        self.surface.draw(&view);
    }

    /// Builds the view model of the current state.
    pub fn view(&self) -> GridView {
        let len = self.filtered.len();
        let colspan = self.columns.len() + usize::from(!self.row_actions.is_empty());

        let body = match &self.status {
            LoadStatus::Loading => Body::Loading {
                message: self.labels.loading.clone(),
                colspan,
            },
            LoadStatus::Failed(message) => Body::Error {
                message: message.clone(),
                colspan,
            },
            LoadStatus::Ready => {
                let window = self.pagination.window(len);
                if window.is_empty() {
                    Body::Empty {
                        message: self.labels.no_data.clone(),
                        colspan,
                    }
                } else {
                    Body::Rows(
                        self.filtered[window]
                            .iter()
                            .map(|&i| self.row_view(&self.rows[i]))
                            .collect(),
                    )
                }
            }
        };

        let header = self
            .columns
            .iter()
            .map(|column| HeaderCell {
                field: column.field.clone(),
                title: column.title.clone(),
                sortable: column.sortable,
                sort: self
                    .sort
                    .as_ref()
                    .filter(|spec| spec.field == column.field)
                    .map(|spec| spec.direction),
            })
            .collect();

        let total_pages = self.pagination.total_pages(len);
        let current_page = self.pagination.current_page();

        GridView {
            toolbar: ToolbarView {
                total_items: len,
                item_count: self.labels.item_count(len),
                search_query: self.search.clone(),
                search_placeholder: self.labels.search_placeholder.clone(),
                add_button: self
                    .enable_add_button
                    .then(|| self.labels.add_button.clone()),
            },
            header,
            actions_header: (!self.row_actions.is_empty())
                .then(|| self.labels.actions_header.clone()),
            body,
            pager: PagerView {
                current_page,
                total_pages,
                page_info: self.labels.page_info(current_page, total_pages.max(1)),
                previous_enabled: self.pagination.has_previous(),
                next_enabled: self.pagination.has_next(len),
                rows_per_page: self.pagination.rows_per_page(),
                size_options: self.pagination.size_options(),
                size_label: self.labels.rows_option.clone(),
            },
        }
    }

    fn row_view(&self, row: &Row) -> RowView {
        RowView {
            id: row.id().clone(),
            selected: self.selection.is_selected(row.id()),
            cells: self
                .columns
                .iter()
                .map(|column| column.cell(row, &self.labels))
                .collect(),
            actions: self
                .row_actions
                .iter()
                .map(|action| ActionButton {
                    class: action.kind.class(),
                    icon: action.icon.clone(),
                    title: action.title.clone(),
                    row_id: row.id().clone(),
                })
                .collect(),
        }
    }
}

impl fmt::Debug for DataGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataGrid")
            .field("container_id", &self.container_id)
            .field("rows", &self.rows.len())
            .field("filtered", &self.filtered.len())
            .field("search", &self.search)
            .field("sort", &self.sort)
            .field("pagination", &self.pagination)
            .field("selected", &self.selection.len())
            .field("status", &self.status)
            .field("generation", &self.generation)
            .finish()
    }
}
