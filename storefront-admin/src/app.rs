//! The interactive session: one grid, a prompt, and the action requests the
//! grid's callbacks send back.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use storefront_grid::bind::GridEvent;
use storefront_grid::column::ActionKind;
use storefront_grid::model::RowId;
use storefront_grid::source::HttpSource;
use storefront_grid::{DataGrid, GridConfig, GridSettings, Labels, LoadOutcome};
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;

use crate::Cli;
use crate::commands;
use crate::commands::Command;
use crate::error::AdminError;
use crate::paths;
use crate::terminal::TerminalHost;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Sent by the grid's callbacks to the prompt loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Add,
    Edit(RowId),
    Delete(RowId),
}

pub async fn run(cli: Cli) -> Result<(), AdminError> {
    let settings = match &cli.settings {
        Some(path) => Some(read_settings(path)?),
        None => match paths::settings_file() {
            Some(path) if path.exists() => Some(read_settings(&path)?),
            _ => None,
        },
    };

    let mut source = HttpSource::builder()
        .base_url(cli.api_url.as_str())
        .timeout(REQUEST_TIMEOUT);
    if let Some(token) = &cli.session {
        source = source.session(token.as_str());
    }
    let source = Arc::new(source.build()?);

    let (tx, mut rx) = mpsc::unbounded_channel();
    let resource = cli.resource;
    let server_url = cli.server_url.as_deref().unwrap_or(&cli.api_url);

    let mut config = wire(resource.config(server_url), tx)
        .source(source)
        .selectable(true);
    if cli.french {
        config = config.labels(Labels::french());
    }
    if let Some(settings) = settings {
        config = config.with_settings(settings);
    }
    if let Some(rows) = cli.rows {
        config = config.rows_per_page(rows);
    }

    log::info!("Opening {} grid on {}", resource, cli.api_url);
    let mut host = TerminalHost::new(resource.container_id());
    let (mut grid, outcome) = DataGrid::mount(&mut host, resource.container_id(), config).await?;
    report(&outcome);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt();
    while let Some(line) = lines.next_line().await? {
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => {
                if let Err(e) = execute(&mut grid, command).await {
                    eprintln!("{}", e);
                }
            }
            Err(commands::CommandError::Empty) => {}
            Err(e) => eprintln!("{}", e),
        }
        drain(&mut grid, &mut rx);
        prompt();
    }

    log::info!("Session closed");
    Ok(())
}

fn read_settings(path: &Path) -> Result<GridSettings, AdminError> {
    let text = fs::read_to_string(path).map_err(|source| AdminError::SettingsRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AdminError::SettingsParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Binds the add and row-action callbacks to the request channel.
fn wire(config: GridConfig, tx: UnboundedSender<Request>) -> GridConfig {
    let edit = tx.clone();
    let delete = tx.clone();
    config
        .on_action(ActionKind::Edit, move |id| {
            let _ = edit.send(Request::Edit(id.clone()));
        })
        .on_action(ActionKind::Delete, move |id| {
            let _ = delete.send(Request::Delete(id.clone()));
        })
        .on_add_click(move || {
            let _ = tx.send(Request::Add);
        })
}

async fn execute(grid: &mut DataGrid, command: Command) -> Result<(), AdminError> {
    match command {
        Command::Next => grid.dispatch(GridEvent::NextPage)?,
        Command::Prev => grid.dispatch(GridEvent::PreviousPage)?,
        Command::Page(page) => grid.dispatch(GridEvent::GotoPage(page))?,
        Command::Sort(field) => grid.sort_by(&field),
        Command::Search(query) => grid.dispatch(GridEvent::Search(query))?,
        Command::Rows(rows) => grid.dispatch(GridEvent::RowsPerPageChanged(rows))?,
        Command::Select(id) => {
            let id = find(grid, &id)?;
            grid.dispatch(GridEvent::RowClicked(id))?;
        }
        Command::Selected => {
            let ids: Vec<String> = grid.selected_rows().iter().map(RowId::to_string).collect();
            if ids.is_empty() {
                println!("No rows selected");
            } else {
                println!("Selected: {}", ids.join(", "));
            }
        }
        Command::Edit(id) => action(grid, ActionKind::Edit, &id)?,
        Command::Delete(id) => action(grid, ActionKind::Delete, &id)?,
        Command::Add => grid.dispatch(GridEvent::AddClicked)?,
        Command::Refresh => report(&grid.refresh().await),
        Command::Help => println!("{}", commands::HELP),
        Command::Quit => {}
    }
    Ok(())
}

fn find(grid: &DataGrid, id: &str) -> Result<RowId, AdminError> {
    grid.find_id(id)
        .ok_or_else(|| AdminError::UnknownRow(id.to_string()))
}

fn action(grid: &mut DataGrid, kind: ActionKind, id: &str) -> Result<(), AdminError> {
    let id = find(grid, id)?;
    grid.dispatch(GridEvent::ActionClicked {
        class: kind.class(),
        id,
    })?;
    Ok(())
}

/// Handles the requests queued by callbacks during the last command.
fn drain(grid: &mut DataGrid, rx: &mut UnboundedReceiver<Request>) {
    while let Ok(request) = rx.try_recv() {
        handle(grid, request);
    }
}

fn handle(grid: &mut DataGrid, request: Request) {
    log::debug!("Handling {:?}", request);
    match request {
        Request::Add => println!("Adding rows is done from the storefront back office"),
        Request::Edit(id) => match grid.row(&id) {
            Some(row) => match serde_json::to_string_pretty(row) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Cannot show row {}: {}", id, e),
            },
            None => eprintln!("No row with id '{}'", id),
        },
        Request::Delete(id) => {
            if grid.delete_row(&id) {
                log::info!("Removed row {} from the grid", id);
                println!("Row {} removed", id);
            }
        }
    }
}

fn report(outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Applied { rows } => log::info!("Loaded {} rows", rows),
        LoadOutcome::Failed(message) => eprintln!("Load failed: {}", message),
        LoadOutcome::Stale | LoadOutcome::Local => {}
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use storefront_grid::model::Row;
    use storefront_grid::resources::Resource;
    use storefront_grid::source::StaticSource;
    use storefront_grid::surface::MemoryHost;

    use super::*;

    async fn users_grid() -> (DataGrid, UnboundedReceiver<Request>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let rows = vec![
            Row::new(1).set("lastname", "Martin"),
            Row::new("u-2").set("lastname", "Bernard"),
        ];
        let config = wire(Resource::Users.config("http://shop.test"), tx)
            .source(Arc::new(StaticSource::new(rows)))
            .selectable(true);
        let mut host = MemoryHost::new();
        host.add_container(Resource::Users.container_id());
        let (grid, outcome) = DataGrid::mount(&mut host, Resource::Users.container_id(), config)
            .await
            .unwrap();
        assert_eq!(outcome, LoadOutcome::Applied { rows: 2 });
        (grid, rx)
    }

    #[tokio::test]
    async fn test_delete_goes_through_callback() {
        let (mut grid, mut rx) = users_grid().await;
        execute(&mut grid, Command::Delete("u-2".into())).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), Request::Delete(RowId::from("u-2")));

        handle(&mut grid, Request::Delete(RowId::from("u-2")));
        assert_eq!(grid.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_select_and_unknown_rows() {
        let (mut grid, mut rx) = users_grid().await;
        execute(&mut grid, Command::Select("1".into())).await.unwrap();
        assert_eq!(grid.selected_rows(), [RowId::Number(1)]);

        let err = execute(&mut grid, Command::Edit("9".into())).await.unwrap_err();
        assert!(matches!(err, AdminError::UnknownRow(_)));

        execute(&mut grid, Command::Add).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), Request::Add);
    }

    #[test]
    fn test_read_settings() {
        let path = std::env::temp_dir().join(format!("storefront-grid-{}.json", std::process::id()));
        fs::write(&path, r#"{"rowsPerPage": 25, "sortField": "email"}"#).unwrap();
        let settings = read_settings(&path).unwrap();
        assert_eq!(settings.rows_per_page, Some(25));
        assert_eq!(settings.sort_field.as_deref(), Some("email"));

        fs::write(&path, "{").unwrap();
        assert!(matches!(read_settings(&path), Err(AdminError::SettingsParse { .. })));
        fs::remove_file(&path).unwrap();
    }
}
