//! Errors of the admin front-end.

use std::io;
use std::path::PathBuf;

use storefront_grid::GridError;
use storefront_grid::error::SourceError;

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to read settings {path}: {source}")]
    SettingsRead { path: PathBuf, source: io::Error },

    #[error("Invalid settings {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No row with id '{0}'")]
    UnknownRow(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
