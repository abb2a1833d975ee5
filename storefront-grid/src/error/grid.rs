//! Grid error type

/// Errors surfaced by [`DataGrid`](crate::DataGrid) operations.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The host could not supply the requested container.
    #[error("Container with id \"{0}\" not found")]
    ContainerNotFound(String),

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl GridError {
    /// Creates a new invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
