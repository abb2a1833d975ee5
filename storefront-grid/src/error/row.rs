//! Row construction errors

/// Error raised when a JSON value cannot become a [`Row`](crate::model::Row).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    /// The value is not a JSON object.
    #[error("row must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },

    /// The object has no `id`, or the id is neither an integer nor a string.
    #[error("row has no usable 'id' field")]
    MissingId,
}
