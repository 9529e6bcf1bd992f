//! Error types for the collekt crate.

use thiserror::Error;

/// Errors raised by collection operations.
///
/// Missing keys and empty collections are not errors; they produce `null`,
/// `None`, `NaN` or an empty collection instead. Only caller mistakes and
/// serialization failures surface here.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Comparison operator string not recognized by `where_op`.
    #[error("unknown comparison operator '{0}', expected one of == === != !== < <= > >=")]
    UnknownOperator(String),

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
