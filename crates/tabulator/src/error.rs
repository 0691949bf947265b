use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by worksheet sources, configuration and persistence.
///
/// Table operations themselves never fail; every variant here belongs to the
/// collaborators around the transformation chain.
#[derive(Error, Debug)]
pub enum TabulatorError {
    #[error("Worksheet not found: {name}")]
    WorksheetNotFound { name: String },

    #[error("Worksheet source unavailable: {0}")]
    SourceUnavailable(String),

    /// Returned by sources that require credentials the caller could not supply.
    #[error("Not authorized to read worksheet source: {0}")]
    Unauthorized(String),

    #[error("Failed to write {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid selection config: {0}")]
    InvalidConfig(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TabulatorError>;
