use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to open database '{path}'")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("table '{name}' does not exist")]
    TableNotFound { name: String },

    #[error("cannot create table '{name}' without columns")]
    NoColumns { name: String },

    /// A record that could not be flattened.
    #[error("record {index}: {error}")]
    InvalidRecord {
        index: usize,
        error: siphon_schema::Error,
    },

    /// A record whose INSERT failed.
    #[error("record {index}: insert failed: {error}")]
    RecordInsert { index: usize, error: rusqlite::Error },

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl Error {
    /// Position of the failing record within its batch, if the error is
    /// about a single record.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            Error::InvalidRecord { index, .. } | Error::RecordInsert { index, .. } => Some(*index),
            _ => None,
        }
    }
}
