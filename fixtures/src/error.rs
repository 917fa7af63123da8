//! Fixture store error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Cannot open fixture database {path}: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Statement or constraint failure, driver message preserved
    #[error("{0}")]
    Query(#[from] rusqlite::Error),

    #[error("Fixture database is not connected")]
    NotConnected,

    #[error("Invalid table name: {name}")]
    InvalidTable { name: String },

    #[error("Statement is not read-only: {sql}")]
    NotReadOnly { sql: String },
}

impl FixtureError {
    /// True for failures raised against an open (or closed) connection rather than while opening it
    pub fn is_query_error(&self) -> bool {
        !matches!(self, FixtureError::Connection { .. })
    }

    /// SQLite extended result code, if the driver reported one
    pub fn sqlite_code(&self) -> Option<rusqlite::ErrorCode> {
        match self {
            FixtureError::Connection { source, .. } | FixtureError::Query(source) => {
                source.sqlite_error_code()
            }
            _ => None,
        }
    }
}

pub type FixtureResult<T> = Result<T, FixtureError>;
