use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening or reading the study database.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database file does not exist at the resolved path
    #[error("{} not found", path.display())]
    DatabaseNotFound { path: PathBuf },

    /// No study carries the requested curated study number
    #[error("Study not found: '{curated_study_number}'")]
    StudyNotFound { curated_study_number: String },

    /// A column expected to hold a number could not be read as one
    #[error("Column '{column}' is not numeric: {value}")]
    NotNumeric { column: String, value: String },

    /// A row lacks a column the query layer relies on
    #[error("Missing column: '{0}'")]
    MissingColumn(String),

    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl DbError {
    /// True for the "requested thing does not exist" family of errors.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DatabaseNotFound { .. } | Self::StudyNotFound { .. }
        )
    }

    pub(crate) fn not_numeric(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self::NotNumeric {
            column: column.into(),
            value: value.into(),
        }
    }
}
