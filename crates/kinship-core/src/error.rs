//! Error types for Kinship Core

use thiserror::Error;

use crate::limits::ValidationError;
use crate::person::PersonId;

/// Result type alias using Kinship's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Kinship error types
#[derive(Error, Debug)]
pub enum Error {
    /// Processing one record's relation fields failed. Names the record so the
    /// abandoned rebuild can be traced back to the data that caused it.
    #[error("Failed to process relations for {name} ({id}): {source}")]
    RecordProcessing {
        id: PersonId,
        name: String,
        source: Box<Error>,
    },

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Wrap an error raised while processing a single person record
    pub fn record(id: PersonId, name: impl Into<String>, source: Error) -> Self {
        Self::RecordProcessing {
            id,
            name: name.into(),
            source: Box::new(source),
        }
    }
}
