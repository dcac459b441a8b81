// Search error types

use crate::registry::Table;
use thiserror::Error;

/// Storage collaborator failed to execute a query
#[derive(Error, Debug)]
pub enum QueryFailure {
    #[error("Storage query failed: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a single-entity view that did not produce an entity
#[derive(Error, Debug)]
pub enum ViewError {
    #[error("{table} '{id}' not found")]
    NotFound { table: Table, id: String },

    #[error(transparent)]
    Query(#[from] QueryFailure),

    #[error("Failed to encode entity: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ViewError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ViewError::NotFound { .. })
    }
}
