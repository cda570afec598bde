use thiserror::Error;

use farmtrack_domain::RecordId;

use crate::store::EntityKind;

/// Unified error type for the analytics core and its store backends.
///
/// "No data" is never an error: empty snapshots flow through the services as
/// empty results. A failed fetch is an error and must stay one.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Fetch failed: {0}")]
    Fetch(String),
    #[error("{0} not found: {1}")]
    RecordNotFound(EntityKind, RecordId),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
