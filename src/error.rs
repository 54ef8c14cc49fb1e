//! Error types surfaced by the catalog core.

use crate::catalog::ContentType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("row {row}: missing or unparsable field '{field}': {reason}")]
    MalformedRecord {
        row: usize,
        field: &'static str,
        reason: String,
    },

    #[error("duplicate record id '{id}'")]
    DuplicateRecord { id: String },

    #[error("no {content_type} records in the catalog")]
    EmptyCohort { content_type: ContentType },

    #[error("search query is empty")]
    InvalidQuery,

    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
