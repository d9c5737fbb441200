//! Error types for the persistence layer.
//!
//! Query-translation failures ([`QueryError`]) are separated from storage
//! failures ([`StoreError`]): the former are caller mistakes that map to
//! HTTP 400, the latter describe the state of the store.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// Errors raised while translating a raw query string into a filter
/// predicate and query options.
///
/// The translator rejects malformed input at the boundary instead of
/// passing invalid constraints through to the store.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// A bracketed filter used an operator outside the closed set.
    #[error("unknown filter operator '{op}' on field '{field}'")]
    UnknownOperator { field: String, op: String },

    /// A bracketed filter value did not parse as a number.
    #[error("invalid numeric value '{value}' for field '{field}'")]
    InvalidNumber { field: String, value: String },

    /// A `page` or `limit` value was not a positive integer.
    #[error("'{param}' must be a positive integer, got '{value}'")]
    InvalidPagination { param: String, value: String },

    /// A `search` key was supplied for a collection with no searchable
    /// fields.
    #[error("this collection does not support free-text search")]
    SearchNotSupported,
}

/// Errors raised by collection stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No record with the given id exists in the collection.
    #[error("record not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// A record with the given id already exists in the collection.
    #[error("record already exists: {collection}/{id}")]
    Duplicate { collection: String, id: String },

    /// The supplied record is not storable (e.g. not a JSON object).
    #[error("invalid record: {message}")]
    InvalidRecord { message: String },

    /// A backend-specific failure.
    #[error("storage backend error: {message}")]
    Backend { message: String },
}

/// Result type alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
