//! The storage abstraction list endpoints run against.
//!
//! A [`CollectionStore`] holds named collections of JSON records and knows
//! how to apply a [`FilterPredicate`] plus [`QueryOptions`] to them. The
//! REST layer only ever talks to this trait; backends decide how records
//! are actually kept.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;
use crate::types::{FilterPredicate, QueryOptions};

/// The result of a filtered, paginated find.
#[derive(Debug, Clone)]
pub struct FindResult {
    /// Number of records matching the filter before offset/limit.
    pub total: u64,

    /// The page of records, after sort, offset, limit, and projection.
    pub records: Vec<Value>,
}

/// Storage operations over named collections of JSON records.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Returns a short name identifying the backend, for logging.
    fn backend_name(&self) -> &'static str;

    /// Runs a filtered, sorted, paginated query against a collection.
    ///
    /// The returned total reflects the filter only; the records reflect
    /// the full query shape including projection.
    async fn find(
        &self,
        collection: &str,
        filter: &FilterPredicate,
        options: &QueryOptions,
    ) -> StoreResult<FindResult>;

    /// Reads a single record by id. Returns `None` when absent.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Inserts a record, assigning an id and timestamps when missing.
    /// Returns the stored record.
    async fn insert(&self, collection: &str, record: Value) -> StoreResult<Value>;

    /// Inserts several records at once. Returns the stored records.
    async fn insert_many(&self, collection: &str, records: Vec<Value>) -> StoreResult<Vec<Value>>;

    /// Merges the given fields into an existing record and returns the
    /// updated record.
    async fn update(&self, collection: &str, id: &str, changes: Value) -> StoreResult<Value>;

    /// Deletes a record by id and returns it.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<Value>;

    /// Deletes every record in a collection. Returns how many were removed.
    async fn delete_all(&self, collection: &str) -> StoreResult<u64>;

    /// Counts the records matching a filter.
    async fn count(&self, collection: &str, filter: &FilterPredicate) -> StoreResult<u64>;
}
