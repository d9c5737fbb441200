//! # kin-persistence - Storage layer for the KIN membership API
//!
//! This crate defines the data-access surface the REST layer runs against:
//!
//! - [`types`] - filter predicates, query options, and pagination metadata
//! - [`core`] - the [`CollectionStore`] trait and its result types
//! - [`backends`] - concrete stores (currently the in-memory backend)
//! - [`error`] - query-translation and storage error types
//!
//! Collections are schemaless: records are `serde_json::Value` documents,
//! and the store evaluates [`FilterPredicate`]s directly against them.
//! Constraints over missing or non-numeric fields never match; they are
//! not an error at this layer.
//!
//! ## Example
//!
//! ```rust,ignore
//! use kin_persistence::backends::MemoryStore;
//! use kin_persistence::core::CollectionStore;
//! use kin_persistence::types::{Condition, FilterPredicate, QueryOptions};
//!
//! let store = MemoryStore::new();
//! let filter: FilterPredicate = [Condition::equals("role", "admin")].into_iter().collect();
//! let result = store.find("users", &filter, &QueryOptions::default()).await?;
//! ```

// Enforce documentation
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod error;
pub mod types;

pub use crate::core::{CollectionStore, FindResult};
pub use error::{QueryError, StoreError, StoreResult};
pub use types::{
    CompareOp, Condition, FilterPredicate, Pagination, QueryOptions, SortDirection, SortDirective,
};
