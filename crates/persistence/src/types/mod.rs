//! Core types shared between the persistence layer and its callers.

mod filter;
mod options;
mod pagination;

pub use filter::{CompareOp, Condition, FilterPredicate};
pub use options::{QueryOptions, SortDirection, SortDirective};
pub use pagination::Pagination;
