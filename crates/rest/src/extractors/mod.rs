//! Axum extractors and query translation.

mod filter_query;
mod raw_query;

pub use filter_query::{RESERVED_KEYS, TranslatedQuery, filter_query, filter_query_with_limit};
pub use raw_query::{QueryValue, RawQuery};
