//! Pagination metadata for list responses.
//!
//! List endpoints return the page of records together with a pagination
//! object describing the caller's position in the full result set.

use serde::{Deserialize, Serialize};

/// Pagination metadata reconstructed from a total count and the page/limit
/// the query ran with.
///
/// Serialized in camelCase to match the public wire format:
/// `{ "totalDocuments": 42, "totalPages": 5, "currentPage": 2,
///    "previousPage": 1, "nextPage": 3 }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of records matching the filter, across all pages.
    pub total_documents: u64,

    /// Total number of pages at the current limit.
    pub total_pages: u64,

    /// The 1-based page this response covers.
    pub current_page: u64,

    /// The previous page number, or `null` on the first page.
    pub previous_page: Option<u64>,

    /// The next page number, or `null` on the last page.
    pub next_page: Option<u64>,
}

impl Pagination {
    /// Computes pagination metadata for `total` matching records at the
    /// given page and limit.
    pub fn new(total: u64, page: u64, limit: u64) -> Self {
        let total_pages = total.div_ceil(limit.max(1));
        Self {
            total_documents: total,
            total_pages,
            current_page: page,
            previous_page: if page > 1 { Some(page - 1) } else { None },
            next_page: if page < total_pages {
                Some(page + 1)
            } else {
                None
            },
        }
    }
}
