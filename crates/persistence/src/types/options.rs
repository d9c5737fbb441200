//! Query-shaping options: pagination, sorting, and projection.

use serde::{Deserialize, Serialize};

/// Sort direction for a single sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (the default).
    Ascending,
    /// Descending order.
    Descending,
}

/// A single `(field, direction)` sort instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortDirective {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Parses a sort token, where a leading `-` selects descending order.
    ///
    /// `"name"` sorts ascending, `"-createdAt"` sorts descending.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();
        if let Some(field) = token.strip_prefix('-') {
            Self {
                field: field.to_string(),
                direction: SortDirection::Descending,
            }
        } else {
            Self {
                field: token.to_string(),
                direction: SortDirection::Ascending,
            }
        }
    }
}

/// Pagination, sorting, and projection parameters for a list query.
///
/// `offset` is always derived from `page` and `limit`; the two
/// representations never disagree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// The 1-based page number.
    pub page: u64,

    /// The page size.
    pub limit: u64,

    /// Number of records to skip, always `(page - 1) * limit`.
    pub offset: u64,

    /// Sort instructions, applied in order.
    pub sort: Vec<SortDirective>,

    /// Optional projection: the fields to return, in order.
    pub fields: Option<Vec<String>>,
}

impl QueryOptions {
    /// Default page number when the query supplies none.
    pub const DEFAULT_PAGE: u64 = 1;

    /// Default page size when the query supplies none.
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Creates options for the given page and limit, computing the offset.
    ///
    /// The offset saturates at `u64::MAX`; pages that far out are empty
    /// anyway, so saturation keeps absurd page numbers from overflowing.
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page,
            limit,
            offset: page.saturating_sub(1).saturating_mul(limit),
            sort: Vec::new(),
            fields: None,
        }
    }

    /// Caps the page size at `max_limit`, recomputing the offset so the
    /// `offset == (page - 1) * limit` invariant holds for the clamped value.
    pub fn clamp_limit(mut self, max_limit: u64) -> Self {
        self.limit = self.limit.min(max_limit);
        self.offset = self.page.saturating_sub(1).saturating_mul(self.limit);
        self
    }
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_LIMIT)
    }
}
