//! List endpoint: `GET /api/v1/{collection}`.
//!
//! Translates the query string into a filter and query options, runs the
//! find, and wraps the page in the list envelope. An empty result page is
//! reported as a 404 with the collection's "couldn't find any" message.

use axum::extract::{Path, State};
use axum::response::Response;
use kin_persistence::core::CollectionStore;
use kin_persistence::types::Pagination;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::{RawQuery, TranslatedQuery, filter_query_with_limit};
use crate::responses::list_response;
use crate::state::AppState;

use super::{capitalize, resolve_collection};

/// Handles `GET /api/v1/{collection}`.
pub async fn list_handler<S: CollectionStore + 'static>(
    State(state): State<AppState<S>>,
    Path(collection): Path<String>,
    raw: RawQuery,
) -> RestResult<Response> {
    let coll = resolve_collection(&collection)?;
    let TranslatedQuery { filters, queries } =
        filter_query_with_limit(&raw, coll.searchable_fields, state.default_page_size())?;
    let queries = queries.clamp_limit(state.max_page_size());

    debug!(
        collection = coll.name,
        page = queries.page,
        limit = queries.limit,
        conditions = filters.len(),
        "list query"
    );

    let result = state.storage().find(coll.name, &filters, &queries).await?;
    if result.records.is_empty() {
        return Err(RestError::not_found(format!(
            "Couldn't find any {} data!",
            coll.label
        )));
    }

    let pagination = Pagination::new(result.total, queries.page, queries.limit);
    let message = format!("{} data fetched successfully!", capitalize(coll.label));
    Ok(list_response(&message, &pagination, result.records))
}
