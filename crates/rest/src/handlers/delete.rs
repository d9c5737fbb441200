//! Delete endpoint: `DELETE /api/v1/{collection}/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use kin_persistence::core::CollectionStore;
use tracing::info;

use crate::error::RestResult;
use crate::responses::data_response;
use crate::state::AppState;

use super::{capitalize, map_missing, resolve_collection};

/// Handles `DELETE /api/v1/{collection}/{id}`.
///
/// Responds with the deleted record so callers can show what was removed.
pub async fn delete_handler<S: CollectionStore + 'static>(
    State(state): State<AppState<S>>,
    Path((collection, id)): Path<(String, String)>,
) -> RestResult<Response> {
    let coll = resolve_collection(&collection)?;

    let deleted = state
        .storage()
        .delete(coll.name, &id)
        .await
        .map_err(|err| map_missing(err, coll))?;
    info!(collection = coll.name, id = %id, "record deleted");

    let message = format!("{} deleted successfully!", capitalize(coll.label));
    Ok(data_response(StatusCode::OK, &message, deleted))
}
