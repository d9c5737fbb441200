//! Update endpoint: `PATCH /api/v1/{collection}/{id}`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use kin_persistence::core::CollectionStore;
use serde_json::Value;
use tracing::info;

use crate::error::{RestError, RestResult};
use crate::responses::data_response;
use crate::state::AppState;

use super::{capitalize, map_missing, resolve_collection};

/// Handles `PATCH /api/v1/{collection}/{id}`.
///
/// Body fields are merged into the existing record; the record's `id` is
/// never changed by an update.
pub async fn update_handler<S: CollectionStore + 'static>(
    State(state): State<AppState<S>>,
    Path((collection, id)): Path<(String, String)>,
    Json(changes): Json<Value>,
) -> RestResult<Response> {
    let coll = resolve_collection(&collection)?;
    if !changes.is_object() {
        return Err(RestError::bad_request("Request body must be a JSON object."));
    }

    let updated = state
        .storage()
        .update(coll.name, &id, changes)
        .await
        .map_err(|err| map_missing(err, coll))?;
    info!(collection = coll.name, id = %id, "record updated");

    let message = format!("{} updated successfully!", capitalize(coll.label));
    Ok(data_response(StatusCode::OK, &message, updated))
}
