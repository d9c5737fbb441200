//! Read endpoint: `GET /api/v1/{collection}/{id}`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use kin_persistence::core::CollectionStore;

use crate::error::{RestError, RestResult};
use crate::responses::data_response;
use crate::state::AppState;

use super::{capitalize, resolve_collection};

/// Handles `GET /api/v1/{collection}/{id}`.
pub async fn read_handler<S: CollectionStore + 'static>(
    State(state): State<AppState<S>>,
    Path((collection, id)): Path<(String, String)>,
) -> RestResult<Response> {
    let coll = resolve_collection(&collection)?;

    let record = state
        .storage()
        .get(coll.name, &id)
        .await?
        .ok_or_else(|| {
            RestError::not_found(format!("Couldn't find any {} data!", coll.label))
        })?;

    let message = format!("{} data fetched successfully!", capitalize(coll.label));
    Ok(data_response(StatusCode::OK, &message, record))
}
