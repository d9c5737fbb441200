//! Create endpoint: `POST /api/v1/{collection}`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use kin_persistence::core::CollectionStore;
use kin_persistence::types::{Condition, FilterPredicate};
use serde_json::Value;
use tracing::info;

use crate::error::{RestError, RestResult};
use crate::responses::data_response;
use crate::state::AppState;

use super::{capitalize, resolve_collection};

/// Handles `POST /api/v1/{collection}`.
///
/// Collections with a unique field reject a body whose value for that
/// field already exists, before anything is written.
pub async fn create_handler<S: CollectionStore + 'static>(
    State(state): State<AppState<S>>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> RestResult<Response> {
    let coll = resolve_collection(&collection)?;
    if !body.is_object() {
        return Err(RestError::bad_request("Request body must be a JSON object."));
    }

    if let Some(field) = coll.unique_field {
        let value = body
            .get(field)
            .and_then(Value::as_str)
            .ok_or_else(|| RestError::bad_request(format!("{} is required!", capitalize(field))))?;

        let existing: FilterPredicate = [Condition::equals(field, value)].into_iter().collect();
        if state.storage().count(coll.name, &existing).await? > 0 {
            return Err(RestError::Conflict {
                message: format!("A {} with this {} already exists.", coll.label, field),
            });
        }
    }

    let stored = state.storage().insert(coll.name, body).await?;
    info!(collection = coll.name, "record created");

    let message = format!("{} created successfully!", capitalize(coll.label));
    Ok(data_response(StatusCode::CREATED, &message, stored))
}
