//! Bulk endpoints: `POST /api/v1/{collection}/bulk-create` and
//! `DELETE /api/v1/{collection}/bulk-delete`.
//!
//! Bulk create is all-or-nothing: when the collection has a unique field
//! and any incoming value already exists, nothing is written and the
//! request fails with 406.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use kin_persistence::core::CollectionStore;
use kin_persistence::types::{Condition, FilterPredicate};
use serde_json::{Value, json};
use tracing::info;

use crate::error::{RestError, RestResult};
use crate::responses::data_response;
use crate::state::AppState;

use super::{capitalize, resolve_collection};

/// Handles `POST /api/v1/{collection}/bulk-create`.
pub async fn bulk_create_handler<S: CollectionStore + 'static>(
    State(state): State<AppState<S>>,
    Path(collection): Path<String>,
    Json(body): Json<Value>,
) -> RestResult<Response> {
    let coll = resolve_collection(&collection)?;
    let records = match body {
        Value::Array(records) if !records.is_empty() => records,
        Value::Array(_) => {
            return Err(RestError::bad_request("Request body must not be empty."));
        }
        _ => return Err(RestError::bad_request("Request body must be a JSON array.")),
    };

    if let Some(field) = coll.unique_field {
        for record in &records {
            let value = record.get(field).and_then(Value::as_str).ok_or_else(|| {
                RestError::bad_request(format!("{} is required!", capitalize(field)))
            })?;

            let existing: FilterPredicate =
                [Condition::equals(field, value)].into_iter().collect();
            if state.storage().count(coll.name, &existing).await? > 0 {
                return Err(RestError::NotAcceptable {
                    message: format!("Some {} records already exist.", coll.label),
                });
            }
        }
    }

    let stored = state.storage().insert_many(coll.name, records).await?;
    info!(collection = coll.name, count = stored.len(), "bulk create");

    let message = format!("{} data created successfully!", capitalize(coll.label));
    Ok(data_response(
        StatusCode::CREATED,
        &message,
        Value::Array(stored),
    ))
}

/// Handles `DELETE /api/v1/{collection}/bulk-delete`.
pub async fn bulk_delete_handler<S: CollectionStore + 'static>(
    State(state): State<AppState<S>>,
    Path(collection): Path<String>,
) -> RestResult<Response> {
    let coll = resolve_collection(&collection)?;

    let deleted = state.storage().delete_all(coll.name).await?;
    info!(collection = coll.name, count = deleted, "bulk delete");

    let message = format!("All {} data deleted successfully!", coll.label);
    Ok(data_response(
        StatusCode::OK,
        &message,
        json!({ "deleted": deleted }),
    ))
}
