//! # Collection Handlers
//!
//! Generic CRUD over one entity table. Listing goes through the record
//! query core; everything else is a direct store call.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, MethodRouter},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::query::{executor, Listing, QuerySpec, RawQuery};
use crate::store::Entity;

use super::errors::{ApiError, ApiResult};
use super::response::DeleteResponse;
use super::state::AppState;

/// `GET` list and `POST` create on the collection path
pub fn collection<E: Entity>() -> MethodRouter<AppState> {
    get(list::<E>).post(create::<E>)
}

/// `GET`, `PUT` and `DELETE` on the member path
pub fn member<E: Entity>() -> MethodRouter<AppState> {
    get(fetch::<E>).put(update::<E>).delete(remove::<E>)
}

/// Decode a request body as the entity
pub(super) fn decode<E: Entity>(body: Value) -> ApiResult<E> {
    serde_json::from_value(body).map_err(|e| ApiError::InvalidBody(e.to_string()))
}

/// List records handler
pub async fn list<E: Entity>(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
) -> ApiResult<Json<Listing<E>>> {
    let spec = QuerySpec::parse(&raw)?;
    let listing = executor::list(state.store.query_table::<E>(), &spec)?;
    Ok(Json(listing))
}

/// Get single record handler
pub async fn fetch<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<E>> {
    Ok(Json(state.store.get::<E>(id)?))
}

/// Insert record handler
pub async fn create<E: Entity>(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<(StatusCode, Json<E>)> {
    let record = state.store.insert(decode::<E>(body)?)?;
    info!(event = "RECORD_CREATED", table = E::table(), id = record.id());
    Ok((StatusCode::CREATED, Json(record)))
}

/// Replace record handler; the path id wins over any id in the body
pub async fn update<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<E>> {
    let mut record = decode::<E>(body)?;
    record.set_id(id);
    Ok(Json(state.store.update(record)?))
}

/// Delete record handler
pub async fn remove<E: Entity>(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteResponse>> {
    state.store.delete::<E>(id)?;
    info!(event = "RECORD_DELETED", table = E::table(), id);
    Ok(Json(DeleteResponse::success(id)))
}
