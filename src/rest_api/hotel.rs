//! Hotel reads with the ledger rating overlaid

use axum::{
    extract::{Path, State},
    Json,
};

use crate::ledger::overlay_ratings;
use crate::models::Hotel;

use super::errors::ApiResult;
use super::state::AppState;

/// Get one hotel; the ledger rating replaces the stored one when reachable
pub async fn get_hotel(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Hotel>> {
    let mut hotel = state.store.get::<Hotel>(id)?;
    overlay_ratings(state.ledger.as_ref(), std::slice::from_mut(&mut hotel)).await;
    Ok(Json(hotel))
}
