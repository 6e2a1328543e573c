//! # Guest Registration
//!
//! `POST /v1/guests` answers with the result-code envelope instead of the
//! plain record the other collections return. `PUT /v1/guests/:id` keeps
//! the stored password hash unless a confirmed new password is sent.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::models::Guest;
use crate::store::Entity;

use super::codecs::{
    CommonResponse, GuestPasswordChange, GuestPostRequest, GuestPostResponse, ResponseCode,
};
use super::collection::decode;
use super::errors::{ApiError, ApiResult};
use super::password::hash_password;
use super::state::AppState;

fn reply(status: StatusCode, code: ResponseCode, guest: Option<Guest>) -> (StatusCode, Json<GuestPostResponse>) {
    let body = GuestPostResponse {
        common: CommonResponse::new(code),
        guest,
    };
    (status, Json(body))
}

/// Register a guest. The password is kept only when it matches the
/// confirmation, and only as a hash.
pub async fn create_guest(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<GuestPostResponse>) {
    let req: GuestPostRequest = match serde_json::from_value(body) {
        Ok(req) => req,
        Err(e) => {
            warn!(event = "GUEST_REQUEST_INVALID", error = %e);
            return reply(StatusCode::BAD_REQUEST, ResponseCode::InvalidParams, None);
        }
    };
    if let Some(field) = req.missing_field() {
        warn!(event = "GUEST_REQUEST_INVALID", missing = field);
        return reply(StatusCode::BAD_REQUEST, ResponseCode::InvalidParams, None);
    }

    let mut password = String::new();
    if !req.password.is_empty() && req.password == req.confirmed_password {
        password = match hash_password(&req.password) {
            Ok(hash) => hash,
            Err(e) => {
                warn!(event = "PASSWORD_HASH_FAILED", error = %e);
                return reply(StatusCode::INTERNAL_SERVER_ERROR, ResponseCode::SystemError, None);
            }
        };
    }

    let now = Utc::now();
    let guest = Guest {
        id: req.id,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone: req.phone,
        address: req.address,
        detail: req.detail,
        role: req.role,
        password,
        created_at: now,
        updated_at: now,
    };

    match state.store.insert(guest) {
        Ok(guest) => {
            info!(event = "GUEST_REGISTERED", id = guest.id, has_password = !guest.password.is_empty());
            reply(StatusCode::CREATED, ResponseCode::Success, Some(guest))
        }
        Err(e) => {
            warn!(event = "GUEST_CREATE_FAILED", error = %e);
            reply(StatusCode::INTERNAL_SERVER_ERROR, ResponseCode::FailedCreate, None)
        }
    }
}

/// Replace a guest. A `password` in the body is hashed when it matches
/// `confirmedPassword`; without one the stored hash stays.
pub async fn update_guest(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Guest>> {
    let change: GuestPasswordChange =
        serde_json::from_value(body.clone()).map_err(|e| ApiError::InvalidBody(e.to_string()))?;
    let mut guest = decode::<Guest>(body)?;
    guest.set_id(id);
    guest.password = String::new();

    if !change.password.is_empty() {
        if change.password != change.confirmed_password {
            return Err(ApiError::InvalidBody(
                "password and confirmedPassword differ".to_string(),
            ));
        }
        guest.password = hash_password(&change.password)?;
    }

    let guest = state.store.update(guest)?;
    info!(event = "GUEST_UPDATED", id, password_changed = !change.password.is_empty());
    Ok(Json(guest))
}
