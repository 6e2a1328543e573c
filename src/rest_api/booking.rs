//! # Booking Endpoints
//!
//! Hotel search ordered by ledger rating, and room reservation as one
//! all-or-nothing unit.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::ledger::overlay_ratings;
use crate::models::reservation::STATUS_PENDING;
use crate::models::{Guest, Hotel, Reservation, Room, RoomReserved};
use crate::query::{executor, projection, Listing, QuerySpec, RawQuery};
use crate::store::{Related, StoreError};

use super::codecs::{BookingReserveRoomsRequest, BookingReserveRoomsResponse, CommonResponse, ResponseCode};
use super::errors::ApiResult;
use super::state::AppState;

/// Search hotels.
///
/// Runs the list query with related selection, overlays ledger ratings,
/// then orders by rating ascending. Equal ratings keep query order.
/// Projection is applied last so `rating` is always the overlaid value.
pub async fn search(
    State(state): State<AppState>,
    Query(raw): Query<RawQuery>,
) -> ApiResult<Json<Listing<Hotel>>> {
    let spec = QuerySpec::parse(&raw)?.with_related();
    let mut hotels = executor::execute(state.store.query_table::<Hotel>(), &spec)?;

    overlay_ratings(state.ledger.as_ref(), &mut hotels).await;
    hotels.sort_by(|a, b| a.rating.total_cmp(&b.rating));

    Ok(Json(projection::project(hotels, &spec.projection)))
}

fn reply(
    status: StatusCode,
    code: ResponseCode,
    reservation: Option<Reservation>,
) -> (StatusCode, Json<BookingReserveRoomsResponse>) {
    let body = BookingReserveRoomsResponse {
        common: CommonResponse::new(code),
        reservation,
    };
    (status, Json(body))
}

/// Reserve rooms for a guest.
///
/// One reservation row plus one `room_reserved` row per room, each copying
/// the room's current price. A missing guest or room undoes every insert.
pub async fn reserve_rooms(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<BookingReserveRoomsResponse>) {
    let req: BookingReserveRoomsRequest = match serde_json::from_value(body) {
        Ok(req) => req,
        Err(e) => {
            warn!(event = "BOOKING_REQUEST_INVALID", error = %e);
            return reply(StatusCode::BAD_REQUEST, ResponseCode::InvalidParams, None);
        }
    };
    if let Some(reason) = req.invalid_reason() {
        warn!(event = "BOOKING_REQUEST_INVALID", reason);
        return reply(StatusCode::BAD_REQUEST, ResponseCode::InvalidParams, None);
    }

    let result = state.store.atomic(|tx| {
        let guest = tx.get::<Guest>(req.guest_id)?;
        let now = Utc::now();
        let reservation = tx.insert(Reservation {
            id: 0,
            guest: Related::new(guest.id),
            start_date: req.start_date,
            end_date: req.end_date,
            discount_percent: req.discount_percent,
            total_price: req.total_price,
            status: STATUS_PENDING,
            created_at: now,
            updated_at: now,
        })?;

        for room_id in &req.rooms {
            let room = tx.get::<Room>(*room_id)?;
            tx.insert(RoomReserved::new(reservation.id, &room))?;
        }
        Ok(reservation)
    });

    match result {
        Ok(reservation) => {
            info!(
                event = "ROOMS_RESERVED",
                reservation_id = reservation.id,
                guest_id = req.guest_id,
                rooms = req.rooms.len(),
            );
            reply(StatusCode::CREATED, ResponseCode::Success, Some(reservation))
        }
        Err(err) => {
            warn!(event = "BOOKING_ROLLED_BACK", guest_id = req.guest_id, error = %err);
            let status = match err {
                StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
                StoreError::DuplicateKey { .. } | StoreError::InvalidRecord { .. } => {
                    StatusCode::BAD_REQUEST
                }
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            reply(status, ResponseCode::FailedCreate, None)
        }
    }
}
