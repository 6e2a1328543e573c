//! # REST API Router
//!
//! Routes for every collection plus the booking RPC endpoints, mounted
//! under `/v1`.

use axum::{
    routing::{get, post},
    Router,
};

use crate::models::{
    City, Guest, Hotel, Invoice, Notification, PenaltyAgreement, Reservation, Room,
    RoomFacilitate, RoomReserved, ServiceLevel, StayTracking,
};

use super::booking;
use super::collection::{self, collection, member};
use super::guest;
use super::hotel;
use super::state::AppState;

/// API version prefix
pub const API_PREFIX: &str = "/v1";

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/rpc/hotels/search", get(booking::search))
        .route("/rpc/rooms/reserve", post(booking::reserve_rooms))
        .route("/hotels", collection::<Hotel>())
        .route(
            "/hotels/:id",
            get(hotel::get_hotel)
                .put(collection::update::<Hotel>)
                .delete(collection::remove::<Hotel>),
        )
        .route(
            "/guests",
            get(collection::list::<Guest>).post(guest::create_guest),
        )
        .route(
            "/guests/:id",
            get(collection::fetch::<Guest>)
                .put(guest::update_guest)
                .delete(collection::remove::<Guest>),
        )
        .route("/cities", collection::<City>())
        .route("/cities/:id", member::<City>())
        .route("/rooms", collection::<Room>())
        .route("/rooms/:id", member::<Room>())
        .route("/reservations", collection::<Reservation>())
        .route("/reservations/:id", member::<Reservation>())
        .route("/room_reserved", collection::<RoomReserved>())
        .route("/room_reserved/:id", member::<RoomReserved>())
        .route("/invoices", collection::<Invoice>())
        .route("/invoices/:id", member::<Invoice>())
        .route("/notifications", collection::<Notification>())
        .route("/notifications/:id", member::<Notification>())
        .route("/service_levels", collection::<ServiceLevel>())
        .route("/service_levels/:id", member::<ServiceLevel>())
        .route("/penalty_agreements", collection::<PenaltyAgreement>())
        .route("/penalty_agreements/:id", member::<PenaltyAgreement>())
        .route("/room_facilitates", collection::<RoomFacilitate>())
        .route("/room_facilitates/:id", member::<RoomFacilitate>())
        .route("/stay_trackings", collection::<StayTracking>())
        .route("/stay_trackings/:id", member::<StayTracking>())
}

/// Build the Axum router
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest(API_PREFIX, api_routes())
        .with_state(state)
}
