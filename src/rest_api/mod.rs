//! # Booking REST API
//!
//! HTTP endpoints over the booking tables: generic CRUD for every entity,
//! guest registration, hotel search and room reservation.

pub mod booking;
pub mod codecs;
pub mod collection;
pub mod errors;
pub mod guest;
pub mod hotel;
pub mod password;
pub mod response;
pub mod server;
pub mod state;

pub use codecs::{CommonResponse, ResponseCode};
pub use errors::{ApiError, ApiResult};
pub use server::{router, API_PREFIX};
pub use state::AppState;
