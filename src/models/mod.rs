//! # Booking Models
//!
//! The entity kinds of the booking schema. Every type is registered
//! explicitly in [`registry`]; nothing registers itself on load.

mod city;
mod guest;
mod hotel;
mod invoice;
mod notification;
mod penalty_agreement;
pub mod reservation;
mod room;
mod room_facilitate;
mod room_reserved;
mod service_level;
mod stay_tracking;

pub use city::City;
pub use guest::Guest;
pub use hotel::Hotel;
pub use invoice::Invoice;
pub use notification::Notification;
pub use penalty_agreement::PenaltyAgreement;
pub use reservation::Reservation;
pub use room::Room;
pub use room_facilitate::RoomFacilitate;
pub use room_reserved::RoomReserved;
pub use service_level::ServiceLevel;
pub use stay_tracking::StayTracking;

use crate::store::{ModelRegistry, Store, StoreResult};

/// All booking models, referenced tables first
pub fn registry() -> ModelRegistry {
    ModelRegistry::new()
        .register::<City>()
        .register::<Hotel>()
        .register::<Guest>()
        .register::<Room>()
        .register::<Reservation>()
        .register::<RoomReserved>()
        .register::<Invoice>()
        .register::<Notification>()
        .register::<ServiceLevel>()
        .register::<PenaltyAgreement>()
        .register::<RoomFacilitate>()
        .register::<StayTracking>()
}

/// Open an empty store with every booking table
pub fn open_store() -> StoreResult<Store> {
    Store::open(&registry())
}
