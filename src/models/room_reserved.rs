use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Reservation, Room};
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

/// A room held by a reservation, with the price at booking time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomReserved {
    #[serde(default)]
    pub id: i64,
    pub reservation: Related<Reservation>,
    pub room: Related<Room>,
    #[serde(default)]
    pub price: Option<f32>,
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl RoomReserved {
    pub fn new(reservation: i64, room: &Room) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            reservation: Related::new(reservation),
            room: Related::new(room.id),
            price: Some(room.price),
            check_in: None,
            check_out: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for RoomReserved {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<RoomReserved>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<RoomReserved>::builder("room_reserved")
                .field("id", |r| r.id.into())
                .relation("reservation", "reservation", |r| r.reservation.id().into())
                .relation("room", "room", |r| r.room.id().into())
                .field("price", |r| r.price.into())
                .field("check_in", |r| r.check_in.into())
                .field("check_out", |r| r.check_out.into())
                .field("created_at", |r| r.created_at.into())
                .field("updated_at", |r| r.updated_at.into())
                .build()
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn carry_over(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
        self.updated_at = Utc::now();
    }

    fn load_related(&mut self, view: &StoreView<'_>) -> StoreResult<()> {
        self.reservation.load(view)?;
        self.room.load(view)
    }
}
