use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Reservation;
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

/// Arrival logistics recorded during a stay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StayTracking {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub airport_shuttle: u8,
    #[serde(default)]
    pub room_no_mapping: String,
    pub reservation: Related<Reservation>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for StayTracking {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<StayTracking>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<StayTracking>::builder("stay_tracking")
                .field("id", |s| s.id.into())
                .field("airport_shuttle", |s| s.airport_shuttle.into())
                .field("room_no_mapping", |s| (&s.room_no_mapping).into())
                .relation("reservation", "reservation", |s| s.reservation.id().into())
                .field("created_at", |s| s.created_at.into())
                .field("updated_at", |s| s.updated_at.into())
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
        self.reservation.load(view)
    }
}
