//! # Reservation
//!
//! One booking by a guest over a date range. The reserved rooms hang off
//! it as [`RoomReserved`](super::RoomReserved) rows.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Guest;
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

/// Reservation lifecycle, stored as a small integer
pub const STATUS_PENDING: i8 = 0;
pub const STATUS_CONFIRMED: i8 = 1;
pub const STATUS_CANCELED: i8 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default)]
    pub id: i64,
    pub guest: Related<Guest>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub discount_percent: f32,
    pub total_price: f32,
    #[serde(default)]
    pub status: i8,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Reservation {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<Reservation>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Reservation>::builder("reservation")
                .field("id", |r| r.id.into())
                .relation("guest", "guest", |r| r.guest.id().into())
                .field("start_date", |r| r.start_date.into())
                .field("end_date", |r| r.end_date.into())
                .field("discount_percent", |r| r.discount_percent.into())
                .field("total_price", |r| r.total_price.into())
                .field("status", |r| r.status.into())
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
        self.guest.load(view)
    }
}
