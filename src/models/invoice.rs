use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Guest, Reservation};
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

/// Bill issued to a guest for a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(default)]
    pub id: i64,
    pub guest: Related<Guest>,
    pub reservation: Related<Reservation>,
    pub amount: f32,
    #[serde(default = "Utc::now")]
    pub issued_at: DateTime<Utc>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub canceled_at: Option<DateTime<Utc>>,
}

impl Entity for Invoice {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<Invoice>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Invoice>::builder("invoice")
                .field("id", |i| i.id.into())
                .relation("guest", "guest", |i| i.guest.id().into())
                .relation("reservation", "reservation", |i| i.reservation.id().into())
                .field("amount", |i| i.amount.into())
                .field("issued_at", |i| i.issued_at.into())
                .field("paid_at", |i| i.paid_at.into())
                .field("canceled_at", |i| i.canceled_at.into())
                .build()
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn load_related(&mut self, view: &StoreView<'_>) -> StoreResult<()> {
        self.guest.load(view)?;
        self.reservation.load(view)
    }
}
