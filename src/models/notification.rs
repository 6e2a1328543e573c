use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Reservation;
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

/// Scheduled reminder tied to a reservation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: i64,
    /// Three-letter notification code
    #[serde(rename = "type")]
    pub kind: String,
    pub trigger_at: DateTime<Utc>,
    #[serde(default)]
    pub is_completed: i8,
    #[serde(default)]
    pub description: Option<String>,
    pub reservation: Related<Reservation>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Notification {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<Notification>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Notification>::builder("notification")
                .field("id", |n| n.id.into())
                .field("type", |n| (&n.kind).into())
                .field("trigger_at", |n| n.trigger_at.into())
                .field("is_completed", |n| n.is_completed.into())
                .field("description", |n| n.description.as_deref().into())
                .relation("reservation", "reservation", |n| n.reservation.id().into())
                .field("created_at", |n| n.created_at.into())
                .field("updated_at", |n| n.updated_at.into())
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
