use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Hotel;
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

/// A bookable room in one hotel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    #[serde(default)]
    pub id: i64,
    pub hotel: Related<Hotel>,
    pub name: String,
    #[serde(default)]
    pub capacity: u16,
    #[serde(default)]
    pub price: f32,
    #[serde(default)]
    pub is_active: i8,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Room {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<Room>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Room>::builder("room")
                .field("id", |r| r.id.into())
                .relation("hotel", "hotel", |r| r.hotel.id().into())
                .field("name", |r| (&r.name).into())
                .field("capacity", |r| r.capacity.into())
                .field("price", |r| r.price.into())
                .field("is_active", |r| r.is_active.into())
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
        self.hotel.load(view)
    }
}
