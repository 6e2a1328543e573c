use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Hotel;
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

/// Service commitment a hotel publishes, effective over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLevel {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub priority: u16,
    pub effect_from: DateTime<Utc>,
    #[serde(default)]
    pub expire_on: Option<DateTime<Utc>>,
    pub hotel: Related<Hotel>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for ServiceLevel {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<ServiceLevel>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<ServiceLevel>::builder("service_level")
                .field("id", |s| s.id.into())
                .field("name", |s| (&s.name).into())
                .field("priority", |s| s.priority.into())
                .field("effect_from", |s| s.effect_from.into())
                .field("expire_on", |s| s.expire_on.into())
                .relation("hotel", "hotel", |s| s.hotel.id().into())
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
        self.hotel.load(view)
    }
}
