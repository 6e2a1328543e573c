use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Room;
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

/// Amenities of a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomFacilitate {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub outdoor: Option<String>,
    #[serde(default)]
    pub bed: Option<String>,
    #[serde(default)]
    pub bathroom: Option<String>,
    pub room: Related<Room>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for RoomFacilitate {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<RoomFacilitate>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<RoomFacilitate>::builder("room_facilitate")
                .field("id", |f| f.id.into())
                .field("view", |f| f.view.as_deref().into())
                .field("outdoor", |f| f.outdoor.as_deref().into())
                .field("bed", |f| f.bed.as_deref().into())
                .field("bathroom", |f| f.bathroom.as_deref().into())
                .relation("room", "room", |f| f.room.id().into())
                .field("created_at", |f| f.created_at.into())
                .field("updated_at", |f| f.updated_at.into())
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
        self.room.load(view)
    }
}
