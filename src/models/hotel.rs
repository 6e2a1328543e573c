//! # Hotel
//!
//! `rating` is not authoritative in the store: the ledger holds the live
//! value and read paths overlay it when reachable.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::City;
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_active: i8,
    #[serde(default)]
    pub address: String,
    pub city: Related<City>,
    #[serde(default)]
    pub rating: f32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Hotel {
    /// Active hotel with no description or rating yet
    pub fn new(id: i64, name: &str, city: Related<City>) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: name.to_string(),
            description: None,
            is_active: 1,
            address: String::new(),
            city,
            rating: 0.0,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Hotel {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<Hotel>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Hotel>::builder("hotel")
                .field("id", |h| h.id.into())
                .field("name", |h| (&h.name).into())
                .field("description", |h| h.description.as_deref().into())
                .field("is_active", |h| h.is_active.into())
                .field("address", |h| (&h.address).into())
                .relation("city", "city", |h| h.city.id().into())
                .field("rating", |h| h.rating.into())
                .field("created_at", |h| h.created_at.into())
                .field("updated_at", |h| h.updated_at.into())
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
        self.city.load(view)
    }
}
