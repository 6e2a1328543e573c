//! # Guest
//!
//! The password hash is accepted from fixtures but never serialized.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::{Entity, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub role: i8,
    /// Argon2 PHC string
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for Guest {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<Guest>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Guest>::builder("guest")
                .field("id", |g| g.id.into())
                .field("first_name", |g| (&g.first_name).into())
                .field("last_name", |g| (&g.last_name).into())
                .field("email", |g| (&g.email).into())
                .field("phone", |g| g.phone.as_deref().into())
                .field("address", |g| g.address.as_deref().into())
                .field("detail", |g| g.detail.as_deref().into())
                .field("role", |g| g.role.into())
                .field("created_at", |g| g.created_at.into())
                .field("updated_at", |g| g.updated_at.into())
                .build()
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    /// A replace never clears the stored hash
    fn carry_over(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
        self.updated_at = Utc::now();
        if self.password.is_empty() {
            self.password = stored.password.clone();
        }
    }
}
