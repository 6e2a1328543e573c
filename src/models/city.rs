//! City a hotel belongs to

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::store::{Entity, Schema};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country: String,
}

impl City {
    pub fn new(id: i64, name: &str, country: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            country: country.to_string(),
        }
    }
}

impl Entity for City {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<City>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<City>::builder("city")
                .field("id", |c| c.id.into())
                .field("name", |c| (&c.name).into())
                .field("country", |c| (&c.country).into())
                .build()
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}
