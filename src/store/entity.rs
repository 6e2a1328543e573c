//! # Entities
//!
//! The record trait every table type implements, and the foreign key
//! wrapper used for relations.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::errors::StoreResult;
use super::memory::StoreView;
use super::schema::Schema;

/// A row type stored in one table
pub trait Entity: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Field accessors, built once per type
    fn schema() -> &'static Schema<Self>;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Called on a full replace with the row being replaced. Tables with
    /// timestamps keep `created_at` and stamp `updated_at` here.
    fn carry_over(&mut self, _stored: &Self) {}

    /// Fill `Related` fields with their records. No-op for tables
    /// without relations.
    fn load_related(&mut self, _view: &StoreView<'_>) -> StoreResult<()> {
        Ok(())
    }

    fn table() -> &'static str {
        Self::schema().table()
    }
}

/// Foreign key to another entity.
///
/// Serializes as `{"id": n}` until the related record is loaded, then as
/// the full record. Deserializes from either a bare id or an object with
/// an `id` field.
pub struct Related<T> {
    id: i64,
    record: Option<Box<T>>,
}

impl<T> Related<T> {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            record: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    /// The loaded record, if related selection ran
    pub fn record(&self) -> Option<&T> {
        self.record.as_deref()
    }
}

impl<T: Entity> Related<T> {
    /// Load the related record; a dangling id leaves it unloaded
    pub fn load(&mut self, view: &StoreView<'_>) -> StoreResult<()> {
        self.record = view.find::<T>(self.id)?.map(Box::new);
        Ok(())
    }
}

impl<T: Clone> Clone for Related<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            record: self.record.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Related<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Related")
            .field("id", &self.id)
            .field("loaded", &self.record.is_some())
            .finish()
    }
}

impl<T> PartialEq for Related<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T: Serialize> Serialize for Related<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.record {
            Some(record) => record.serialize(serializer),
            None => {
                let mut state = serializer.serialize_struct("Related", 1)?;
                state.serialize_field("id", &self.id)?;
                state.end()
            }
        }
    }
}

impl<'de, T> Deserialize<'de> for Related<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Id(i64),
            Object { id: i64 },
        }

        let id = match Repr::deserialize(deserializer)? {
            Repr::Id(id) | Repr::Object { id } => id,
        };
        Ok(Self::new(id))
    }
}
