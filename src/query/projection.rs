//! # Field Projection
//!
//! Reshapes full records into sparse attribute maps when the caller asks
//! for a subset of fields.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::store::{Entity, FieldValue};

/// Field names to keep; empty means the full record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionSpec {
    fields: Vec<String>,
}

impl ProjectionSpec {
    /// Build from a field list, dropping repeated names
    pub fn new(fields: Vec<String>) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields {
            if !unique.contains(&field) {
                unique.push(field);
            }
        }
        Self { fields: unique }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One projected row
pub type Projection = BTreeMap<String, FieldValue>;

/// Query output: full records or projected rows
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Listing<E> {
    Records(Vec<E>),
    Projected(Vec<Projection>),
}

impl<E> Listing<E> {
    pub fn len(&self) -> usize {
        match self {
            Listing::Records(rows) => rows.len(),
            Listing::Projected(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Project every record down to the requested fields.
///
/// Names the entity does not have map to [`FieldValue::Absent`].
pub fn project<E: Entity>(records: Vec<E>, spec: &ProjectionSpec) -> Listing<E> {
    if spec.is_empty() {
        return Listing::Records(records);
    }

    let schema = E::schema();
    Listing::Projected(
        records
            .iter()
            .map(|record| {
                spec.fields
                    .iter()
                    .map(|name| (name.clone(), schema.value_or_absent(record, name)))
                    .collect()
            })
            .collect(),
    )
}
