//! # Entity Schema
//!
//! Per-entity field accessor registry. Each entity type builds its schema
//! once; projection, filtering and ordering look fields up by name here
//! instead of reflecting over the struct.

use std::collections::HashMap;

use super::field::FieldValue;

/// Typed getter for one field
pub type Getter<E> = fn(&E) -> FieldValue;

/// Field accessors and relation targets for one entity type
pub struct Schema<E> {
    table: &'static str,
    fields: Vec<(&'static str, Getter<E>)>,
    index: HashMap<&'static str, usize>,
    relations: HashMap<&'static str, &'static str>,
}

impl<E> Schema<E> {
    pub fn builder(table: &'static str) -> SchemaBuilder<E> {
        SchemaBuilder {
            schema: Schema {
                table,
                fields: Vec::new(),
                index: HashMap::new(),
                relations: HashMap::new(),
            },
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    /// Read a field by name, `None` if the type has no such field
    pub fn get(&self, record: &E, field: &str) -> Option<FieldValue> {
        self.index
            .get(field)
            .map(|&idx| (self.fields[idx].1)(record))
    }

    /// Read a field by name, `FieldValue::Absent` if the type has no such field
    pub fn value_or_absent(&self, record: &E, field: &str) -> FieldValue {
        self.get(record, field).unwrap_or(FieldValue::Absent)
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Target table of a relation field
    pub fn relation(&self, field: &str) -> Option<&'static str> {
        self.relations.get(field).copied()
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}

pub struct SchemaBuilder<E> {
    schema: Schema<E>,
}

impl<E> SchemaBuilder<E> {
    pub fn field(mut self, name: &'static str, getter: Getter<E>) -> Self {
        let idx = self.schema.fields.len();
        self.schema.fields.push((name, getter));
        self.schema.index.insert(name, idx);
        self
    }

    /// Foreign key field; the getter yields the related id or `Null`
    pub fn relation(mut self, name: &'static str, target: &'static str, getter: Getter<E>) -> Self {
        self.schema.relations.insert(name, target);
        self.field(name, getter)
    }

    pub fn build(self) -> Schema<E> {
        self.schema
    }
}
