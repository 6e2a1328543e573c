//! # Store Transactions
//!
//! Work done inside [`Store::atomic`](super::Store::atomic). Inserts are
//! journaled so a failed unit can be undone.

use serde_json::Value;
use tracing::debug;

use super::entity::Entity;
use super::errors::{StoreError, StoreResult};
use super::memory::{typed, typed_mut, Tables};

pub struct Transaction<'a> {
    tables: &'a mut Tables,
    inserted: Vec<(&'static str, i64)>,
}

impl<'a> Transaction<'a> {
    pub(super) fn new(tables: &'a mut Tables) -> Self {
        Self {
            tables,
            inserted: Vec::new(),
        }
    }

    pub fn get<E: Entity>(&self, id: i64) -> StoreResult<E> {
        typed::<E>(self.tables)?
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(E::table(), id))
    }

    pub fn insert<E: Entity>(&mut self, record: E) -> StoreResult<E> {
        let record = typed_mut::<E>(self.tables)?.insert(record)?;
        self.inserted.push((E::table(), record.id()));
        Ok(record)
    }

    /// Insert a JSON array of rows into the named table; rows inserted
    /// before a failing one are journaled too
    pub(super) fn seed(&mut self, table: &'static str, rows: Value) -> StoreResult<usize> {
        let mut ids = Vec::new();
        let result = self
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::UnregisteredTable(table.to_string()))?
            .seed(rows, &mut ids);
        let count = ids.len();
        self.inserted.extend(ids.into_iter().map(|id| (table, id)));
        result.map(|()| count)
    }

    /// Remove every row this transaction inserted, newest first.
    /// Returns how many were removed.
    pub(super) fn rollback(self) -> usize {
        let Transaction { tables, inserted } = self;
        let mut undone = 0;
        for (table, id) in inserted.into_iter().rev() {
            if let Some(rows) = tables.get_mut(table) {
                if rows.remove(id) {
                    undone += 1;
                }
            }
            debug!(event = "INSERT_UNDONE", table, id);
        }
        undone
    }
}
