//! # In-Memory Record Store
//!
//! Tables keyed by name, each holding typed rows ordered by id. Relation
//! paths (`city__name`) are followed across tables through the schema's
//! relation targets.

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::{info, warn};

use super::entity::Entity;
use super::errors::{StoreError, StoreResult};
use super::field::FieldValue;
use super::query_set::MemoryQuery;
use super::transaction::Transaction;
use crate::query::filter::RELATION_SEPARATOR;

pub(super) type Tables = HashMap<&'static str, Box<dyn ErasedTable>>;

/// Table operations that do not need the row type
pub(super) trait ErasedTable: Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Verify a field path against the schema, following relations
    fn check_path(&self, tables: &Tables, path: &[&str]) -> StoreResult<()>;

    /// Read a path on the row with `id`; a missing row reads as `Null`
    fn resolve(&self, tables: &Tables, id: i64, path: &[&str]) -> StoreResult<FieldValue>;

    fn remove(&mut self, id: i64) -> bool;

    /// Insert a JSON array of records, pushing each inserted id
    fn seed(&mut self, rows: Value, inserted: &mut Vec<i64>) -> StoreResult<()>;

    fn len(&self) -> usize;
}

pub(super) struct Table<E> {
    pub(super) rows: BTreeMap<i64, E>,
    next_id: i64,
}

impl<E: Entity> Table<E> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Insert a row; an id of 0 (or below) is assigned
    pub(super) fn insert(&mut self, mut record: E) -> StoreResult<E> {
        if record.id() <= 0 {
            record.set_id(self.next_id);
        } else if self.rows.contains_key(&record.id()) {
            return Err(StoreError::DuplicateKey {
                table: E::table().to_string(),
                id: record.id(),
            });
        }

        let id = record.id();
        let after = id.checked_add(1).ok_or_else(|| StoreError::InvalidRecord {
            table: E::table().to_string(),
            message: format!("id {} leaves no room for the next id", id),
        })?;
        self.next_id = self.next_id.max(after);
        self.rows.insert(id, record.clone());
        Ok(record)
    }
}

impl<E: Entity> ErasedTable for Table<E> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn check_path(&self, tables: &Tables, path: &[&str]) -> StoreResult<()> {
        check_path::<E>(tables, path)
    }

    fn resolve(&self, tables: &Tables, id: i64, path: &[&str]) -> StoreResult<FieldValue> {
        match self.rows.get(&id) {
            Some(row) => resolve_path(tables, row, path),
            None => Ok(FieldValue::Null),
        }
    }

    fn remove(&mut self, id: i64) -> bool {
        self.rows.remove(&id).is_some()
    }

    fn seed(&mut self, rows: Value, inserted: &mut Vec<i64>) -> StoreResult<()> {
        let records: Vec<E> = serde_json::from_value(rows).map_err(|e| StoreError::InvalidRecord {
            table: E::table().to_string(),
            message: e.to_string(),
        })?;
        for record in records {
            inserted.push(self.insert(record)?.id());
        }
        Ok(())
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

pub(super) fn erased<'a>(tables: &'a Tables, name: &str) -> StoreResult<&'a dyn ErasedTable> {
    tables
        .get(name)
        .map(|table| table.as_ref())
        .ok_or_else(|| StoreError::UnregisteredTable(name.to_string()))
}

pub(super) fn typed<E: Entity>(tables: &Tables) -> StoreResult<&Table<E>> {
    erased(tables, E::table())?
        .as_any()
        .downcast_ref::<Table<E>>()
        .ok_or_else(|| StoreError::UnregisteredTable(E::table().to_string()))
}

pub(super) fn typed_mut<E: Entity>(tables: &mut Tables) -> StoreResult<&mut Table<E>> {
    tables
        .get_mut(E::table())
        .and_then(|table| table.as_any_mut().downcast_mut::<Table<E>>())
        .ok_or_else(|| StoreError::UnregisteredTable(E::table().to_string()))
}

pub(super) fn check_path<E: Entity>(tables: &Tables, path: &[&str]) -> StoreResult<()> {
    let schema = E::schema();
    let unknown = || StoreError::unknown_field(schema.table(), path.join(RELATION_SEPARATOR));

    let (head, rest) = path.split_first().ok_or_else(unknown)?;
    if !schema.has_field(head) {
        return Err(unknown());
    }
    if rest.is_empty() {
        return Ok(());
    }
    let target = schema.relation(head).ok_or_else(unknown)?;
    erased(tables, target)?.check_path(tables, rest)
}

pub(super) fn resolve_path<E: Entity>(
    tables: &Tables,
    record: &E,
    path: &[&str],
) -> StoreResult<FieldValue> {
    let schema = E::schema();
    let unknown = || StoreError::unknown_field(schema.table(), path.join(RELATION_SEPARATOR));

    let (head, rest) = path.split_first().ok_or_else(unknown)?;
    let value = schema.get(record, head).ok_or_else(unknown)?;
    if rest.is_empty() {
        return Ok(value);
    }
    let target = schema.relation(head).ok_or_else(unknown)?;
    match value {
        FieldValue::Int(id) => erased(tables, target)?.resolve(tables, id, rest),
        _ => Ok(FieldValue::Null),
    }
}

/// Explicit list of entity types, populated once at startup
#[derive(Default)]
pub struct ModelRegistry {
    models: Vec<(&'static str, fn() -> Box<dyn ErasedTable>)>,
}

fn new_table<E: Entity>() -> Box<dyn ErasedTable> {
    Box::new(Table::<E>::new())
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<E: Entity>(mut self) -> Self {
        self.models.push((E::table(), new_table::<E>));
        self
    }

    /// Table names in registration order
    pub fn tables(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.models.iter().map(|(name, _)| *name)
    }
}

/// Read-only access to the tables while a query holds the lock
pub struct StoreView<'a> {
    tables: &'a Tables,
}

impl<'a> StoreView<'a> {
    pub(super) fn new(tables: &'a Tables) -> Self {
        Self { tables }
    }

    pub fn find<E: Entity>(&self, id: i64) -> StoreResult<Option<E>> {
        Ok(typed::<E>(self.tables)?.rows.get(&id).cloned())
    }
}

/// Record store shared by all request handlers
pub struct Store {
    tables: RwLock<Tables>,
    order: Vec<&'static str>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("order", &self.order).finish_non_exhaustive()
    }
}

impl Store {
    /// Create empty tables for every registered model
    pub fn open(registry: &ModelRegistry) -> StoreResult<Self> {
        let mut tables = Tables::new();
        let mut order = Vec::new();
        for (name, make) in &registry.models {
            if tables.insert(*name, make()).is_some() {
                return Err(StoreError::DuplicateTable(name.to_string()));
            }
            order.push(*name);
        }

        Ok(Self {
            tables: RwLock::new(tables),
            order,
        })
    }

    pub(super) fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    pub(super) fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))
    }

    /// Start a query over one table
    pub fn query_table<E: Entity>(&self) -> MemoryQuery<'_, E> {
        MemoryQuery::new(self)
    }

    pub fn insert<E: Entity>(&self, record: E) -> StoreResult<E> {
        let mut tables = self.write()?;
        typed_mut::<E>(&mut tables)?.insert(record)
    }

    pub fn get<E: Entity>(&self, id: i64) -> StoreResult<E> {
        let tables = self.read()?;
        typed::<E>(&tables)?
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(E::table(), id))
    }

    /// Replace an existing row. [`Entity::carry_over`] runs against the
    /// stored row first.
    pub fn update<E: Entity>(&self, mut record: E) -> StoreResult<E> {
        let mut tables = self.write()?;
        let table = typed_mut::<E>(&mut tables)?;
        match table.rows.get_mut(&record.id()) {
            Some(row) => {
                record.carry_over(row);
                *row = record.clone();
                Ok(record)
            }
            None => Err(StoreError::not_found(E::table(), record.id())),
        }
    }

    pub fn delete<E: Entity>(&self, id: i64) -> StoreResult<()> {
        let mut tables = self.write()?;
        if typed_mut::<E>(&mut tables)?.rows.remove(&id).is_none() {
            return Err(StoreError::not_found(E::table(), id));
        }
        Ok(())
    }

    /// Number of rows in a table
    pub fn count(&self, table: &str) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(erased(&tables, table)?.len())
    }

    /// Load fixtures: a JSON object mapping table name to an array of rows.
    /// Tables are filled in registration order, as one atomic unit.
    pub fn seed(&self, fixtures: &Value) -> StoreResult<usize> {
        let object = fixtures.as_object().ok_or_else(|| StoreError::InvalidRecord {
            table: "*".to_string(),
            message: "fixtures must be a JSON object keyed by table".to_string(),
        })?;
        if let Some(unknown) = object.keys().find(|k| !self.order.iter().any(|name| *name == k.as_str())) {
            return Err(StoreError::UnregisteredTable(unknown.clone()));
        }

        self.atomic(|tx| {
            let mut total = 0;
            for name in &self.order {
                if let Some(rows) = object.get(*name) {
                    let count = tx.seed(*name, rows.clone())?;
                    info!(event = "TABLE_SEEDED", table = %name, rows = count);
                    total += count;
                }
            }
            Ok(total)
        })
    }

    /// Run `f` as one all-or-nothing unit.
    ///
    /// The write lock is held for the whole unit. If `f` fails, every insert
    /// it made is removed before the error is returned.
    pub fn atomic<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Transaction<'_>) -> StoreResult<T>,
    {
        let mut guard = self.write()?;
        let mut tx = Transaction::new(&mut guard);
        match f(&mut tx) {
            Ok(value) => Ok(value),
            Err(err) => {
                let undone = tx.rollback();
                warn!(event = "TRANSACTION_ROLLED_BACK", undone, error = %err);
                Err(err)
            }
        }
    }
}
