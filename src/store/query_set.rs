//! # Memory Query Set
//!
//! [`QueryTable`] over one in-memory table. Paths are validated before any
//! row is scanned, so an unknown field fails even on an empty table.

use std::cmp::Ordering;
use std::marker::PhantomData;

use crate::query::{Predicate, QueryTable, SortKey};

use super::entity::Entity;
use super::errors::{StoreError, StoreResult};
use super::field::FieldValue;
use super::memory::{check_path, resolve_path, typed, Store, StoreView, Tables};

/// Rows returned when no limit is set
pub const DEFAULT_ROWS_LIMIT: u64 = 1000;

pub struct MemoryQuery<'a, E> {
    store: &'a Store,
    predicates: Vec<Predicate>,
    order: Vec<SortKey>,
    limit: u64,
    offset: u64,
    related: bool,
    _marker: PhantomData<fn() -> E>,
}

impl<'a, E: Entity> MemoryQuery<'a, E> {
    pub(super) fn new(store: &'a Store) -> Self {
        Self {
            store,
            predicates: Vec::new(),
            order: Vec::new(),
            limit: 0,
            offset: 0,
            related: false,
            _marker: PhantomData,
        }
    }

    fn matches(&self, tables: &Tables, record: &E) -> StoreResult<bool> {
        for predicate in &self.predicates {
            let hit = match predicate {
                Predicate::Equals { path, value } => {
                    resolve_path(tables, record, &path.segments())?.equals_text(path.as_str(), value)?
                }
                Predicate::IsNull { path, flag } => {
                    resolve_path(tables, record, &path.segments())?.is_null() == *flag
                }
            };
            if !hit {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn sort_values(&self, tables: &Tables, record: &E) -> StoreResult<Vec<FieldValue>> {
        self.order
            .iter()
            .map(|key| resolve_path(tables, record, &key.field.segments()))
            .collect()
    }
}

fn compare_keys(a: &[FieldValue], b: &[FieldValue], order: &[SortKey]) -> Ordering {
    for ((x, y), key) in a.iter().zip(b).zip(order) {
        let cmp = x.sort_cmp(y);
        let cmp = if key.is_descending() { cmp.reverse() } else { cmp };
        if cmp != Ordering::Equal {
            return cmp;
        }
    }
    Ordering::Equal
}

impl<'a, E: Entity> QueryTable for MemoryQuery<'a, E> {
    type Record = E;

    fn table_name(&self) -> &str {
        E::table()
    }

    fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    fn order_by(mut self, keys: &[SortKey]) -> Self {
        self.order = keys.to_vec();
        self
    }

    fn limit(mut self, limit: u64, offset: u64) -> Self {
        self.limit = limit;
        self.offset = offset;
        self
    }

    fn related_sel(mut self) -> Self {
        self.related = true;
        self
    }

    fn all(self) -> Result<Vec<E>, StoreError> {
        let guard = self.store.read()?;
        let tables: &Tables = &guard;

        for predicate in &self.predicates {
            check_path::<E>(tables, &predicate.path().segments())?;
        }
        for key in &self.order {
            check_path::<E>(tables, &key.field.segments())?;
        }

        let mut rows: Vec<(Vec<FieldValue>, &E)> = Vec::new();
        for record in typed::<E>(tables)?.rows.values() {
            if self.matches(tables, record)? {
                rows.push((self.sort_values(tables, record)?, record));
            }
        }
        // stable: ties keep id order
        rows.sort_by(|(a, _), (b, _)| compare_keys(a, b, &self.order));

        let limit = if self.limit == 0 {
            DEFAULT_ROWS_LIMIT
        } else {
            self.limit
        };
        let view = StoreView::new(tables);
        rows.into_iter()
            .skip(usize::try_from(self.offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|(_, record)| {
                let mut record = record.clone();
                if self.related {
                    record.load_related(&view)?;
                }
                Ok(record)
            })
            .collect()
    }
}
