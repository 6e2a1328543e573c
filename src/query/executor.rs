//! # Query Executor
//!
//! Applies a [`QuerySpec`] to a table handle: filters, ordering, window,
//! optional related selection, then projection.

use tracing::debug;

use crate::store::{Entity, StoreError};

use super::errors::QueryResult;
use super::filter::Predicate;
use super::parser::QuerySpec;
use super::projection::{self, Listing};
use super::sort::SortKey;

/// Query handle over one table, in the manner of an ORM query set.
///
/// Each call narrows the query; [`QueryTable::all`] runs it.
pub trait QueryTable: Sized {
    type Record;

    /// Table the handle reads from
    fn table_name(&self) -> &str;

    /// Add an AND-ed predicate
    fn filter(self, predicate: Predicate) -> Self;

    /// Replace the ordering; earlier keys take priority
    fn order_by(self, keys: &[SortKey]) -> Self;

    /// Window over the ordered rows
    fn limit(self, limit: u64, offset: u64) -> Self;

    /// Eager-load related records
    fn related_sel(self) -> Self;

    /// Run the query
    fn all(self) -> Result<Vec<Self::Record>, StoreError>;
}

/// Run the query and return full records in order
pub fn execute<Q: QueryTable>(table: Q, spec: &QuerySpec) -> QueryResult<Vec<Q::Record>> {
    let name = table.table_name().to_string();

    let mut qs = table;
    for predicate in &spec.filters {
        qs = qs.filter(predicate.clone());
    }
    qs = qs.order_by(&spec.sort);
    if spec.related {
        qs = qs.related_sel();
    }
    let rows = qs
        .limit(spec.pagination.limit, spec.pagination.offset)
        .all()?;

    debug!(
        event = "QUERY_EXECUTED",
        table = %name,
        filters = spec.filters.len(),
        sort_keys = spec.sort.len(),
        limit = spec.pagination.limit,
        offset = spec.pagination.offset,
        rows = rows.len(),
    );
    Ok(rows)
}

/// Run the query, then project down to the requested fields
pub fn list<Q>(table: Q, spec: &QuerySpec) -> QueryResult<Listing<Q::Record>>
where
    Q: QueryTable,
    Q::Record: Entity,
{
    let rows = execute(table, spec)?;
    Ok(projection::project(rows, &spec.projection))
}
