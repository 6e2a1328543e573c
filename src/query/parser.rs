//! # Query Parameter Parser
//!
//! Parses the `query`, `fields`, `sortby`, `order`, `limit` and `offset`
//! list parameters into a validated [`QuerySpec`].

use serde::Deserialize;

use super::errors::{QueryResult, SyntaxError};
use super::filter::{self, FilterClauses, Predicate};
use super::projection::ProjectionSpec;
use super::sort::{self, SortKey};

/// Default limit if not specified or unparsable
pub const DEFAULT_LIMIT: u64 = 10;

/// Default offset if not specified or unparsable
pub const DEFAULT_OFFSET: u64 = 0;

/// Raw list parameters as they arrive on the query string
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuery {
    /// Filter. e.g. `col1:v1,col2:v2`
    pub query: Option<String>,
    /// Fields returned. e.g. `col1,col2`
    pub fields: Option<String>,
    /// Sorted-by fields. e.g. `col1,col2`
    pub sortby: Option<String>,
    /// Order per sortby field, or one order for all. e.g. `desc,asc`
    pub order: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

/// Result window over the ordered rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

/// Validated list query
#[derive(Debug, Clone, Default)]
pub struct QuerySpec {
    pub filters: Vec<Predicate>,
    pub sort: Vec<SortKey>,
    pub projection: ProjectionSpec,
    pub pagination: Pagination,
    /// Eager-load related records
    pub related: bool,
}

impl QuerySpec {
    /// Parse raw list parameters
    pub fn parse(raw: &RawQuery) -> QueryResult<Self> {
        let clauses = parse_query(raw.query.as_deref())?;
        let sortby = split_list(raw.sortby.as_deref());
        let order = split_list(raw.order.as_deref());

        Ok(Self {
            filters: filter::predicates(&clauses),
            sort: sort::resolve(&sortby, &order)?,
            projection: ProjectionSpec::new(split_list(raw.fields.as_deref())),
            pagination: Pagination {
                limit: parse_or(raw.limit.as_deref(), DEFAULT_LIMIT),
                offset: parse_or(raw.offset.as_deref(), DEFAULT_OFFSET),
            },
            related: false,
        })
    }

    /// Ask the store to eager-load relations
    pub fn with_related(mut self) -> Self {
        self.related = true;
        self
    }
}

/// Split `k:v,k:v` into the filter map. Each clause splits on its first
/// `:` only, so values may contain colons.
pub fn parse_query(value: Option<&str>) -> Result<FilterClauses, SyntaxError> {
    let mut clauses = FilterClauses::new();
    for cond in split_list(value) {
        let (key, value) = cond
            .split_once(':')
            .ok_or_else(|| SyntaxError::InvalidPair(cond.clone()))?;
        clauses.insert(key.to_string(), value.to_string());
    }
    Ok(clauses)
}

/// Comma-split a list parameter; missing or empty input is an empty list
pub fn split_list(value: Option<&str>) -> Vec<String> {
    match value {
        None | Some("") => Vec::new(),
        Some(v) => v.split(',').map(str::to_string).collect(),
    }
}

/// Unparsable or negative pagination values keep the default
fn parse_or(value: Option<&str>, default: u64) -> u64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::filter::FieldPath;

    fn raw() -> RawQuery {
        RawQuery::default()
    }

    #[test]
    fn test_empty_query_uses_defaults() {
        let spec = QuerySpec::parse(&raw()).unwrap();
        assert!(spec.filters.is_empty());
        assert!(spec.sort.is_empty());
        assert!(spec.projection.is_empty());
        assert_eq!(spec.pagination, Pagination { limit: 10, offset: 0 });
        assert!(!spec.related);
    }

    #[test]
    fn test_parse_query_clauses() {
        let clauses = parse_query(Some("status:1,city.name:paris")).unwrap();
        assert_eq!(clauses.get("status").map(String::as_str), Some("1"));
        assert_eq!(clauses.get("city.name").map(String::as_str), Some("paris"));
    }

    #[test]
    fn test_invalid_pair() {
        let err = parse_query(Some("status:1,broken")).unwrap_err();
        assert_eq!(err, SyntaxError::InvalidPair("broken".to_string()));
    }

    #[test]
    fn test_value_with_colons() {
        let clauses = parse_query(Some("check_in:2024-01-01 10:00:00")).unwrap();
        assert_eq!(
            clauses.get("check_in").map(String::as_str),
            Some("2024-01-01 10:00:00")
        );
    }

    #[test]
    fn test_unparsable_pagination_falls_back() {
        let spec = QuerySpec::parse(&RawQuery {
            limit: Some("abc".to_string()),
            offset: Some("-3".to_string()),
            ..raw()
        })
        .unwrap();
        assert_eq!(spec.pagination, Pagination { limit: 10, offset: 0 });

        let spec = QuerySpec::parse(&RawQuery {
            limit: Some("25".to_string()),
            offset: Some("50".to_string()),
            ..raw()
        })
        .unwrap();
        assert_eq!(spec.pagination, Pagination { limit: 25, offset: 50 });
    }

    #[test]
    fn test_full_query() {
        let spec = QuerySpec::parse(&RawQuery {
            query: Some("city.id:5".to_string()),
            fields: Some("name".to_string()),
            sortby: Some("name,rating".to_string()),
            order: Some("desc".to_string()),
            limit: Some("2".to_string()),
            offset: Some("0".to_string()),
        })
        .unwrap();

        assert_eq!(
            spec.filters,
            vec![Predicate::Equals {
                path: FieldPath::from_dotted("city__id"),
                value: "5".to_string(),
            }]
        );
        let terms: Vec<String> = spec.sort.iter().map(ToString::to_string).collect();
        assert_eq!(terms, vec!["-name", "-rating"]);
        assert_eq!(spec.projection.fields(), ["name".to_string()]);
        assert_eq!(spec.pagination, Pagination { limit: 2, offset: 0 });
    }

    #[test]
    fn test_order_size_mismatch() {
        let err = QuerySpec::parse(&RawQuery {
            sortby: Some("name,rating".to_string()),
            order: Some("desc,asc,asc".to_string()),
            ..raw()
        })
        .unwrap_err();
        assert_eq!(
            err,
            SyntaxError::SizeMismatch { sortby: 2, order: 3 }.into()
        );
    }

    #[test]
    fn test_unused_order() {
        let err = QuerySpec::parse(&RawQuery {
            order: Some("asc".to_string()),
            ..raw()
        })
        .unwrap_err();
        assert_eq!(err, SyntaxError::UnusedOrder.into());
    }
}
