//! easybook - hotel booking REST backend
//!
//! The list endpoints of every table share one record query core
//! ([`query`]): a small filter/sort/paginate DSL parsed from query-string
//! parameters, run against the in-memory [`store`], and optionally
//! projected down to a subset of fields.

pub mod cli;
pub mod http_server;
pub mod ledger;
pub mod models;
pub mod observability;
pub mod query;
pub mod rest_api;
pub mod store;
