//! # Record Query Core
//!
//! Parse, filter, sort, paginate and project: the list pipeline shared by
//! every entity collection.
//!
//! ```ignore
//! let spec = QuerySpec::parse(&raw)?;
//! let listing = executor::list(store.query_table::<Hotel>(), &spec)?;
//! ```

pub mod errors;
pub mod executor;
pub mod filter;
pub mod parser;
pub mod projection;
pub mod sort;

pub use errors::{QueryError, QueryResult, SyntaxError};
pub use executor::{execute, list, QueryTable};
pub use filter::{FieldPath, FilterClauses, Predicate};
pub use parser::{Pagination, QuerySpec, RawQuery};
pub use projection::{Listing, Projection, ProjectionSpec};
pub use sort::{Direction, SortKey};
