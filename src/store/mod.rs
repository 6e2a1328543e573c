//! # Record Store
//!
//! In-memory tables behind the query handle. Entities describe their fields
//! through a [`Schema`]; the store uses it to filter, order and follow
//! relations by name.

pub mod entity;
pub mod errors;
pub mod field;
pub mod memory;
pub mod query_set;
pub mod schema;
pub mod transaction;

pub use entity::{Entity, Related};
pub use errors::{StoreError, StoreResult};
pub use field::FieldValue;
pub use memory::{ModelRegistry, Store, StoreView};
pub use query_set::{MemoryQuery, DEFAULT_ROWS_LIMIT};
pub use schema::{Schema, SchemaBuilder};
pub use transaction::Transaction;
