//! # Response Formatting
//!
//! Bodies shared by the CRUD endpoints. Lists and single records are
//! returned bare; only deletes need a wrapper.

use serde::Serialize;

/// Delete response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub id: i64,
}

impl DeleteResponse {
    pub fn success(id: i64) -> Self {
        Self { deleted: true, id }
    }
}
