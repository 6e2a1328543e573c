//! Shared handler state

use std::sync::Arc;

use crate::ledger::{DisabledLedger, RatingLookup};
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub ledger: Arc<dyn RatingLookup>,
}

impl AppState {
    pub fn new(store: Arc<Store>, ledger: Arc<dyn RatingLookup>) -> Self {
        Self { store, ledger }
    }

    /// State without ledger lookups
    pub fn offline(store: Arc<Store>) -> Self {
        Self::new(store, Arc::new(DisabledLedger))
    }
}
