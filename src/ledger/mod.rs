//! # Hotel Rating Ledger
//!
//! The live hotel rating is kept by a contract on a distributed ledger.
//! Read paths overlay it on stored hotels through the [`RatingLookup`]
//! capability. Lookups are best-effort: a failure keeps the stored rating.

pub mod config;
pub mod contract;
pub mod errors;
pub mod gateway;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::models::Hotel;

pub use config::LedgerConfig;
pub use contract::{ContractAgreement, ContractHotel, ContractServiceLevel};
pub use errors::{LedgerError, LedgerResult};
pub use gateway::ContractGateway;

/// Source of authoritative hotel ratings
#[async_trait]
pub trait RatingLookup: Send + Sync {
    async fn lookup_rating(&self, hotel_id: i64) -> LedgerResult<f32>;
}

/// Lookup used when no ledger is configured; every call fails
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLedger;

#[async_trait]
impl RatingLookup for DisabledLedger {
    async fn lookup_rating(&self, _hotel_id: i64) -> LedgerResult<f32> {
        Err(LedgerError::Disabled)
    }
}

/// Fixed ratings by hotel id
#[derive(Debug, Default, Clone)]
pub struct StaticRatings {
    ratings: HashMap<i64, f32>,
}

impl StaticRatings {
    pub fn new(ratings: impl IntoIterator<Item = (i64, f32)>) -> Self {
        Self {
            ratings: ratings.into_iter().collect(),
        }
    }
}

#[async_trait]
impl RatingLookup for StaticRatings {
    async fn lookup_rating(&self, hotel_id: i64) -> LedgerResult<f32> {
        self.ratings
            .get(&hotel_id)
            .copied()
            .ok_or(LedgerError::UnknownHotel(hotel_id))
    }
}

/// Build the lookup the configuration asks for
pub fn from_config(config: &LedgerConfig) -> LedgerResult<Arc<dyn RatingLookup>> {
    if !config.enabled {
        return Ok(Arc::new(DisabledLedger));
    }
    Ok(Arc::new(ContractGateway::new(config)?))
}

/// Replace each hotel's rating with the ledger value where available.
/// Returns how many ratings were overlaid.
pub async fn overlay_ratings(lookup: &dyn RatingLookup, hotels: &mut [Hotel]) -> usize {
    let mut overlaid = 0;
    for hotel in hotels.iter_mut() {
        match lookup.lookup_rating(hotel.id).await {
            Ok(rating) => {
                hotel.rating = rating;
                overlaid += 1;
            }
            Err(LedgerError::Disabled) => {}
            Err(err) => {
                warn!(
                    event = "RATING_LOOKUP_FAILED",
                    hotel_id = hotel.id,
                    error = %err,
                );
            }
        }
    }
    overlaid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Related;

    fn hotel(id: i64, rating: f32) -> Hotel {
        let mut hotel = Hotel::new(id, "h", Related::new(1));
        hotel.rating = rating;
        hotel
    }

    #[tokio::test]
    async fn test_overlay_keeps_stored_rating_on_failure() {
        let lookup = StaticRatings::new([(1, 4.5)]);
        let mut hotels = vec![hotel(1, 1.0), hotel(2, 2.0)];

        let overlaid = overlay_ratings(&lookup, &mut hotels).await;
        assert_eq!(overlaid, 1);
        assert_eq!(hotels[0].rating, 4.5);
        assert_eq!(hotels[1].rating, 2.0);
    }

    #[tokio::test]
    async fn test_disabled_ledger_changes_nothing() {
        let mut hotels = vec![hotel(1, 3.0)];
        assert_eq!(overlay_ratings(&DisabledLedger, &mut hotels).await, 0);
        assert_eq!(hotels[0].rating, 3.0);
    }

    #[test]
    fn test_from_config_disabled() {
        assert!(from_config(&LedgerConfig::default()).is_ok());

        let enabled_without_endpoint = LedgerConfig {
            enabled: true,
            ..Default::default()
        };
        assert_eq!(
            from_config(&enabled_without_endpoint).err(),
            Some(LedgerError::Disabled)
        );
    }
}
