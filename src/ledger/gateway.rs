//! # Contract Gateway Client
//!
//! Evaluates read-only contract functions over the gateway's REST
//! interface. Evaluate calls are queries: nothing is submitted to the
//! ledger.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::debug;

use super::config::LedgerConfig;
use super::contract::{ContractHotel, EvaluateRequest};
use super::errors::{LedgerError, LedgerResult};
use super::RatingLookup;

#[derive(Clone)]
pub struct ContractGateway {
    client: reqwest::Client,
    evaluate_url: String,
}

impl ContractGateway {
    pub fn new(config: &LedgerConfig) -> LedgerResult<Self> {
        let evaluate_url = config.evaluate_url().ok_or(LedgerError::Disabled)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            evaluate_url,
        })
    }

    /// Run `ReadHotel` for one hotel
    pub async fn read_hotel(&self, hotel_id: i64) -> LedgerResult<ContractHotel> {
        let response = self
            .client
            .post(&self.evaluate_url)
            .json(&EvaluateRequest::read_hotel(hotel_id))
            .send()
            .await
            .map_err(|e| LedgerError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(LedgerError::UnknownHotel(hotel_id));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LedgerError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let hotel = response
            .json::<ContractHotel>()
            .await
            .map_err(|e| LedgerError::Decode(e.to_string()))?;
        debug!(event = "CONTRACT_EVALUATED", hotel_id, rating = hotel.rating);
        Ok(hotel)
    }
}

#[async_trait]
impl RatingLookup for ContractGateway {
    async fn lookup_rating(&self, hotel_id: i64) -> LedgerResult<f32> {
        Ok(self.read_hotel(hotel_id).await?.rating)
    }
}
