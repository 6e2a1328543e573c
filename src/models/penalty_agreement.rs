//! # Penalty Agreement
//!
//! Off-ledger copy of the compensation terms attached to a service level.
//! Counters mirror the contract's agreement document.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Hotel, ServiceLevel};
use crate::store::{Entity, Related, Schema, StoreResult, StoreView};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyAgreement {
    #[serde(default)]
    pub id: i64,
    pub service_level: Related<ServiceLevel>,
    pub hotel: Related<Hotel>,
    #[serde(default)]
    pub is_applied: i8,
    #[serde(default)]
    pub total_feedbacks: u32,
    #[serde(default)]
    pub total_unfulfilled_commitments: u32,
    #[serde(default)]
    pub is_applied_penalty: i8,
    #[serde(default)]
    pub total_compensations: u32,
    #[serde(default)]
    pub total_no_compensations: u32,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Entity for PenaltyAgreement {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: OnceLock<Schema<PenaltyAgreement>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<PenaltyAgreement>::builder("penalty_agreement")
                .field("id", |p| p.id.into())
                .relation("service_level", "service_level", |p| p.service_level.id().into())
                .relation("hotel", "hotel", |p| p.hotel.id().into())
                .field("is_applied", |p| p.is_applied.into())
                .field("total_feedbacks", |p| p.total_feedbacks.into())
                .field("total_unfulfilled_commitments", |p| {
                    p.total_unfulfilled_commitments.into()
                })
                .field("is_applied_penalty", |p| p.is_applied_penalty.into())
                .field("total_compensations", |p| p.total_compensations.into())
                .field("total_no_compensations", |p| p.total_no_compensations.into())
                .field("created_at", |p| p.created_at.into())
                .field("updated_at", |p| p.updated_at.into())
                .build()
        })
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn carry_over(&mut self, stored: &Self) {
        self.created_at = stored.created_at;
        self.updated_at = Utc::now();
    }

    fn load_related(&mut self, view: &StoreView<'_>) -> StoreResult<()> {
        self.service_level.load(view)?;
        self.hotel.load(view)
    }
}
