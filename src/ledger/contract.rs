//! # Contract Documents
//!
//! JSON shapes returned by the booking contract's `ReadHotel` function.
//! Ids are strings on the ledger.

use serde::{Deserialize, Serialize};

/// Contract function returning one hotel document
pub const READ_HOTEL: &str = "ReadHotel";

/// Body of an evaluate call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    pub function: String,
    pub args: Vec<String>,
}

impl EvaluateRequest {
    pub fn read_hotel(hotel_id: i64) -> Self {
        Self {
            function: READ_HOTEL.to_string(),
            args: vec![hotel_id.to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractHotel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub service_levels: Vec<ContractServiceLevel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractServiceLevel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub is_used: bool,
    #[serde(default)]
    pub satisfaction_rate: f32,
    #[serde(default)]
    pub rule_abiding_rate: f32,
    #[serde(default)]
    pub hotel_id: String,
    #[serde(default)]
    pub agreements: Vec<ContractAgreement>,
}

/// Penalty agreement counters as tracked on the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAgreement {
    pub id: String,
    #[serde(default)]
    pub is_applied: bool,
    #[serde(default)]
    pub total_feedbacks: u32,
    #[serde(default)]
    pub total_unfulfilled_commitments: u32,
    #[serde(default)]
    pub is_applied_penalty: bool,
    #[serde(default)]
    pub total_compensations: u32,
    #[serde(default)]
    pub total_no_compensations: u32,
    #[serde(default)]
    pub service_level_id: String,
    #[serde(default)]
    pub hotel_id: String,
}
