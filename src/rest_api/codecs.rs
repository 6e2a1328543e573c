//! # Request/Response Codecs
//!
//! Bodies of the guest registration and booking endpoints. Responses carry
//! a numeric result code alongside the HTTP status.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Guest, Reservation};

/// Result codes reported in `CommonResponse::code`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    Success = 100000,
    Fail = 100001,
    InvalidParams = 100002,
    FailedCreate = 100003,
    FailedUpdate = 100004,
    FailedDelete = 100005,
    RecordNotExist = 100006,
    SystemError = 100007,
}

impl ResponseCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    pub fn message(self) -> &'static str {
        match self {
            ResponseCode::Success => "success",
            ResponseCode::Fail => "fail",
            ResponseCode::InvalidParams => "invalid parameters",
            ResponseCode::FailedCreate => "create record failed",
            ResponseCode::FailedUpdate => "update record failed",
            ResponseCode::FailedDelete => "delete record failed",
            ResponseCode::RecordNotExist => "record doesn't exist",
            ResponseCode::SystemError => "system error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonResponse {
    pub code: u32,
    pub message: String,
}

impl CommonResponse {
    pub fn new(code: ResponseCode) -> Self {
        Self {
            code: code.as_u32(),
            message: code.message().to_string(),
        }
    }

    pub fn set_code(&mut self, code: ResponseCode) {
        *self = Self::new(code);
    }
}

impl Default for CommonResponse {
    fn default() -> Self {
        Self::new(ResponseCode::Fail)
    }
}

/// Guest registration body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPostRequest {
    #[serde(default)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    pub role: i8,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirmed_password: String,
}

impl GuestPostRequest {
    /// Name of the first required field left empty
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.first_name.is_empty() {
            Some("firstName")
        } else if self.last_name.is_empty() {
            Some("lastName")
        } else if self.email.is_empty() {
            Some("email")
        } else if self.role == 0 {
            Some("role")
        } else {
            None
        }
    }
}

/// Password fields a guest update may carry next to the record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestPasswordChange {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirmed_password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GuestPostResponse {
    #[serde(flatten)]
    pub common: CommonResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest: Option<Guest>,
}

/// Reserve-rooms body
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingReserveRoomsRequest {
    pub guest_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub discount_percent: f32,
    pub total_price: f32,
    pub rooms: Vec<i64>,
}

impl BookingReserveRoomsRequest {
    /// Reason the request cannot be booked as given
    pub fn invalid_reason(&self) -> Option<&'static str> {
        if self.guest_id <= 0 {
            Some("guestId is required")
        } else if self.rooms.is_empty() {
            Some("at least one room is required")
        } else if self.end_date <= self.start_date {
            Some("endDate must be after startDate")
        } else if !(0.0..=100.0).contains(&self.discount_percent) {
            Some("discountPercent must be between 0 and 100")
        } else if self.total_price < 0.0 {
            Some("totalPrice must not be negative")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BookingReserveRoomsResponse {
    #[serde(flatten)]
    pub common: CommonResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reservation: Option<Reservation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_codes() {
        assert_eq!(ResponseCode::Success.as_u32(), 100000);
        assert_eq!(ResponseCode::SystemError.as_u32(), 100007);

        let mut res = CommonResponse::default();
        assert_eq!(res.code, 100001);
        res.set_code(ResponseCode::RecordNotExist);
        assert_eq!(res.message, "record doesn't exist");
    }

    #[test]
    fn test_guest_request_decoding() {
        let req: GuestPostRequest = serde_json::from_value(json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "role": 1,
            "password": "s3cret",
            "confirmedPassword": "s3cret"
        }))
        .unwrap();
        assert_eq!(req.confirmed_password, "s3cret");
        assert_eq!(req.missing_field(), None);

        let req = GuestPostRequest {
            first_name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(req.missing_field(), Some("lastName"));
    }

    #[test]
    fn test_response_flattens_common() {
        let res = GuestPostResponse {
            common: CommonResponse::new(ResponseCode::InvalidParams),
            guest: None,
        };
        assert_eq!(
            serde_json::to_value(res).unwrap(),
            json!({"code": 100002, "message": "invalid parameters"})
        );
    }

    #[test]
    fn test_reserve_request_validation() {
        let mut req: BookingReserveRoomsRequest = serde_json::from_value(json!({
            "guestId": 1,
            "startDate": "2024-06-01",
            "endDate": "2024-06-03",
            "totalPrice": 240.0,
            "rooms": [1, 2]
        }))
        .unwrap();
        assert_eq!(req.invalid_reason(), None);

        req.end_date = req.start_date;
        assert_eq!(req.invalid_reason(), Some("endDate must be after startDate"));
    }
}
