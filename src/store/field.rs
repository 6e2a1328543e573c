//! # Field Values
//!
//! Runtime values read from records through the schema accessors, plus
//! the comparison rules the store applies when filtering and sorting.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

use super::errors::{StoreError, StoreResult};

/// A single field value read from a record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The record type has no field with the requested name
    Absent,
    Null,
    Bool(bool),
    Int(i64),
    /// Single-precision column; filters compare at this precision
    Float32(f32),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null | FieldValue::Absent)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Absent => "absent",
            FieldValue::Null => "null",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "integer",
            FieldValue::Float32(_) | FieldValue::Float(_) => "float",
            FieldValue::Text(_) => "text",
            FieldValue::Date(_) => "date (YYYY-MM-DD)",
            FieldValue::Timestamp(_) => "timestamp (RFC 3339)",
        }
    }

    /// Compare against a raw comparison string from a filter clause.
    ///
    /// The string is read as the field's own type. `Null` equals nothing.
    pub fn equals_text(&self, field: &str, text: &str) -> StoreResult<bool> {
        let mismatch = || StoreError::TypeMismatch {
            field: field.to_string(),
            value: text.to_string(),
            expected: self.type_name(),
        };

        Ok(match self {
            FieldValue::Absent | FieldValue::Null => false,
            FieldValue::Bool(b) => match text {
                "true" | "1" => *b,
                "false" | "0" => !*b,
                _ => return Err(mismatch()),
            },
            FieldValue::Int(i) => *i == text.trim().parse::<i64>().map_err(|_| mismatch())?,
            FieldValue::Float32(f) => *f == text.trim().parse::<f32>().map_err(|_| mismatch())?,
            FieldValue::Float(f) => *f == text.trim().parse::<f64>().map_err(|_| mismatch())?,
            FieldValue::Text(s) => s == text,
            FieldValue::Date(d) => {
                *d == NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| mismatch())?
            }
            FieldValue::Timestamp(ts) => *ts == parse_timestamp(text).ok_or_else(mismatch)?,
        })
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Absent => 0,
            FieldValue::Null => 1,
            FieldValue::Bool(_) => 2,
            FieldValue::Int(_) | FieldValue::Float32(_) | FieldValue::Float(_) => 3,
            FieldValue::Text(_) => 4,
            FieldValue::Date(_) => 5,
            FieldValue::Timestamp(_) => 6,
        }
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float32(f) => Some((*f).into()),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Total ordering used for `ORDER BY`. Nulls sort first.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => self.rank().cmp(&other.rank()),
            },
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<i32> for FieldValue {
    fn from(v: i32) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<i8> for FieldValue {
    fn from(v: i8) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<u8> for FieldValue {
    fn from(v: u8) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<u16> for FieldValue {
    fn from(v: u16) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<u32> for FieldValue {
    fn from(v: u32) -> Self {
        FieldValue::Int(v.into())
    }
}

impl From<f32> for FieldValue {
    fn from(v: f32) -> Self {
        FieldValue::Float32(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::Text(v.clone())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(v)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(FieldValue::Null, Into::into)
    }
}
