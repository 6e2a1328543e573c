//! Ledger lookup errors

use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// No ledger is configured
    #[error("ledger lookups are disabled")]
    Disabled,

    /// The gateway could not be reached
    #[error("ledger gateway unreachable: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status
    #[error("ledger gateway returned {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The contract answered with something other than a hotel document
    #[error("cannot decode contract response: {0}")]
    Decode(String),

    /// The contract holds no record for the hotel
    #[error("hotel {0} not found on ledger")]
    UnknownHotel(i64),
}
