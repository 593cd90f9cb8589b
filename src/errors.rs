use std::result::Result as StdResult;

use thiserror::Error;

use crate::ledger::Period;

/// Error type that captures rent ledger failures.
#[derive(Debug, Error)]
pub enum RentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Rent for {0} already exists")]
    DuplicatePeriod(Period),
    #[error("Rent for {period} would leave a gap next to {first}..={last}")]
    NonContiguous {
        period: Period,
        first: Period,
        last: Period,
    },
    #[error("Broken rent chain at {period}: {reason}")]
    BrokenChain { period: Period, reason: String },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, RentError>;
