//! Flight store error types.

use std::path::PathBuf;

use crate::domain::DomainError;

/// Errors from building or querying the flight store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query issued before `sort_flights`
    #[error("flight index must be sorted before selecting flights")]
    Unsorted,

    /// Flight file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Flight file is not valid JSON
    #[error("failed to parse flight records: {0}")]
    Json(#[from] serde_json::Error),

    /// A record has an unusable flight number
    #[error("invalid flight number {0:?}")]
    InvalidFlightNumber(String),

    /// A flight number repeats more often than its id can encode
    #[error("flight number {number} departs more than {limit} times")]
    TooManyDepartures { number: u64, limit: u64 },

    /// A converted flight failed validation
    #[error(transparent)]
    InvalidFlight(#[from] DomainError),
}
