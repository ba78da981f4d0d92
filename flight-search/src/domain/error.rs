//! Domain error types.
//!
//! These errors represent validation failures of input data. They are
//! distinct from search precondition failures, which live in the planner.

use super::FlightId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A time, duration or cost is NaN or infinite
    #[error("flight {flight}: {field} is not finite")]
    NonFinite { flight: FlightId, field: &'static str },

    /// Flight lands before it departs
    #[error("flight {flight}: negative duration {duration}")]
    NegativeDuration { flight: FlightId, duration: f64 },
}
