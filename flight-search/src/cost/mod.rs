//! Cost model for itinerary scoring.
//!
//! Two pure building blocks: an asymmetric penalty around a preferred value
//! (time of day, wait, duration) and a calendar-day range scorer.

mod day_scorer;
mod diff;

pub use day_scorer::{DayScorer, DayScorerError, compute_day_scores, compute_days_cost};
pub use diff::{DiffCostSettings, score_diff};
