//! Scheduled flights.

use serde::{Deserialize, Serialize};

use super::{CityId, DomainError, FlightId};

/// A scheduled flight between two cities.
///
/// Absolute times and durations are measured in days from an arbitrary
/// base instant. `day_start_time` and `day_end_time` are the local
/// time-of-day of departure and arrival as a fraction of a day, used only
/// for preference scoring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    pub src: CityId,
    pub dst: CityId,
    pub start_time: f64,
    pub duration: f64,
    pub cost: f64,
    pub day_start_time: f64,
    pub day_end_time: f64,
}

impl Flight {
    /// Create a flight with zero time-of-day components.
    pub fn new(
        id: FlightId,
        src: CityId,
        dst: CityId,
        start_time: f64,
        duration: f64,
        cost: f64,
    ) -> Self {
        Self {
            id,
            src,
            dst,
            start_time,
            duration,
            cost,
            day_start_time: 0.0,
            day_end_time: 0.0,
        }
    }

    /// Set the local time-of-day of departure and arrival.
    pub fn with_day_times(mut self, day_start_time: f64, day_end_time: f64) -> Self {
        self.day_start_time = day_start_time;
        self.day_end_time = day_end_time;
        self
    }

    /// Absolute arrival time.
    pub fn arrival_time(&self) -> f64 {
        self.start_time + self.duration
    }

    /// Check that every numeric field is usable by the search.
    pub fn validate(&self) -> Result<(), DomainError> {
        let fields = [
            ("start_time", self.start_time),
            ("duration", self.duration),
            ("cost", self.cost),
            ("day_start_time", self.day_start_time),
            ("day_end_time", self.day_end_time),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(DomainError::NonFinite {
                    flight: self.id,
                    field,
                });
            }
        }
        if self.duration < 0.0 {
            return Err(DomainError::NegativeDuration {
                flight: self.id,
                duration: self.duration,
            });
        }
        Ok(())
    }
}
