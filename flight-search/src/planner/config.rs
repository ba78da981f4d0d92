//! Search configuration for the itinerary planner.
//!
//! All times are in days. Time-of-day preferences are fractions of a day
//! (`8.0 / 24.0` is 08:00).

use serde::{Deserialize, Serialize};

use crate::cost::{DayScorer, DiffCostSettings};
use crate::domain::FlightTravel;

use super::extend::ExtendScoring;

/// Minimum number of predecessors examined when the preferred wait window
/// is too narrow to hold any.
pub const MIN_CHECK_TRAVELS: usize = 8;

/// Trade-off slopes of the frontier's dominance test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelCoverSettings {
    /// Extra cost per day of later arrival a travel may carry and still be
    /// kept next to an earlier one.
    pub back_cost_factor: f64,
    /// Extra cost per day of earlier arrival a travel may carry and still
    /// be kept next to a later one.
    pub forward_cost_factor: f64,
    /// How far back in time the frontier is compared against a candidate.
    pub time_back: f64,
}

impl TravelCoverSettings {
    /// Create cover settings.
    pub fn new(back_cost_factor: f64, forward_cost_factor: f64, time_back: f64) -> Self {
        Self {
            back_cost_factor,
            forward_cost_factor,
            time_back,
        }
    }

    /// Returns true if `existing` makes `candidate` redundant.
    ///
    /// Ties reject the candidate: an equally good newcomer never displaces
    /// an entry already on the frontier.
    pub fn covers(&self, existing: &FlightTravel, candidate: &FlightTravel) -> bool {
        let time_diff = candidate.end_time - existing.end_time;
        let cost_diff = candidate.cost - existing.cost;
        if time_diff >= 0.0 {
            cost_diff >= time_diff * self.back_cost_factor
        } else {
            cost_diff >= -time_diff * self.forward_cost_factor
        }
    }
}

impl Default for TravelCoverSettings {
    fn default() -> Self {
        Self::new(100.0, 100.0, 7.0)
    }
}

/// Parameters of one sweep over the flights.
#[derive(Debug, Clone, PartialEq)]
pub struct TravelExtendSettings {
    pub day_scorer: DayScorer,
    /// Half-width of the predecessor window around the desired wait.
    pub search_interval: f64,
    /// Preferred local departure time of a flight that starts a leg.
    pub flight_start_day_time: DiffCostSettings,
    /// Wait scoring when extending a travel from the previous sweep.
    pub first_flight_wait_time: DiffCostSettings,
    /// Wait scoring when connecting within this sweep.
    pub flight_wait_time: DiffCostSettings,
    pub flight_duration: DiffCostSettings,
    pub cover_settings: TravelCoverSettings,
    /// Flat cost of every connection.
    pub move_cost: f64,
    pub min_check_travels: usize,
}

impl TravelExtendSettings {
    /// Scoring for extending a travel created by the previous sweep.
    pub fn first_flight_scoring(&self) -> ExtendScoring<'_> {
        ExtendScoring {
            day_scorer: &self.day_scorer,
            move_cost: self.move_cost,
            wait_time: self.first_flight_wait_time,
            flight_start: self.flight_start_day_time,
            flight_duration: self.flight_duration,
        }
    }

    /// Scoring for connecting flights within this sweep.
    ///
    /// A connection is not a departure the traveller plans the day around,
    /// so the time-of-day term is disabled.
    pub fn mid_trip_scoring(&self) -> ExtendScoring<'_> {
        ExtendScoring {
            day_scorer: &self.day_scorer,
            move_cost: self.move_cost,
            wait_time: self.flight_wait_time,
            flight_start: DiffCostSettings::zero(),
            flight_duration: self.flight_duration,
        }
    }
}

/// Complete configuration of a round-trip search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TravelSearchSettings {
    pub day_scorer: DayScorer,
    pub search_interval: f64,
    /// Preferred departure time from home.
    pub start_in_day_time: DiffCostSettings,
    /// Preferred arrival time at the destination.
    pub start_out_day_time: DiffCostSettings,
    /// Preferred departure time for the way back.
    pub end_in_day_time: DiffCostSettings,
    /// Preferred arrival time back home.
    pub end_out_day_time: DiffCostSettings,
    /// Preferred connection time between flights.
    pub wait_time: DiffCostSettings,
    /// Preferred stay at the destination.
    pub trip_duration: DiffCostSettings,
    pub flight_duration: DiffCostSettings,
    pub cover_settings: TravelCoverSettings,
    pub move_cost: f64,
    pub min_check_travels: usize,
}

impl TravelSearchSettings {
    /// Settings for the outbound sweep, which starts chains at the origin.
    pub fn outbound_extend_settings(&self) -> TravelExtendSettings {
        TravelExtendSettings {
            day_scorer: self.day_scorer.clone(),
            search_interval: self.search_interval,
            flight_start_day_time: self.start_in_day_time,
            first_flight_wait_time: DiffCostSettings::zero(),
            flight_wait_time: self.wait_time,
            flight_duration: self.flight_duration,
            cover_settings: self.cover_settings,
            move_cost: self.move_cost,
            min_check_travels: self.min_check_travels,
        }
    }

    /// Settings for the return sweep, which extends outbound chains.
    ///
    /// The wait before its first flight is the stay at the destination.
    pub fn return_extend_settings(&self) -> TravelExtendSettings {
        TravelExtendSettings {
            day_scorer: self.day_scorer.clone(),
            search_interval: self.search_interval,
            flight_start_day_time: self.end_in_day_time,
            first_flight_wait_time: self.trip_duration,
            flight_wait_time: self.wait_time,
            flight_duration: self.flight_duration,
            cover_settings: self.cover_settings,
            move_cost: self.move_cost,
            min_check_travels: self.min_check_travels,
        }
    }

    /// Settings with every preference disabled: cost is fare plus move cost.
    pub fn fare_only() -> Self {
        Self {
            day_scorer: DayScorer::flat(),
            search_interval: 3.0,
            start_in_day_time: DiffCostSettings::zero(),
            start_out_day_time: DiffCostSettings::zero(),
            end_in_day_time: DiffCostSettings::zero(),
            end_out_day_time: DiffCostSettings::zero(),
            wait_time: DiffCostSettings::zero(),
            trip_duration: DiffCostSettings::zero(),
            flight_duration: DiffCostSettings::zero(),
            cover_settings: TravelCoverSettings::default(),
            move_cost: 0.0,
            min_check_travels: MIN_CHECK_TRAVELS,
        }
    }
}

impl Default for TravelSearchSettings {
    fn default() -> Self {
        Self {
            day_scorer: DayScorer::flat(),
            search_interval: 3.0,
            start_in_day_time: DiffCostSettings::new(8.0 / 24.0, 5.0, 5.0),
            start_out_day_time: DiffCostSettings::new(12.0 / 24.0, 5.0, 5.0),
            end_in_day_time: DiffCostSettings::new(18.0 / 24.0, 5.0, 5.0),
            end_out_day_time: DiffCostSettings::new(20.0 / 24.0, 5.0, 5.0),
            wait_time: DiffCostSettings::new(2.0 / 24.0, 30.0, 5.0),
            trip_duration: DiffCostSettings::new(2.0, 10.0, 10.0),
            flight_duration: DiffCostSettings::new(3.0, 0.01, 1.0),
            cover_settings: TravelCoverSettings::default(),
            move_cost: 100.0,
            min_check_travels: MIN_CHECK_TRAVELS,
        }
    }
}
