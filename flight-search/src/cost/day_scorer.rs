//! Calendar-day weighting.
//!
//! Each calendar day of the planning horizon carries a cost (a day off work
//! is cheaper than a working day, say). The scorer stores the running sum
//! of those costs so the cost of any time range is one subtraction.

use serde::{Deserialize, Serialize};

/// Error returned when building a scorer from a malformed day table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid day costs: {reason}")]
pub struct DayScorerError {
    reason: &'static str,
}

impl DayScorerError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Prefix-summed per-day costs.
///
/// Times before `start_time` charge nothing. Times past the end of the
/// table charge up to the last day: a trip that runs beyond the known
/// horizon is charged the whole table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DayScorerConfig", into = "DayScorerConfig")]
pub struct DayScorer {
    start_time: f64,
    day_factor: f64,
    day_costs: Vec<f64>,
    day_costs_agg: Vec<f64>,
}

/// Serialized form of a [`DayScorer`]: the raw per-day costs.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DayScorerConfig {
    day_costs: Vec<f64>,
    start_time: f64,
    #[serde(default = "default_day_factor")]
    day_factor: f64,
}

fn default_day_factor() -> f64 {
    1.0
}

impl DayScorer {
    /// Build a scorer from per-day costs starting at `start_time`.
    ///
    /// `day_factor` converts time units to days (1.0 when times are already
    /// in days).
    pub fn new(
        day_costs: Vec<f64>,
        start_time: f64,
        day_factor: f64,
    ) -> Result<Self, DayScorerError> {
        if day_costs.is_empty() {
            return Err(DayScorerError::new("at least one day is required"));
        }
        if day_costs.iter().any(|c| !c.is_finite()) {
            return Err(DayScorerError::new("day costs must be finite"));
        }
        if !start_time.is_finite() {
            return Err(DayScorerError::new("start time must be finite"));
        }
        if !day_factor.is_finite() || day_factor <= 0.0 {
            return Err(DayScorerError::new("day factor must be finite and positive"));
        }

        let day_costs_agg = day_costs
            .iter()
            .scan(0.0, |sum, cost| {
                *sum += cost;
                Some(*sum)
            })
            .collect();

        Ok(Self {
            start_time,
            day_factor,
            day_costs,
            day_costs_agg,
        })
    }

    /// A single zero-cost day: charges nothing for any range.
    pub fn flat() -> Self {
        Self {
            start_time: 0.0,
            day_factor: 1.0,
            day_costs: vec![0.0],
            day_costs_agg: vec![0.0],
        }
    }

    /// Start of day 0.
    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    /// Days per time unit.
    pub fn day_factor(&self) -> f64 {
        self.day_factor
    }

    /// Number of days in the table.
    pub fn len(&self) -> usize {
        self.day_costs_agg.len()
    }

    /// Always false: construction requires at least one day.
    pub fn is_empty(&self) -> bool {
        self.day_costs_agg.is_empty()
    }

    fn day_index(&self, time: f64) -> i64 {
        ((time - self.start_time) * self.day_factor).floor() as i64
    }

    fn cumulative(&self, index: i64) -> f64 {
        if index < 0 {
            return 0.0;
        }
        let last = self.day_costs_agg.len() - 1;
        let index = (index as usize).min(last);
        self.day_costs_agg[index]
    }

    /// Cost of the calendar days touched between `start_time` and `end_time`.
    ///
    /// The first leg of a chain (`continuous == false`) also pays for the
    /// day it starts on; later legs start on a day their predecessor has
    /// already paid for.
    pub fn days_cost(&self, start_time: f64, end_time: f64, continuous: bool) -> f64 {
        let mut start_index = self.day_index(start_time);
        if !continuous {
            start_index -= 1;
        }
        let end_index = self.day_index(end_time);
        self.cumulative(end_index) - self.cumulative(start_index)
    }
}

impl TryFrom<DayScorerConfig> for DayScorer {
    type Error = DayScorerError;

    fn try_from(value: DayScorerConfig) -> Result<Self, Self::Error> {
        DayScorer::new(value.day_costs, value.start_time, value.day_factor)
    }
}

impl From<DayScorer> for DayScorerConfig {
    fn from(value: DayScorer) -> Self {
        Self {
            day_costs: value.day_costs,
            start_time: value.start_time,
            day_factor: value.day_factor,
        }
    }
}

impl Default for DayScorer {
    fn default() -> Self {
        Self::flat()
    }
}

/// Build a [`DayScorer`] by prefix-summing `day_costs`.
pub fn compute_day_scores(
    day_costs: &[f64],
    start_time: f64,
    day_factor: f64,
) -> Result<DayScorer, DayScorerError> {
    DayScorer::new(day_costs.to_vec(), start_time, day_factor)
}

/// Cost accrued between two absolute times; see [`DayScorer::days_cost`].
pub fn compute_days_cost(
    scorer: &DayScorer,
    start_time: f64,
    end_time: f64,
    continuous: bool,
) -> f64 {
    scorer.days_cost(start_time, end_time, continuous)
}
