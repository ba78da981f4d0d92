//! Per-city frontier of non-dominated travels.
//!
//! Travels are kept sorted by `end_time`. A candidate is compared only
//! against entries that landed within `time_back` of it, and only the tail
//! is evicted, so maintenance stays close to linear in the number of
//! candidates as long as they arrive in `end_time` order.

use tracing::trace;

use crate::domain::FlightTravel;

use super::config::TravelCoverSettings;
use super::search::SearchError;

/// Travels ending at one city, sorted by `end_time`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TravelFrontier {
    travels: Vec<FlightTravel>,
}

impl TravelFrontier {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a frontier from travels in any order.
    ///
    /// No dominance pruning is applied; the travels are only sorted.
    pub fn from_travels(mut travels: Vec<FlightTravel>) -> Self {
        travels.sort_by(|a, b| a.end_time.total_cmp(&b.end_time));
        Self { travels }
    }

    pub fn as_slice(&self) -> &[FlightTravel] {
        &self.travels
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlightTravel> {
        self.travels.iter()
    }

    pub fn len(&self) -> usize {
        self.travels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.travels.is_empty()
    }

    /// The latest-ending travel.
    pub fn last(&self) -> Option<&FlightTravel> {
        self.travels.last()
    }

    /// Offer `candidate` to the frontier.
    ///
    /// Returns `Ok(false)` if an entry within `time_back` covers the
    /// candidate. Otherwise evicts the tail entries the candidate covers,
    /// appends it and returns `Ok(true)`.
    ///
    /// Candidates must not end before the current tail, and their time and
    /// cost must be finite.
    pub fn push(
        &mut self,
        candidate: FlightTravel,
        cover: &TravelCoverSettings,
    ) -> Result<bool, SearchError> {
        if !candidate.end_time.is_finite() || !candidate.cost.is_finite() {
            return Err(SearchError::NonFiniteTravel {
                travel: candidate.id,
            });
        }
        if let Some(tail) = self.travels.last() {
            if candidate.end_time < tail.end_time {
                return Err(SearchError::OutOfOrderTravel {
                    end_time: candidate.end_time,
                    tail_end_time: tail.end_time,
                });
            }
        }

        let horizon = candidate.end_time - cover.time_back;
        let covered = self
            .travels
            .iter()
            .rev()
            .take_while(|t| t.end_time >= horizon)
            .any(|t| cover.covers(t, &candidate));
        if covered {
            trace!(
                travel = %candidate.id,
                end_time = candidate.end_time,
                cost = candidate.cost,
                "travel covered by frontier"
            );
            return Ok(false);
        }

        while let Some(tail) = self.travels.last() {
            if !cover.covers(&candidate, tail) {
                break;
            }
            trace!(evicted = %tail.id, by = %candidate.id, "travel evicted from frontier");
            self.travels.pop();
        }

        self.travels.push(candidate);
        Ok(true)
    }
}

impl<'a> IntoIterator for &'a TravelFrontier {
    type Item = &'a FlightTravel;
    type IntoIter = std::slice::Iter<'a, FlightTravel>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Offer `candidate` to `frontier`; see [`TravelFrontier::push`].
pub fn push_travel(
    frontier: &mut TravelFrontier,
    candidate: FlightTravel,
    cover: &TravelCoverSettings,
) -> Result<bool, SearchError> {
    frontier.push(candidate, cover)
}
