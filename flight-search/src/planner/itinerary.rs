//! Itineraries reconstructed from a normalized travel graph.

use std::cmp::Ordering;

use crate::domain::{CityId, FlightId, FlightTravel};

use super::search::SearchError;

/// One chain of travels, from the flight leaving the origin to the last.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    legs: Vec<FlightTravel>,
}

impl Itinerary {
    /// Travels of the chain, root first.
    pub fn legs(&self) -> &[FlightTravel] {
        &self.legs
    }

    /// Accumulated cost of the whole chain.
    pub fn cost(&self) -> f64 {
        self.last().map_or(0.0, |t| t.cost)
    }

    /// Flights in travel order.
    pub fn flights(&self) -> Vec<FlightId> {
        self.legs.iter().map(|t| t.last_flight).collect()
    }

    pub fn flights_count(&self) -> usize {
        self.legs.len()
    }

    /// Arrival at the final city.
    pub fn arrival_time(&self) -> f64 {
        self.last().map_or(0.0, |t| t.end_time)
    }

    pub fn end_city(&self) -> Option<CityId> {
        self.last().map(|t| t.end_vertex)
    }

    /// Returns true if the itinerary flies out and back to `start_city`.
    ///
    /// Every chain of a search starts at its origin, so this only checks
    /// where it ends.
    pub fn is_round_trip(&self, start_city: CityId) -> bool {
        self.legs.len() > 1 && self.end_city() == Some(start_city)
    }

    fn last(&self) -> Option<&FlightTravel> {
        self.legs.last()
    }
}

/// Rebuild the itinerary ending at every travel of a normalized graph.
///
/// `travels` must be as produced by the search: each id equal to its
/// position, predecessors first.
pub fn collect_itineraries(travels: &[FlightTravel]) -> Result<Vec<Itinerary>, SearchError> {
    travels
        .iter()
        .map(|travel| {
            let mut legs = vec![*travel];
            let mut current = *travel;
            while let Some(prev) = current.last_travel {
                let dangling = SearchError::DanglingTravel {
                    travel: current.id,
                    missing: prev,
                };
                if prev >= current.id {
                    return Err(dangling);
                }
                current = *travels.get(prev.0).ok_or(dangling)?;
                legs.push(current);
            }
            legs.reverse();
            Ok(Itinerary { legs })
        })
        .collect()
}

/// Rank itineraries by preference.
///
/// Itineraries are ranked by:
/// 1. Cost (cheaper is better)
/// 2. Arrival time (earlier is better)
/// 3. Number of flights (fewer is better)
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by(|a, b| {
        let cost_cmp = a.cost().total_cmp(&b.cost());
        if cost_cmp != Ordering::Equal {
            return cost_cmp;
        }

        let arr_cmp = a.arrival_time().total_cmp(&b.arrival_time());
        if arr_cmp != Ordering::Equal {
            return arr_cmp;
        }

        a.flights_count().cmp(&b.flights_count())
    });

    itineraries
}

/// The best-ranked itinerary that returns to `start_city`.
pub fn best_round_trip(
    travels: &[FlightTravel],
    start_city: CityId,
) -> Result<Option<Itinerary>, SearchError> {
    let round_trips = collect_itineraries(travels)?
        .into_iter()
        .filter(|i| i.is_round_trip(start_city))
        .collect();
    Ok(rank_itineraries(round_trips).into_iter().next())
}
