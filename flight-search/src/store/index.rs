//! Sorted flight index for window queries.
//!
//! Flights are kept sorted by `(src, dst, arrival)` so that all flights of a
//! city pair form one contiguous run, and a time window inside that run is
//! found with two binary searches.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::domain::{CityId, Flight};

use super::StoreError;

fn compare_by_route(a: &Flight, b: &Flight) -> Ordering {
    a.src
        .cmp(&b.src)
        .then(a.dst.cmp(&b.dst))
        .then(a.arrival_time().total_cmp(&b.arrival_time()))
}

/// All known flights, queryable by city pair and arrival window.
#[derive(Debug, Clone, Default)]
pub struct FlightIndex {
    flights: Vec<Flight>,
    sorted: bool,
}

impl FlightIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unsorted index holding `flights`.
    pub fn from_flights(flights: Vec<Flight>) -> Self {
        Self {
            flights,
            sorted: false,
        }
    }

    /// Add a flight. The index must be re-sorted before the next query.
    pub fn push_flight(&mut self, flight: Flight) {
        self.sorted = false;
        self.flights.push(flight);
    }

    /// Sort the flights for querying. No-op if already sorted.
    pub fn sort_flights(&mut self) {
        if !self.sorted {
            self.flights.sort_by(compare_by_route);
            self.sorted = true;
        }
    }

    /// Returns true if queries are allowed.
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Number of flights.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Returns true if the index holds no flights.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// All flights, in index order.
    pub fn flights(&self) -> &[Flight] {
        &self.flights
    }

    /// Select flights from any city in `sources` to any city in
    /// `destinations` arriving within `[start_time, end_time]`.
    ///
    /// The result is grouped by city pair and is not time-ordered overall.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unsorted`] if flights were added since the last
    /// [`sort_flights`](Self::sort_flights).
    pub fn select_flights(
        &self,
        sources: &BTreeSet<CityId>,
        destinations: &BTreeSet<CityId>,
        start_time: f64,
        end_time: f64,
    ) -> Result<Vec<Flight>, StoreError> {
        if !self.sorted {
            return Err(StoreError::Unsorted);
        }

        let mut out = Vec::new();
        for &src in sources {
            for &dst in destinations {
                let route_key = |f: &Flight| (f.src, f.dst);
                let begin = self.flights.partition_point(|f| {
                    route_key(f) < (src, dst)
                        || (route_key(f) == (src, dst) && f.arrival_time() < start_time)
                });
                let end = self.flights.partition_point(|f| {
                    route_key(f) < (src, dst)
                        || (route_key(f) == (src, dst) && f.arrival_time() <= end_time)
                });
                if begin < end {
                    out.extend_from_slice(&self.flights[begin..end]);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightId;

    fn flight(id: u64, src: u32, dst: u32, start: f64, duration: f64) -> Flight {
        Flight::new(FlightId(id), CityId(src), CityId(dst), start, duration, 10.0)
    }

    fn cities(ids: &[u32]) -> BTreeSet<CityId> {
        ids.iter().map(|&c| CityId(c)).collect()
    }

    fn ids(flights: &[Flight]) -> Vec<u64> {
        let mut ids: Vec<u64> = flights.iter().map(|f| f.id.0).collect();
        ids.sort();
        ids
    }

    fn sample_index() -> FlightIndex {
        let mut index = FlightIndex::new();
        index.push_flight(flight(0, 0, 1, 0.5, 0.25));
        index.push_flight(flight(1, 0, 1, 1.5, 0.25));
        index.push_flight(flight(2, 1, 0, 2.5, 0.15));
        index.push_flight(flight(3, 1, 0, 3.5, 0.2));
        index.push_flight(flight(4, 0, 2, 1.0, 0.1));
        index.sort_flights();
        index
    }

    #[test]
    fn unsorted_index_rejects_queries() {
        let mut index = sample_index();
        index.push_flight(flight(9, 2, 0, 4.0, 0.1));
        assert!(!index.is_sorted());
        let result = index.select_flights(&cities(&[0]), &cities(&[1]), 0.0, 10.0);
        assert!(matches!(result, Err(StoreError::Unsorted)));
    }

    #[test]
    fn selects_by_route() {
        let index = sample_index();
        let out = index
            .select_flights(&cities(&[0]), &cities(&[1]), 0.0, 100.0)
            .unwrap();
        assert_eq!(ids(&out), vec![0, 1]);
    }

    #[test]
    fn selects_all_pairs_of_sets() {
        let index = sample_index();
        let out = index
            .select_flights(&cities(&[0, 1]), &cities(&[0, 1]), 0.0, 100.0)
            .unwrap();
        assert_eq!(ids(&out), vec![0, 1, 2, 3]);
    }

    #[test]
    fn window_is_inclusive_on_arrival() {
        let index = sample_index();
        // flight 0 arrives 0.75, flight 1 arrives 1.75
        let out = index
            .select_flights(&cities(&[0]), &cities(&[1]), 0.75, 1.75)
            .unwrap();
        assert_eq!(ids(&out), vec![0, 1]);

        let out = index
            .select_flights(&cities(&[0]), &cities(&[1]), 0.76, 1.74)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn unknown_cities_select_nothing() {
        let index = sample_index();
        let out = index
            .select_flights(&cities(&[7]), &cities(&[0, 1]), 0.0, 100.0)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn sorting_is_idempotent() {
        let mut index = sample_index();
        let before = index.flights().to_vec();
        index.sort_flights();
        assert_eq!(index.flights(), before.as_slice());
        assert_eq!(index.len(), 5);
        assert!(!index.is_empty());
    }
}
