//! Extending travels by one flight.
//!
//! A travel is extended by pricing the flight on top of the chain: its fare,
//! the calendar days it spans, the connection, and how well the flight fits
//! the traveller's preferences. `extend_best_travel` picks the cheapest
//! predecessor for a flight from a frontier sorted by arrival.

use crate::cost::{DayScorer, DiffCostSettings, compute_days_cost, score_diff};
use crate::domain::{Flight, FlightTravel, TravelId};

/// Cost of a travel that could not be extended.
pub const INFEASIBLE_COST: f64 = 1e9;

/// Extensions at or above this cost are treated as infeasible.
pub const FEASIBLE_COST_LIMIT: f64 = 1e8;

/// Scoring terms applied when a flight extends a travel.
#[derive(Debug, Clone, Copy)]
pub struct ExtendScoring<'a> {
    pub day_scorer: &'a DayScorer,
    /// Flat cost of the connection.
    pub move_cost: f64,
    /// Preferred wait between landing and the next departure.
    pub wait_time: DiffCostSettings,
    /// Preferred local departure time of the flight.
    pub flight_start: DiffCostSettings,
    pub flight_duration: DiffCostSettings,
}

/// Extend `travel` with `flight`.
///
/// The caller guarantees that `travel` ends at `flight.src` no later than
/// the flight departs. The returned travel has a placeholder id; the sweep
/// assigns the real one once the frontier accepts it.
pub fn extend_travel(travel: &FlightTravel, flight: &Flight, scoring: &ExtendScoring) -> FlightTravel {
    let continuous = travel.flights_count != 0;
    let mut cost = travel.cost
        + flight.cost
        + compute_days_cost(
            scoring.day_scorer,
            travel.end_time,
            flight.arrival_time(),
            continuous,
        );
    if continuous {
        cost += scoring.move_cost
            + score_diff(&scoring.wait_time, flight.start_time - travel.end_time);
    }
    cost += score_diff(&scoring.flight_start, flight.day_start_time);
    cost += score_diff(&scoring.flight_duration, flight.duration);

    FlightTravel {
        id: TravelId(0),
        last_flight: flight.id,
        last_travel: Some(travel.id),
        flights_count: travel.flights_count + 1,
        end_time: flight.arrival_time(),
        day_end_time: flight.day_end_time,
        cost,
        end_vertex: flight.dst,
    }
}

/// Travel consisting of `flight` alone, leaving the trip origin.
pub fn start_travel(
    flight: &Flight,
    start_scoring: &DiffCostSettings,
    duration_scoring: &DiffCostSettings,
) -> FlightTravel {
    let cost = flight.cost
        + score_diff(start_scoring, flight.day_start_time)
        + score_diff(duration_scoring, flight.duration);

    FlightTravel {
        id: TravelId(0),
        last_flight: flight.id,
        last_travel: None,
        flights_count: 1,
        end_time: flight.arrival_time(),
        day_end_time: flight.day_end_time,
        cost,
        end_vertex: flight.dst,
    }
}

/// Cheapest extension of a travel in `frontier` by `flight`.
///
/// `frontier` must be sorted by `end_time`. Only predecessors landing within
/// `search_interval` of the preferred wait before departure are priced; when
/// that window holds fewer than `min_check` travels, it is widened backwards
/// to the last `min_check` travels ending before its upper edge.
///
/// Returns `None` when no predecessor can connect, or when the best
/// extension is no cheaper than [`FEASIBLE_COST_LIMIT`].
pub fn extend_best_travel(
    frontier: &[FlightTravel],
    flight: &Flight,
    search_interval: f64,
    min_check: usize,
    scoring: &ExtendScoring,
) -> Option<FlightTravel> {
    let desired = scoring.wait_time.desired_value;
    let window_start = flight.start_time - desired - search_interval;
    let window_end = (flight.start_time - desired + search_interval).min(flight.start_time);

    let end = frontier.partition_point(|t| t.end_time <= window_end);
    let mut begin = frontier.partition_point(|t| t.end_time < window_start).min(end);
    if end - begin < min_check {
        begin = end.saturating_sub(min_check);
    }

    let mut best: Option<FlightTravel> = None;
    for travel in &frontier[begin..end] {
        if travel.end_vertex != flight.src || travel.end_time > flight.start_time {
            continue;
        }
        let candidate = extend_travel(travel, flight, scoring);
        if candidate.cost < best.map_or(INFEASIBLE_COST, |b| b.cost) {
            best = Some(candidate);
        }
    }

    best.filter(|t| t.cost < FEASIBLE_COST_LIMIT)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::{CityId, FlightId};
    use proptest::prelude::*;

    proptest! {
        /// The chosen predecessor is at the departure city and has landed.
        #[test]
        fn predecessor_is_reachable(
            entries in prop::collection::vec((0u32..40, 0u32..2, 0u32..50), 0..20),
            start in 0u32..40,
            interval in 0u32..10,
            min_check in 0usize..10,
        ) {
            let mut entries = entries;
            entries.sort_by_key(|e| e.0);
            let frontier: Vec<FlightTravel> = entries
                .iter()
                .enumerate()
                .map(|(i, &(end, vertex, cost))| FlightTravel {
                    id: TravelId(i),
                    last_flight: FlightId(0),
                    last_travel: None,
                    flights_count: 1,
                    end_time: f64::from(end),
                    day_end_time: 0.0,
                    cost: f64::from(cost),
                    end_vertex: CityId(vertex),
                })
                .collect();
            let scorer = DayScorer::flat();
            let scoring = ExtendScoring {
                day_scorer: &scorer,
                move_cost: 1.0,
                wait_time: DiffCostSettings::new(2.0, 1.0, 1.0),
                flight_start: DiffCostSettings::zero(),
                flight_duration: DiffCostSettings::zero(),
            };
            let flight = Flight::new(FlightId(1), CityId(0), CityId(1), f64::from(start), 1.0, 1.0);

            if let Some(best) = extend_best_travel(&frontier, &flight, f64::from(interval), min_check, &scoring) {
                let prev = best.last_travel.and_then(|id| frontier.get(id.0));
                prop_assert!(prev.is_some());
                if let Some(prev) = prev {
                    prop_assert_eq!(prev.end_vertex, flight.src);
                    prop_assert!(prev.end_time <= flight.start_time);
                }
                prop_assert_eq!(best.end_vertex, flight.dst);
            }
        }
    }
}
