//! Round-trip search.
//!
//! The search runs two sweeps over the same flights. The outbound sweep
//! starts chains at the origin and prices where they end; the return sweep
//! continues those chains, scoring the stay before the first flight back.
//! The surviving travels of both sweeps are then traced back to the origin
//! and renumbered into a compact, self-contained graph.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::cost::score_diff;
use crate::domain::{CityId, DomainError, Flight, FlightTravel, TravelId};

use super::config::TravelSearchSettings;
use super::control::SearchControl;
use super::frontier::TravelFrontier;
use super::sweep::{Frontiers, extend_travels};

/// Error from itinerary search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// A flight failed validation
    #[error(transparent)]
    InvalidFlight(#[from] DomainError),

    /// A travel was offered to a frontier out of `end_time` order
    #[error("travel ending at {end_time} offered after travel ending at {tail_end_time}")]
    OutOfOrderTravel { end_time: f64, tail_end_time: f64 },

    /// A travel has a non-finite end time or cost
    #[error("travel {travel} has a non-finite end time or cost")]
    NonFiniteTravel { travel: TravelId },

    /// A travel refers to a predecessor that is missing or not earlier
    #[error("travel {travel} refers to missing predecessor {missing}")]
    DanglingTravel { travel: TravelId, missing: TravelId },

    /// The stop flag was raised
    #[error("search interrupted")]
    Interrupted,

    /// The deadline passed
    #[error("search timed out")]
    Timeout,
}

/// Find the best round trips from `start_city` leaving no earlier than
/// `start_time`.
///
/// `city_costs` biases the outbound destinations; cities without an entry
/// cost nothing. Returns the travels of every selected chain, renumbered so
/// that each travel's id is its position and predecessors come first.
/// No feasible trip yields an empty list.
pub fn find_best_single_trip(
    start_city: CityId,
    start_time: f64,
    flights: &[Flight],
    settings: &TravelSearchSettings,
    city_costs: &BTreeMap<CityId, f64>,
) -> Result<Vec<FlightTravel>, SearchError> {
    find_best_single_trip_with_control(
        start_city,
        start_time,
        flights,
        settings,
        city_costs,
        &SearchControl::new(),
    )
}

/// [`find_best_single_trip`], polling `control` between flights.
pub fn find_best_single_trip_with_control(
    start_city: CityId,
    start_time: f64,
    flights: &[Flight],
    settings: &TravelSearchSettings,
    city_costs: &BTreeMap<CityId, f64>,
    control: &SearchControl<'_>,
) -> Result<Vec<FlightTravel>, SearchError> {
    for flight in flights {
        flight.validate()?;
    }
    let flights: Vec<Flight> = flights
        .iter()
        .filter(|f| f.start_time >= start_time)
        .copied()
        .collect();

    let mut next_id = TravelId(0);
    let mut all_travels = BTreeMap::new();

    let outbound = extend_travels(
        &Frontiers::new(),
        &flights,
        &settings.outbound_extend_settings(),
        &mut next_id,
        &BTreeSet::from([start_city]),
        control,
    )?;
    for mut travel in outbound.created_travels {
        travel.cost += city_costs.get(&travel.end_vertex).copied().unwrap_or(0.0);
        travel.cost += score_diff(&settings.start_out_day_time, travel.day_end_time);
        all_travels.insert(travel.id, travel);
    }

    let destinations: Frontiers = outbound
        .frontiers
        .iter()
        .map(|(&city, frontier)| {
            let priced = frontier
                .iter()
                .filter_map(|t| all_travels.get(&t.id).copied())
                .collect();
            (city, TravelFrontier::from_travels(priced))
        })
        .collect();

    let inbound = extend_travels(
        &destinations,
        &flights,
        &settings.return_extend_settings(),
        &mut next_id,
        &BTreeSet::new(),
        control,
    )?;
    let inbound_created = inbound.created_travels.len();
    for mut travel in inbound.created_travels {
        travel.cost += score_diff(&settings.end_out_day_time, travel.day_end_time);
        all_travels.insert(travel.id, travel);
    }

    let selected = destinations
        .values()
        .chain(inbound.frontiers.values())
        .flat_map(|frontier| frontier.iter().map(|t| t.id));
    let used = select_used_travels(&all_travels, selected);

    let mut travels: Vec<FlightTravel> = used
        .iter()
        .filter_map(|id| all_travels.get(id).copied())
        .collect();
    normalize_travel_ids(&mut travels)?;

    debug!(
        start = %start_city,
        flights = flights.len(),
        outbound = all_travels.len() - inbound_created,
        inbound = inbound_created,
        selected = travels.len(),
        "trip search complete"
    );
    Ok(travels)
}

/// Ids of every travel on a chain ending at one of `selected`.
///
/// Chains are followed through `last_travel` until the root or an id
/// missing from `all_travels`. Shared prefixes are walked once.
pub fn select_used_travels(
    all_travels: &BTreeMap<TravelId, FlightTravel>,
    selected: impl IntoIterator<Item = TravelId>,
) -> BTreeSet<TravelId> {
    let mut used = BTreeSet::new();
    for id in selected {
        let mut current = all_travels.get(&id);
        while let Some(travel) = current {
            if !used.insert(travel.id) {
                break;
            }
            current = travel.last_travel.and_then(|prev| all_travels.get(&prev));
        }
    }
    used
}

/// Renumber `travels` to `0..n` in ascending order of their current ids,
/// rewriting every `last_travel` to match.
///
/// Every predecessor must be present. On error the travels are left
/// sorted but only partly renumbered.
pub fn normalize_travel_ids(travels: &mut [FlightTravel]) -> Result<(), SearchError> {
    travels.sort_by_key(|t| t.id);

    let mut renumbered = BTreeMap::new();
    for (pos, travel) in travels.iter_mut().enumerate() {
        if let Some(prev) = travel.last_travel {
            let mapped = renumbered
                .get(&prev)
                .copied()
                .ok_or(SearchError::DanglingTravel {
                    travel: travel.id,
                    missing: prev,
                })?;
            travel.last_travel = Some(mapped);
        }
        renumbered.insert(travel.id, TravelId(pos));
        travel.id = TravelId(pos);
    }
    Ok(())
}
